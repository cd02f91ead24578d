//! Frame-scoped draw settings.
//!
//! The light level and transparency toggle change at most a few times
//! per frame, so they live in an explicit context passed to the
//! convenience draw calls instead of process-wide state.

use crate::palette::{BlendTable, PaletteMap};
use crate::render::{draw, draw_blended, draw_blended_with_map, draw_with_map};
use crate::sprite::Sprite;
use crate::surface::{Point, Surface};

pub struct DrawContext<'a> {
    light_maps: &'a [PaletteMap],
    light_index: usize,
    blend: &'a BlendTable,
    transparency: bool,
}

impl<'a> DrawContext<'a> {
    /// `light_maps[0]` must be the identity map; it is skipped entirely
    /// on the full-bright path.
    pub fn new(light_maps: &'a [PaletteMap], blend: &'a BlendTable) -> Self {
        debug_assert!(!light_maps.is_empty());
        Self { light_maps, light_index: 0, blend, transparency: false }
    }

    pub fn light_index(&self) -> usize {
        self.light_index
    }

    pub fn set_light_index(&mut self, index: usize) {
        debug_assert!(index < self.light_maps.len());
        self.light_index = index;
    }

    pub fn light_levels(&self) -> usize {
        self.light_maps.len()
    }

    pub fn transparency(&self) -> bool {
        self.transparency
    }

    pub fn set_transparency(&mut self, enabled: bool) {
        self.transparency = enabled;
    }

    pub fn light_map(&self) -> &'a PaletteMap {
        &self.light_maps[self.light_index]
    }

    /// Draws at the current light level.
    pub fn draw(&self, out: &mut Surface<'_>, position: Point, sprite: &Sprite) {
        if self.light_index == 0 {
            draw(out, position, sprite);
        } else {
            draw_with_map(out, position, sprite, self.light_map());
        }
    }

    /// Translucent draw when transparency is enabled, a plain lit draw
    /// otherwise.
    pub fn draw_translucent(&self, out: &mut Surface<'_>, position: Point, sprite: &Sprite) {
        if !self.transparency {
            self.draw(out, position, sprite);
        } else if self.light_index == 0 {
            draw_blended(out, position, sprite, self.blend);
        } else {
            draw_blended_with_map(out, position, sprite, self.blend, self.light_map());
        }
    }

    /// Draws at an explicit light level, ignoring the current one.
    pub fn draw_with_light(&self, out: &mut Surface<'_>, position: Point, sprite: &Sprite, level: usize) {
        let level = level.min(self.light_maps.len() - 1);
        if level == 0 {
            draw(out, position, sprite);
        } else {
            draw_with_map(out, position, sprite, &self.light_maps[level]);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::decode::SpriteFormat;
    use crate::encode::encode_sprite;
    use crate::palette::{identity_map, ramp_blend_table, ramp_light_map};

    fn light_maps() -> Vec<PaletteMap> {
        let mut maps = vec![identity_map()];
        maps.extend((1..4).map(|level| ramp_light_map(level, 4)));
        maps
    }

    #[test]
    fn draw_applies_current_light_level() {
        let maps = light_maps();
        let blend = ramp_blend_table();
        let mut ctx = DrawContext::new(&maps, &blend);
        let sprite = encode_sprite(SpriteFormat::Unified, 1, &[vec![Some(120)]]);

        let mut buf = vec![0u8; 1];
        ctx.draw(&mut Surface::new(&mut buf, 1, 1), Point::new(0, 0), &sprite);
        assert_eq!(buf, [120]);

        ctx.set_light_index(2);
        let mut buf = vec![0u8; 1];
        ctx.draw(&mut Surface::new(&mut buf, 1, 1), Point::new(0, 0), &sprite);
        assert_eq!(buf, [maps[2][120]]);
    }

    #[test]
    fn translucent_draw_blends_only_when_enabled() {
        let maps = light_maps();
        let blend = ramp_blend_table();
        let mut ctx = DrawContext::new(&maps, &blend);
        let sprite = encode_sprite(SpriteFormat::Unified, 1, &[vec![Some(100)]]);

        let mut buf = vec![60u8; 1];
        ctx.draw_translucent(&mut Surface::new(&mut buf, 1, 1), Point::new(0, 0), &sprite);
        assert_eq!(buf, [100]);

        ctx.set_transparency(true);
        let mut buf = vec![60u8; 1];
        ctx.draw_translucent(&mut Surface::new(&mut buf, 1, 1), Point::new(0, 0), &sprite);
        assert_eq!(buf, [80]);
    }

    #[test]
    fn explicit_light_level_overrides_current() {
        let maps = light_maps();
        let blend = ramp_blend_table();
        let ctx = DrawContext::new(&maps, &blend);
        let sprite = encode_sprite(SpriteFormat::Unified, 1, &[vec![Some(90)]]);

        let mut buf = vec![0u8; 1];
        ctx.draw_with_light(&mut Surface::new(&mut buf, 1, 1), Point::new(0, 0), &sprite, 3);
        assert_eq!(buf, [maps[3][90]]);

        // Out-of-range levels clamp to the darkest map.
        let mut buf = vec![0u8; 1];
        ctx.draw_with_light(&mut Surface::new(&mut buf, 1, 1), Point::new(0, 0), &sprite, 99);
        assert_eq!(buf, [maps[3][90]]);
    }
}
