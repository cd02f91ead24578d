//! Pixel-writing strategies.
//!
//! Each draw variant supplies one of these to the row renderer, which is
//! monomorphized over it. Strategies only ever see in-bounds destination
//! slices.

use crate::palette::{BlendTable, PaletteMap};

pub(crate) trait Blitter {
    /// Writes `dst.len()` copies of a single color.
    fn fill(&self, dst: &mut [u8], color: u8);
    /// Writes a verbatim pixel run. `src` and `dst` have equal length.
    fn pixels(&self, dst: &mut [u8], src: &[u8]);
}

pub(crate) struct BlitDirect;

impl Blitter for BlitDirect {
    #[inline(always)]
    fn fill(&self, dst: &mut [u8], color: u8) {
        dst.fill(color);
    }

    #[inline(always)]
    fn pixels(&self, dst: &mut [u8], src: &[u8]) {
        dst.copy_from_slice(src);
    }
}

pub(crate) struct BlitWithMap<'a> {
    pub map: &'a PaletteMap,
}

impl Blitter for BlitWithMap<'_> {
    #[inline(always)]
    fn fill(&self, dst: &mut [u8], color: u8) {
        dst.fill(self.map[color as usize]);
    }

    #[inline(always)]
    fn pixels(&self, dst: &mut [u8], src: &[u8]) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = self.map[*s as usize];
        }
    }
}

pub(crate) struct BlitBlended<'a> {
    pub blend: &'a BlendTable,
}

impl Blitter for BlitBlended<'_> {
    #[inline(always)]
    fn fill(&self, dst: &mut [u8], color: u8) {
        let row = &self.blend[color as usize];
        for d in dst.iter_mut() {
            *d = row[*d as usize];
        }
    }

    #[inline(always)]
    fn pixels(&self, dst: &mut [u8], src: &[u8]) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = self.blend[*s as usize][*d as usize];
        }
    }
}

/// Maps the source color first, then blends with the destination.
pub(crate) struct BlitBlendedWithMap<'a> {
    pub blend: &'a BlendTable,
    pub map: &'a PaletteMap,
}

impl Blitter for BlitBlendedWithMap<'_> {
    #[inline(always)]
    fn fill(&self, dst: &mut [u8], color: u8) {
        let row = &self.blend[self.map[color as usize] as usize];
        for d in dst.iter_mut() {
            *d = row[*d as usize];
        }
    }

    #[inline(always)]
    fn pixels(&self, dst: &mut [u8], src: &[u8]) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = self.blend[self.map[*s as usize] as usize][*d as usize];
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::palette::{ramp_blend_table, ramp_light_map};

    #[test]
    fn direct_fill_and_pixels() {
        let mut dst = [0u8; 3];
        BlitDirect.fill(&mut dst, 9);
        assert_eq!(dst, [9, 9, 9]);
        BlitDirect.pixels(&mut dst, &[1, 2, 3]);
        assert_eq!(dst, [1, 2, 3]);
    }

    #[test]
    fn map_translates_source_colors() {
        let map = ramp_light_map(8, 16);
        let blit = BlitWithMap { map: &map };
        let mut dst = [0u8; 2];
        blit.pixels(&mut dst, &[200, 100]);
        assert_eq!(dst, [map[200], map[100]]);
        blit.fill(&mut dst, 200);
        assert_eq!(dst, [map[200], map[200]]);
    }

    #[test]
    fn blend_reads_source_then_destination() {
        let blend = ramp_blend_table();
        let blit = BlitBlended { blend: &blend };
        let mut dst = [20u8, 40];
        blit.pixels(&mut dst, &[10, 10]);
        assert_eq!(dst, [15, 25]);
        blit.fill(&mut dst, 5);
        assert_eq!(dst, [10, 15]);
    }

    #[test]
    fn blend_with_map_translates_before_blending() {
        let blend = ramp_blend_table();
        let map = ramp_light_map(15, 16);
        let blit = BlitBlendedWithMap { blend: &blend, map: &map };
        let mut dst = [100u8];
        blit.fill(&mut dst, 200);
        // Color maps to 0, then averages with the destination.
        assert_eq!(dst, [50]);
    }
}
