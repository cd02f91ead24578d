//! Draw entry points.
//!
//! `position` names the surface coordinate of the sprite's bottom-left
//! pixel. Draws are fully clipped against every surface edge; a draw
//! with no visible pixels is a no-op.

pub(crate) mod blit;
pub(crate) mod clip;
mod outline;
mod scan;

use crate::decode::with_codec;
use crate::palette::{BlendTable, PaletteMap};
use crate::render::blit::{BlitBlended, BlitBlendedWithMap, BlitDirect, BlitWithMap};
use crate::sprite::Sprite;
use crate::surface::{Point, Surface};

pub fn draw(out: &mut Surface<'_>, position: Point, sprite: &Sprite) {
    with_codec!(sprite.format(), C => {
        scan::render::<C, _>(out, position, sprite, &BlitDirect)
    });
}

/// Draws with every source color translated through `map`.
pub fn draw_with_map(out: &mut Surface<'_>, position: Point, sprite: &Sprite, map: &PaletteMap) {
    with_codec!(sprite.format(), C => {
        scan::render::<C, _>(out, position, sprite, &BlitWithMap { map })
    });
}

/// Composites with the destination: `dst = blend[src][dst]`.
pub fn draw_blended(out: &mut Surface<'_>, position: Point, sprite: &Sprite, blend: &BlendTable) {
    with_codec!(sprite.format(), C => {
        scan::render::<C, _>(out, position, sprite, &BlitBlended { blend })
    });
}

/// Translates source colors through `map`, then composites.
pub fn draw_blended_with_map(
    out: &mut Surface<'_>,
    position: Point,
    sprite: &Sprite,
    blend: &BlendTable,
    map: &PaletteMap,
) {
    with_codec!(sprite.format(), C => {
        scan::render::<C, _>(out, position, sprite, &BlitBlendedWithMap { blend, map })
    });
}

/// Strokes `color` into the four neighbors of every opaque sprite pixel.
pub fn draw_outline(out: &mut Surface<'_>, position: Point, sprite: &Sprite, color: u8) {
    with_codec!(sprite.format(), C => {
        outline::render_outline::<C>(out, position, sprite, color, false)
    });
}

/// Like [`draw_outline`], but pixels of color 0 cast no outline.
pub fn draw_outline_skip_zero(out: &mut Surface<'_>, position: Point, sprite: &Sprite, color: u8) {
    with_codec!(sprite.format(), C => {
        outline::render_outline::<C>(out, position, sprite, color, true)
    });
}
