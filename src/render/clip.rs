//! Clip window and command-stream skip arithmetic.
//!
//! Rows are stored bottom first and transparent runs may cross row
//! boundaries, so skipping works in terms of an overrun carried from one
//! row into the next.

use crate::decode::Codec;

/// Horizontal clip window of a draw call against the surface edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ClipX {
    pub left: i32,
    pub right: i32,
    pub width: i32,
}

pub(crate) fn calculate_clip_x(x: i32, sprite_width: i32, surface_width: i32) -> ClipX {
    let left = i32::max(0, -x);
    let right = i32::max(0, x + sprite_width - surface_width);
    ClipX { left, right, width: sprite_width - left - right }
}

/// Carry between rows: how many whole rows the cursor moved and how far
/// into the next row it already sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SkipSize {
    pub whole_lines: i32,
    pub x_offset: i32,
}

pub(crate) fn skip_size(overrun: i32, width: i32) -> SkipSize {
    SkipSize { whole_lines: overrun / width, x_offset: overrun % width }
}

/// Row advance after consuming a row with `remaining` width unaccounted.
/// Zero remaining moves to the next row; negative means the final
/// transparent run overran into later rows.
pub(crate) fn advance_after_row(remaining: i32, width: i32) -> SkipSize {
    if remaining == 0 {
        SkipSize { whole_lines: 1, x_offset: 0 }
    } else {
        let mut skip = skip_size(-remaining, width);
        skip.whole_lines += 1;
        skip
    }
}

/// Cursor over a sprite's command stream during a draw.
pub(crate) struct RenderSrc<'a> {
    pub data: &'a [u8],
    pub pos: usize,
    pub width: i32,
}

impl<'a> RenderSrc<'a> {
    #[inline(always)]
    pub fn done(&self) -> bool {
        self.pos >= self.data.len()
    }

    #[inline(always)]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

/// Consumes commands until the current row is exhausted, starting
/// `skip.x_offset` pixels into it. Returns the advance to apply.
pub(crate) fn skip_rest_of_line_with_overrun<C: Codec>(
    src: &mut RenderSrc<'_>,
    skip: SkipSize,
) -> SkipSize {
    let mut remaining = src.width - skip.x_offset;
    while remaining > 0 {
        let decoded = C::command(src.rest());
        src.pos += decoded.size;
        remaining -= decoded.command.length() as i32;
    }
    advance_after_row(remaining, src.width)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::decode::UnifiedCodec;

    #[test]
    fn clip_x_unclipped() {
        let clip = calculate_clip_x(3, 8, 20);
        assert_eq!(clip, ClipX { left: 0, right: 0, width: 8 });
    }

    #[test]
    fn clip_x_both_sides() {
        let clip = calculate_clip_x(-2, 8, 4);
        assert_eq!(clip, ClipX { left: 2, right: 2, width: 4 });
    }

    #[test]
    fn clip_x_fully_off_surface() {
        assert!(calculate_clip_x(-8, 8, 20).width <= 0);
        assert!(calculate_clip_x(20, 8, 20).width <= 0);
    }

    #[test]
    fn advance_after_exact_row() {
        assert_eq!(advance_after_row(0, 4), SkipSize { whole_lines: 1, x_offset: 0 });
    }

    #[test]
    fn advance_after_overrun() {
        // A run that ends a width-4 row and spills 6 pixels lands 2 rows
        // up, 2 pixels in.
        assert_eq!(advance_after_row(-6, 4), SkipSize { whole_lines: 2, x_offset: 2 });
        assert_eq!(advance_after_row(-4, 4), SkipSize { whole_lines: 2, x_offset: 0 });
        assert_eq!(advance_after_row(-1, 4), SkipSize { whole_lines: 1, x_offset: 1 });
    }

    #[test]
    fn skip_line_carries_overrun() {
        // Width 4: fill of 2, then a transparent run of 8 crossing two
        // full rows.
        let data = [0xBD, 7, 0x08];
        let mut src = RenderSrc { data: &data, pos: 0, width: 4 };
        let skip = skip_rest_of_line_with_overrun::<UnifiedCodec>(&mut src, SkipSize::default());
        assert_eq!(skip, SkipSize { whole_lines: 2, x_offset: 2 });
        assert!(src.done());
    }
}
