//! Outline renderer: strokes the four neighbors of every solid sprite
//! pixel instead of the pixel itself.
//!
//! Strokes never go through bounds checks per write. Instead each row
//! carries a base neighbor mask with off-surface directions removed, and
//! rows touching the left or right surface edge additionally prune the
//! mask per column. A sprite strictly inside the surface horizontally
//! takes the unpruned path.

use bitflags::bitflags;

use crate::decode::{Codec, Command};
use crate::render::clip::{
    advance_after_row, calculate_clip_x, skip_rest_of_line_with_overrun, ClipX, RenderSrc,
    SkipSize,
};
use crate::sprite::Sprite;
use crate::surface::{Point, Surface};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct Neighbors: u8 {
        const NORTH = 1;
        const WEST = 2;
        const SOUTH = 4;
        const EAST = 8;
    }
}

/// Base mask for a row at `y`, keeping only directions that land on the
/// surface. Rows at `y == dst_height` and `y == -1` sit just off-surface
/// and can still stroke the one direction pointing back in.
fn row_base(y: i32, dst_height: i32) -> Neighbors {
    let mut base = Neighbors::all();
    if y >= dst_height {
        base &= Neighbors::NORTH;
    } else if y == dst_height - 1 {
        base -= Neighbors::SOUTH;
    }
    if y <= -1 {
        base &= Neighbors::SOUTH;
    } else if y == 0 {
        base -= Neighbors::NORTH;
    }
    base
}

/// Prunes `base` for a column near the left or right surface edge.
/// Columns at `x == -1` and `x == out_w` are off-surface themselves and
/// only stroke sideways back onto the surface.
fn column_mask(base: Neighbors, check_first: bool, check_last: bool, x: i32, out_w: i32) -> Neighbors {
    let mut mask = base;
    if check_first {
        if x == -1 {
            mask &= Neighbors::EAST;
        } else if x == 0 {
            mask -= Neighbors::WEST;
        }
    }
    if check_last {
        if x == out_w {
            mask &= Neighbors::WEST;
        } else if x == out_w - 1 {
            mask -= Neighbors::EAST;
        }
    }
    mask
}

#[inline(always)]
fn stroke(out: &mut Surface<'_>, x: i32, y: i32, mask: Neighbors, color: u8) {
    let pitch = out.pitch() as isize;
    let i = out.index(Point::new(x, y));
    if mask.contains(Neighbors::NORTH) {
        out.put_index(i - pitch, color);
    }
    if mask.contains(Neighbors::WEST) {
        out.put_index(i - 1, color);
    }
    if mask.contains(Neighbors::EAST) {
        out.put_index(i + 1, color);
    }
    if mask.contains(Neighbors::SOUTH) {
        out.put_index(i + pitch, color);
    }
}

struct OutlineRowArgs {
    clip: ClipX,
    x_offset: i32,
    base: Neighbors,
    check_first: bool,
    check_last: bool,
    skip_zero: bool,
    color: u8,
}

/// Strokes one row. `position.x` is the surface column of the clip
/// window's left edge; `args.x_offset` is the carried overrun into the
/// full-width row. Returns the advance to the next encoded row.
fn outline_row<C: Codec>(
    out: &mut Surface<'_>,
    position: Point,
    src: &mut RenderSrc<'_>,
    args: &OutlineRowArgs,
) -> SkipSize {
    let width = src.width;
    let out_w = out.w();
    let vis_from = args.clip.left;
    let vis_to = args.clip.left + args.clip.width;
    let mut cur = args.x_offset;
    while cur < width {
        let decoded = C::command(src.rest());
        src.pos += decoded.size;
        let start = cur;
        cur += decoded.command.length() as i32;
        let begin = i32::max(start, vis_from);
        let end = i32::min(cur, vis_to);
        if end <= begin {
            continue;
        }
        match decoded.command {
            Command::Transparent { .. } => {}
            Command::Fill { color: fill, .. } => {
                if args.skip_zero && fill == 0 {
                    continue;
                }
                for fx in begin..end {
                    let x = position.x + (fx - vis_from);
                    let mask = column_mask(args.base, args.check_first, args.check_last, x, out_w);
                    stroke(out, x, position.y, mask, args.color);
                }
            }
            Command::Pixels { colors } => {
                for fx in begin..end {
                    if args.skip_zero && colors[(fx - start) as usize] == 0 {
                        continue;
                    }
                    let x = position.x + (fx - vis_from);
                    let mask = column_mask(args.base, args.check_first, args.check_last, x, out_w);
                    stroke(out, x, position.y, mask, args.color);
                }
            }
        }
    }
    advance_after_row(width - cur, width)
}

fn outline_rows<C: Codec>(
    out: &mut Surface<'_>,
    mut position: Point,
    src: &mut RenderSrc<'_>,
    clip: ClipX,
    check_first: bool,
    check_last: bool,
    skip_zero: bool,
    color: u8,
) {
    let dst_height = out.h();
    let mut x_offset = 0;
    // Rows above `dst_height` cannot stroke anything on-surface.
    while position.y > dst_height && !src.done() {
        let skip = skip_rest_of_line_with_overrun::<C>(
            src,
            SkipSize { whole_lines: 0, x_offset },
        );
        position.y -= skip.whole_lines;
        x_offset = skip.x_offset;
    }
    while position.y >= -1 && !src.done() {
        let args = OutlineRowArgs {
            clip,
            x_offset,
            base: row_base(position.y, dst_height),
            check_first,
            check_last,
            skip_zero,
            color,
        };
        let skip = outline_row::<C>(out, position, src, &args);
        position.y -= skip.whole_lines;
        x_offset = skip.x_offset;
    }
}

fn outline_clip_y<C: Codec>(
    out: &mut Surface<'_>,
    position: Point,
    src: &mut RenderSrc<'_>,
    skip_zero: bool,
    color: u8,
) {
    let clip = ClipX { left: 0, right: 0, width: src.width };
    outline_rows::<C>(out, position, src, clip, false, false, skip_zero, color);
}

fn outline_clip_xy<C: Codec>(
    out: &mut Surface<'_>,
    mut position: Point,
    src: &mut RenderSrc<'_>,
    skip_zero: bool,
    color: u8,
) {
    let mut clip = calculate_clip_x(position.x, src.width, out.w());
    if clip.width < 0 {
        return;
    }
    // Widen by one column on a clipped side so strokes reaching back
    // onto the surface from just outside still happen.
    if clip.left > 0 {
        clip.left -= 1;
        clip.width += 1;
    } else if clip.right > 0 {
        clip.right -= 1;
        clip.width += 1;
    }
    position.x += clip.left;
    // Both checks can apply at once when the sprite overhangs both
    // surface edges.
    let check_first = position.x <= 0;
    let check_last = position.x + clip.width >= out.w();
    outline_rows::<C>(out, position, src, clip, check_first, check_last, skip_zero, color);
}

/// Draws the outline of `sprite` with `position.y` as its bottom row.
pub(crate) fn render_outline<C: Codec>(
    out: &mut Surface<'_>,
    position: Point,
    sprite: &Sprite,
    color: u8,
    skip_zero: bool,
) {
    let mut src = RenderSrc { data: sprite.data(), pos: 0, width: sprite.width() };
    if position.x > 0 && position.x + sprite.width() < out.w() {
        outline_clip_y::<C>(out, position, &mut src, skip_zero, color);
    } else {
        outline_clip_xy::<C>(out, position, &mut src, skip_zero, color);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn row_base_interior_keeps_all() {
        assert_eq!(row_base(5, 10), Neighbors::all());
    }

    #[test]
    fn row_base_surface_edges() {
        assert_eq!(row_base(10, 10), Neighbors::NORTH);
        assert_eq!(row_base(9, 10), Neighbors::all() - Neighbors::SOUTH);
        assert_eq!(row_base(0, 10), Neighbors::all() - Neighbors::NORTH);
        assert_eq!(row_base(-1, 10), Neighbors::SOUTH);
    }

    #[test]
    fn row_base_single_line_surface() {
        assert_eq!(row_base(0, 1), Neighbors::WEST | Neighbors::EAST);
    }

    #[test]
    fn column_mask_edges() {
        let all = Neighbors::all();
        assert_eq!(column_mask(all, true, false, -1, 8), Neighbors::EAST);
        assert_eq!(column_mask(all, true, false, 0, 8), all - Neighbors::WEST);
        assert_eq!(column_mask(all, false, true, 7, 8), all - Neighbors::EAST);
        assert_eq!(column_mask(all, false, true, 8, 8), Neighbors::WEST);
        assert_eq!(column_mask(all, false, false, 0, 8), all);
    }

    #[test]
    fn column_mask_applies_both_checks() {
        let all = Neighbors::all();
        // Single-column surface: both edge checks prune the same column.
        assert_eq!(column_mask(all, true, true, 0, 1), Neighbors::NORTH | Neighbors::SOUTH);
        assert_eq!(column_mask(all, true, true, -1, 1), Neighbors::EAST);
        assert_eq!(column_mask(all, true, true, 1, 1), Neighbors::WEST);
        // Wider surface with overhang on both sides.
        assert_eq!(column_mask(all, true, true, 4, 5), all - Neighbors::EAST);
    }
}
