//! Backward scanline renderer.
//!
//! Sprite rows are stored bottom first, so rendering walks the
//! destination upward from `position.y`: the destination cursor moves
//! back one pitch per row while the source stream is consumed forward.
//! Top clipping falls out of the `dst >= dst_begin` guard; bottom
//! clipping skips whole encoded rows before any pixel is written.

use crate::decode::{Codec, Command};
use crate::render::blit::Blitter;
use crate::render::clip::{
    advance_after_row, calculate_clip_x, skip_rest_of_line_with_overrun, skip_size, ClipX,
    RenderSrc, SkipSize,
};
use crate::sprite::Sprite;
use crate::surface::{Point, Surface};

/// Skips rows below the surface. Returns the horizontal overrun carried
/// into the first visible row.
fn skip_bottom_lines<C: Codec>(src: &mut RenderSrc<'_>, position: &mut Point, dst_height: i32) -> i32 {
    let mut skip = SkipSize::default();
    while position.y >= dst_height && !src.done() {
        skip = skip_rest_of_line_with_overrun::<C>(
            src,
            SkipSize { whole_lines: 0, x_offset: skip.x_offset },
        );
        position.y -= skip.whole_lines;
    }
    skip.x_offset
}

#[inline(always)]
fn blit_command<B: Blitter>(
    blitter: &B,
    out: &mut Surface<'_>,
    dst: isize,
    command: Command<'_>,
    src_skip: usize,
    len: usize,
) {
    match command {
        Command::Transparent { .. } => {}
        Command::Fill { color, .. } => blitter.fill(out.span_mut(dst, len), color),
        Command::Pixels { colors } => {
            blitter.pixels(out.span_mut(dst, len), &colors[src_skip..src_skip + len])
        }
    }
}

fn render_clip_y<C: Codec, B: Blitter>(
    out: &mut Surface<'_>,
    mut position: Point,
    src: &mut RenderSrc<'_>,
    blitter: &B,
) {
    let mut x_offset = skip_bottom_lines::<C>(src, &mut position, out.h());
    if src.done() {
        return;
    }

    let width = src.width;
    let pitch = out.pitch() as isize;
    let dst_begin = out.begin_index();
    let mut dst = out.index(position);
    while !src.done() && dst >= dst_begin {
        let mut remaining = width - x_offset;
        dst += x_offset as isize;
        while remaining > 0 {
            let decoded = C::command(src.rest());
            let len = decoded.command.length() as i32;
            blit_command(blitter, out, dst, decoded.command, 0, len as usize);
            src.pos += decoded.size;
            dst += len as isize;
            remaining -= len;
        }
        // `remaining <= 0`; the magnitude is how far the final transparent
        // run overran into rows above.
        let skip = advance_after_row(remaining, width);
        x_offset = skip.x_offset;
        dst -= skip.whole_lines as isize * pitch + (width - remaining) as isize;
    }
}

fn render_clip_xy<C: Codec, B: Blitter>(
    out: &mut Surface<'_>,
    mut position: Point,
    src: &mut RenderSrc<'_>,
    clip: ClipX,
    blitter: &B,
) {
    let mut x_offset = skip_bottom_lines::<C>(src, &mut position, out.h());
    if src.done() {
        return;
    }

    position.x += clip.left;
    let width = src.width;
    let pitch = out.pitch() as isize;
    let dst_begin = out.begin_index();
    let mut dst = out.index(position);
    while !src.done() && dst >= dst_begin {
        let mut remaining = clip.width;
        // A carried overrun may reach past the left clip into the window.
        let mut remaining_left_clip = clip.left - x_offset;
        if remaining_left_clip < 0 {
            dst += i32::min(remaining, -remaining_left_clip) as isize;
            remaining += remaining_left_clip;
        }
        while remaining_left_clip > 0 {
            let decoded = C::command(src.rest());
            let len = decoded.command.length() as i32;
            if len > remaining_left_clip {
                // Straddles the left edge: draw the visible tail.
                let overshoot = len - remaining_left_clip;
                let draw_len = i32::min(remaining, overshoot);
                blit_command(
                    blitter,
                    out,
                    dst,
                    decoded.command,
                    remaining_left_clip as usize,
                    draw_len as usize,
                );
                dst += draw_len as isize;
                remaining -= overshoot;
                src.pos += decoded.size;
                break;
            }
            src.pos += decoded.size;
            remaining_left_clip -= len;
        }
        while remaining > 0 {
            let decoded = C::command(src.rest());
            let unclipped = decoded.command.length() as i32;
            let draw_len = i32::min(remaining, unclipped);
            blit_command(blitter, out, dst, decoded.command, 0, draw_len as usize);
            src.pos += decoded.size;
            dst += draw_len as isize;
            // Negative afterwards when the run overran the window.
            remaining -= unclipped;
        }
        dst -= pitch + clip.width as isize;

        remaining += clip.right;
        let skip = if remaining > 0 {
            // Unconsumed pixels remain in the right-clipped part.
            let mut skip = skip_rest_of_line_with_overrun::<C>(
                src,
                SkipSize { whole_lines: 0, x_offset: width - remaining },
            );
            skip.whole_lines -= 1;
            skip
        } else if remaining < 0 {
            skip_size(-remaining, width)
        } else {
            SkipSize::default()
        };
        x_offset = skip.x_offset;
        dst -= pitch * skip.whole_lines as isize;
    }
}

/// Draws `sprite` with `position.y` as the bottom row of its destination.
pub(crate) fn render<C: Codec, B: Blitter>(
    out: &mut Surface<'_>,
    position: Point,
    sprite: &Sprite,
    blitter: &B,
) {
    if position.y < 0 || position.y + 1 >= out.h() + sprite.height() {
        return;
    }
    let clip = calculate_clip_x(position.x, sprite.width(), out.w());
    if clip.width <= 0 {
        return;
    }
    let mut src = RenderSrc { data: sprite.data(), pos: 0, width: sprite.width() };
    if clip.width == sprite.width() {
        render_clip_y::<C, B>(out, position, &mut src, blitter);
    } else {
        render_clip_xy::<C, B>(out, position, &mut src, clip, blitter);
    }
}
