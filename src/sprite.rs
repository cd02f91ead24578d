//! Owned sprite data plus whole-stream queries.
//!
//! A sprite stores its rows bottom first; the first encoded row is the
//! bottom of the image. Queries walk the command stream directly so no
//! decoded pixel buffer is ever materialized.

use crate::decode::{with_codec, Codec, Command, SpriteFormat, FILL_MAX, OPAQUE_MIN};
use crate::palette::PaletteMap;
use crate::render::clip::{skip_rest_of_line_with_overrun, RenderSrc, SkipSize};
use crate::surface::Point;

pub struct Sprite {
    format: SpriteFormat,
    width: u16,
    height: u16,
    data: Vec<u8>,
}

impl Sprite {
    pub fn new(format: SpriteFormat, width: u16, height: u16, data: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self { format, width, height, data }
    }

    pub fn format(&self) -> SpriteFormat {
        self.format
    }

    pub fn width(&self) -> i32 {
        self.width as i32
    }

    pub fn height(&self) -> i32 {
        self.height as i32
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Rewrites every stored color through `map`, in place. Control bytes
    /// and run lengths are untouched.
    pub fn apply_palette_map(&mut self, map: &PaletteMap) {
        let data = &mut self.data;
        let mut pos = 0;
        match self.format {
            SpriteFormat::Classic => {
                while pos < data.len() {
                    let control = data[pos];
                    pos += 1;
                    if control < OPAQUE_MIN {
                        for color in &mut data[pos..pos + control as usize] {
                            *color = map[*color as usize];
                        }
                        pos += control as usize;
                    }
                }
            }
            SpriteFormat::Extended | SpriteFormat::Unified => {
                while pos < data.len() {
                    let control = data[pos];
                    pos += 1;
                    if control < OPAQUE_MIN {
                        continue;
                    }
                    if control <= FILL_MAX {
                        data[pos] = map[data[pos] as usize];
                        pos += 1;
                    } else {
                        let n = 256 - control as usize;
                        for color in &mut data[pos..pos + n] {
                            *color = map[*color as usize];
                        }
                        pos += n;
                    }
                }
            }
        }
    }

    /// Whether the pixel at `p` (top-left origin) is opaque with a
    /// non-zero color. Used for pixel-perfect hit testing.
    pub fn solid_at(&self, p: Point) -> bool {
        if p.x < 0 || p.y < 0 || p.x >= self.width() || p.y >= self.height() {
            return false;
        }
        with_codec!(self.format, C => solid_at_impl::<C>(self, p))
    }

    /// Leftmost solid column and one past the rightmost, over all rows.
    /// Returns `(width, 0)` for a fully transparent sprite.
    pub fn solid_horizontal_bounds(&self) -> (i32, i32) {
        with_codec!(self.format, C => solid_bounds_impl::<C>(self))
    }

    /// Total pixel count covered by the stream's commands. Equals
    /// `width * height` for a well-formed sprite.
    pub fn decoded_pixel_count(&self) -> u64 {
        with_codec!(self.format, C => {
            let mut pos = 0;
            let mut total = 0u64;
            while pos < self.data.len() {
                let decoded = C::command(&self.data[pos..]);
                total += decoded.command.length() as u64;
                pos += decoded.size;
            }
            total
        })
    }
}

fn solid_at_impl<C: Codec>(sprite: &Sprite, p: Point) -> bool {
    let width = sprite.width();
    let mut src = RenderSrc { data: sprite.data(), pos: 0, width };
    let mut x_cur = 0;
    let mut y_cur = sprite.height() - 1;
    while !src.done() {
        if y_cur != p.y {
            let skip = skip_rest_of_line_with_overrun::<C>(
                &mut src,
                SkipSize { whole_lines: 0, x_offset: x_cur },
            );
            y_cur -= skip.whole_lines;
            x_cur = skip.x_offset;
            if y_cur < p.y {
                return false;
            }
            continue;
        }
        // A transparent run carried in from the previous row covers
        // everything left of `x_cur`.
        if p.x < x_cur {
            return false;
        }
        while x_cur < width {
            let decoded = C::command(src.rest());
            src.pos += decoded.size;
            let length = decoded.command.length() as i32;
            match decoded.command {
                Command::Transparent { .. } => {
                    x_cur += length;
                    if x_cur > p.x {
                        return false;
                    }
                }
                Command::Fill { color, .. } => {
                    if p.x < x_cur + length {
                        return color != 0;
                    }
                    x_cur += length;
                }
                Command::Pixels { colors } => {
                    if p.x < x_cur + length {
                        return colors[(p.x - x_cur) as usize] != 0;
                    }
                    x_cur += length;
                }
            }
        }
        return false;
    }
    false
}

fn solid_bounds_impl<C: Codec>(sprite: &Sprite) -> (i32, i32) {
    let width = sprite.width();
    let data = sprite.data();
    let mut x_begin = width;
    let mut x_end = 0;
    let mut x_cur = 0;
    let mut pos = 0;
    while pos < data.len() {
        while x_cur < width {
            let decoded = C::command(&data[pos..]);
            pos += decoded.size;
            let length = decoded.command.length() as i32;
            if decoded.command.is_opaque() {
                x_begin = x_begin.min(x_cur);
                x_cur += length;
                x_end = x_end.max(x_cur);
            } else {
                x_cur += length;
            }
        }
        // Transparent overrun may have carried past several rows.
        while x_cur >= width {
            x_cur -= width;
        }
        if x_begin == 0 && x_end == width {
            break;
        }
    }
    (x_begin, x_end)
}
