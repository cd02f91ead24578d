//! 8-bit palette-indexed destination surface.
//!
//! A `Surface` borrows a caller-owned pixel buffer; draws never allocate
//! or free it. The row stride (pitch) may be wider than the logical width
//! and a surface may be a subregion of a larger one sharing the same
//! allocation.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

pub struct Surface<'a> {
    pixels: &'a mut [u8],
    pitch: usize,
    origin_x: usize,
    origin_y: usize,
    w: i32,
    h: i32,
}

impl<'a> Surface<'a> {
    pub fn new(pixels: &'a mut [u8], w: usize, h: usize) -> Self {
        Self::with_pitch(pixels, w, h, w)
    }

    pub fn with_pitch(pixels: &'a mut [u8], w: usize, h: usize, pitch: usize) -> Self {
        debug_assert!(pitch >= w);
        debug_assert!(pixels.len() >= pitch * h);
        Self { pixels, pitch, origin_x: 0, origin_y: 0, w: w as i32, h: h as i32 }
    }

    pub fn w(&self) -> i32 {
        self.w
    }

    pub fn h(&self) -> i32 {
        self.h
    }

    /// Line width of the raw underlying byte buffer; may exceed `w()`.
    pub fn pitch(&self) -> i32 {
        self.pitch as i32
    }

    /// Raw buffer offset of a surface coordinate. May lie outside the
    /// buffer for out-of-region coordinates; only ever dereference
    /// offsets that the clip logic proved valid.
    #[inline(always)]
    pub(crate) fn index(&self, p: Point) -> isize {
        (self.origin_y as isize + p.y as isize) * self.pitch as isize
            + self.origin_x as isize
            + p.x as isize
    }

    #[inline(always)]
    pub(crate) fn begin_index(&self) -> isize {
        self.index(Point::new(0, 0))
    }

    #[inline(always)]
    pub(crate) fn span_mut(&mut self, index: isize, len: usize) -> &mut [u8] {
        debug_assert!(index >= 0);
        let i = index as usize;
        &mut self.pixels[i..i + len]
    }

    #[inline(always)]
    pub(crate) fn put_index(&mut self, index: isize, color: u8) {
        debug_assert!(index >= 0);
        self.pixels[index as usize] = color;
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.w && p.y < self.h
    }

    pub fn pixel(&self, x: i32, y: i32) -> u8 {
        debug_assert!(self.in_bounds(Point::new(x, y)));
        self.pixels[self.index(Point::new(x, y)) as usize]
    }

    pub fn put_pixel(&mut self, x: i32, y: i32, color: u8) {
        debug_assert!(self.in_bounds(Point::new(x, y)));
        let i = self.index(Point::new(x, y));
        self.pixels[i as usize] = color;
    }

    /// Sets a single pixel if it is in bounds.
    pub fn set_pixel(&mut self, p: Point, color: u8) {
        if self.in_bounds(p) {
            let i = self.index(p);
            self.pixels[i as usize] = color;
        }
    }

    pub fn fill(&mut self, color: u8) {
        for y in 0..self.h {
            let start = self.index(Point::new(0, y)) as usize;
            self.pixels[start..start + self.w as usize].fill(color);
        }
    }

    /// Reborrows a rectangular subregion sharing this allocation.
    pub fn subregion(&mut self, x: i32, y: i32, w: i32, h: i32) -> Surface<'_> {
        debug_assert!(x >= 0 && y >= 0 && x + w <= self.w && y + h <= self.h);
        Surface {
            pixels: &mut *self.pixels,
            pitch: self.pitch,
            origin_x: self.origin_x + x as usize,
            origin_y: self.origin_y + y as usize,
            w,
            h,
        }
    }

    /// Subregion spanning full width, starting at row `y` with height `h`.
    pub fn subregion_y(&mut self, y: i32, h: i32) -> Surface<'_> {
        let w = self.w;
        self.subregion(0, y, w, h)
    }

    /// Logical contents row by row, ignoring pitch padding. Test support.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.h)
            .map(|y| (0..self.w).map(|x| self.pixel(x, y)).collect())
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pitch_padding_is_untouched_by_fill() {
        let mut buf = vec![0xEE; 6 * 2];
        let mut out = Surface::with_pitch(&mut buf, 4, 2, 6);
        out.fill(1);
        assert_eq!(buf, [1, 1, 1, 1, 0xEE, 0xEE, 1, 1, 1, 1, 0xEE, 0xEE]);
    }

    #[test]
    fn subregion_offsets_into_parent() {
        let mut buf = vec![0u8; 16];
        let mut out = Surface::new(&mut buf, 4, 4);
        let mut sub = out.subregion(1, 2, 2, 2);
        sub.put_pixel(0, 0, 9);
        assert_eq!(out.pixel(1, 2), 9);
    }

    #[test]
    fn set_pixel_ignores_out_of_bounds() {
        let mut buf = vec![0u8; 4];
        let mut out = Surface::new(&mut buf, 2, 2);
        out.set_pixel(Point::new(-1, 0), 5);
        out.set_pixel(Point::new(0, 2), 5);
        assert_eq!(buf, [0, 0, 0, 0]);
    }
}
