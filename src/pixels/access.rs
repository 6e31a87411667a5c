use std::ops::{Index, IndexMut};

use crate::{foundation::core::Color, pixels::buffer::PixelBuffer};

impl PixelBuffer<'_> {
    /// Byte offset of pixel `(x, y)`, or `0` for an unallocated buffer.
    ///
    /// Coordinates are not checked against the buffer size; the caller must
    /// keep them in range. Out-of-range offsets panic when they are later
    /// used to index the pixels.
    #[inline]
    pub fn pixel_offset(&self, x: u32, y: u32) -> usize {
        if !self.is_allocated() {
            return 0;
        }
        (x as usize + y as usize * self.width() as usize) * self.bytes_per_pixel()
    }

    /// Bytes of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let idx = self.pixel_offset(x, y);
        &self.pixels()[idx..idx + self.bytes_per_pixel()]
    }

    /// Read the color at `(x, y)`.
    ///
    /// Grayscale reads as an opaque gray and RGB as opaque. Unallocated
    /// buffers read [`Color::default`].
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies outside an allocated buffer.
    pub fn color_at(&self, x: u32, y: u32) -> Color {
        match *self.pixel(x, y) {
            [v] => Color::gray(v),
            [r, g, b] => Color::rgb(r, g, b),
            [r, g, b, a] => Color::rgba(r, g, b, a),
            _ => Color::default(),
        }
    }

    /// Write `color` at `(x, y)`.
    ///
    /// Grayscale stores the color's brightness and RGB drops alpha. Writes to
    /// an unallocated buffer are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies outside an allocated buffer.
    pub fn set_color_at(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.pixel_offset(x, y);
        let bpp = self.bytes_per_pixel();
        let px = &mut self.pixels_mut()[idx..idx + bpp];
        match bpp {
            1 => px[0] = color.brightness(),
            3 | 4 => px.copy_from_slice(&color.to_array()[..bpp]),
            _ => {}
        }
    }

    /// Swap the first and third channel of every pixel (RGB <-> BGR).
    ///
    /// Grayscale buffers are left as is.
    pub fn swap_red_blue(&mut self) {
        let bpp = self.bytes_per_pixel();
        if bpp < 3 {
            return;
        }
        for px in self.pixels_mut().chunks_exact_mut(bpp) {
            px.swap(0, 2);
        }
    }

    /// Set every byte of the buffer to `value`.
    pub fn fill(&mut self, value: u8) {
        self.pixels_mut().fill(value);
    }

    /// Write `color` to every pixel.
    pub fn fill_color(&mut self, color: Color) {
        let bpp = self.bytes_per_pixel();
        if bpp == 0 {
            return;
        }
        let gray = [color.brightness()];
        let rgba = color.to_array();
        let px = if bpp == 1 { &gray[..] } else { &rgba[..bpp] };
        for dst in self.pixels_mut().chunks_exact_mut(bpp) {
            dst.copy_from_slice(px);
        }
    }
}

/// Flat byte access. Panics on offsets past the end.
impl Index<usize> for PixelBuffer<'_> {
    type Output = u8;

    fn index(&self, pos: usize) -> &u8 {
        &self.pixels()[pos]
    }
}

impl IndexMut<usize> for PixelBuffer<'_> {
    fn index_mut(&mut self, pos: usize) -> &mut u8 {
        &mut self.pixels_mut()[pos]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/access.rs"]
mod tests;
