use crate::pixels::buffer::PixelBuffer;

impl PixelBuffer<'_> {
    /// Rotate by `clockwise_turns` quarter turns (negative turns rotate
    /// counter-clockwise).
    ///
    /// Half turns are done in place; quarter turns reallocate with swapped
    /// width and height and leave the buffer owning its storage.
    pub fn rotate90(&mut self, clockwise_turns: i32) {
        if !self.is_allocated() {
            return;
        }
        let turns = clockwise_turns.rem_euclid(4);
        match turns {
            0 => {}
            2 => self.mirror(true, true),
            _ => {
                let (w, h) = (self.width() as usize, self.height() as usize);
                let bpp = self.bytes_per_pixel();
                let src = self.pixels();
                let mut out = vec![0u8; src.len()];
                // Destination rows are `h` pixels wide.
                for j in 0..h {
                    for i in 0..w {
                        let a = (j * w + i) * bpp;
                        let b = if turns == 1 {
                            (i * h + (h - j - 1)) * bpp
                        } else {
                            ((w - i - 1) * h + j) * bpp
                        };
                        out[b..b + bpp].copy_from_slice(&src[a..a + bpp]);
                    }
                }
                let (width, height, format) = (self.height(), self.width(), self.format());
                self.replace_with_owned(out, width, height, format);
            }
        }
    }

    /// Flip rows (`vertical`) and/or columns (`horizontal`) in place.
    pub fn mirror(&mut self, vertical: bool, horizontal: bool) {
        match (vertical, horizontal) {
            (false, false) => {}
            (true, false) => self.flip_rows(),
            (false, true) => self.flip_columns(),
            (true, true) => {
                self.flip_rows();
                self.flip_columns();
            }
        }
    }

    fn flip_rows(&mut self) {
        let row_bytes = self.desc().row_bytes();
        let h = self.height() as usize;
        if row_bytes == 0 || h < 2 {
            return;
        }
        let data = self.pixels_mut();
        for j in 0..h / 2 {
            let (top, bottom) = data.split_at_mut((h - j - 1) * row_bytes);
            top[j * row_bytes..(j + 1) * row_bytes].swap_with_slice(&mut bottom[..row_bytes]);
        }
    }

    fn flip_columns(&mut self) {
        let bpp = self.bytes_per_pixel();
        let row_bytes = self.desc().row_bytes();
        let w = self.width() as usize;
        if row_bytes == 0 || w < 2 {
            return;
        }
        for row in self.pixels_mut().chunks_exact_mut(row_bytes) {
            for i in 0..w / 2 {
                let a = i * bpp;
                let b = (w - i - 1) * bpp;
                let (left, right) = row.split_at_mut(b);
                left[a..a + bpp].swap_with_slice(&mut right[..bpp]);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/orient.rs"]
mod tests;
