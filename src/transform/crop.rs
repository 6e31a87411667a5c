use crate::{
    foundation::error::{PixbufError, PixbufResult},
    pixels::buffer::{PixelBuffer, layout_len},
};

impl PixelBuffer<'_> {
    /// Crop to the `width x height` region whose top-left corner is `(x, y)`.
    ///
    /// The region may extend past the buffer (including negative `x`/`y`);
    /// pixels not covered by the original image become zero. Negative sizes
    /// and unallocated buffers are left untouched. The result always owns
    /// its storage.
    pub fn crop(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if width < 0 || height < 0 || !self.is_allocated() {
            return;
        }
        let mut dest = PixelBuffer::new();
        dest.allocate(width, height, self.format());
        if crop_into(&mut dest, self, x, y, width, height).is_err() {
            return;
        }
        let desc = dest.desc();
        self.replace_with_owned(dest.into_vec(), desc.width, desc.height, desc.format);
    }
}

/// Copy the `width x height` region of `src` at `(x, y)` into `dest`.
///
/// Both buffers must be allocated with the same bytes per pixel. `dest` is
/// reallocated only when its size or format differs from the requested
/// region; otherwise it is cleared to zero first. Pixels of the region that
/// fall outside `src` stay zero.
///
/// Nothing is written on error, so `dest` may only be trusted after `Ok`.
pub fn crop_into(
    dest: &mut PixelBuffer<'_>,
    src: &PixelBuffer<'_>,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> PixbufResult<()> {
    if !dest.is_allocated() || !src.is_allocated() {
        return Err(PixbufError::NotAllocated);
    }
    if dest.bytes_per_pixel() != src.bytes_per_pixel() {
        return Err(PixbufError::FormatMismatch {
            expected: dest.format(),
            actual: src.format(),
        });
    }
    if width < 0 || height < 0 {
        return Err(PixbufError::invalid_dimensions(format!(
            "crop size {width}x{height} is negative"
        )));
    }

    let (out_w, out_h) = (width.unsigned_abs(), height.unsigned_abs());
    layout_len(out_w, out_h, src.format())?;
    if dest.width() != out_w || dest.height() != out_h || dest.format() != src.format() {
        dest.allocate(width, height, src.format());
    } else {
        dest.fill(0);
    }

    // Overlap of the region with the source, in source coordinates.
    let (x, y) = (i64::from(x), i64::from(y));
    let min_x = x.max(0);
    let max_x = (x + i64::from(width)).min(i64::from(src.width()));
    let min_y = y.max(0);
    let max_y = (y + i64::from(height)).min(i64::from(src.height()));
    if min_x >= max_x || min_y >= max_y {
        return Ok(());
    }

    let bpp = src.bytes_per_pixel();
    let src_w = src.width() as usize;
    let out_w = out_w as usize;
    let span = (max_x - min_x) as usize * bpp;
    let src_px = src.pixels();
    let dst_px = dest.pixels_mut();
    for sy in min_y..max_y {
        let src_start = (sy as usize * src_w + min_x as usize) * bpp;
        let dst_start = ((sy - y) as usize * out_w + (min_x - x) as usize) * bpp;
        dst_px[dst_start..dst_start + span].copy_from_slice(&src_px[src_start..src_start + span]);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/transform/crop.rs"]
mod tests;
