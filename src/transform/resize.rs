use crate::{
    foundation::{
        error::{PixbufError, PixbufResult},
        math::{clamp_to_u8, round_to_u8},
    },
    pixels::buffer::PixelBuffer,
};

/// Resampling policy for [`resize_into`] and [`PixelBuffer::resize`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum InterpolationMethod {
    /// Copy the closest source pixel.
    #[default]
    NearestNeighbor = 1,
    /// Weighted average of the 2x2 surrounding pixels.
    Bilinear = 2,
    /// Cubic convolution over the 4x4 surrounding pixels.
    Bicubic = 3,
}

impl InterpolationMethod {
    /// Stable numeric code (1, 2 or 3).
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Method for a numeric code, if any.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::NearestNeighbor),
            2 => Some(Self::Bilinear),
            3 => Some(Self::Bicubic),
            _ => None,
        }
    }
}

impl PixelBuffer<'_> {
    /// Resample to `width x height` with `method`.
    ///
    /// On error the buffer is left unchanged. On success it owns its storage.
    #[tracing::instrument(level = "debug", skip(self), fields(from = ?self.desc()))]
    pub fn resize(
        &mut self,
        width: i32,
        height: i32,
        method: InterpolationMethod,
    ) -> PixbufResult<()> {
        if width <= 0 || height <= 0 {
            return Err(PixbufError::invalid_dimensions(format!(
                "resize target {width}x{height} must be positive"
            )));
        }
        if !self.is_allocated() {
            return Err(PixbufError::NotAllocated);
        }
        let mut dest = PixelBuffer::new();
        dest.allocate(width, height, self.format());
        if !dest.is_allocated() {
            return Err(PixbufError::invalid_dimensions(format!(
                "resize target {width}x{height} cannot be allocated"
            )));
        }
        resize_into(&mut dest, self, method)?;
        let desc = dest.desc();
        self.replace_with_owned(dest.into_vec(), desc.width, desc.height, desc.format);
        Ok(())
    }
}

/// Resample `src` into `dest`, whose current size is the target size.
///
/// Both buffers must be allocated with the same bytes per pixel.
#[tracing::instrument(
    level = "debug",
    skip(dest, src),
    fields(from = ?src.desc(), to = ?dest.desc())
)]
pub fn resize_into(
    dest: &mut PixelBuffer<'_>,
    src: &PixelBuffer<'_>,
    method: InterpolationMethod,
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
    if dest.is_empty() {
        return Ok(());
    }
    if src.is_empty() {
        return Err(PixbufError::invalid_dimensions(format!(
            "cannot resample an empty {}x{} source",
            src.width(),
            src.height()
        )));
    }

    let sg = Grid::of(src);
    let dg = Grid::of(dest);
    let src_px = src.pixels();
    let dst_px = dest.pixels_mut();
    match method {
        InterpolationMethod::NearestNeighbor => nearest(src_px, sg, dst_px, dg),
        InterpolationMethod::Bilinear => bilinear(src_px, sg, dst_px, dg),
        InterpolationMethod::Bicubic => bicubic(src_px, sg, dst_px, dg),
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
struct Grid {
    width: usize,
    height: usize,
    bpp: usize,
}

impl Grid {
    fn of(buf: &PixelBuffer<'_>) -> Self {
        Self {
            width: buf.width() as usize,
            height: buf.height() as usize,
            bpp: buf.bytes_per_pixel(),
        }
    }

    fn row_bytes(self) -> usize {
        self.width * self.bpp
    }

    /// Source position of destination column/row `d` for area-style mapping,
    /// split into the integer cell and the offset inside it.
    fn map(src_len: usize, d: usize, dst_len: usize) -> (usize, f32) {
        let f = src_len as f32 * d as f32 / dst_len as f32;
        let cell = f.min((src_len - 1) as f32) as usize;
        (cell, f - cell as f32)
    }
}

fn nearest(src: &[u8], sg: Grid, dst: &mut [u8], dg: Grid) {
    let x_step = sg.width as f32 / dg.width as f32;
    let y_step = sg.height as f32 / dg.height as f32;
    let bpp = sg.bpp;

    // Sample at the source position of each destination pixel centre.
    let mut src_y = 0.5 * y_step;
    for dst_row in dst.chunks_exact_mut(dg.row_bytes()) {
        let sy = (src_y as usize).min(sg.height - 1);
        let src_row = &src[sy * sg.row_bytes()..(sy + 1) * sg.row_bytes()];
        let mut src_x = 0.5 * x_step;
        for dst_px in dst_row.chunks_exact_mut(bpp) {
            let sx = (src_x as usize).min(sg.width - 1);
            dst_px.copy_from_slice(&src_row[sx * bpp..(sx + 1) * bpp]);
            src_x += x_step;
        }
        src_y += y_step;
    }
}

fn bilinear(src: &[u8], sg: Grid, dst: &mut [u8], dg: Grid) {
    let bpp = sg.bpp;
    let row = sg.row_bytes();
    for dy in 0..dg.height {
        let (y0, fy) = Grid::map(sg.height, dy, dg.height);
        let y1 = (y0 + 1).min(sg.height - 1);
        for dx in 0..dg.width {
            let (x0, fx) = Grid::map(sg.width, dx, dg.width);
            let x1 = (x0 + 1).min(sg.width - 1);
            let out = (dy * dg.width + dx) * bpp;
            for k in 0..bpp {
                let s = |x: usize, y: usize| f32::from(src[y * row + x * bpp + k]);
                let top = s(x0, y0) + (s(x1, y0) - s(x0, y0)) * fx;
                let bottom = s(x0, y1) + (s(x1, y1) - s(x0, y1)) * fx;
                dst[out + k] = round_to_u8(top + (bottom - top) * fy);
            }
        }
    }
}

fn bicubic(src: &[u8], sg: Grid, dst: &mut [u8], dg: Grid) {
    let bpp = sg.bpp as isize;
    let row = sg.row_bytes() as isize;
    // Samples outside this byte range repeat the last in-range sample.
    let lo = row + 1;
    let hi = src.len() as isize - row - 1;

    let mut patch = [[0i32; 4]; 4];
    for dy in 0..dg.height {
        let (sy, py) = Grid::map(sg.height, dy, dg.height);
        for dx in 0..dg.width {
            let (sx, px) = Grid::map(sg.width, dx, dg.width);
            let src0 = ((sy * sg.width + sx) * sg.bpp) as isize;
            let dst0 = (dy * dg.width + dx) * dg.bpp;
            for k in 0..sg.bpp {
                let centre = src0 + k as isize;
                let mut sample = src[centre as usize];
                for (patch_row, oy) in (-1..=2isize).enumerate() {
                    let row_start = centre + oy * row;
                    for (column, ox) in patch.iter_mut().zip(-1..=2isize) {
                        let idx = row_start + ox * bpp;
                        if (lo..hi).contains(&idx) {
                            sample = src[idx as usize];
                        }
                        column[patch_row] = i32::from(sample);
                    }
                }
                dst[dst0 + k] = clamp_to_u8(bicubic_kernel(&patch, px, py));
            }
        }
    }
}

/// Evaluate the bicubic surface through a 4x4 patch at `(x, y)` in `[0, 1)`.
///
/// `p[i][j]` is the sample at column offset `i - 1`, row offset `j - 1`.
/// The result may overshoot `[0, 255]` near hard edges.
fn bicubic_kernel(p: &[[i32; 4]; 4], x: f32, y: f32) -> f32 {
    let a00 = p[1][1];
    let a01 = -p[1][0] + p[1][2];
    let a02 = 2 * p[1][0] - 2 * p[1][1] + p[1][2] - p[1][3];
    let a03 = -p[1][0] + p[1][1] - p[1][2] + p[1][3];
    let a10 = -p[0][1] + p[2][1];
    let a11 = p[0][0] - p[0][2] - p[2][0] + p[2][2];
    let a12 = -2 * p[0][0] + 2 * p[0][1] - p[0][2] + p[0][3] + 2 * p[2][0] - 2 * p[2][1] + p[2][2]
        - p[2][3];
    let a13 = p[0][0] - p[0][1] + p[0][2] - p[0][3] - p[2][0] + p[2][1] - p[2][2] + p[2][3];
    let a20 = 2 * p[0][1] - 2 * p[1][1] + p[2][1] - p[3][1];
    let a21 = -2 * p[0][0] + 2 * p[0][2] + 2 * p[1][0] - 2 * p[1][2] - p[2][0] + p[2][2] + p[3][0]
        - p[3][2];
    let a22 = 4 * p[0][0] - 4 * p[0][1] + 2 * p[0][2] - 2 * p[0][3] - 4 * p[1][0] + 4 * p[1][1]
        - 2 * p[1][2]
        + 2 * p[1][3]
        + 2 * p[2][0]
        - 2 * p[2][1]
        + p[2][2]
        - p[2][3]
        - 2 * p[3][0]
        + 2 * p[3][1]
        - p[3][2]
        + p[3][3];
    let a23 = -2 * p[0][0] + 2 * p[0][1] - 2 * p[0][2] + 2 * p[0][3] + 2 * p[1][0] - 2 * p[1][1]
        + 2 * p[1][2]
        - 2 * p[1][3]
        - p[2][0]
        + p[2][1]
        - p[2][2]
        + p[2][3]
        + p[3][0]
        - p[3][1]
        + p[3][2]
        - p[3][3];
    let a30 = -p[0][1] + p[1][1] - p[2][1] + p[3][1];
    let a31 = p[0][0] - p[0][2] - p[1][0] + p[1][2] + p[2][0] - p[2][2] - p[3][0] + p[3][2];
    let a32 = -2 * p[0][0] + 2 * p[0][1] - p[0][2] + p[0][3] + 2 * p[1][0] - 2 * p[1][1] + p[1][2]
        - p[1][3]
        - 2 * p[2][0]
        + 2 * p[2][1]
        - p[2][2]
        + p[2][3]
        + 2 * p[3][0]
        - 2 * p[3][1]
        + p[3][2]
        - p[3][3];
    let a33 = p[0][0] - p[0][1] + p[0][2] - p[0][3] - p[1][0] + p[1][1] - p[1][2] + p[1][3] + p[2][0]
        - p[2][1]
        + p[2][2]
        - p[2][3]
        - p[3][0]
        + p[3][1]
        - p[3][2]
        + p[3][3];

    // Rows of coefficients are powers of x, columns powers of y.
    let a = [
        [a00, a01, a02, a03],
        [a10, a11, a12, a13],
        [a20, a21, a22, a23],
        [a30, a31, a32, a33],
    ];
    let xs = [1.0, x, x * x, x * x * x];
    let ys = [1.0, y, y * y, y * y * y];
    a.iter()
        .zip(xs)
        .map(|(coeffs, xp)| {
            coeffs
                .iter()
                .zip(ys)
                .map(|(&c, yp)| c as f32 * xp * yp)
                .sum::<f32>()
        })
        .sum()
}

#[cfg(test)]
#[path = "../../tests/unit/transform/resize.rs"]
mod tests;
