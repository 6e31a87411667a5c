use std::fmt;

use crate::{
    foundation::error::{PixbufError, PixbufResult},
    pixels::format::{BufferDesc, PixelFormat},
};

/// Backing storage of a [`PixelBuffer`].
enum Storage<'a> {
    Empty,
    Owned(Vec<u8>),
    Borrowed(&'a mut [u8]),
}

/// How a [`PixelBuffer`] holds its pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// The buffer allocated the bytes and frees them on release.
    Owned,
    /// The bytes belong to the caller; release only forgets them.
    Borrowed,
}

/// Row-major 8-bit pixel buffer in grayscale, RGB or RGBA layout.
///
/// A buffer is either unallocated, owns its bytes, or borrows a caller's
/// slice for `'a` (see [`bind_external`](Self::bind_external)). Transforms
/// that change the buffer's size always leave it owning fresh storage;
/// same-size operations write through to borrowed bytes.
///
/// Unallocated buffers report `0x0`, zero bytes per pixel and
/// [`PixelFormat::Undefined`].
pub struct PixelBuffer<'a> {
    storage: Storage<'a>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl Default for PixelBuffer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PixelBuffer<'a> {
    /// An unallocated buffer.
    pub const fn new() -> Self {
        Self {
            storage: Storage::Empty,
            width: 0,
            height: 0,
            format: PixelFormat::Undefined,
        }
    }

    /// Allocate a zero-filled owned buffer described by `desc`.
    pub fn from_desc(desc: BufferDesc) -> PixbufResult<Self> {
        let len = layout_len(desc.width, desc.height, desc.format)?;
        let mut buf = Self::new();
        buf.allocate_layout(desc.width, desc.height, desc.format, len);
        Ok(buf)
    }

    /// Take ownership of `data` as a `width x height` buffer without copying.
    ///
    /// Extra trailing bytes are truncated.
    pub fn from_vec(
        mut data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> PixbufResult<Self> {
        let needed = layout_len(width, height, format)?;
        if data.len() < needed {
            return Err(PixbufError::InsufficientData {
                needed,
                actual: data.len(),
            });
        }
        data.truncate(needed);
        Ok(Self {
            storage: Storage::Owned(data),
            width,
            height,
            format,
        })
    }

    /// Copy `src` into a new owned buffer.
    pub fn from_bytes(
        src: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> PixbufResult<Self> {
        let mut buf = Self::new();
        buf.set_from_bytes(src, width, height, format)?;
        Ok(buf)
    }

    /// Wrap a caller-owned slice without copying.
    pub fn from_external(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> PixbufResult<Self> {
        let mut buf = Self::new();
        buf.bind_external(data, width, height, format)?;
        Ok(buf)
    }

    // Allocation ---------------------------------------------------------------

    /// Allocate zero-filled owned storage for `width x height` pixels.
    ///
    /// Negative dimensions leave the buffer untouched. Allocating with the
    /// exact size and format the buffer already has keeps its contents. An
    /// [`PixelFormat::Undefined`] format (or a size that does not fit in
    /// memory) is logged and leaves the buffer unallocated.
    pub fn allocate(&mut self, width: i32, height: i32, format: PixelFormat) {
        if width < 0 || height < 0 {
            return;
        }
        let (width, height) = (width.unsigned_abs(), height.unsigned_abs());
        if self.has_layout(width, height, format) {
            return;
        }
        match layout_len(width, height, format) {
            Ok(len) => self.allocate_layout(width, height, format, len),
            Err(_) => self.clear(),
        }
    }

    /// [`allocate`](Self::allocate) with a legacy bit depth (8, 24 or 32).
    ///
    /// Negative dimensions leave the buffer untouched whatever the depth.
    pub fn allocate_bits(&mut self, width: i32, height: i32, bits_per_pixel: u32) {
        if width < 0 || height < 0 {
            return;
        }
        match PixelFormat::from_bits_per_pixel(bits_per_pixel) {
            Some(format) => self.allocate(width, height, format),
            None => self.clear(),
        }
    }

    /// Borrow `data` as this buffer's pixels without copying or zeroing.
    ///
    /// Any previous storage is released first. The slice must hold at least
    /// `width * height * bytes_per_pixel` bytes; only that prefix is used.
    /// On a short slice the buffer is left untouched.
    pub fn bind_external(
        &mut self,
        data: &'a mut [u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> PixbufResult<()> {
        let needed = match layout_len(width, height, format) {
            Ok(needed) => needed,
            Err(err) => {
                self.clear();
                return Err(err);
            }
        };
        if data.len() < needed {
            return Err(PixbufError::InsufficientData {
                needed,
                actual: data.len(),
            });
        }
        self.clear();
        let (data, _) = data.split_at_mut(needed);
        self.storage = Storage::Borrowed(data);
        self.width = width;
        self.height = height;
        self.format = format;
        Ok(())
    }

    /// [`bind_external`](Self::bind_external) with a legacy bit depth.
    pub fn bind_external_bits(
        &mut self,
        data: &'a mut [u8],
        width: u32,
        height: u32,
        bits_per_pixel: u32,
    ) -> PixbufResult<()> {
        let format = self.format_from_bits(bits_per_pixel)?;
        self.bind_external(data, width, height, format)
    }

    /// Copy tightly packed pixels from `src` into owned storage.
    ///
    /// A borrowed buffer is detached from its external bytes first, so the
    /// caller's slice is never written.
    pub fn set_from_bytes(
        &mut self,
        src: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> PixbufResult<()> {
        let needed = match layout_len(width, height, format) {
            Ok(needed) => needed,
            Err(err) => {
                self.clear();
                return Err(err);
            }
        };
        if src.len() < needed {
            return Err(PixbufError::InsufficientData {
                needed,
                actual: src.len(),
            });
        }
        self.prepare_owned(width, height, format, needed);
        self.pixels_mut().copy_from_slice(&src[..needed]);
        Ok(())
    }

    /// [`set_from_bytes`](Self::set_from_bytes) with a legacy bit depth.
    pub fn set_from_bytes_bits(
        &mut self,
        src: &[u8],
        width: u32,
        height: u32,
        bits_per_pixel: u32,
    ) -> PixbufResult<()> {
        let format = self.format_from_bits(bits_per_pixel)?;
        self.set_from_bytes(src, width, height, format)
    }

    /// Copy pixels whose rows are `row_stride` bytes apart in `src`.
    ///
    /// Row padding is dropped; the buffer itself is always tightly packed.
    pub fn set_from_aligned_bytes(
        &mut self,
        src: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
        row_stride: usize,
    ) -> PixbufResult<()> {
        let needed = match layout_len(width, height, format) {
            Ok(needed) => needed,
            Err(err) => {
                self.clear();
                return Err(err);
            }
        };
        let row_bytes = BufferDesc::new(width, height, format).row_bytes();
        if row_stride < row_bytes {
            return Err(PixbufError::StrideTooSmall {
                stride: row_stride,
                min: row_bytes,
            });
        }
        let required = match height {
            0 => 0,
            h => (h as usize - 1)
                .checked_mul(row_stride)
                .and_then(|v| v.checked_add(row_bytes))
                .ok_or_else(|| PixbufError::invalid_dimensions("row stride overflows usize"))?,
        };
        if src.len() < required {
            return Err(PixbufError::InsufficientData {
                needed: required,
                actual: src.len(),
            });
        }

        self.prepare_owned(width, height, format, needed);
        if row_stride == row_bytes {
            self.pixels_mut().copy_from_slice(&src[..needed]);
        } else if row_bytes > 0 {
            for (y, dst_row) in self.pixels_mut().chunks_exact_mut(row_bytes).enumerate() {
                let start = y * row_stride;
                dst_row.copy_from_slice(&src[start..start + row_bytes]);
            }
        }
        Ok(())
    }

    /// [`set_from_aligned_bytes`](Self::set_from_aligned_bytes) with a legacy bit depth.
    pub fn set_from_aligned_bytes_bits(
        &mut self,
        src: &[u8],
        width: u32,
        height: u32,
        bits_per_pixel: u32,
        row_stride: usize,
    ) -> PixbufResult<()> {
        let format = self.format_from_bits(bits_per_pixel)?;
        self.set_from_aligned_bytes(src, width, height, format, row_stride)
    }

    /// Release storage and return to the unallocated state.
    ///
    /// Owned bytes are freed; borrowed bytes are left to their owner.
    pub fn clear(&mut self) {
        self.storage = Storage::Empty;
        self.width = 0;
        self.height = 0;
        self.format = PixelFormat::Undefined;
    }

    // Queries ------------------------------------------------------------------

    /// Whether the buffer holds pixels.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        !matches!(self.storage, Storage::Empty)
    }

    /// Storage mode, or `None` when unallocated.
    pub fn ownership(&self) -> Option<Ownership> {
        match self.storage {
            Storage::Empty => None,
            Storage::Owned(_) => Some(Ownership::Owned),
            Storage::Borrowed(_) => Some(Ownership::Borrowed),
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel layout.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per pixel (0 when unallocated).
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Bits per pixel (0 when unallocated).
    #[inline]
    pub fn bits_per_pixel(&self) -> u32 {
        self.format.bits_per_pixel()
    }

    /// Size and format of the buffer.
    pub fn desc(&self) -> BufferDesc {
        BufferDesc::new(self.width, self.height, self.format)
    }

    /// Number of pixel bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels().len()
    }

    /// Whether there are no pixel bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw pixel bytes, row-major and tightly packed.
    pub fn pixels(&self) -> &[u8] {
        match &self.storage {
            Storage::Empty => &[],
            Storage::Owned(v) => v,
            Storage::Borrowed(s) => s,
        }
    }

    /// Mutable raw pixel bytes.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        match &mut self.storage {
            Storage::Empty => &mut [],
            Storage::Owned(v) => v,
            Storage::Borrowed(s) => s,
        }
    }

    // Conversions --------------------------------------------------------------

    /// Detach from any borrowed storage, copying it if needed.
    pub fn into_owned(self) -> PixelBuffer<'static> {
        let storage = match self.storage {
            Storage::Empty => Storage::Empty,
            Storage::Owned(v) => Storage::Owned(v),
            Storage::Borrowed(s) => Storage::Owned(s.to_vec()),
        };
        PixelBuffer {
            storage,
            width: self.width,
            height: self.height,
            format: self.format,
        }
    }

    /// Consume the buffer and return its bytes.
    pub fn into_vec(self) -> Vec<u8> {
        match self.storage {
            Storage::Empty => Vec::new(),
            Storage::Owned(v) => v,
            Storage::Borrowed(s) => s.to_vec(),
        }
    }

    // Internal -----------------------------------------------------------------

    fn has_layout(&self, width: u32, height: u32, format: PixelFormat) -> bool {
        self.is_allocated()
            && self.width == width
            && self.height == height
            && self.format == format
    }

    fn allocate_layout(&mut self, width: u32, height: u32, format: PixelFormat, len: usize) {
        if self.has_layout(width, height, format) {
            return;
        }
        tracing::debug!(width, height, ?format, "allocating pixel storage");
        self.clear();
        self.storage = Storage::Owned(vec![0u8; len]);
        self.width = width;
        self.height = height;
        self.format = format;
    }

    /// Like `allocate_layout`, but never keeps borrowed storage.
    fn prepare_owned(&mut self, width: u32, height: u32, format: PixelFormat, len: usize) {
        if matches!(self.storage, Storage::Borrowed(_)) {
            self.clear();
        }
        self.allocate_layout(width, height, format, len);
    }

    fn format_from_bits(&mut self, bits_per_pixel: u32) -> PixbufResult<PixelFormat> {
        PixelFormat::from_bits_per_pixel(bits_per_pixel).ok_or_else(|| {
            self.clear();
            PixbufError::unsupported_format(format!("{bits_per_pixel} bits per pixel"))
        })
    }

    /// Swap in freshly computed owned pixels, releasing the old storage.
    pub(crate) fn replace_with_owned(
        &mut self,
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) {
        debug_assert_eq!(
            Some(data.len()),
            BufferDesc::new(width, height, format).byte_len()
        );
        self.storage = Storage::Owned(data);
        self.width = width;
        self.height = height;
        self.format = format;
    }
}

/// Byte size of a `width x height` buffer, logging unsupported layouts.
///
/// Sizes above `isize::MAX` bytes can never be allocated and are rejected.
pub(crate) fn layout_len(width: u32, height: u32, format: PixelFormat) -> PixbufResult<usize> {
    if !format.is_defined() {
        tracing::error!(?format, "pixel format not supported");
        return Err(PixbufError::unsupported_format(format!(
            "{format:?} has no pixel layout"
        )));
    }
    BufferDesc::new(width, height, format)
        .byte_len()
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or_else(|| {
            tracing::error!(width, height, ?format, "pixel buffer size exceeds isize::MAX");
            PixbufError::invalid_dimensions(format!("{width}x{height} {format:?} is too large"))
        })
}

impl Clone for PixelBuffer<'_> {
    /// Deep copy into owned storage, whatever the source's ownership.
    fn clone(&self) -> Self {
        let storage = match self.storage {
            Storage::Empty => Storage::Empty,
            _ => Storage::Owned(self.pixels().to_vec()),
        };
        Self {
            storage,
            width: self.width,
            height: self.height,
            format: self.format,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if !source.is_allocated() {
            self.clear();
            return;
        }
        if let Storage::Owned(v) = &mut self.storage {
            v.clear();
            v.extend_from_slice(source.pixels());
        } else {
            self.storage = Storage::Owned(source.pixels().to_vec());
        }
        self.width = source.width;
        self.height = source.height;
        self.format = source.format;
    }
}

impl PartialEq for PixelBuffer<'_> {
    /// Buffers are equal when size, format and bytes match; ownership is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.desc() == other.desc()
            && self.is_allocated() == other.is_allocated()
            && self.pixels() == other.pixels()
    }
}

impl Eq for PixelBuffer<'_> {}

impl fmt::Debug for PixelBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ownership() {
            None => write!(f, "PixelBuffer(unallocated)"),
            Some(own) => write!(
                f,
                "PixelBuffer({}x{}, {:?}, {:?})",
                self.width, self.height, self.format, own
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/buffer.rs"]
mod tests;
