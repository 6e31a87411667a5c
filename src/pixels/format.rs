use crate::foundation::math::byte_len;

/// Memory layout of one pixel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// No layout; the state of an unallocated buffer.
    #[default]
    Undefined,
    /// One luminance byte.
    Grayscale,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl PixelFormat {
    /// Bytes per pixel (0 for [`PixelFormat::Undefined`]).
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Undefined => 0,
            Self::Grayscale => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Bits per pixel, for callers that still speak in bit depths.
    pub const fn bits_per_pixel(self) -> u32 {
        self.bytes_per_pixel() as u32 * 8
    }

    /// Whether this format describes real pixels.
    pub const fn is_defined(self) -> bool {
        !matches!(self, Self::Undefined)
    }

    /// Map a legacy bit depth (8, 24, 32) to a format.
    ///
    /// Any other depth is unsupported and logged at error level.
    pub fn from_bits_per_pixel(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Self::Grayscale),
            24 => Some(Self::Rgb),
            32 => Some(Self::Rgba),
            _ => {
                tracing::error!(bits, "bits per pixel is not a supported pixel format");
                None
            }
        }
    }
}

/// Width, height and format of a buffer, without its pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BufferDesc {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel layout.
    pub format: PixelFormat,
}

impl BufferDesc {
    /// Describe a `width x height` buffer of `format`.
    pub const fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
        }
    }

    /// Tightly packed row size in bytes.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Total pixel bytes, or `None` if the size does not fit in `usize`.
    pub fn byte_len(&self) -> Option<usize> {
        byte_len(
            self.width as usize,
            self.height as usize,
            self.format.bytes_per_pixel(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/format.rs"]
mod tests;
