use anyhow::Context;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use crate::{
    foundation::error::{PixbufError, PixbufResult},
    pixels::{buffer::PixelBuffer, format::PixelFormat},
};

impl PixelBuffer<'_> {
    /// Copy a decoded [`DynamicImage`] into an owned buffer.
    ///
    /// 8-bit gray, RGB and RGBA images keep their layout; every other color
    /// type is converted to RGBA8 first.
    pub fn from_dynamic_image(img: &DynamicImage) -> PixbufResult<PixelBuffer<'static>> {
        let (width, height) = (img.width(), img.height());
        let (bytes, format) = match img {
            DynamicImage::ImageLuma8(gray) => (gray.as_raw().clone(), PixelFormat::Grayscale),
            DynamicImage::ImageRgb8(rgb) => (rgb.as_raw().clone(), PixelFormat::Rgb),
            DynamicImage::ImageRgba8(rgba) => (rgba.as_raw().clone(), PixelFormat::Rgba),
            other => {
                tracing::debug!(color = ?other.color(), "converting image to rgba8");
                (other.to_rgba8().into_raw(), PixelFormat::Rgba)
            }
        };
        PixelBuffer::from_vec(bytes, width, height, format)
    }

    /// Copy the pixels into a [`DynamicImage`] of the matching 8-bit type.
    pub fn to_dynamic_image(&self) -> PixbufResult<DynamicImage> {
        let (w, h) = (self.width(), self.height());
        let bytes = self.pixels().to_vec();
        let img = match self.format() {
            PixelFormat::Undefined => return Err(PixbufError::NotAllocated),
            PixelFormat::Grayscale => GrayImage::from_raw(w, h, bytes)
                .map(DynamicImage::ImageLuma8)
                .context("wrap grayscale pixels")?,
            PixelFormat::Rgb => RgbImage::from_raw(w, h, bytes)
                .map(DynamicImage::ImageRgb8)
                .context("wrap rgb pixels")?,
            PixelFormat::Rgba => RgbaImage::from_raw(w, h, bytes)
                .map(DynamicImage::ImageRgba8)
                .context("wrap rgba pixels")?,
        };
        Ok(img)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interop/image.rs"]
mod tests;
