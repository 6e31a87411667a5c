//! Pixbuf is a small engine for raw 8-bit pixel buffers.
//!
//! A [`PixelBuffer`] holds a row-major grid of grayscale, RGB or RGBA pixels with
//! no row padding. It either owns its bytes or borrows a caller's slice for a
//! lifetime `'a`, so a borrowed buffer can never outlive the memory it views.
//!
//! # Operations
//!
//! - **Storage**: [`PixelBuffer::allocate`], [`PixelBuffer::set_from_bytes`],
//!   [`PixelBuffer::set_from_aligned_bytes`], [`PixelBuffer::bind_external`],
//!   [`PixelBuffer::clear`].
//! - **Access**: [`PixelBuffer::pixel_offset`], [`PixelBuffer::color_at`],
//!   [`PixelBuffer::set_color_at`], [`PixelBuffer::swap_red_blue`], flat indexing.
//! - **Geometry**: [`PixelBuffer::crop`], [`crop_into`], [`PixelBuffer::rotate90`],
//!   [`PixelBuffer::mirror`].
//! - **Resampling**: [`PixelBuffer::resize`] and [`resize_into`] with
//!   [`InterpolationMethod`].
//! - **Interop**: [`PixelBuffer::from_dynamic_image`] and
//!   [`PixelBuffer::to_dynamic_image`] bridge to the `image` crate.
//!
//! Fallible operations return [`PixbufResult`] and leave the buffer unchanged
//! on error. Diagnostics go through `tracing`.
//!
//! ```
//! use pixbuf::{InterpolationMethod, PixelBuffer, PixelFormat};
//!
//! let mut buf = PixelBuffer::new();
//! buf.allocate(4, 4, PixelFormat::Rgb);
//! buf.crop(1, 1, 2, 2);
//! buf.resize(8, 8, InterpolationMethod::Bilinear)?;
//! assert_eq!((buf.width(), buf.height()), (8, 8));
//! # Ok::<(), pixbuf::PixbufError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod interop;
mod pixels;
mod transform;

pub use foundation::core::Color;
pub use foundation::error::{PixbufError, PixbufResult};
pub use pixels::buffer::{Ownership, PixelBuffer};
pub use pixels::format::{BufferDesc, PixelFormat};
pub use transform::crop::crop_into;
pub use transform::resize::{InterpolationMethod, resize_into};
