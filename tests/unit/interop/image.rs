use super::*;
use image::{ImageBuffer, Luma, Rgb, Rgba};

#[test]
fn gray_image_keeps_layout() {
    let img = DynamicImage::ImageLuma8(ImageBuffer::from_fn(3, 2, |x, y| Luma([(x + 3 * y) as u8])));
    let buf = PixelBuffer::from_dynamic_image(&img).unwrap();
    assert_eq!(buf.format(), PixelFormat::Grayscale);
    assert_eq!((buf.width(), buf.height()), (3, 2));
    assert_eq!(buf.pixels(), &[0, 1, 2, 3, 4, 5]);
}

#[test]
fn rgb_round_trips_through_image() {
    let img = DynamicImage::ImageRgb8(ImageBuffer::from_fn(2, 2, |x, y| {
        Rgb([x as u8 * 100, y as u8 * 100, 7])
    }));
    let buf = PixelBuffer::from_dynamic_image(&img).unwrap();
    assert_eq!(buf.format(), PixelFormat::Rgb);
    assert_eq!(buf.pixel(1, 0), &[100, 0, 7]);

    let back = buf.to_dynamic_image().unwrap();
    assert_eq!(back, img);
}

#[test]
fn other_color_types_become_rgba() {
    let img = DynamicImage::ImageLumaA8(ImageBuffer::from_pixel(2, 1, image::LumaA([9, 128])));
    let buf = PixelBuffer::from_dynamic_image(&img).unwrap();
    assert_eq!(buf.format(), PixelFormat::Rgba);
    assert_eq!(buf.pixels(), &[9, 9, 9, 128, 9, 9, 9, 128]);
}

#[test]
fn borrowed_buffer_exports_its_pixels() {
    let mut bytes = [1, 2, 3, 4, 5, 6, 7, 8];
    let buf = PixelBuffer::from_external(&mut bytes, 2, 1, PixelFormat::Rgba).unwrap();
    let img = buf.to_dynamic_image().unwrap();
    let rgba = img.as_rgba8().unwrap();
    assert_eq!(rgba.get_pixel(1, 0), &Rgba([5, 6, 7, 8]));
}

#[test]
fn unallocated_buffer_cannot_export() {
    let buf = PixelBuffer::new();
    assert!(matches!(
        buf.to_dynamic_image(),
        Err(PixbufError::NotAllocated)
    ));
}
