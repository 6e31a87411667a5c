use super::*;

fn gradient_rgb(width: u32, height: u32) -> Vec<u8> {
    (0..width * height * 3).map(|v| (v % 251) as u8).collect()
}

#[test]
fn new_buffer_is_unallocated() {
    let buf = PixelBuffer::new();
    assert!(!buf.is_allocated());
    assert_eq!(buf.width(), 0);
    assert_eq!(buf.height(), 0);
    assert_eq!(buf.bytes_per_pixel(), 0);
    assert_eq!(buf.bits_per_pixel(), 0);
    assert_eq!(buf.format(), PixelFormat::Undefined);
    assert_eq!(buf.ownership(), None);
    assert!(buf.pixels().is_empty());
}

#[test]
fn allocate_sizes_and_zeroes_storage() {
    for (format, bpp) in [
        (PixelFormat::Grayscale, 1),
        (PixelFormat::Rgb, 3),
        (PixelFormat::Rgba, 4),
    ] {
        let mut buf = PixelBuffer::new();
        buf.allocate(5, 3, format);
        assert!(buf.is_allocated());
        assert_eq!(buf.len(), 5 * 3 * bpp);
        assert_eq!(buf.bits_per_pixel(), bpp as u32 * 8);
        assert_eq!(buf.ownership(), Some(Ownership::Owned));
        assert!(buf.pixels().iter().all(|&b| b == 0));
    }
}

#[test]
fn reallocating_same_layout_keeps_pixels() {
    let mut buf = PixelBuffer::new();
    buf.allocate(2, 2, PixelFormat::Rgb);
    buf.pixels_mut()[4] = 99;
    buf.allocate(2, 2, PixelFormat::Rgb);
    assert_eq!(buf.pixels()[4], 99);

    buf.allocate(2, 2, PixelFormat::Rgba);
    assert_eq!(buf.len(), 16);
    assert_eq!(buf.pixels()[4], 0);
}

#[test]
fn negative_dimensions_are_ignored() {
    let mut buf = PixelBuffer::new();
    buf.allocate(3, 3, PixelFormat::Grayscale);
    buf.pixels_mut()[0] = 7;
    buf.allocate(-1, 3, PixelFormat::Rgb);
    buf.allocate(3, -2, PixelFormat::Rgb);
    assert_eq!(buf.desc(), BufferDesc::new(3, 3, PixelFormat::Grayscale));
    assert_eq!(buf.pixels()[0], 7);
}

#[test]
fn undefined_format_leaves_buffer_unallocated() {
    let mut buf = PixelBuffer::new();
    buf.allocate(3, 3, PixelFormat::Rgb);
    buf.allocate(3, 3, PixelFormat::Undefined);
    assert!(!buf.is_allocated());
    assert_eq!(buf.format(), PixelFormat::Undefined);
}

#[test]
fn allocate_bits_maps_legacy_depths() {
    let mut buf = PixelBuffer::new();
    buf.allocate_bits(2, 2, 24);
    assert_eq!(buf.format(), PixelFormat::Rgb);
    buf.allocate_bits(2, 2, 32);
    assert_eq!(buf.format(), PixelFormat::Rgba);
    buf.allocate_bits(2, 2, 8);
    assert_eq!(buf.format(), PixelFormat::Grayscale);

    buf.allocate_bits(2, 2, 12);
    assert!(!buf.is_allocated());
    assert_eq!(buf.bytes_per_pixel(), 0);
}

#[test]
fn allocate_bits_ignores_negative_sizes_before_depth() {
    let mut buf = PixelBuffer::from_bytes(&[1, 2, 3, 4], 2, 2, PixelFormat::Grayscale).unwrap();
    buf.allocate_bits(-1, 2, 16);
    buf.allocate_bits(2, -1, 24);
    assert_eq!(buf.desc(), BufferDesc::new(2, 2, PixelFormat::Grayscale));
    assert_eq!(buf.pixels(), &[1, 2, 3, 4]);
}

#[test]
fn oversized_allocation_is_logged_not_attempted() {
    let mut buf = PixelBuffer::new();
    buf.allocate(1, 1, PixelFormat::Rgba);
    buf.allocate(i32::MAX, i32::MAX, PixelFormat::Rgba);
    assert!(!buf.is_allocated());

    let desc = BufferDesc::new(u32::MAX, u32::MAX, PixelFormat::Rgb);
    assert!(matches!(
        PixelBuffer::from_desc(desc),
        Err(PixbufError::InvalidDimensions(_))
    ));
}

#[test]
fn clear_is_idempotent() {
    let mut buf = PixelBuffer::new();
    buf.allocate(4, 4, PixelFormat::Rgba);
    buf.clear();
    buf.clear();
    assert!(!buf.is_allocated());
    assert_eq!(buf.desc(), BufferDesc::default());
}

#[test]
fn bind_external_borrows_without_copying_or_zeroing() {
    let mut backing = vec![5u8; 12];
    {
        let mut buf = PixelBuffer::new();
        buf.bind_external(&mut backing, 2, 2, PixelFormat::Rgb)
            .unwrap();
        assert_eq!(buf.ownership(), Some(Ownership::Borrowed));
        assert!(buf.pixels().iter().all(|&b| b == 5));
        buf.pixels_mut()[0] = 42;
        buf.clear();
        assert!(!buf.is_allocated());
    }
    assert_eq!(backing[0], 42);
    assert_eq!(backing.len(), 12);
}

#[test]
fn bind_external_narrows_long_slices_and_rejects_short_ones() {
    let mut backing = vec![1u8; 10];
    let mut buf = PixelBuffer::new();
    buf.bind_external(&mut backing, 2, 2, PixelFormat::Grayscale)
        .unwrap();
    assert_eq!(buf.len(), 4);

    let mut short = vec![0u8; 3];
    let mut other = PixelBuffer::new();
    let err = other
        .bind_external(&mut short, 2, 2, PixelFormat::Grayscale)
        .unwrap_err();
    assert!(matches!(
        err,
        PixbufError::InsufficientData {
            needed: 4,
            actual: 3
        }
    ));
    assert!(!other.is_allocated());
}

#[test]
fn bind_external_bits_rejects_unknown_depth() {
    let mut backing = vec![0u8; 16];
    let mut buf = PixelBuffer::new();
    let err = buf
        .bind_external_bits(&mut backing, 2, 2, 16)
        .unwrap_err();
    assert!(matches!(err, PixbufError::UnsupportedFormat(_)));
    assert!(!buf.is_allocated());
}

#[test]
fn set_from_bytes_copies_into_owned_storage() {
    let src = gradient_rgb(3, 2);
    let mut buf = PixelBuffer::new();
    buf.set_from_bytes(&src, 3, 2, PixelFormat::Rgb).unwrap();
    assert_eq!(buf.pixels(), src.as_slice());
    assert_eq!(buf.ownership(), Some(Ownership::Owned));

    let err = buf
        .set_from_bytes(&src[..5], 3, 2, PixelFormat::Rgb)
        .unwrap_err();
    assert!(matches!(err, PixbufError::InsufficientData { .. }));
    assert_eq!(buf.pixels(), src.as_slice());
}

#[test]
fn set_from_bytes_detaches_from_borrowed_storage() {
    let mut backing = vec![0u8; 4];
    let mut buf = PixelBuffer::new();
    buf.bind_external(&mut backing, 2, 2, PixelFormat::Grayscale)
        .unwrap();
    buf.set_from_bytes(&[9, 9, 9, 9], 2, 2, PixelFormat::Grayscale)
        .unwrap();
    assert_eq!(buf.ownership(), Some(Ownership::Owned));
    drop(buf);
    assert_eq!(backing, vec![0u8; 4]);
}

#[test]
fn set_from_bytes_bits_shares_the_format_path() {
    let src = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let mut buf = PixelBuffer::new();
    buf.set_from_bytes_bits(&src, 2, 1, 32).unwrap();
    assert_eq!(buf.format(), PixelFormat::Rgba);
    assert_eq!(buf.pixels(), &src);

    assert!(buf.set_from_bytes_bits(&src, 2, 1, 7).is_err());
    assert!(!buf.is_allocated());
}

#[test]
fn aligned_bytes_with_packed_stride_match_set_from_bytes() {
    let src = gradient_rgb(4, 3);
    let mut packed = PixelBuffer::new();
    packed.set_from_bytes(&src, 4, 3, PixelFormat::Rgb).unwrap();
    let mut aligned = PixelBuffer::new();
    aligned
        .set_from_aligned_bytes(&src, 4, 3, PixelFormat::Rgb, 12)
        .unwrap();
    assert_eq!(aligned, packed);
}

#[test]
fn aligned_bytes_drop_row_padding() {
    // 2x2 RGB rows padded to 8 bytes; padding bytes are 0xEE.
    let src = [
        1, 2, 3, 4, 5, 6, 0xEE, 0xEE, //
        7, 8, 9, 10, 11, 12,
    ];
    let mut buf = PixelBuffer::new();
    buf.set_from_aligned_bytes(&src, 2, 2, PixelFormat::Rgb, 8)
        .unwrap();
    assert_eq!(buf.pixels(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);

    let err = buf
        .set_from_aligned_bytes(&src, 2, 2, PixelFormat::Rgb, 4)
        .unwrap_err();
    assert!(matches!(err, PixbufError::StrideTooSmall { stride: 4, min: 6 }));

    let mut bits = PixelBuffer::new();
    bits.set_from_aligned_bytes_bits(&src, 2, 2, 24, 8).unwrap();
    assert_eq!(bits, buf);
}

#[test]
fn clone_is_owned_deep_copy() {
    let mut backing = vec![3u8; 6];
    let borrowed = PixelBuffer::from_external(&mut backing, 2, 1, PixelFormat::Rgb).unwrap();
    let mut copy = borrowed.clone();
    assert_eq!(copy.ownership(), Some(Ownership::Owned));
    assert_eq!(copy, borrowed);
    copy.pixels_mut()[0] = 77;
    assert_eq!(borrowed.pixels()[0], 3);
}

#[test]
fn clone_of_unallocated_is_unallocated() {
    let empty = PixelBuffer::new();
    assert!(!empty.clone().is_allocated());

    let mut dst = PixelBuffer::new();
    dst.allocate(2, 2, PixelFormat::Rgba);
    dst.clone_from(&empty);
    assert!(!dst.is_allocated());
}

#[test]
fn clone_from_adopts_source_layout() {
    let src = PixelBuffer::from_bytes(&[1, 2, 3], 3, 1, PixelFormat::Grayscale).unwrap();
    let mut dst = PixelBuffer::new();
    dst.allocate(10, 10, PixelFormat::Rgba);
    dst.clone_from(&src);
    assert_eq!(dst, src);
    assert_eq!(dst.ownership(), Some(Ownership::Owned));
}

#[test]
fn into_owned_and_into_vec_detach_from_external_bytes() {
    let mut backing = vec![8u8; 4];
    let buf = PixelBuffer::from_external(&mut backing, 4, 1, PixelFormat::Grayscale).unwrap();
    let owned: PixelBuffer<'static> = buf.into_owned();
    assert_eq!(owned.ownership(), Some(Ownership::Owned));
    assert_eq!(owned.into_vec(), vec![8u8; 4]);
}

#[test]
fn from_desc_and_from_vec() {
    let buf = PixelBuffer::from_desc(BufferDesc::new(3, 2, PixelFormat::Rgba)).unwrap();
    assert_eq!(buf.len(), 24);
    assert!(PixelBuffer::from_desc(BufferDesc::new(3, 2, PixelFormat::Undefined)).is_err());

    let buf = PixelBuffer::from_vec(vec![1, 2, 3, 4, 5], 2, 2, PixelFormat::Grayscale).unwrap();
    assert_eq!(buf.pixels(), &[1, 2, 3, 4]);
    assert!(PixelBuffer::from_vec(vec![1], 2, 2, PixelFormat::Grayscale).is_err());
}

#[test]
fn debug_names_layout_and_ownership() {
    let buf = PixelBuffer::from_desc(BufferDesc::new(3, 2, PixelFormat::Rgb)).unwrap();
    assert_eq!(format!("{buf:?}"), "PixelBuffer(3x2, Rgb, Owned)");
    assert_eq!(format!("{:?}", PixelBuffer::new()), "PixelBuffer(unallocated)");
}
