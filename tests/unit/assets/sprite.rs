use super::*;

#[test]
fn rejects_mismatched_lengths_and_empty_sizes() {
    assert!(Sprite::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(Sprite::from_premul_rgba8(0, 2, Vec::new()).is_err());
}

#[test]
fn straight_input_is_premultiplied() {
    let s = Sprite::from_straight_rgba8(1, 2, vec![255, 0, 0, 128, 9, 9, 9, 0]).unwrap();
    assert_eq!(s.width(), 1);
    assert_eq!(s.height(), 2);
    assert_eq!(s.pixels(), &[128, 0, 0, 128, 0, 0, 0, 0]);
}

#[test]
fn decodes_png_bytes() {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([0, 255, 0, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let s = Sprite::decode(&bytes).unwrap();
    assert_eq!((s.width(), s.height()), (3, 2));
    assert!(s.pixels().chunks_exact(4).all(|px| px == [0, 255, 0, 255]));
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(Sprite::decode(b"not an image").is_err());
}

#[test]
fn clones_share_pixels() {
    let a = Sprite::from_premul_rgba8(1, 1, vec![1, 2, 3, 4]).unwrap();
    let b = a.clone();
    assert!(std::ptr::eq(a.pixels().as_ptr(), b.pixels().as_ptr()));
}
