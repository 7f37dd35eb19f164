use bmpsketch::rgb::RGB8;
use bmpsketch::*;
use enough::Unstoppable;
use tempfile::tempdir;

#[test]
fn save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cross.bmp");

    let image = DecodedImage::new(6, 4, PixelLayout::Bgra8, RowOrder::BottomUp).unwrap();
    let mut surface = RasterSurface::new(image);
    surface.draw_cross(RGB8::new(255, 0, 0));
    save_bmp(&path, surface.image(), Unstoppable).unwrap();

    let loaded = load_bmp(&path, BmpPermissiveness::Strict, Unstoppable).unwrap();
    assert_eq!(loaded.width(), 6);
    assert_eq!(loaded.height(), 4);
    assert_eq!(loaded.layout(), PixelLayout::Bgra8);
    assert_eq!(loaded.pixels(), surface.image().pixels());

    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk.len(), 54 + 6 * 4 * 4);
}

#[test]
fn missing_input_is_open_error() {
    let dir = tempdir().unwrap();
    let err = load_bmp(
        dir.path().join("does-not-exist.bmp"),
        BmpPermissiveness::Lenient,
        Unstoppable,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Open);
    assert!(err.to_string().starts_with("cannot open"));
}

#[test]
fn unwritable_output_is_open_error() {
    let dir = tempdir().unwrap();
    let image = DecodedImage::new(1, 1, PixelLayout::Bgr8, RowOrder::BottomUp).unwrap();
    let err = save_bmp(dir.path().join("no/such/dir/out.bmp"), &image, Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Open);
}

#[test]
fn non_bmp_file_is_format_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"P6\n1 1\n255\n\x00\x00\x00").unwrap();
    let err = load_bmp(&path, BmpPermissiveness::Lenient, Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn black_2x2_preview() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("black.bmp");
    let image = DecodedImage::new(2, 2, PixelLayout::Bgr8, RowOrder::BottomUp).unwrap();
    save_bmp(&path, &image, Unstoppable).unwrap();

    let loaded = load_bmp(&path, BmpPermissiveness::Lenient, Unstoppable).unwrap();
    let mut out = Vec::new();
    AsciiPreview::default().print_to(&loaded, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "....\n....\n");
}
