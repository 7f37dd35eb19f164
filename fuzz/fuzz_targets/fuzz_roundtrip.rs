#![no_main]
use bmpsketch::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let Ok(decoded) = decode_bmp_with_limits(data, &limits, enough::Unstoppable) else {
        return;
    };

    // Draw across the whole image, including points off the canvas
    let mut surface = RasterSurface::new(decoded);
    let (w, h) = (surface.width() as i32, surface.height() as i32);
    surface.draw_line(-1, -1, w, h, rgb::RGB8::new(1, 2, 3));
    surface.draw_cross(rgb::RGB8::new(255, 0, 0));
    let _ = AsciiPreview::default().render(surface.image());

    let encoded = encode_bmp(surface.image(), enough::Unstoppable).expect("re-encode failed");
    let Ok(again) = decode_bmp(&encoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(again.pixels(), surface.image().pixels(), "roundtrip pixel mismatch");
    assert_eq!(again.width(), surface.width());
    assert_eq!(again.height(), surface.height());
    assert_eq!(again.row_order(), surface.image().row_order());
});
