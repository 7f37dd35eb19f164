#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bpp: u16, pixels: &[u8]) -> Vec<u8> {
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(54 + pixels.len() as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
    bmp.extend_from_slice(pixels);
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 24-bit, blue
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp(1, 1, 24, &[0xff, 0, 0, 0])).unwrap();

    // 3x2 24-bit bottom-up, black and white
    let rows = [0u8, 0, 0, 255, 255, 255, 0, 0, 0, 0, 0, 0,
                255, 255, 255, 0, 0, 0, 255, 255, 255, 0, 0, 0];
    fs::write(format!("{dir}/bmp_3x2.bmp"), bmp(3, 2, 24, &rows)).unwrap();

    // 2x2 32-bit top-down
    let rows = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
    fs::write(format!("{dir}/bmp_2x2_topdown.bmp"), bmp(2, -2, 32, &rows)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/bmp_16bit.bmp"), bmp(1, 1, 16, &[0; 4])).unwrap();
    fs::write(format!("{dir}/bmp_truncated.bmp"), bmp(4, 4, 24, &[0x80; 10])).unwrap();

    println!("Generated seed corpus in {dir}/");
}
