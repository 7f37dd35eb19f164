#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the policy
    let _ = bmpsketch::ImageInfo::from_bytes(data);
    let _ = bmpsketch::decode_bmp(data, enough::Unstoppable);
    let _ = bmpsketch::DecodeRequest::new(data)
        .with_permissiveness(bmpsketch::BmpPermissiveness::Strict)
        .decode(enough::Unstoppable);
});
