#![no_main]

use hfm::hfm_core::colorspace::ColorSpace;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1
    {
        // first byte picks the row width, the rest are samples
        let width = usize::from(data[0]).max(1);
        let data = &data[1..];
        let height = data.len() / width;

        if height == 0 {
            return;
        }
        let pixels = data[..width * height].to_vec();
        let image = hfm::ImageBuffer::new(pixels, width, height, ColorSpace::Luma);
        let compressed = hfm::compress(&image).expect("Failed to compress a valid image!");
        let decoded = hfm::decompress(&compressed).expect("Failed to decompress valid compressed data!");
        assert!(
            image == decoded,
            "The decompressed data doesn't match the original data!"
        );
    }
});
