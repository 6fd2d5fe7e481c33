#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = hfm::HfmDecoder::new(hfm::hfm_core::bytestream::ZCursor::new(data));
    let _ = decoder.decode();
});
