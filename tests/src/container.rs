/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::read;
use std::path::Path;

use hfm::hfm_core::bit_depth::BitDepth;
use hfm::hfm_core::bytestream::ZCursor;
use hfm::hfm_core::options::{DecoderOptions, EncoderOptions};
use hfm::{HfmDecoder, HfmEncoder};

use crate::{hash, TestEntry};

/// Longest code length over every channel table of a container
fn max_code_length(container: &[u8], channels: usize) -> u8 {
    let mut position = 14;
    let mut max_length = 0;

    for _ in 0..channels {
        let lengths = &container[position..position + 256];
        max_length = max_length.max(*lengths.iter().max().unwrap());
        position += 256;

        let size = u32::from_le_bytes(container[position..position + 4].try_into().unwrap());
        position += 4 + size as usize;
    }
    assert_eq!(position, container.len(), "Channels do not span the container");
    max_length
}

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_hfm() {
    let file = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/hfm.json");

    let json_file = read(file).unwrap();

    let entries: Vec<TestEntry> = serde_json::from_slice(&json_file).unwrap();

    let mut error = false;
    let mut files = Vec::new();

    for entry in &entries {
        let colorspace = entry.colorspace.to_colorspace();
        let components = colorspace.num_components();
        let pixels = entry
            .pattern
            .generate(entry.width, entry.height, components);

        let options = EncoderOptions::new(entry.width, entry.height, colorspace, BitDepth::Eight);
        let mut container: Vec<u8> = vec![];
        HfmEncoder::new(&pixels, options)
            .encode(&mut container)
            .unwrap();

        let options = DecoderOptions::default().set_strict_mode(true);
        let decoded = HfmDecoder::new_with_options(ZCursor::new(&container), options)
            .decode()
            .unwrap();

        let expected_hash = hash(&pixels);
        let found_hash = hash(&decoded);
        let found_max = max_code_length(&container, components);

        if container.len() != entry.size
            || found_max != entry.max_code_length
            || found_hash != expected_hash
        {
            error = true;
            files.push(entry.to_owned());
            // report error
            let err = format!(
                "Mismatch for {}\nExpected size {} found {}\nExpected longest code {} found {}\nExpected hash {} found {}\nConfig:{:#?}",
                entry.name,
                entry.size,
                container.len(),
                entry.max_code_length,
                found_max,
                expected_hash,
                found_hash,
                entry
            );
            eprintln!("{}\n", err);
        }
    }
    if error {
        panic!("Errors found during test encoding\n {:#?}", files);
    }
}
