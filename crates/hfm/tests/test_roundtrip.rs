/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use hfm::hfm_core::bit_depth::BitDepth;
use hfm::hfm_core::bytestream::ZCursor;
use hfm::hfm_core::colorspace::ColorSpace;
use hfm::hfm_core::options::EncoderOptions;
use hfm::{compress, decompress, HfmDecoder, HfmEncoder, ImageBuffer};
use nanorand::Rng;

fn round_trip(pixels: &[u8], width: usize, height: usize, colorspace: ColorSpace) -> Vec<u8> {
    let options = EncoderOptions::new(width, height, colorspace, BitDepth::Eight);
    let mut encoded: Vec<u8> = vec![];
    HfmEncoder::new(pixels, options).encode(&mut encoded).unwrap();

    let mut decoder = HfmDecoder::new(ZCursor::new(&encoded));
    let decoded = decoder.decode().unwrap();

    assert_eq!(decoder.dimensions(), Some((width, height)));
    assert_eq!(decoder.colorspace(), Some(colorspace));
    assert_eq!(decoded.len(), pixels.len());
    assert_eq!(decoded, pixels);

    encoded
}

#[test]
fn concrete_two_by_two() {
    let encoded = round_trip(&[10, 10, 10, 11], 2, 2, ColorSpace::Luma);

    assert_eq!(encoded.len(), 275);
    assert_eq!(encoded[274], 0x4C);
}

#[test]
fn random_luma() {
    let mut rand = nanorand::WyRand::new_seed(0x5eed);

    for _ in 0..20 {
        let width = rand.generate_range(1_usize..=64);
        let height = rand.generate_range(1_usize..=64);
        let mut pixels = vec![0_u8; width * height];
        rand.fill(&mut pixels);

        round_trip(&pixels, width, height, ColorSpace::Luma);
    }
}

#[test]
fn random_rgb() {
    let mut rand = nanorand::WyRand::new_seed(42);

    for _ in 0..20 {
        let width = rand.generate_range(1_usize..=48);
        let height = rand.generate_range(1_usize..=48);
        let mut pixels = vec![0_u8; width * height * 3];
        rand.fill(&mut pixels);

        round_trip(&pixels, width, height, ColorSpace::RGB);
    }
}

#[test]
fn smooth_gradient_compresses() {
    let (width, height) = (256, 64);
    let pixels: Vec<u8> = (0..width * height).map(|i| (i % width) as u8).collect();

    let encoded = round_trip(&pixels, width, height, ColorSpace::Luma);
    // residuals are all 1 except the first column
    assert!(encoded.len() < pixels.len() / 4);
}

#[test]
fn single_value_channel() {
    let pixels = vec![77_u8; 31 * 7];
    let encoded = round_trip(&pixels, 31, 7, ColorSpace::Luma);

    // the first column keeps 77, every other residual is 0
    let lengths = &encoded[14..270];
    assert_eq!(lengths[77], 1);
    assert_eq!(lengths[0], 1);
    assert_eq!(lengths.iter().filter(|x| **x != 0).count(), 2);
}

#[test]
fn degenerate_single_column() {
    // one column means every residual is the raw, identical sample
    let pixels = vec![200_u8; 9];
    let encoded = round_trip(&pixels, 1, 9, ColorSpace::Luma);

    let lengths = &encoded[14..270];
    assert_eq!(lengths[200], 1);
    assert_eq!(lengths.iter().map(|x| u32::from(*x)).sum::<u32>(), 1);
    // nine one bit codes
    assert_eq!(&encoded[270..274], &2_u32.to_le_bytes());
    assert_eq!(&encoded[274..], &[0, 0]);
}

#[test]
fn channels_are_independent() {
    // red is constant, green counts, blue is noise
    let mut rand = nanorand::WyRand::new_seed(7);
    let (width, height) = (40, 30);
    let mut pixels = vec![0_u8; width * height * 3];

    for (i, pix) in pixels.chunks_exact_mut(3).enumerate() {
        pix[0] = 9;
        pix[1] = i as u8;
        pix[2] = rand.generate::<u8>();
    }
    round_trip(&pixels, width, height, ColorSpace::RGB);
}

#[test]
fn compression_is_deterministic() {
    let mut rand = nanorand::WyRand::new_seed(1234);
    let mut pixels = vec![0_u8; 50 * 50 * 3];
    rand.fill(&mut pixels);

    let image = ImageBuffer::new(pixels, 50, 50, ColorSpace::RGB);
    assert_eq!(compress(&image).unwrap(), compress(&image).unwrap());
    assert_eq!(decompress(&compress(&image).unwrap()).unwrap(), image);
}

#[cfg(feature = "std")]
#[test]
fn encode_to_file_publishes_whole_container() {
    let pixels: Vec<u8> = (0..16 * 16).map(|x| (x * 3) as u8).collect();
    let path = std::env::temp_dir().join(format!("hfm-roundtrip-{}.hfm", std::process::id()));

    let size = HfmEncoder::new(
        &pixels,
        EncoderOptions::new(16, 16, ColorSpace::Luma, BitDepth::Eight)
    )
    .encode_to_file(&path)
    .unwrap();

    let mut part = path.clone().into_os_string();
    part.push(".part");
    assert!(!std::path::Path::new(&part).exists());

    let contents = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(contents.len(), size);
    assert_eq!(decompress(&contents).unwrap().pixels(), &pixels[..]);
}
