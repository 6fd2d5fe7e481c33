/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use hfm_core::colorspace::ColorSpace;
use serde::Deserialize;
use xxhash_rust::xxh3::xxh3_128;

#[cfg(test)]
mod container;

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonColorspace {
    RGB,
    Luma
}

impl JsonColorspace {
    pub fn to_colorspace(self) -> ColorSpace {
        match self {
            Self::RGB => ColorSpace::RGB,
            Self::Luma => ColorSpace::Luma
        }
    }
}

/// Synthetic image content, generated instead of stored
#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    Constant,
    Gradient,
    Checker,
    Vertical,
    Stripes,
    Noise
}

impl Pattern {
    /// Generate `width*height*components` interleaved samples
    pub fn generate(self, width: usize, height: usize, components: usize) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(width * height * components);
        // pcg style lcg, the top byte is the sample
        let mut state = 0x9E37_79B9_7F4A_7C15_u64;

        for y in 0..height {
            for x in 0..width {
                for c in 0..components {
                    let value = match self {
                        Self::Constant => 128,
                        Self::Gradient => (x + y + c * 32) & 255,
                        Self::Checker => {
                            if ((x / 4) + (y / 4)) % 2 == 1 {
                                255
                            } else {
                                0
                            }
                        }
                        Self::Vertical => (y * 3 + c) & 255,
                        Self::Stripes => (x * 17 + c * 85) & 255,
                        Self::Noise => {
                            state = state
                                .wrapping_mul(6364136223846793005)
                                .wrapping_add(1442695040888963407);
                            (state >> 56) as usize
                        }
                    };
                    pixels.push(value as u8);
                }
            }
        }
        pixels
    }
}

#[derive(Clone, Deserialize, Debug)]
pub struct TestEntry {
    pub name:            String,
    pub width:           usize,
    pub height:          usize,
    pub colorspace:      JsonColorspace,
    pub pattern:         Pattern,
    /// Exact container size, any change in tree construction shows up here
    pub size:            usize,
    pub max_code_length: u8,
    pub comment:         Option<String>
}

pub fn hash(contents: &[u8]) -> u128 {
    xxh3_128(contents)
}
