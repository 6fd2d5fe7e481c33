/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An owned image buffer and whole-buffer helpers
//!
//! Readers and writers of other pixel formats exchange images with the
//! codec through [`ImageBuffer`], the codec never converts samples itself.

use alloc::vec::Vec;

use hfm_core::bit_depth::BitDepth;
use hfm_core::bytestream::ZCursor;
use hfm_core::colorspace::ColorSpace;
use hfm_core::options::{DecoderOptions, EncoderOptions};

use crate::constants::DEFAULT_MAX_VALUE;
use crate::{HfmDecoder, HfmEncodeErrors, HfmEncoder, HfmErrors};

/// Row major, interleaved image samples
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageBuffer {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    depth:      BitDepth,
    max_value:  u16,
    pixels:     Vec<u8>
}

impl ImageBuffer {
    /// Create an eight bit image buffer
    ///
    /// Nothing is validated here, [`compress`] reports buffers
    /// the codec cannot handle.
    pub fn new(pixels: Vec<u8>, width: usize, height: usize, colorspace: ColorSpace) -> ImageBuffer {
        ImageBuffer {
            width,
            height,
            colorspace,
            depth: BitDepth::Eight,
            max_value: DEFAULT_MAX_VALUE,
            pixels
        }
    }

    /// Set the bit depth the samples are claimed to have
    pub fn set_depth(mut self, depth: BitDepth) -> Self {
        self.depth = depth;
        self
    }

    /// Set the nominal maximum sample value
    pub fn set_max_value(mut self, max_value: u16) -> Self {
        self.max_value = max_value;
        self
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    pub const fn depth(&self) -> BitDepth {
        self.depth
    }

    pub const fn max_value(&self) -> u16 {
        self.max_value
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer returning its samples
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Encoder options describing this buffer
    pub fn encoder_options(&self) -> EncoderOptions {
        EncoderOptions::new(self.width, self.height, self.colorspace, self.depth)
    }
}

/// Compress an image buffer into an HFM container
///
/// # Example
/// ```
/// use hfm::hfm_core::colorspace::ColorSpace;
/// use hfm::{compress, decompress, ImageBuffer};
///
/// let image = ImageBuffer::new(vec![10, 10, 10, 11], 2, 2, ColorSpace::Luma);
/// let container = compress(&image).unwrap();
/// assert_eq!(decompress(&container).unwrap(), image);
/// ```
pub fn compress(image: &ImageBuffer) -> Result<Vec<u8>, HfmEncodeErrors> {
    let mut encoder = HfmEncoder::new(&image.pixels, image.encoder_options());
    encoder.set_max_value(image.max_value);

    let mut output = Vec::new();
    encoder.encode(&mut output)?;

    Ok(output)
}

/// Decompress an HFM container
///
/// Any dimension `compress` can write is accepted, the
/// allocation is still bounded by the length of `data`.
pub fn decompress(data: &[u8]) -> Result<ImageBuffer, HfmErrors> {
    decompress_with_options(data, DecoderOptions::new_unbounded())
}

/// Decompress an HFM container
pub fn decompress_with_options(
    data: &[u8], options: DecoderOptions
) -> Result<ImageBuffer, HfmErrors> {
    let mut decoder = HfmDecoder::new_with_options(ZCursor::new(data), options);
    let pixels = decoder.decode()?;

    let (width, height) = decoder
        .dimensions()
        .ok_or(HfmErrors::GenericStatic("Headers were not decoded"))?;
    let colorspace = decoder
        .colorspace()
        .ok_or(HfmErrors::GenericStatic("Headers were not decoded"))?;
    let max_value = decoder.max_value().unwrap_or(DEFAULT_MAX_VALUE);

    Ok(ImageBuffer::new(pixels, width, height, colorspace)
        .set_depth(decoder.bit_depth())
        .set_max_value(max_value))
}
