/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use hfm_core::bit_depth::BitDepth;
use hfm_core::bytestream::{ZByteReaderTrait, ZReader};
use hfm_core::colorspace::ColorSpace;
use hfm_core::log::{trace, warn};
use hfm_core::options::DecoderOptions;

use crate::bitstream::BitReader;
use crate::constants::{HFM_MAGIC, HFM_TABLE_SIZE};
use crate::deinterleave::interleave_u8;
use crate::errors::HfmErrors;
use crate::filter::unfilter_plane;
use crate::huffman::{CanonicalTable, DecodeTrie};

/// Bytes every channel carries before its payload
const CHANNEL_OVERHEAD: usize = HFM_TABLE_SIZE + 4;

/// An HFM decoder
///
/// The decoder is initialized by calling `new`
/// and either of [`decode_headers`] to decode headers
/// or [`decode`] to return uncompressed pixels
///
/// Additional methods are provided that give more
/// details of the compressed image like width and height
/// are accessible after decoding headers
///
/// [`decode_headers`]:HfmDecoder::decode_headers
/// [`decode`]:HfmDecoder::decode
pub struct HfmDecoder<T>
where
    T: ZByteReaderTrait
{
    width:           usize,
    height:          usize,
    max_value:       u16,
    colorspace:      ColorSpace,
    decoded_headers: bool,
    stream:          ZReader<T>,
    options:         DecoderOptions
}

impl<T> HfmDecoder<T>
where
    T: ZByteReaderTrait
{
    /// Create a new HFM decoder with the default options
    ///
    /// # Arguments
    /// - `data`: The compressed data
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hfm::hfm_core::bytestream::ZCursor;
    /// let mut decoder = hfm::HfmDecoder::new(ZCursor::new(&[]));
    /// // additional code
    /// ```
    pub fn new(data: T) -> HfmDecoder<T> {
        HfmDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new HFM decoder that obeys specified restrictions
    ///
    /// E.g can be used to set width and height limits to prevent OOM attacks
    ///
    /// # Example
    /// ```
    /// use hfm::hfm_core::bytestream::ZCursor;
    /// use hfm::hfm_core::options::DecoderOptions;
    /// use hfm::HfmDecoder;
    /// // only decode images less than 10 in both width and height
    ///
    /// let options = DecoderOptions::default().set_max_width(10).set_max_height(10);
    ///
    /// let mut decoder = HfmDecoder::new_with_options(ZCursor::new([]), options);
    /// ```
    #[allow(clippy::redundant_field_names)]
    pub fn new_with_options(data: T, options: DecoderOptions) -> HfmDecoder<T> {
        HfmDecoder {
            width:           0,
            height:          0,
            max_value:       0,
            colorspace:      ColorSpace::Luma,
            decoded_headers: false,
            stream:          ZReader::new(data),
            options:         options
        }
    }

    /// Decode the header storing needed information into
    /// the decoder instance
    ///
    /// # Returns
    /// - On success: Nothing
    /// - On error: The error encountered when decoding headers
    pub fn decode_headers(&mut self) -> Result<(), HfmErrors> {
        let magic = self.stream.read_fixed_bytes_or_error::<3>()?;

        if magic != HFM_MAGIC {
            return Err(HfmErrors::WrongMagicBytes(magic));
        }

        let width = self.stream.get_u32_le_err()? as usize;
        let height = self.stream.get_u32_le_err()? as usize;
        let max_value = self.stream.get_u16_le_err()?;
        let channels = self.stream.get_u8_err()?;

        if width == 0 || height == 0 {
            return Err(HfmErrors::ZeroDimensions(width, height));
        }
        if width > self.options.max_width() {
            return Err(HfmErrors::TooLargeDimensions(
                "width",
                width,
                self.options.max_width()
            ));
        }
        if height > self.options.max_height() {
            return Err(HfmErrors::TooLargeDimensions(
                "height",
                height,
                self.options.max_height()
            ));
        }
        self.colorspace = match channels {
            1 => ColorSpace::Luma,
            3 => ColorSpace::RGB,
            _ => return Err(HfmErrors::UnknownChannels(channels))
        };
        self.width = width;
        self.height = height;
        self.max_value = max_value;

        trace!("Image width: {:?}", self.width);
        trace!("Image height: {:?}", self.height);
        trace!("Image max value: {:?}", self.max_value);
        trace!("Image colorspace: {:?}", self.colorspace);

        self.decoded_headers = true;

        Ok(())
    }

    /// Return the number of bytes required to hold a decoded image
    ///
    /// # Returns
    ///  - `Some(usize)`: Minimum size for a buffer needed to decode the image
    ///  - `None`: Indicates the headers were not decoded or the size
    ///     does not fit a `usize`
    pub fn output_buffer_size(&self) -> Option<usize> {
        if self.decoded_headers {
            self.width
                .checked_mul(self.height)?
                .checked_mul(self.colorspace.num_components())
        } else {
            None
        }
    }

    /// Refuse streams that are too short to hold every channel
    /// before allocating anything for them.
    ///
    /// Each sample costs at least one bit.
    fn check_stream_length(&mut self) -> Result<(), HfmErrors> {
        let channels = self.colorspace.num_components();
        let min_payload = self.width.saturating_mul(self.height).div_ceil(8);
        let expected = channels.saturating_mul(CHANNEL_OVERHEAD.saturating_add(min_payload));
        let remaining = self.stream.remaining()?;

        if remaining < expected {
            return Err(HfmErrors::InsufficientData(expected, remaining));
        }
        Ok(())
    }

    /// Decode the image, returning the uncompressed samples
    /// or the error encountered during decoding
    ///
    /// Samples are interleaved if the image has more than one channel.
    pub fn decode(&mut self) -> Result<Vec<u8>, HfmErrors> {
        if !self.decoded_headers {
            self.decode_headers()?;
        }
        let size = self
            .output_buffer_size()
            .ok_or(HfmErrors::GenericStatic("Image dimensions overflow a usize"))?;

        self.check_stream_length()?;

        let mut output = vec![0; size];

        self.decode_into(&mut output)?;

        Ok(output)
    }

    /// Decode the image into `pixels`
    ///
    /// Returns an error if the buffer cannot hold the decoded image.
    /// `pixels` is only written to once every channel decoded successfully.
    pub fn decode_into(&mut self, pixels: &mut [u8]) -> Result<(), HfmErrors> {
        if !self.decoded_headers {
            self.decode_headers()?;
        }
        let size = self
            .output_buffer_size()
            .ok_or(HfmErrors::GenericStatic("Image dimensions overflow a usize"))?;

        if pixels.len() < size {
            return Err(HfmErrors::InsufficientData(size, pixels.len()));
        }
        self.check_stream_length()?;

        let channels = self.colorspace.num_components();
        let mut planes = Vec::with_capacity(channels);

        for channel in 0..channels {
            let residuals = self.decode_channel(channel)?;
            planes.push(unfilter_plane(&residuals, self.width));
        }

        let trailing = self.stream.remaining()?;

        if trailing != 0 {
            if self.options.strict_mode() {
                return Err(HfmErrors::TrailingData(trailing));
            }
            warn!("{trailing} bytes found after the last channel, ignoring them");
        }

        interleave_u8(&planes, &mut pixels[..size]);

        Ok(())
    }

    /// Read one channel's table and payload, returning its residuals
    fn decode_channel(&mut self, channel: usize) -> Result<Vec<u8>, HfmErrors> {
        let lengths = self.stream.read_fixed_bytes_or_error::<HFM_TABLE_SIZE>()?;
        let payload_len = self.stream.get_u32_le_err()? as usize;
        let remaining = self.stream.remaining()?;

        if payload_len > remaining {
            return Err(HfmErrors::InsufficientData(payload_len, remaining));
        }
        let mut payload = vec![0; payload_len];
        self.stream.read_exact_bytes(&mut payload)?;

        let table = CanonicalTable::from_lengths(&lengths)?;
        let trie = DecodeTrie::new(&table)?;

        trace!(
            "Channel {channel}: {} symbols, longest code {} bits, {payload_len} payload bytes",
            table.used_symbols(),
            table.max_length()
        );

        let mut reader = BitReader::new(&payload);
        let mut residuals = vec![0; self.width * self.height];

        for residual in residuals.iter_mut() {
            *residual = trie.decode_symbol(&mut reader)?;
        }

        let unread = payload_len - reader.bytes_consumed();

        if unread != 0 {
            if self.options.strict_mode() {
                return Err(HfmErrors::UnconsumedPayload(unread));
            }
            warn!("Channel {channel}: {unread} payload bytes left after the last sample");
        }
        if !reader.padding_is_zero() {
            if self.options.strict_mode() {
                return Err(HfmErrors::NonZeroPadding);
            }
            warn!("Channel {channel}: padding bits of the last payload byte are not zero");
        }
        Ok(residuals)
    }

    /// Returns the image colorspace or none if the headers haven't been decoded
    ///
    /// Colorspace returned is either [Luma] for one channel or [RGB] for three
    ///
    /// [Luma]: hfm_core::colorspace::ColorSpace::Luma
    /// [RGB]: hfm_core::colorspace::ColorSpace::RGB
    pub const fn colorspace(&self) -> Option<ColorSpace> {
        if self.decoded_headers {
            Some(self.colorspace)
        } else {
            None
        }
    }

    /// Return the bit depth of decoded samples
    ///
    /// This is always 8
    ///
    /// ```
    /// use hfm::hfm_core::bit_depth::BitDepth;
    /// use hfm::hfm_core::bytestream::ZCursor;
    /// use hfm::HfmDecoder;
    /// let decoder = HfmDecoder::new(ZCursor::new(&[]));
    /// assert_eq!(decoder.bit_depth(),BitDepth::Eight)
    /// ```
    pub const fn bit_depth(&self) -> BitDepth {
        BitDepth::Eight
    }

    /// Return the nominal maximum sample value stored in the header
    ///
    /// Or none if the headers haven't been decoded
    pub const fn max_value(&self) -> Option<u16> {
        if self.decoded_headers {
            Some(self.max_value)
        } else {
            None
        }
    }

    /// Return the width and height of the image
    ///
    /// Or none if the headers haven't been decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            return Some((self.width, self.height));
        }
        None
    }
}
