/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use hfm_core::bit_depth::BitDepth;
use hfm_core::bytestream::{ZByteWriterTrait, ZWriter};
use hfm_core::colorspace::ColorSpace;
use hfm_core::log::trace;
use hfm_core::options::EncoderOptions;

use crate::bitstream::BitWriter;
use crate::constants::{DEFAULT_MAX_VALUE, HFM_HEADER_SIZE, HFM_MAGIC, HFM_TABLE_SIZE};
use crate::deinterleave::deinterleave_u8;
use crate::filter::filter_plane;
use crate::histogram::build_histogram;
use crate::huffman::{build_code_lengths, CanonicalTable};
use crate::HfmEncodeErrors;

const SUPPORTED_COLORSPACES: [ColorSpace; 2] = [ColorSpace::Luma, ColorSpace::RGB];

/// One channel, ready to be written
struct EncodedChannel {
    lengths: [u8; HFM_TABLE_SIZE],
    payload: Vec<u8>
}

impl EncodedChannel {
    fn size(&self) -> usize {
        HFM_TABLE_SIZE + 4 + self.payload.len()
    }
}

/// HFM image encoder
///
/// # Example
/// - Encode a 100 by 100 RGB image
///
/// ```
/// use hfm::hfm_core::bit_depth::BitDepth;
/// use hfm::hfm_core::colorspace::ColorSpace;
/// use hfm::hfm_core::options::EncoderOptions;
/// use hfm::HfmEncoder;
/// use hfm::HfmEncodeErrors;
///
/// const W:usize=100;
/// const H:usize=100;
///
/// fn main()->Result<(), HfmEncodeErrors>{
///     let pixels = std::array::from_fn::<u8,{W * H * 3},_>(|i| (i%256) as u8);
///     let mut encoder = HfmEncoder::new(&pixels,EncoderOptions::new(W,H,ColorSpace::RGB,BitDepth::Eight));
///     let mut sink: Vec<u8> = vec![];
///     let size = encoder.encode(&mut sink)?;
///     assert_eq!(size, sink.len());
///     Ok(())
///}
/// ```
pub struct HfmEncoder<'a> {
    // raw pixels, interleaved if there is more than one channel
    pixel_data: &'a [u8],
    options:    EncoderOptions,
    max_value:  u16
}

impl<'a> HfmEncoder<'a> {
    /// Create a new encoder which will encode the pixels
    ///
    /// # Arguments
    /// - data: Pixel data, size must be equal to `width*height*colorspace channels`
    /// - options: Encoder details for data, this contains width, height and number of color components
    #[allow(clippy::redundant_field_names)]
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> HfmEncoder<'a> {
        HfmEncoder {
            pixel_data: data,
            options:    options,
            max_value:  DEFAULT_MAX_VALUE
        }
    }

    /// Set the nominal maximum sample value stored in the header
    ///
    /// The codec does not interpret it, it is carried so that a
    /// decoder can hand it back to whoever writes the image out.
    pub fn set_max_value(&mut self, max_value: u16) {
        self.max_value = max_value;
    }

    /// Check the options and pixel buffer, returning the
    /// number of channels to encode
    fn validate(&self) -> Result<usize, HfmEncodeErrors> {
        let options = &self.options;

        if options.depth() != BitDepth::Eight {
            return Err(HfmEncodeErrors::UnsupportedDepth(options.depth()));
        }
        if !SUPPORTED_COLORSPACES.contains(&options.colorspace()) {
            return Err(HfmEncodeErrors::UnsupportedColorspace(
                options.colorspace(),
                &SUPPORTED_COLORSPACES
            ));
        }
        if options.width() == 0 {
            return Err(HfmEncodeErrors::ZeroDimension("width"));
        }
        if options.height() == 0 {
            return Err(HfmEncodeErrors::ZeroDimension("height"));
        }
        if (options.width() as u64) > u64::from(u32::MAX) {
            return Err(HfmEncodeErrors::TooLargeDimensions(options.width()));
        }
        if (options.height() as u64) > u64::from(u32::MAX) {
            return Err(HfmEncodeErrors::TooLargeDimensions(options.height()));
        }
        let components = options.colorspace().num_components();

        let expected_len = options
            .width()
            .checked_mul(options.height())
            .and_then(|x| x.checked_mul(components))
            .ok_or(HfmEncodeErrors::TooLargeDimensions(options.width()))?;

        if self.pixel_data.len() != expected_len {
            return Err(HfmEncodeErrors::LengthMismatch(
                expected_len,
                self.pixel_data.len()
            ));
        }
        Ok(components)
    }

    fn encode_channel(plane: &[u8], width: usize) -> Result<EncodedChannel, HfmEncodeErrors> {
        let residuals = filter_plane(plane, width);
        let histogram = build_histogram(&residuals);
        let lengths = build_code_lengths(&histogram)?;
        let table = CanonicalTable::new(&lengths);

        let mut writer = BitWriter::with_capacity(residuals.len() / 2);

        for residual in &residuals {
            let (code, length) = table.code(*residual);
            writer.put_bits(length, code);
        }
        let payload = writer.finish();

        if (payload.len() as u64) > u64::from(u32::MAX) {
            return Err(HfmEncodeErrors::PayloadTooLarge(payload.len()));
        }
        trace!(
            "{} symbols used, longest code {} bits, {} payload bytes",
            table.used_symbols(),
            table.max_length(),
            payload.len()
        );

        Ok(EncodedChannel { lengths, payload })
    }

    /// Encode every channel into memory, nothing is written
    /// unless all of them succeed
    fn encode_channels(&self) -> Result<Vec<EncodedChannel>, HfmEncodeErrors> {
        let components = self.validate()?;

        trace!("Image width: {}", self.options.width());
        trace!("Image height: {}", self.options.height());
        trace!("Image channels: {}", components);

        deinterleave_u8(self.pixel_data, components)
            .iter()
            .map(|plane| HfmEncoder::encode_channel(plane, self.options.width()))
            .collect()
    }

    fn write_container<T: ZByteWriterTrait>(
        &self, channels: &[EncodedChannel], sink: T
    ) -> Result<usize, HfmEncodeErrors> {
        let mut stream = ZWriter::new(sink);

        let total_size =
            HFM_HEADER_SIZE + channels.iter().map(EncodedChannel::size).sum::<usize>();
        stream.reserve(total_size)?;

        // validate() ensured these fit
        stream.write_const_bytes(&HFM_MAGIC)?;
        stream.write_u32_le_err(self.options.width() as u32)?;
        stream.write_u32_le_err(self.options.height() as u32)?;
        stream.write_u16_le_err(self.max_value)?;
        stream.write_u8_err(channels.len() as u8)?;

        for channel in channels {
            stream.write_const_bytes(&channel.lengths)?;
            stream.write_u32_le_err(channel.payload.len() as u32)?;
            stream.write_all(&channel.payload)?;
        }
        stream.flush()?;

        Ok(stream.bytes_written())
    }

    /// Encode the image into `sink`
    ///
    /// # Returns
    /// - Ok(size): Bytes written into the sink
    /// - Err: The error encountered during encoding, in which
    ///   case nothing was written unless the sink itself failed
    pub fn encode<T: ZByteWriterTrait>(&mut self, sink: T) -> Result<usize, HfmEncodeErrors> {
        let channels = self.encode_channels()?;
        self.write_container(&channels, sink)
    }

    /// Encode the image into the file at `path`
    ///
    /// The container is first written to `path` with a `.part` suffix
    /// appended then renamed over `path`, so an interrupted write never leaves
    /// a truncated container at the destination.
    ///
    /// # Returns
    /// - Ok(size): Size of the written file
    #[cfg(feature = "std")]
    pub fn encode_to_file<P: AsRef<std::path::Path>>(
        &mut self, path: P
    ) -> Result<usize, HfmEncodeErrors> {
        use std::fs::File;
        use std::io::BufWriter;

        let path = path.as_ref();
        let channels = self.encode_channels()?;

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".part");
        let temp_path = std::path::PathBuf::from(temp_name);

        let write_temp = || -> Result<usize, HfmEncodeErrors> {
            let mut writer = BufWriter::new(File::create(&temp_path)?);
            let size = self.write_container(&channels, &mut writer)?;
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
            Ok(size)
        };

        let size = match write_temp() {
            Ok(size) => size,
            Err(e) => {
                let _ = std::fs::remove_file(&temp_path);
                return Err(e);
            }
        };
        if let Err(e) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(size)
    }
}
