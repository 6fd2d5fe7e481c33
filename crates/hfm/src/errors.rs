/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during decoding and encoding.

use core::fmt::{Debug, Display, Formatter};

use hfm_core::bit_depth::BitDepth;
use hfm_core::bytestream::ZByteIoError;
use hfm_core::colorspace::ColorSpace;

use crate::constants::MAX_CODE_LENGTH;

/// Broad classification of a failure
///
/// Every error returned by this crate belongs to exactly one of these,
/// callers that only want to know why an artifact is unusable can
/// match on this instead of the individual variants.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HfmErrorKind {
    /// The input is not a well formed container
    Format,
    /// The input ended before a field was fully read
    TruncatedInput,
    /// The encoder was handed something it does not support
    UnsupportedInput,
    /// A payload does not decode under its own code table
    DecodeIntegrity,
    /// The encoder could not write to its sink
    Output
}

/// Possible Errors that may occur during decoding
pub enum HfmErrors {
    /// The image does not start with the magic bytes `HFM`
    ///
    /// Contains the three bytes found instead
    WrongMagicBytes([u8; 3]),
    /// Width or height in the header is zero
    ///
    /// # Arguments
    /// - 1st argument is the width
    /// - 2nd argument is the height
    ZeroDimensions(usize, usize),
    /// The header contains an invalid channel number
    ///
    /// The only supported counts are `1` and `3`
    UnknownChannels(u8),
    /// A dimension is larger than what the decoder was configured to accept
    ///
    /// # Arguments
    /// - 1st argument is the dimension name
    /// - 2nd argument is the value found
    /// - 3rd argument is the configured limit
    TooLargeDimensions(&'static str, usize, usize),
    /// A persisted code length is longer than the codec can represent
    InvalidCodeLength(u8),
    /// The input buffer doesn't have enough bytes to fully
    /// reconstruct the image
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes actually left
    InsufficientData(usize, usize),
    /// The persisted code lengths describe more codes than can
    /// exist without one being a prefix of another
    OverSubscribedCodes,
    /// A payload ran out of bits before all samples were decoded
    StreamExhausted,
    /// A bit sequence does not lead to any symbol
    CorruptCodePath,
    /// Payload bytes were left unread after the last sample (strict mode)
    UnconsumedPayload(usize),
    /// The unused bits of the final payload byte are not zero (strict mode)
    NonZeroPadding,
    /// Bytes were found after the last channel (strict mode)
    TrailingData(usize),
    /// Generic message
    GenericStatic(&'static str),
    IoErrors(ZByteIoError)
}

impl HfmErrors {
    /// Classify this error
    pub const fn kind(&self) -> HfmErrorKind {
        match self {
            HfmErrors::WrongMagicBytes(_)
            | HfmErrors::ZeroDimensions(_, _)
            | HfmErrors::UnknownChannels(_)
            | HfmErrors::TooLargeDimensions(_, _, _)
            | HfmErrors::InvalidCodeLength(_)
            | HfmErrors::GenericStatic(_) => HfmErrorKind::Format,

            HfmErrors::InsufficientData(_, _) | HfmErrors::IoErrors(_) => {
                HfmErrorKind::TruncatedInput
            }

            HfmErrors::OverSubscribedCodes
            | HfmErrors::StreamExhausted
            | HfmErrors::CorruptCodePath
            | HfmErrors::UnconsumedPayload(_)
            | HfmErrors::NonZeroPadding
            | HfmErrors::TrailingData(_) => HfmErrorKind::DecodeIntegrity
        }
    }
}

impl Debug for HfmErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            HfmErrors::WrongMagicBytes(found) => {
                writeln!(
                    f,
                    "Wrong magic bytes, expected `HFM` as image start but found {found:?}"
                )
            }
            HfmErrors::ZeroDimensions(width, height) => {
                writeln!(
                    f,
                    "Image dimensions cannot be zero, found width {width} and height {height}"
                )
            }
            HfmErrors::UnknownChannels(channel) => {
                writeln!(
                    f,
                    "Unknown channel number {channel}, expected either 1 or 3"
                )
            }
            HfmErrors::TooLargeDimensions(name, found, limit) => {
                writeln!(
                    f,
                    "Image {name} {found} greater than max configured {name} {limit}"
                )
            }
            HfmErrors::InvalidCodeLength(length) => {
                writeln!(
                    f,
                    "Invalid code length {length}, lengths cannot exceed {MAX_CODE_LENGTH}"
                )
            }
            HfmErrors::InsufficientData(expected, found) => {
                writeln!(
                    f,
                    "Insufficient data required {expected} but remaining stream has {found}"
                )
            }
            HfmErrors::OverSubscribedCodes => {
                writeln!(f, "Code lengths do not describe a valid prefix code")
            }
            HfmErrors::StreamExhausted => {
                writeln!(f, "Payload ended before all samples were decoded")
            }
            HfmErrors::CorruptCodePath => {
                writeln!(f, "Bit sequence does not correspond to any code, corrupt payload")
            }
            HfmErrors::UnconsumedPayload(bytes) => {
                writeln!(f, "{bytes} payload bytes left after the last sample")
            }
            HfmErrors::NonZeroPadding => {
                writeln!(f, "Padding bits of the last payload byte are not zero")
            }
            HfmErrors::TrailingData(bytes) => {
                writeln!(f, "{bytes} bytes found after the last channel")
            }
            HfmErrors::GenericStatic(val) => {
                writeln!(f, "{val}")
            }
            HfmErrors::IoErrors(value) => {
                writeln!(f, "I/O error {:?}", value)
            }
        }
    }
}

impl From<&'static str> for HfmErrors {
    fn from(r: &'static str) -> Self {
        Self::GenericStatic(r)
    }
}

impl From<ZByteIoError> for HfmErrors {
    fn from(value: ZByteIoError) -> Self {
        HfmErrors::IoErrors(value)
    }
}

/// Errors encountered during encoding
pub enum HfmEncodeErrors {
    /// Unsupported colorspace
    ///
    /// The first argument is the colorspace encountered
    /// The second argument is list of supported colorspaces
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    /// Only eight bit samples can be compressed
    UnsupportedDepth(BitDepth),
    /// The named dimension is zero, nothing to compress
    ZeroDimension(&'static str),
    /// Too large dimensions
    /// The dimensions cannot be correctly encoded to a width
    TooLargeDimensions(usize),
    /// Pixel buffer length does not match `width*height*components`
    ///
    /// # Arguments
    /// - 1st argument is the expected length
    /// - 2nd argument is the length found
    LengthMismatch(usize, usize),
    /// A channel's Huffman tree is deeper than the longest representable code
    CodeTooLong(usize),
    /// A channel's payload does not fit the 32 bit size field
    PayloadTooLarge(usize),
    /// The sink could not take the container
    IoError(ZByteIoError)
}

impl HfmEncodeErrors {
    /// Classify this error
    pub const fn kind(&self) -> HfmErrorKind {
        match self {
            HfmEncodeErrors::IoError(_) => HfmErrorKind::Output,
            _ => HfmErrorKind::UnsupportedInput
        }
    }
}

impl Debug for HfmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            HfmEncodeErrors::UnsupportedColorspace(found, supported) => {
                writeln!(f, "Cannot encode image with colorspace {found:?} into HFM, supported ones are {supported:?}")
            }
            HfmEncodeErrors::UnsupportedDepth(depth) => {
                writeln!(
                    f,
                    "Cannot encode image with depth {depth:?}, only {:?} is supported",
                    BitDepth::Eight
                )
            }
            HfmEncodeErrors::ZeroDimension(param) => writeln!(f, "The {param} is zero"),
            HfmEncodeErrors::TooLargeDimensions(found) => {
                writeln!(
                    f,
                    "Too large image dimensions {found}, HFM can only encode images less than {}",
                    u32::MAX
                )
            }
            HfmEncodeErrors::LengthMismatch(expected, found) => {
                writeln!(f, "Expected array of length {expected} but found {found}")
            }
            HfmEncodeErrors::CodeTooLong(length) => {
                writeln!(
                    f,
                    "Huffman code of length {length} exceeds the maximum of {MAX_CODE_LENGTH}"
                )
            }
            HfmEncodeErrors::PayloadTooLarge(size) => {
                writeln!(
                    f,
                    "Channel payload of {size} bytes is larger than {}",
                    u32::MAX
                )
            }
            HfmEncodeErrors::IoError(v) => {
                writeln!(f, "I/O error {:?}", v)
            }
        }
    }
}

impl Display for HfmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}
impl Display for HfmErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HfmEncodeErrors {}

#[cfg(feature = "std")]
impl std::error::Error for HfmErrors {}

impl From<ZByteIoError> for HfmEncodeErrors {
    fn from(value: ZByteIoError) -> Self {
        Self::IoError(value)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for HfmEncodeErrors {
    fn from(value: std::io::Error) -> Self {
        Self::IoError(ZByteIoError::StdIoError(value))
    }
}
