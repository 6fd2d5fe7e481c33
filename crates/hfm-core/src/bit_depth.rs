/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image bit depth information

/// The image bit depth.
///
/// Only [`BitDepth::Eight`] is understood by the hfm codec,
/// the other variants exist so callers can describe what they
/// have and get a precise error back instead of a silent conversion.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum BitDepth {
    /// Eight bit depth.
    ///
    /// Images with such bit depth use [`u8`] to store
    /// pixels and use the whole range from 0-255.
    Eight,
    /// Sixteen bit depth
    ///
    /// Images with such bit depths use [`u16`] to store values and use the whole range
    /// i.e 0-65535
    Sixteen,
    /// Floating point samples, usually in the range 0.0-1.0
    Float32,
    /// Bit depth information is unknown
    #[default]
    Unknown
}

impl BitDepth {
    /// Get the max value supported by the bit depth
    #[allow(clippy::zero_prefixed_literal)]
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Eight => (1 << 08) - 1,
            Self::Sixteen => u16::MAX,
            Self::Float32 => 1,
            Self::Unknown => 0
        }
    }
}
