/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use hfm_core::bit_depth::BitDepth;

/// Container signature, ascii `HFM`
pub(crate) const HFM_MAGIC: [u8; 3] = *b"HFM";
/// magic + width + height + max value + channel count
pub(crate) const HFM_HEADER_SIZE: usize = 3 + 4 + 4 + 2 + 1;
/// One code length per byte value
pub(crate) const HFM_TABLE_SIZE: usize = 256;
/// Codes are stored in a `u64`
pub(crate) const MAX_CODE_LENGTH: u8 = 64;
/// Sample range written when the caller does not provide one
pub(crate) const DEFAULT_MAX_VALUE: u16 = BitDepth::Eight.max_value();
