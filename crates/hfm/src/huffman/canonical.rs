/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::constants::{HFM_TABLE_SIZE, MAX_CODE_LENGTH};
use crate::errors::HfmErrors;

const LENGTH_SLOTS: usize = MAX_CODE_LENGTH as usize + 1;

/// A canonical Huffman table
///
/// Codes are assigned in ascending `(length, symbol)` order so the table
/// is fully described by its 256 code lengths.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CanonicalTable {
    lengths:    [u8; HFM_TABLE_SIZE],
    codes:      [u64; HFM_TABLE_SIZE],
    max_length: u8
}

impl CanonicalTable {
    /// Build a table from lengths known to form a prefix code
    ///
    /// Lengths must not exceed [`MAX_CODE_LENGTH`] and must satisfy
    /// the Kraft inequality, which always holds for lengths produced by
    /// [`build_code_lengths`](super::build_code_lengths).
    pub(crate) fn new(lengths: &[u8; HFM_TABLE_SIZE]) -> CanonicalTable {
        let mut length_counts = [0_u64; LENGTH_SLOTS];
        let mut max_length = 0;

        for length in lengths.iter().filter(|x| **x != 0) {
            length_counts[usize::from(*length)] += 1;
            max_length = max_length.max(*length);
        }

        let mut next_code = [0_u64; LENGTH_SLOTS];
        let mut code = 0_u64;

        for i in 1..LENGTH_SLOTS {
            // a complete code wraps exactly once the last length is passed
            code = code.wrapping_add(length_counts[i - 1]).wrapping_shl(1);
            next_code[i] = code;
        }

        let mut codes = [0_u64; HFM_TABLE_SIZE];

        for (code, length) in codes.iter_mut().zip(lengths.iter()) {
            if *length == 0 {
                continue;
            }
            let slot = &mut next_code[usize::from(*length)];
            *code = *slot;
            *slot = slot.wrapping_add(1);
        }

        CanonicalTable {
            lengths: *lengths,
            codes,
            max_length
        }
    }

    /// Rebuild a table from persisted code lengths
    ///
    /// # Errors
    /// - [`HfmErrors::InvalidCodeLength`] if a length is larger than [`MAX_CODE_LENGTH`]
    /// - [`HfmErrors::OverSubscribedCodes`] if the lengths describe more codes than
    ///   a prefix code can hold
    pub fn from_lengths(lengths: &[u8; HFM_TABLE_SIZE]) -> Result<CanonicalTable, HfmErrors> {
        let mut kraft_sum = 0_u128;

        for length in lengths.iter().filter(|x| **x != 0) {
            if *length > MAX_CODE_LENGTH {
                return Err(HfmErrors::InvalidCodeLength(*length));
            }
            kraft_sum += 1_u128 << (MAX_CODE_LENGTH - *length);
        }
        if kraft_sum > 1_u128 << MAX_CODE_LENGTH {
            return Err(HfmErrors::OverSubscribedCodes);
        }
        Ok(CanonicalTable::new(lengths))
    }

    /// Code lengths, zero for unused symbols
    pub const fn lengths(&self) -> &[u8; HFM_TABLE_SIZE] {
        &self.lengths
    }

    /// Codes, right aligned, only the low `length` bits are meaningful
    pub const fn codes(&self) -> &[u64; HFM_TABLE_SIZE] {
        &self.codes
    }

    /// Longest code length in the table, zero for an empty table
    pub const fn max_length(&self) -> u8 {
        self.max_length
    }

    /// Return the code and its length for `symbol`
    #[inline(always)]
    pub const fn code(&self, symbol: u8) -> (u64, u8) {
        (self.codes[symbol as usize], self.lengths[symbol as usize])
    }

    /// Number of symbols with a code
    pub fn used_symbols(&self) -> usize {
        self.lengths.iter().filter(|x| **x != 0).count()
    }
}
