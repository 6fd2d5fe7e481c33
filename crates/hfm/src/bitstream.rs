/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bit I/O functionalities
//!
//! Bits are packed most significant bit first, the last byte
//! of a stream is padded with zero bits in its low positions.

use alloc::vec::Vec;

use crate::errors::HfmErrors;

/// A bit writer which owns its output
#[derive(Clone, Debug, Default)]
pub struct BitWriter {
    /// Pending bits, only the low `bits_in_buffer` bits are meaningful
    buffer:         u64,
    bits_in_buffer: u8,
    dest:           Vec<u8>
}

impl BitWriter {
    /// Construct a new bit-writer
    pub fn new() -> BitWriter {
        BitWriter::default()
    }

    /// Construct a new bit-writer which expects to hold `capacity` bytes
    pub fn with_capacity(capacity: usize) -> BitWriter {
        BitWriter {
            dest: Vec::with_capacity(capacity),
            ..BitWriter::default()
        }
    }

    /// Append the `nbits` low bits of `bits`, most significant first
    ///
    /// `nbits` can be anything from 0 to 64
    pub fn put_bits(&mut self, nbits: u8, bits: u64) {
        debug_assert!(nbits <= 64);

        if nbits > 32 {
            self.put_bits_inner(nbits - 32, bits >> 32);
            self.put_bits_inner(32, bits & 0xFFFF_FFFF);
        } else {
            self.put_bits_inner(nbits, bits);
        }
    }

    fn put_bits_inner(&mut self, nbits: u8, bits: u64) {
        debug_assert!(nbits <= 32);
        // at most 7 bits are pending here, so the buffer can't overflow
        debug_assert!(self.bits_in_buffer < 8);

        let mask = (1_u64 << nbits) - 1;

        self.buffer = (self.buffer << nbits) | (bits & mask);
        self.bits_in_buffer += nbits;

        while self.bits_in_buffer >= 8 {
            self.bits_in_buffer -= 8;
            self.dest.push((self.buffer >> self.bits_in_buffer) as u8);
        }
        self.buffer &= (1_u64 << self.bits_in_buffer) - 1;
    }

    /// Total number of bits written so far
    pub fn bits_written(&self) -> usize {
        self.dest.len() * 8 + usize::from(self.bits_in_buffer)
    }

    /// Pad the last partial byte with zeroes and return the packed bytes
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits_in_buffer > 0 {
            let pad = 8 - self.bits_in_buffer;
            self.dest.push((self.buffer << pad) as u8);
        }
        self.dest
    }
}

/// A bit reader over a fixed byte buffer
pub struct BitReader<'a> {
    data:      &'a [u8],
    position:  usize,
    /// Unread bits of the current byte, aligned to the top
    current:   u8,
    bits_left: u8
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> BitReader<'a> {
        BitReader {
            data,
            position: 0,
            current: 0,
            bits_left: 0
        }
    }

    /// Read a single bit
    ///
    /// # Errors
    /// [`HfmErrors::StreamExhausted`] once every bit of the buffer was read
    #[inline]
    pub fn get_bit(&mut self) -> Result<u8, HfmErrors> {
        if self.bits_left == 0 {
            let byte = *self
                .data
                .get(self.position)
                .ok_or(HfmErrors::StreamExhausted)?;

            self.position += 1;
            self.current = byte;
            self.bits_left = 8;
        }
        let bit = self.current >> 7;
        self.current <<= 1;
        self.bits_left -= 1;

        Ok(bit)
    }

    /// Number of bytes touched so far, a partially read byte counts
    pub const fn bytes_consumed(&self) -> usize {
        self.position
    }

    /// Whether the unread bits of the current byte are all zero
    pub const fn padding_is_zero(&self) -> bool {
        self.current == 0
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{BitReader, BitWriter};
    use crate::errors::HfmErrors;

    #[test]
    fn msb_first_with_zero_padding() {
        let mut writer = BitWriter::new();
        writer.put_bits(1, 0b0);
        writer.put_bits(2, 0b10);
        writer.put_bits(1, 0b0);
        writer.put_bits(2, 0b11);
        assert_eq!(writer.bits_written(), 6);
        assert_eq!(writer.finish(), [0b0100_1100]);
    }

    #[test]
    fn only_low_bits_are_written() {
        let mut writer = BitWriter::new();
        writer.put_bits(3, 0xFF);
        writer.put_bits(5, 0);
        assert_eq!(writer.finish(), [0b1110_0000]);
    }

    #[test]
    fn long_codes_cross_bytes() {
        let mut writer = BitWriter::new();
        writer.put_bits(4, 0b1010);
        writer.put_bits(64, u64::MAX);
        writer.put_bits(40, 0x12_3456_789A);
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 14);

        let mut reader = BitReader::new(&bytes);
        let mut read = |n: u8| -> u64 {
            (0..n).fold(0, |acc, _| (acc << 1) | u64::from(reader.get_bit().unwrap()))
        };
        assert_eq!(read(4), 0b1010);
        assert_eq!(read(64), u64::MAX);
        assert_eq!(read(40), 0x12_3456_789A);
    }

    #[test]
    fn reader_reports_exhaustion() {
        let data = [0b1000_0000];
        let mut reader = BitReader::new(&data);
        let bits: Vec<u8> = (0..8).map(|_| reader.get_bit().unwrap()).collect();
        assert_eq!(bits, [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(reader.bytes_consumed(), 1);
        assert!(matches!(reader.get_bit(), Err(HfmErrors::StreamExhausted)));
    }

    #[test]
    fn padding_check() {
        let data = [0b1010_0001];
        let mut reader = BitReader::new(&data);
        reader.get_bit().unwrap();
        reader.get_bit().unwrap();
        assert!(!reader.padding_is_zero());
    }

    #[test]
    fn empty_writer_is_empty() {
        assert!(BitWriter::new().finish().is_empty());
    }
}
