/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoding and encoding HFM images
//!
//! HFM is a lossless format for 8 bit grayscale and RGB images.
//! Every channel is run through a horizontal residual filter and the residuals are
//! coded with a canonical Huffman code whose code lengths are stored in the container.
//!
//! # Container layout
//! All integers are little endian.
//!
//! | field      | size       |
//! |------------|------------|
//! | magic `HFM`| 3 bytes    |
//! | width      | 4 bytes    |
//! | height     | 4 bytes    |
//! | max value  | 2 bytes    |
//! | channels   | 1 byte     |
//!
//! followed, for each channel, by 256 code lengths, a 4 byte payload size and the payload.
//!
//! # Features
//! - Decoding and encoding
//! -`no_std`
//!
//! ## `no_std`
//! You can use `no_std` with alloc feature to compile for `no_std` endpoints

#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;
extern crate core;

pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use hfm_core;
pub use image::*;

pub mod bitstream;
mod constants;
mod decoder;
mod deinterleave;
mod encoder;
mod errors;
pub mod filter;
pub mod histogram;
pub mod huffman;
mod image;
