/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Canonical Huffman coding
//!
//! The encoder builds a tree from a channel histogram only to learn
//! the code lengths, codes are then derived from the lengths alone so
//! the decoder can rebuild the exact same table from the 256 persisted
//! lengths.
pub use canonical::CanonicalTable;
pub use tree::build_code_lengths;
pub use trie::DecodeTrie;

mod canonical;
mod tree;
mod trie;
