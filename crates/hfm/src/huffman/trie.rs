/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use crate::bitstream::BitReader;
use crate::errors::HfmErrors;
use crate::huffman::CanonicalTable;

/// Child slot which does not point anywhere
const ABSENT: u32 = u32::MAX;
const ROOT: usize = 0;

#[derive(Copy, Clone)]
struct TrieNode {
    children: [u32; 2],
    symbol:   Option<u8>
}

impl TrieNode {
    const EMPTY: TrieNode = TrieNode {
        children: [ABSENT; 2],
        symbol:   None
    };
}

/// A binary trie mapping codes to symbols
///
/// Nodes live in one vector and refer to each other by index.
pub struct DecodeTrie {
    nodes: Vec<TrieNode>
}

impl DecodeTrie {
    /// Insert every code of `table` into a new trie
    ///
    /// # Errors
    /// [`HfmErrors::OverSubscribedCodes`] if a code ends on an existing node or
    /// passes through a leaf, which can't happen for tables that passed
    /// [`CanonicalTable::from_lengths`]
    pub fn new(table: &CanonicalTable) -> Result<DecodeTrie, HfmErrors> {
        let mut nodes = Vec::with_capacity(table.used_symbols() * 2 + 1);
        nodes.push(TrieNode::EMPTY);

        for symbol in 0..=255_u8 {
            let (code, length) = table.code(symbol);

            if length == 0 {
                continue;
            }
            let mut current = ROOT;

            for shift in (0..length).rev() {
                if nodes[current].symbol.is_some() {
                    return Err(HfmErrors::OverSubscribedCodes);
                }
                let bit = ((code >> shift) & 1) as usize;
                let child = nodes[current].children[bit];

                current = if child == ABSENT {
                    let index = nodes.len();
                    nodes[current].children[bit] = index as u32;
                    nodes.push(TrieNode::EMPTY);
                    index
                } else {
                    child as usize
                };
            }
            let leaf = &mut nodes[current];

            if leaf.symbol.is_some() || leaf.children != [ABSENT; 2] {
                return Err(HfmErrors::OverSubscribedCodes);
            }
            leaf.symbol = Some(symbol);
        }
        Ok(DecodeTrie { nodes })
    }

    /// Read bits until they select a symbol
    ///
    /// # Errors
    /// - [`HfmErrors::CorruptCodePath`] if a bit selects a missing child
    /// - [`HfmErrors::StreamExhausted`] if the reader runs out of bits
    #[inline]
    pub fn decode_symbol(&self, reader: &mut BitReader) -> Result<u8, HfmErrors> {
        let mut node = &self.nodes[ROOT];

        loop {
            let bit = reader.get_bit()?;
            let child = node.children[usize::from(bit)];

            if child == ABSENT {
                return Err(HfmErrors::CorruptCodePath);
            }
            node = &self.nodes[child as usize];

            if let Some(symbol) = node.symbol {
                return Ok(symbol);
            }
        }
    }
}
