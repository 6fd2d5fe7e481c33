/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Code length assignment from symbol frequencies

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Reverse;

use crate::constants::{HFM_TABLE_SIZE, MAX_CODE_LENGTH};
use crate::errors::HfmEncodeErrors;

/// Order key given to leaves, merged nodes use their merge index
/// which is always smaller.
const LEAF_ORDER_BASE: u16 = 256;

struct Node {
    symbol:   Option<u8>,
    children: [usize; 2]
}

/// A value record in the priority queue.
///
/// Field order matters, the derived `Ord` compares frequency first
/// then the order key, which makes extraction a total order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
struct HeapEntry {
    frequency: u64,
    order:     u16,
    index:     usize
}

/// Compute the Huffman code length of every symbol
///
/// Symbols with a zero frequency get a length of zero.
/// If only one symbol is present it gets a length of one so that
/// every encoded sample still costs a bit.
///
/// Extraction order is ascending `(frequency, order)` where a merged
/// node's order is the index of the merge that produced it and a leaf's
/// order is `256 + symbol`.
///
/// # Errors
/// [`HfmEncodeErrors::CodeTooLong`] if the tree is deeper than
/// the longest code we can store.
pub fn build_code_lengths(
    histogram: &[u64; HFM_TABLE_SIZE]
) -> Result<[u8; HFM_TABLE_SIZE], HfmEncodeErrors> {
    let mut lengths = [0_u8; HFM_TABLE_SIZE];

    let mut nodes: Vec<Node> = Vec::with_capacity(HFM_TABLE_SIZE * 2);
    let mut heap = BinaryHeap::with_capacity(HFM_TABLE_SIZE);

    for (symbol, frequency) in histogram.iter().enumerate() {
        if *frequency == 0 {
            continue;
        }
        heap.push(Reverse(HeapEntry {
            frequency: *frequency,
            order:     LEAF_ORDER_BASE + symbol as u16,
            index:     nodes.len()
        }));
        nodes.push(Node {
            symbol:   Some(symbol as u8),
            children: [0; 2]
        });
    }

    match nodes.len() {
        0 => return Ok(lengths),
        1 => {
            if let Some(symbol) = nodes[0].symbol {
                lengths[usize::from(symbol)] = 1;
            }
            return Ok(lengths);
        }
        _ => ()
    }

    let mut merges: u16 = 0;

    while heap.len() > 1 {
        let (Some(Reverse(first)), Some(Reverse(second))) = (heap.pop(), heap.pop()) else {
            break;
        };
        heap.push(Reverse(HeapEntry {
            frequency: first.frequency + second.frequency,
            order:     merges,
            index:     nodes.len()
        }));
        nodes.push(Node {
            symbol:   None,
            children: [first.index, second.index]
        });
        merges += 1;
    }

    // root is the last node pushed
    let mut stack = Vec::with_capacity(HFM_TABLE_SIZE);
    stack.push((nodes.len() - 1, 0_usize));

    while let Some((index, depth)) = stack.pop() {
        let node = &nodes[index];

        match node.symbol {
            Some(symbol) => {
                if depth > usize::from(MAX_CODE_LENGTH) {
                    return Err(HfmEncodeErrors::CodeTooLong(depth));
                }
                lengths[usize::from(symbol)] = depth as u8;
            }
            None => {
                stack.push((node.children[0], depth + 1));
                stack.push((node.children[1], depth + 1));
            }
        }
    }
    Ok(lengths)
}

#[cfg(test)]
mod tests {
    use super::build_code_lengths;

    fn kraft_sum(lengths: &[u8; 256]) -> u128 {
        lengths
            .iter()
            .filter(|x| **x != 0)
            .map(|x| 1_u128 << (64 - *x))
            .sum()
    }

    #[test]
    fn small_alphabet() {
        let mut histogram = [0; 256];
        histogram[10] = 2;
        histogram[0] = 1;
        histogram[1] = 1;

        let lengths = build_code_lengths(&histogram).unwrap();
        assert_eq!(lengths[10], 1);
        assert_eq!(lengths[0], 2);
        assert_eq!(lengths[1], 2);
        assert_eq!(lengths.iter().filter(|x| **x != 0).count(), 3);
    }

    #[test]
    fn single_symbol_gets_one_bit() {
        let mut histogram = [0; 256];
        histogram[200] = 1000;

        let lengths = build_code_lengths(&histogram).unwrap();
        assert_eq!(lengths[200], 1);
        assert_eq!(lengths.iter().map(|x| u32::from(*x)).sum::<u32>(), 1);
    }

    #[test]
    fn empty_histogram_has_no_codes() {
        let lengths = build_code_lengths(&[0; 256]).unwrap();
        assert!(lengths.iter().all(|x| *x == 0));
    }

    #[test]
    fn uniform_frequencies_give_fixed_length() {
        let lengths = build_code_lengths(&[7; 256]).unwrap();
        assert!(lengths.iter().all(|x| *x == 8));
    }

    #[test]
    fn ties_are_resolved_deterministically() {
        let mut histogram = [0; 256];
        for symbol in 1..=5 {
            histogram[symbol] = 1;
        }
        let lengths = build_code_lengths(&histogram).unwrap();
        // (1,2) -> m0, (3,4) -> m1, (5, m0) -> m2, (m1, m2) -> root
        assert_eq!(&lengths[1..=5], &[3, 3, 2, 2, 2]);
        assert_eq!(build_code_lengths(&histogram).unwrap(), lengths);
    }

    #[test]
    fn lengths_form_a_complete_prefix_code() {
        let mut histogram = [0; 256];
        for (i, v) in histogram.iter_mut().enumerate().step_by(3) {
            *v = (i as u64 * 7919) % 1013 + 1;
        }
        let lengths = build_code_lengths(&histogram).unwrap();
        assert_eq!(kraft_sum(&lengths), 1_u128 << 64);
    }

    #[test]
    fn fibonacci_frequencies_make_deep_trees() {
        // fibonacci weights give a maximally skewed tree
        let mut histogram = [0; 256];
        let (mut a, mut b) = (1_u64, 1_u64);
        for v in histogram.iter_mut().take(40) {
            *v = a;
            (a, b) = (b, a + b);
        }
        let lengths = build_code_lengths(&histogram).unwrap();
        assert_eq!(*lengths.iter().max().unwrap(), 39);
        assert_eq!(kraft_sum(&lengths), 1_u128 << 64);
    }
}
