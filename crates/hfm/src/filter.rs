/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Horizontal residual filter
//!
//! Every sample is replaced by its difference from the sample on its left,
//! wrapping around 256. The first sample of a row is kept as is, so rows
//! do not depend on each other and each one can be undone on its own.

use alloc::vec;
use alloc::vec::Vec;

/// Replace each sample of `row` with its difference from its left neighbour
///
/// `residuals` must be at least as long as `row`
pub fn forward_filter_row(row: &[u8], residuals: &mut [u8]) {
    if row.is_empty() {
        return;
    }
    residuals[0] = row[0];

    for (window, out) in row.windows(2).zip(residuals[1..].iter_mut()) {
        *out = window[1].wrapping_sub(window[0]);
    }
}

/// Undo [`forward_filter_row`]
///
/// `row` must be at least as long as `residuals`
pub fn inverse_filter_row(residuals: &[u8], row: &mut [u8]) {
    let mut recon_a = 0_u8;

    for (filt, out_px) in residuals.iter().zip(row.iter_mut()) {
        // the first sample adds to zero, which leaves it untouched
        *out_px = filt.wrapping_add(recon_a);
        recon_a = *out_px;
    }
}

/// Filter a whole plane whose rows are `width` samples wide
pub fn filter_plane(plane: &[u8], width: usize) -> Vec<u8> {
    let mut residuals = vec![0; plane.len()];

    if width == 0 {
        return residuals;
    }
    for (row, out) in plane
        .chunks_exact(width)
        .zip(residuals.chunks_exact_mut(width))
    {
        forward_filter_row(row, out);
    }
    residuals
}

/// Reconstruct a whole plane from its residuals
pub fn unfilter_plane(residuals: &[u8], width: usize) -> Vec<u8> {
    let mut plane = vec![0; residuals.len()];

    if width == 0 {
        return plane;
    }
    for (row, out) in residuals
        .chunks_exact(width)
        .zip(plane.chunks_exact_mut(width))
    {
        inverse_filter_row(row, out);
    }
    plane
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn filter_wraps_around() {
        let row = [10, 10, 10, 11, 0, 255];
        let mut residuals = [0; 6];
        forward_filter_row(&row, &mut residuals);
        assert_eq!(residuals, [10, 0, 0, 1, 245, 255]);

        let mut back = [0; 6];
        inverse_filter_row(&residuals, &mut back);
        assert_eq!(back, row);
    }

    #[test]
    fn every_byte_pair_round_trips() {
        // covers every (left, current) combination, hence every residual
        for left in 0..=255_u8 {
            let row: Vec<u8> = (0..=255_u8).flat_map(|current| [left, current]).collect();
            let residuals = filter_plane(&row, row.len());
            assert_eq!(unfilter_plane(&residuals, row.len()), row);
        }
    }

    #[test]
    fn rows_are_independent() {
        // 2x2 image, second row starts over from its raw value
        let plane = [10, 10, 10, 11];
        let residuals = filter_plane(&plane, 2);
        assert_eq!(residuals, [10, 0, 10, 1]);
        assert_eq!(unfilter_plane(&residuals, 2), plane);
    }
}
