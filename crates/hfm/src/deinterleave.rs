/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Split interleaved pixels into planes and back
//!
//! i.e `RGBRGBRGB` becomes `RRR`,`GGG`,`BBB`, each plane is then
//! filtered and entropy coded on its own.

use alloc::vec;
use alloc::vec::Vec;

/// Separate interleaved samples into `components` planes
///
/// `components` is `1` or `3`, anything else is refused before
/// pixels reach this point.
pub(crate) fn deinterleave_u8(interleaved: &[u8], components: usize) -> Vec<Vec<u8>> {
    match components {
        3 => {
            let size = interleaved.len() / 3;
            let (mut c1, mut c2, mut c3) = (vec![0; size], vec![0; size], vec![0; size]);

            for (((val, a), b), c) in interleaved
                .chunks_exact(3)
                .zip(c1.iter_mut())
                .zip(c2.iter_mut())
                .zip(c3.iter_mut())
            {
                *a = val[0];
                *b = val[1];
                *c = val[2];
            }
            vec![c1, c2, c3]
        }
        _ => vec![interleaved.to_vec()]
    }
}

/// Write planes back into interleaved order
///
/// `output` must hold `planes.len() * plane_length` samples,
/// `planes` holds one or three planes
pub(crate) fn interleave_u8(planes: &[Vec<u8>], output: &mut [u8]) {
    match planes {
        [c1, c2, c3] => {
            for (((out, a), b), c) in output
                .chunks_exact_mut(3)
                .zip(c1.iter())
                .zip(c2.iter())
                .zip(c3.iter())
            {
                out[0] = *a;
                out[1] = *b;
                out[2] = *c;
            }
        }
        _ => {
            for (out, plane) in output.iter_mut().zip(planes.iter().flatten()) {
                *out = *plane;
            }
        }
    }
}
