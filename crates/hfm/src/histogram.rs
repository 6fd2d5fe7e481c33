/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Count how many times each byte value occurs in `data`
///
/// Uses four separate tables so that runs of the same value
/// do not serialize on a single counter, they are summed at the end.
pub fn build_histogram(data: &[u8]) -> [u64; 256] {
    let mut start1 = [0_u64; 256];
    let mut start2 = [0_u64; 256];
    let mut start3 = [0_u64; 256];
    let mut start4 = [0_u64; 256];

    let chunks = data.chunks_exact(4);
    let remainder = chunks.remainder();

    for chunk in chunks {
        start1[usize::from(chunk[0])] += 1;
        start2[usize::from(chunk[1])] += 1;
        start3[usize::from(chunk[2])] += 1;
        start4[usize::from(chunk[3])] += 1;
    }
    for byte in remainder {
        start1[usize::from(*byte)] += 1;
    }

    for (((a, b), c), d) in start1
        .iter_mut()
        .zip(start2.iter())
        .zip(start3.iter())
        .zip(start4.iter())
    {
        *a += b + c + d;
    }
    start1
}

#[cfg(test)]
mod tests {
    use super::build_histogram;

    #[test]
    fn counts_residuals() {
        let histogram = build_histogram(&[10, 0, 10, 1]);
        assert_eq!(histogram[10], 2);
        assert_eq!(histogram[0], 1);
        assert_eq!(histogram[1], 1);
        assert_eq!(histogram.iter().sum::<u64>(), 4);
    }

    #[test]
    fn remainder_is_counted() {
        let histogram = build_histogram(&[7; 11]);
        assert_eq!(histogram[7], 11);
    }
}
