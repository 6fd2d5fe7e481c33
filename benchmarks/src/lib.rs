/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::Rng;

/// Create a photo like image, smooth gradients with some noise
/// so the residuals look like those of real content
pub fn synthetic_image(width: usize, height: usize, components: usize) -> Vec<u8> {
    let mut rand = nanorand::WyRand::new_seed(0xC0FFEE);
    let mut pixels = Vec::with_capacity(width * height * components);

    for y in 0..height {
        for x in 0..width {
            for c in 0..components {
                let base = (x * 255 / width.max(1) + y * 127 / height.max(1) + c * 40) as u8;
                let noise = rand.generate_range(0_u8..8);
                pixels.push(base.wrapping_add(noise));
            }
        }
    }
    pixels
}
