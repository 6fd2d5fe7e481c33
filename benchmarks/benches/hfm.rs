/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hfm::hfm_core::colorspace::ColorSpace;
use hfm::ImageBuffer;
use hfm_benches::synthetic_image;

const WIDTH: usize = 1024;
const HEIGHT: usize = 768;

fn bench_compress(c: &mut Criterion) {
    let image = ImageBuffer::new(
        synthetic_image(WIDTH, HEIGHT, 3),
        WIDTH,
        HEIGHT,
        ColorSpace::RGB
    );
    let mut group = c.benchmark_group("hfm: Compress RGB");

    group.throughput(Throughput::Bytes(image.pixels().len() as u64));

    group.bench_function("hfm", |b| {
        b.iter(|| black_box(hfm::compress(&image).unwrap()))
    });
}

fn bench_decompress(c: &mut Criterion) {
    let image = ImageBuffer::new(
        synthetic_image(WIDTH, HEIGHT, 3),
        WIDTH,
        HEIGHT,
        ColorSpace::RGB
    );
    let data = hfm::compress(&image).unwrap();
    let mut group = c.benchmark_group("hfm: Decompress RGB");

    group.throughput(Throughput::Bytes(image.pixels().len() as u64));

    group.bench_function("hfm", |b| {
        b.iter(|| black_box(hfm::decompress(data.as_slice()).unwrap()))
    });
}

fn bench_luma(c: &mut Criterion) {
    let image = ImageBuffer::new(
        synthetic_image(WIDTH, HEIGHT, 1),
        WIDTH,
        HEIGHT,
        ColorSpace::Luma
    );
    let data = hfm::compress(&image).unwrap();
    let mut group = c.benchmark_group("hfm: Luma");

    group.throughput(Throughput::Bytes(image.pixels().len() as u64));

    group.bench_function("compress", |b| {
        b.iter(|| black_box(hfm::compress(&image).unwrap()))
    });
    group.bench_function("decompress", |b| {
        b.iter(|| black_box(hfm::decompress(data.as_slice()).unwrap()))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(20))
      };
    targets=bench_compress, bench_decompress, bench_luma);

criterion_main!(benches);
