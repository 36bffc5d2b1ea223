//! Performance benchmarks for huffarc-huff
//!
//! This benchmark suite evaluates:
//! - Compression/decompression throughput across data patterns
//! - Cost of the I/O block size
//! - Tree construction and header serialization on their own

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use huffarc_huff::{BitSink, CodeTree, HuffConfig, compress, compress_with, decompress};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Uniform data - a single symbol
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - flat distribution over all byte values
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Text-like data - skewed distribution
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. \
                     How vexingly quick daft zebras jump! ";
        text.iter().copied().cycle().take(size).collect()
    }
}

mod data_sizes {
    pub const SMALL: usize = 4 * 1024; // 4 KB
    pub const LARGE: usize = 256 * 1024; // 256 KB
}

fn bench_compression_data_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_data_types");

    let patterns: [(&str, PatternGenerator); 3] = [
        ("uniform", test_data::uniform as PatternGenerator),
        ("random", test_data::random as PatternGenerator),
        ("text", test_data::text_like as PatternGenerator),
    ];

    for size in [data_sizes::SMALL, data_sizes::LARGE] {
        for (name, generator) in patterns {
            let data = generator(size);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(name, size),
                &data,
                |b, data| {
                    b.iter(|| black_box(compress(black_box(data)).unwrap()));
                },
            );
        }
    }

    group.finish();
}

fn bench_decompression_data_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_data_types");

    let patterns: [(&str, PatternGenerator); 3] = [
        ("uniform", test_data::uniform as PatternGenerator),
        ("random", test_data::random as PatternGenerator),
        ("text", test_data::text_like as PatternGenerator),
    ];

    for (name, generator) in patterns {
        let data = generator(data_sizes::LARGE);
        let compressed = compress(&data).unwrap();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &compressed,
            |b, compressed| {
                b.iter(|| black_box(decompress(black_box(compressed)).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_block_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_sizes");
    let data = test_data::text_like(data_sizes::LARGE);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for block_size in [64, 1024, 8192, 65536] {
        let config = HuffConfig::DEFAULT.with_block_size(block_size);
        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &data,
            |b, data| {
                b.iter(|| black_box(compress_with(black_box(data), config).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree");

    let data = test_data::random(data_sizes::LARGE);
    let mut counts = [0u64; 256];
    for &byte in &data {
        counts[byte as usize] += 1;
    }

    group.bench_function("build_257_leaves", |b| {
        b.iter(|| black_box(CodeTree::from_counts(black_box(&counts))));
    });

    let tree = CodeTree::from_counts(&counts);
    group.bench_function("codes_257_leaves", |b| {
        b.iter(|| black_box(tree.codes().unwrap()));
    });
    group.bench_function("serialize_257_leaves", |b| {
        b.iter(|| {
            let mut sink = BitSink::new(Vec::with_capacity(512));
            tree.serialize(&mut sink).unwrap();
            black_box(sink.finish().unwrap())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compression_data_types,
    bench_decompression_data_types,
    bench_block_sizes,
    bench_tree
);
criterion_main!(benches);
