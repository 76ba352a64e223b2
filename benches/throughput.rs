//! Decoder throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use framesync::{crc16_ccitt, encode_frame, StreamDecoder, CHANNEL_COUNT};

fn checksum_benchmark(c: &mut Criterion) {
    let data: Vec<u8> = (0..1024).map(|i| (i % 256) as u8).collect();

    let mut group = c.benchmark_group("checksum");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("crc16_ccitt_1k", |b| {
        b.iter(|| black_box(crc16_ccitt(black_box(&data))))
    });

    group.finish();
}

fn decoder_benchmark(c: &mut Criterion) {
    // 1000 back-to-back frames.
    let mut clean = Vec::new();
    for i in 0..1000u32 {
        clean.extend_from_slice(&encode_frame(&[(i % 256) as u8; CHANNEL_COUNT]));
    }

    // Same frames with marker-less noise interleaved every few frames.
    let mut noisy = Vec::new();
    for i in 0..1000u32 {
        if i % 4 == 0 {
            noisy.extend_from_slice(&[0xA5u8; 32]);
        }
        noisy.extend_from_slice(&encode_frame(&[(i % 256) as u8; CHANNEL_COUNT]));
    }

    let mut group = c.benchmark_group("decoder");
    group.throughput(Throughput::Bytes(clean.len() as u64));

    group.bench_function("clean_stream", |b| {
        b.iter(|| {
            let mut decoder = StreamDecoder::default();
            black_box(decoder.push(black_box(&clean)).len())
        })
    });

    group.throughput(Throughput::Bytes(noisy.len() as u64));
    group.bench_function("noisy_stream", |b| {
        b.iter(|| {
            let mut decoder = StreamDecoder::default();
            black_box(decoder.push(black_box(&noisy)).len())
        })
    });

    group.finish();
}

criterion_group!(benches, checksum_benchmark, decoder_benchmark);
criterion_main!(benches);
