//! Benchmarks for the nextile pipelines.

use std::io::Write;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flate2::write::ZlibEncoder;
use flate2::Compression;

use nextile::decode::PNG_SIGNATURE;
use nextile::report::Silent;
use nextile::types::{Cell, Flip, TileLayer, Tileset};
use nextile::{export_tileset, pack_tiles, quantize_palette, resolve_metatiles, SubTileOffsetPlan};

fn chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&[0; 4]);
    out
}

/// 8-bit indexed PNG with a repeating index pattern.
fn indexed_png(width: u32, height: u32, pixels: &[u8], palette: &[u8]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(pixels.len() + height as usize);
    for row in pixels.chunks(width as usize) {
        raw.push(0);
        raw.extend_from_slice(row);
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw).unwrap();
    let idat = encoder.finish().unwrap();

    let mut ihdr = width.to_be_bytes().to_vec();
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 3, 0, 0, 0]);

    let mut png = PNG_SIGNATURE.to_vec();
    png.extend(chunk(b"IHDR", &ihdr));
    png.extend(chunk(b"PLTE", palette));
    png.extend(chunk(b"IDAT", &idat));
    png.extend(chunk(b"IEND", &[]));
    png
}

/// A 256x256 sheet of 16x16 tiles.
fn sheet() -> (Tileset, Vec<u8>, Vec<u8>) {
    let tileset = Tileset::grid("bench", 16, 16, 256, 256, 256, 16, 0, 0).unwrap();
    let pixels: Vec<u8> = (0..256 * 256).map(|i| (i % 251) as u8).collect();
    let palette: Vec<u8> = (0..=255u8).flat_map(|i| [i, i.wrapping_mul(3), i.wrapping_mul(7)]).collect();
    (tileset, pixels, palette)
}

// -- Tileset benchmarks --

fn bench_tileset(c: &mut Criterion) {
    let mut group = c.benchmark_group("tileset");

    let (tileset, pixels, palette) = sheet();
    let png = indexed_png(256, 256, &pixels, &palette);
    let plan = SubTileOffsetPlan::new(&tileset, 256);

    group.bench_function("plan_256_tiles", |b| {
        b.iter(|| SubTileOffsetPlan::new(black_box(&tileset), 256))
    });

    group.bench_function("pack_256_tiles", |b| {
        b.iter(|| pack_tiles(black_box(&pixels), &plan).unwrap())
    });

    group.bench_function("quantize_palette", |b| {
        b.iter(|| quantize_palette(Some(black_box(&palette[..])), &Silent).unwrap())
    });

    group.bench_function("export_tileset", |b| {
        b.iter(|| export_tileset(&tileset, black_box(&png), &Silent).unwrap())
    });

    group.finish();
}

// -- Map benchmarks --

fn bench_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("map");

    let cells: Vec<Cell> = (0..64 * 64)
        .map(|i| match i % 9 {
            0 => Cell::EMPTY,
            n => Cell::new(i as u32 % 256, Flip::from_bits(n % 8)),
        })
        .collect();
    let layer = TileLayer::new("bench", 64, 64, cells);

    group.bench_function("resolve_metatiles_64x64_x2", |b| {
        b.iter(|| resolve_metatiles(black_box(&layer), 2, &Silent))
    });

    group.finish();
}

criterion_group!(benches, bench_tileset, bench_map);
criterion_main!(benches);
