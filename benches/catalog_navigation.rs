// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for catalog lookups and lightbox navigation.
//!
//! Measures the performance of:
//! - Parsing an album file
//! - Wrap-around next/previous lookups
//! - Stepping the slideshow through a whole album

use criterion::{criterion_group, criterion_main, Criterion};
use std::fmt::Write;
use std::hint::black_box;
use std::sync::Arc;
use std::time::Instant;
use wonder_lens::catalog::{file::parse_album, MediaCatalog};
use wonder_lens::domain::media::MediaItem;
use wonder_lens::domain::ui::SlideDuration;
use wonder_lens::playback::{KeyInput, SlideshowCoordinator};

const ITEMS: usize = 500;

fn large_catalog() -> MediaCatalog {
    let items = (0..ITEMS)
        .map(|i| {
            if i % 5 == 4 {
                MediaItem::video(
                    format!("v{i}"),
                    format!("https://cdn.example/{i}.mp4"),
                    None,
                    format!("VIDEO MEMORY #{i}"),
                    "OCT 2023",
                )
            } else {
                MediaItem::photo(
                    format!("p{i}"),
                    format!("https://cdn.example/{i}.jpg"),
                    format!("MEMORY #{i}"),
                    "OCT 2023",
                )
            }
        })
        .collect();
    MediaCatalog::new(items).expect("unique ids")
}

fn album_file() -> String {
    let mut content = String::from("[album]\ntitle = \"BENCH\"\n");
    for i in 0..ITEMS {
        let _ = write!(
            content,
            "\n[[media]]\nid = \"p{i}\"\nkind = \"photo\"\nurl = \"https://cdn.example/{i}.jpg\"\ntitle = \"MEMORY #{i}\"\ndate = \"OCT 2023\"\n"
        );
    }
    content
}

/// Benchmark album file parsing.
fn bench_parse_album(c: &mut Criterion) {
    let content = album_file();
    c.bench_function("parse_album_500", |b| {
        b.iter(|| black_box(parse_album(black_box(&content)).expect("valid album")));
    });
}

/// Benchmark wrap-around neighbour lookups.
fn bench_neighbours(c: &mut Criterion) {
    let catalog = large_catalog();
    let last = catalog.item_at(ITEMS - 1).expect("last").id().clone();
    let first = catalog.item_at(0).expect("first").id().clone();

    let mut group = c.benchmark_group("catalog_navigation");
    group.bench_function("next_from_last", |b| {
        b.iter(|| black_box(catalog.next(black_box(&last))));
    });
    group.bench_function("prev_from_first", |b| {
        b.iter(|| black_box(catalog.prev(black_box(&first))));
    });
    group.finish();
}

/// Benchmark stepping the coordinator through the whole album.
fn bench_slideshow_walk(c: &mut Criterion) {
    let catalog = Arc::new(large_catalog());
    c.bench_function("slideshow_walk_500", |b| {
        b.iter(|| {
            let mut slideshow =
                SlideshowCoordinator::new(Arc::clone(&catalog), SlideDuration::default());
            let now = Instant::now();
            slideshow.start_slideshow(now);
            for _ in 0..ITEMS {
                black_box(slideshow.key(KeyInput::Right, now));
            }
            black_box(slideshow.current_id().cloned())
        });
    });
}

criterion_group!(
    benches,
    bench_parse_album,
    bench_neighbours,
    bench_slideshow_walk
);
criterion_main!(benches);
