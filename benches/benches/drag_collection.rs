// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for drag collection layout passes and pointer tracking.
//!
//! The host is a synthetic grid of 120x80 cards with 8px gutters whose
//! mutations are discarded, so only the collection's own work is measured.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect, Size};
use understory_drag_collection::{
    CollectionConfig, DomBinding, DragCollection, DropZone, InsertPosition, Layout,
};

const CARD: Size = Size::new(120.0, 80.0);
const GUTTER: f64 = 8.0;

#[derive(Clone, Debug)]
struct Grid {
    count: u32,
    cols: u32,
    rtl: bool,
}

impl Grid {
    fn new(count: u32, cols: u32) -> Self {
        Self {
            count,
            cols,
            rtl: false,
        }
    }

    fn width(&self) -> f64 {
        f64::from(self.cols) * (CARD.width + GUTTER) + 40.0
    }
}

impl DomBinding for Grid {
    type Node = u32;

    fn container(&self) -> u32 {
        u32::MAX
    }

    fn item_nodes(&self) -> Vec<u32> {
        (0..self.count).collect()
    }

    fn container_rect(&self) -> Rect {
        let rows = f64::from(self.count.div_ceil(self.cols));
        Rect::new(0.0, 0.0, self.width(), rows * (CARD.height + GUTTER))
    }

    fn node_rect(&self, node: &u32) -> Rect {
        let col = f64::from(node % self.cols);
        let row = f64::from(node / self.cols);
        let x = if self.rtl {
            self.width() - CARD.width - col * (CARD.width + GUTTER)
        } else {
            col * (CARD.width + GUTTER)
        };
        let y = row * (CARD.height + GUTTER);
        Rect::from_origin_size((x, y), CARD)
    }

    fn is_rtl(&self) -> bool {
        self.rtl
    }

    fn add_class(&mut self, _: &u32, _: &str) {}
    fn remove_class(&mut self, _: &u32, _: &str) {}
    fn set_style(&mut self, _: &u32, _: &str, _: &str) {}

    fn create_marker(&mut self, _: &str, _: Size) -> Option<u32> {
        Some(u32::MAX - 1)
    }

    fn insert_adjacent(&mut self, _: &u32, _: InsertPosition, _: &u32) {}
    fn remove_node(&mut self, _: &u32) {}
    fn deactivate_ripple(&mut self, _: &u32) {}
}

/// Pointer positions sweeping every row from left to right.
fn sweep(grid: &Grid, steps_per_row: u32) -> Vec<Point> {
    let bounds = grid.container_rect();
    let rows = grid.count.div_ceil(grid.cols);
    let mut points = Vec::new();
    for row in 0..rows {
        let y = f64::from(row) * (CARD.height + GUTTER) + CARD.height / 2.0;
        for step in 0..steps_per_row {
            let x = bounds.width() * f64::from(step) / f64::from(steps_per_row);
            points.push(Point::new(x, y));
        }
    }
    points
}

fn bench_reset_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_collection/reset_state");

    // A drag start rescans the whole container, so this bounds pickup latency.
    for count in [24u32, 96, 384, 1_536] {
        group.throughput(Throughput::Elements(u64::from(count)));
        for cols in [1u32, 6] {
            let name = if cols == 1 { "single_column" } else { "grid" };
            group.bench_with_input(BenchmarkId::new(name, count), &count, |b, &count| {
                let mut collection =
                    DragCollection::new(Grid::new(count, cols), CollectionConfig::default());
                b.iter(|| {
                    collection.reset_state();
                    black_box(collection.drop_zones().len());
                });
            });
        }
    }

    group.finish();
}

fn bench_build_zones(c: &mut Criterion) {
    let mut group = c.benchmark_group("drop_zone/build_all");

    for count in [96u32, 1_536] {
        let grid = Grid::new(count, 6);
        let mut collection = DragCollection::new(grid, CollectionConfig::default());
        collection.reset_state();
        let layout: Layout<u32> = collection.layout().clone();
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::from_parameter(count), &layout, |b, layout| {
            b.iter(|| black_box(DropZone::build_all(layout)));
        });
    }

    group.finish();
}

fn bench_drag_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_collection/drag_move");

    // Hit testing is a linear scan; later rows pay for every zone above them.
    for count in [24u32, 96, 384, 1_536] {
        for rtl in [false, true] {
            let mut grid = Grid::new(count, 6);
            grid.rtl = rtl;
            let points = sweep(&grid, 24);
            group.throughput(Throughput::Elements(points.len() as u64));
            let name = if rtl { "rtl" } else { "ltr" };
            group.bench_with_input(BenchmarkId::new(name, count), &points, |b, points| {
                b.iter_batched(
                    || {
                        let mut collection =
                            DragCollection::new(grid.clone(), CollectionConfig::default());
                        collection.drag_start(count / 2);
                        collection
                    },
                    |mut collection| {
                        for &point in points {
                            black_box(collection.drag_move(point));
                        }
                        collection
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_reset_state, bench_build_zones, bench_drag_move);
criterion_main!(benches);
