//! Layout engine benchmarks: wide rows of fills, deep nesting and wrapped
//! text measurement.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tessera::element::{Container, ElementBuilder};
use tessera::geom::{Bounds, Size};
use tessera::layout;
use tessera::widgets::{Button, Spacer, Text};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
                     eiusmod tempor incididunt ut labore et dolore magna aliqua.";

fn wide_row(n: usize) -> Container {
    let mut row = Container::hstack().with_spacing(1);
    for i in 0..n {
        if i % 2 == 0 {
            row.push(Spacer::new().boxed());
        } else {
            row.push(Button::new(format!("b{i}")).boxed());
        }
    }
    row
}

fn nested(depth: usize) -> Container {
    let mut node = Container::vstack().child(Text::new(LOREM));
    for d in 0..depth {
        let outer = if d % 2 == 0 {
            Container::hstack()
        } else {
            Container::frame()
        };
        node = outer.child(node).child(Spacer::fixed(1));
    }
    node
}

fn layout_wide_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_wide_row");
    for n in [8, 64, 256] {
        let mut row = wide_row(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| layout(black_box(&mut row), Bounds::sized(400, 3)))
        });
    }
    group.finish();
}

fn layout_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_nested");
    for depth in [4, 16, 32] {
        let mut root = nested(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| layout(black_box(&mut root), Bounds::sized(200, 60)))
        });
    }
    group.finish();
}

fn layout_auto_text(c: &mut Criterion) {
    let mut column = Container::vstack();
    for _ in 0..50 {
        column.push(Text::new(LOREM).with_height(Size::Auto).boxed());
    }
    c.bench_function("layout_auto_wrapped_text_x50", |b| {
        b.iter(|| layout(black_box(&mut column), Bounds::sized(60, 400)))
    });
}

criterion_group!(benches, layout_wide_rows, layout_nested, layout_auto_text);
criterion_main!(benches);
