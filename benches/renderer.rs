//! Renderer benchmarks: diff detection, full frames and incremental frames.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tessera::element::{Container, ElementBuilder};
use tessera::geom::Size;
use tessera::renderer::BufferDiff;
use tessera::widgets::{Button, ListView, StatusBar, Text};
use tessera::{Cell, CellBuffer, Renderer, Rgb, Style};

fn screen(selected: usize) -> Container {
    let items: Vec<String> = (0..200).map(|i| format!("item number {i}")).collect();
    let mut list = ListView::new(items);
    list.select(selected);
    Container::vstack()
        .child(StatusBar::new().left("bench").right(format!("{selected}")))
        .child(
            Container::frame()
                .with_title("Items")
                .child(list)
                .child(Text::new("press enter").with_height(Size::Fixed(1))),
        )
        .child(
            Container::hstack()
                .with_height(Size::Fixed(1))
                .child(Button::new("OK"))
                .child(Button::new("Cancel")),
        )
}

fn diff_identical(c: &mut Criterion) {
    let a = CellBuffer::new(200, 50);
    let b = CellBuffer::new(200, 50);
    c.bench_function("diff_identical_200x50", |bench| {
        bench.iter(|| BufferDiff::compute(black_box(&a), black_box(&b)))
    });
}

fn diff_scattered(c: &mut Criterion) {
    let a = CellBuffer::new(80, 24);
    let mut b = CellBuffer::new(80, 24);
    let style = Style::fg(Rgb::BLUE);
    for y in 0..24 {
        for x in (0..80).step_by(3) {
            b.set(x, y, Cell::new('*', style));
        }
    }
    c.bench_function("diff_scattered_80x24", |bench| {
        bench.iter(|| BufferDiff::compute(black_box(&a), black_box(&b)))
    });
}

fn full_frame(c: &mut Criterion) {
    let mut root = screen(0);
    let mut renderer = Renderer::new(120, 40).unwrap();
    c.bench_function("render_full_120x40", |bench| {
        bench.iter(|| {
            renderer.invalidate();
            black_box(renderer.render(&mut root).unwrap())
        })
    });
}

fn incremental_frame(c: &mut Criterion) {
    let mut renderer = Renderer::new(120, 40).unwrap();
    let mut frames = [screen(10), screen(11)];
    renderer.render(&mut frames[0]).unwrap();
    let mut i = 0;
    c.bench_function("render_selection_move_120x40", |bench| {
        bench.iter(|| {
            i ^= 1;
            black_box(renderer.render(&mut frames[i]).unwrap())
        })
    });
}

criterion_group!(benches, diff_identical, diff_scattered, full_frame, incremental_frame);
criterion_main!(benches);
