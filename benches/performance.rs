use catify::cli::{dispatch, parse_arguments};
use catify::config::Limits;
use catify::render::{Decorator, Renderer};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::io;
use tempfile::TempDir;

fn bench_parse_and_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_and_dispatch");

    for count in [10usize, 100, 255] {
        let mut tokens: Vec<String> = (0..count).map(|i| format!("file_{}.txt", i)).collect();
        tokens.push("-o".to_string());
        tokens.push("out.txt".to_string());
        tokens.push("--catify".to_string());

        group.bench_with_input(BenchmarkId::from_parameter(count), &tokens, |b, tokens| {
            b.iter(|| {
                let records = parse_arguments(black_box(tokens));
                dispatch(&records, &Limits::default())
            })
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("input.txt");
    fs::write(&path, "The quick brown cat jumps over the lazy dog.\n".repeat(20_000)).unwrap();
    let paths = vec![path];

    let mut group = c.benchmark_group("render");

    group.bench_function("plain", |b| {
        b.iter(|| {
            let mut renderer = Renderer::new(io::sink(), false);
            renderer.render_all(&paths, |_| {}).unwrap()
        })
    });

    group.bench_function("decorated", |b| {
        b.iter(|| {
            let decorator = Decorator::new(StdRng::seed_from_u64(7), '🐱', 10);
            let mut renderer = Renderer::new(io::sink(), false).with_decorator(decorator);
            renderer.render_all(&paths, |_| {}).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse_and_dispatch, bench_render);
criterion_main!(benches);
