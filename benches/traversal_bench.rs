/// Benchmarks for the Delineate traversal.
///
/// Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use delineate::application::delineate;
use delineate::infrastructure::fixture::FixtureFrontend;
use delineate::infrastructure::image::Image;
use serde_json::{json, Value};
use std::io;

// ═══════════════════════════════════════════════════════════════════════════
// Synthetic Data Generators
// ═══════════════════════════════════════════════════════════════════════════

/// A unit of `functions` definitions, each with `statements` statements.
fn synthetic_unit(functions: usize, statements: usize) -> Value {
    let mut children = Vec::with_capacity(functions);

    for f in 0..functions {
        let line = (f * (statements + 3) + 1) as u32;
        let body: Vec<Value> = (0..statements)
            .map(|s| {
                let l = line + 1 + s as u32;
                json!({"kind": "ReturnStmt", "extent": [[l, 2], [l, 20]], "children": [
                    {"kind": "BinaryOperator", "extent": [[l, 9], [l, 19]], "children": [
                        {"kind": "DeclRefExpr", "extent": [[l, 9], [l, 10]]},
                        {"kind": "IntegerLiteral", "extent": [[l, 13], [l, 19]]}
                    ]}
                ]})
            })
            .collect();

        children.push(json!({
            "kind": "FunctionDecl", "spelling": format!("func_{}", f), "definition": true,
            "comment": format!("/// Function {}.\n", f),
            "extent": [[line, 1], [line + statements as u32 + 2, 2]],
            "result_type": {"kind": "Int", "spelling": "int", "align": 4, "size": 4},
            "children": [
                {"kind": "ParmDecl", "spelling": "x", "type": {"kind": "Int", "spelling": "int"}},
                {"kind": "CompoundStmt", "extent": [[line, 20], [line + statements as u32 + 2, 2]],
                 "children": body}
            ]
        }));
    }

    json!({"file": "bench.c", "children": children})
}

fn sink_image() -> Image<io::Sink> {
    Image::new(io::sink(), io::sink(), io::sink(), io::sink(), io::sink())
}

// ═══════════════════════════════════════════════════════════════════════════
// Benchmarks
// ═══════════════════════════════════════════════════════════════════════════

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    for functions in [10usize, 100, 1000] {
        let frontend = FixtureFrontend::from_value(synthetic_unit(functions, 8)).unwrap();
        group.throughput(Throughput::Elements(functions as u64));
        group.bench_with_input(BenchmarkId::new("functions", functions), &frontend, |b, fe| {
            b.iter(|| {
                let done = delineate(black_box(fe), sink_image()).unwrap();
                black_box(done.summary)
            })
        });
    }

    group.finish();
}

fn bench_fixture_loading(c: &mut Criterion) {
    let text = synthetic_unit(500, 8).to_string();
    c.bench_function("fixture_load", |b| {
        b.iter(|| FixtureFrontend::from_json(black_box(&text)).unwrap())
    });
}

criterion_group!(benches, bench_traversal, bench_fixture_loading);
criterion_main!(benches);
