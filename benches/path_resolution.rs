//! Command routing benchmark suite.
//!
//! Benchmarks the per-command hot path that runs before every wire call:
//! - Table lookup + template resolution at 0, 1 and 2 placeholders
//! - CSS identifier escaping for `id` / `name` / `class name` locators
//!
//! Run with: cargo bench --bench path_resolution
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use webdriver_bridge::browser::escape_css;
use webdriver_bridge::protocol::{Command, PathParams, lookup, resolve};
use webdriver_bridge::{By, SessionId};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const SESSION: &str = "5f1c3c4e-3a8f-4d36-9b0e-8d0c2b7e6a11";

const IDENTIFIERS: &[&str] = &["submit", "my-id", "1st.entry[0]", "a:b c/d#e"];

// ============================================================================
// Benchmark: Route Resolution
// ============================================================================

fn bench_route(c: &mut Criterion) {
    let session_id = SessionId::new(SESSION);
    let element = "f.6E0B4B1F.d.2";

    let cases = [
        ("status", Command::Status, PathParams::new(), false),
        ("title", Command::GetTitle, PathParams::new(), true),
        (
            "element_text",
            Command::GetElementText,
            PathParams::new().with("id", element),
            true,
        ),
        (
            "element_attribute",
            Command::GetElementAttribute,
            PathParams::new()
                .with("id", element)
                .with("name", "data-test id"),
            true,
        ),
    ];

    let mut group = c.benchmark_group("route");

    for (name, command, params, needs_session) in &cases {
        let session = needs_session.then_some(&session_id);
        group.bench_with_input(BenchmarkId::new("resolve", name), params, |b, params| {
            b.iter(|| {
                let descriptor = lookup(black_box(*command)).expect("known command");
                resolve(*command, descriptor.template, session, black_box(params))
                    .expect("resolvable")
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: CSS Escaping
// ============================================================================

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("css_escape");

    for &identifier in IDENTIFIERS {
        group.bench_with_input(
            BenchmarkId::new("escape_css", identifier),
            &identifier,
            |b, &identifier| b.iter(|| escape_css(black_box(identifier))),
        );
    }

    group.bench_function("by_id_into_w3c", |b| {
        b.iter(|| By::id(black_box("my-id")).into_w3c())
    });

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(benches, bench_route, bench_escape);
criterion_main!(benches);
