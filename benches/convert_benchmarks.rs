//! Performance benchmarks for scalar and composite conversions.
//!
//! ## Profiling with Puffin
//!
//! Run with the `profile-with-puffin` feature to print total time per entry point:
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use std::collections::HashMap;
use std::hint::black_box;
use std::time::Duration;

use convey::{Convert, Value, Zero, convert_strict, convert_weak};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};

#[cfg(feature = "profile-with-puffin")]
mod profile {
    use std::collections::BTreeMap;
    use std::sync::OnceLock;
    use std::time::Duration;

    use puffin::{GlobalFrameView, GlobalProfiler, Reader};

    static FRAME_VIEW: OnceLock<GlobalFrameView> = OnceLock::new();

    pub fn start() {
        puffin::set_scopes_on(true);
        FRAME_VIEW.get_or_init(GlobalFrameView::default);
    }

    pub fn end_frame() {
        GlobalProfiler::lock().new_frame();
    }

    /// Print the total time of each top-level scope, i.e. each entry point.
    pub fn report() {
        let Some(view) = FRAME_VIEW.get().map(GlobalFrameView::lock) else {
            return;
        };
        let scopes = view.scope_collection();
        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for frame in view.recent_frames() {
            let Ok(unpacked) = frame.unpacked() else {
                continue;
            };
            for stream in unpacked.thread_streams.values() {
                let top = Reader::from_start(&stream.stream).read_top_scopes();
                for scope in top.into_iter().flatten() {
                    if let Some(details) = scopes.fetch_by_id(&scope.id) {
                        *totals.entry(details.name().to_string()).or_default() +=
                            scope.record.duration_ns;
                    }
                }
            }
        }
        for (name, ns) in totals {
            println!("{name:<32} {:>12?}", Duration::from_nanos(ns.max(0) as u64));
        }
    }
}

#[cfg(not(feature = "profile-with-puffin"))]
mod profile {
    pub fn start() {}
    pub fn end_frame() {}
    pub fn report() {}
}

#[derive(Convert)]
struct Config {
    name: String,
    port: u16,
    timeout: Duration,
    ratio: f64,
    tags: Vec<String>,
    limits: HashMap<String, u32>,
}

fn config_source() -> Value {
    Value::Map(vec![
        (Value::from("name"), Value::from("gateway")),
        (Value::from("port"), Value::from("8443")),
        (Value::from("timeout"), Value::from("1m 30s")),
        (Value::from("ratio"), Value::F64(0.25)),
        (
            Value::from("tags"),
            Value::Slice(vec![Value::from("edge"), Value::from("blue")]),
        ),
        (
            Value::from("limits"),
            Value::Map(vec![
                (Value::from("conns"), Value::I64(1024)),
                (Value::from("rps"), Value::from("5000")),
            ]),
        ),
    ])
}

/// Benchmark scalar conversions under both policies.
fn scalar_benchmarks(c: &mut Criterion) {
    profile::start();

    let mut group = c.benchmark_group("convert/scalar");

    group.bench_function("strict_i32_to_i64", |b| {
        b.iter(|| {
            let mut dst = 0i64;
            convert_strict(black_box(&-7i32), &mut dst).unwrap();
            black_box(dst)
        });
    });

    group.bench_function("weak_text_to_bool", |b| {
        b.iter(|| {
            let mut dst = false;
            convert_weak(black_box("true"), &mut dst).unwrap();
            black_box(dst)
        });
    });

    group.bench_function("weak_text_to_u16", |b| {
        b.iter(|| {
            let mut dst = 0u16;
            convert_weak(black_box("8080"), &mut dst).unwrap();
            black_box(dst)
        });
    });

    group.bench_function("weak_f64_to_string", |b| {
        b.iter(|| {
            let mut dst = String::new();
            convert_weak(black_box(&1e-7f64), &mut dst).unwrap();
            profile::end_frame();
            black_box(dst)
        });
    });

    group.finish();
}

/// Benchmark composite conversions.
fn composite_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert/composite");

    let numbers: Vec<i32> = (0..1_000).collect();
    group.throughput(Throughput::Elements(numbers.len() as u64));
    group.bench_function("strict_vec_1000", |b| {
        b.iter(|| {
            let mut dst: Vec<i64> = Vec::new();
            convert_strict(black_box(&numbers), &mut dst).unwrap();
            black_box(dst.len())
        });
    });

    let source = config_source();
    group.throughput(Throughput::Elements(1));
    group.bench_function("weak_struct_from_map", |b| {
        b.iter(|| {
            let mut dst = Config::zero();
            convert_weak(black_box(&source), &mut dst).unwrap();
            profile::end_frame();
            black_box(dst.port)
        });
    });

    group.bench_function("struct_to_map", |b| {
        let mut config = Config::zero();
        convert_weak(&source, &mut config).unwrap();
        b.iter(|| {
            let mut dst: HashMap<String, Value> = HashMap::new();
            convert_strict(black_box(&config), &mut dst).unwrap();
            black_box(dst.len())
        });
    });

    group.finish();

    profile::report();
}

criterion_group!(benches, scalar_benchmarks, composite_benchmarks);
criterion_main!(benches);
