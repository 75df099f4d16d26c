//! Benchmarks for settle-target selection and drag tracking.
//!
//! Run with: cargo bench -p mui-widgets

use std::hint::black_box;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mui_core::{DetachedView, HostView, PanEvent, Size, Vector};
use mui_runtime::Subject;
use mui_widgets::{Bouncer, BouncerConfig, FlickConfig, choose_attractor};
use web_time::Duration;

fn attractors(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 * 48.0).collect()
}

// ============================================================================
// choose_attractor
// ============================================================================

fn bench_choose(c: &mut Criterion) {
    let mut group = c.benchmark_group("chooser/choose");
    let flick = FlickConfig::default();

    for n in [2, 16, 256] {
        let set = attractors(n);
        let span = set.last().copied().unwrap_or(0.0);

        group.bench_with_input(BenchmarkId::new("snap", n), &set, |b, set| {
            b.iter(|| {
                black_box(choose_attractor(
                    black_box(span * 0.37),
                    black_box(0.0),
                    set,
                    Some(0),
                    &flick,
                ))
            })
        });

        group.bench_with_input(BenchmarkId::new("flick", n), &set, |b, set| {
            b.iter(|| {
                black_box(choose_attractor(
                    black_box(span * 0.37),
                    black_box(1500.0),
                    set,
                    None,
                    &flick,
                ))
            })
        });
    }

    group.finish();
}

// ============================================================================
// Full drag through the bouncer
// ============================================================================

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("bouncer/drag");

    for steps in [10, 100] {
        group.bench_with_input(BenchmarkId::new("changed", steps), &steps, |b, &steps| {
            let container: Rc<dyn HostView> = Rc::new(DetachedView::new(Size::new(320.0, 44.0)));
            let pan: Subject<PanEvent> = Subject::publish();
            let config = BouncerConfig::default()
                .with_attractors([0.0, 150.0])
                .with_duration(Duration::from_millis(250));
            let Ok(bouncer) = Bouncer::new(container, &pan, config) else {
                return;
            };
            b.iter(|| {
                pan.emit(PanEvent::began());
                for i in 0..steps {
                    let x = i as f64 * 300.0 / steps as f64;
                    pan.emit(PanEvent::changed(Vector::new(x, 0.0), Vector::ZERO));
                }
                pan.emit(PanEvent::ended(Vector::new(300.0, 0.0), Vector::ZERO));
                while bouncer.tick(Duration::from_millis(16)) {}
                black_box(bouncer.current_offset())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_choose, bench_drag);
criterion_main!(benches);
