use criterion::{criterion_group, criterion_main, Criterion, black_box};
use globecam::engine::GlobeCameraEngine;
use globecam::framing::{AircraftId, EntityState, EntityTable, FrameSnapshot, SelectionRef};
use globecam::geo::{tangent_frame, GeoPoint, Globe};
use globecam::options::Options;
use globecam::util::easing::EasingFunction;

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::CubicOut;
    c.bench_function("cubic_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn geodetic_benchmark(c: &mut Criterion) {
    let globe = Globe::default();
    c.bench_function("to_vec3", |b| {
        b.iter(|| black_box(globe.to_vec3(black_box(51.47), black_box(-0.45), black_box(35_000.0))))
    });
    c.bench_function("tangent_frame", |b| {
        b.iter(|| black_box(tangent_frame(black_box(51.47), black_box(-0.45))))
    });
}

fn frame_step_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_step");

    for count in [10, 1_000, 10_000].iter() {
        let mut table = EntityTable::new();
        for i in 0..*count {
            let lat = (i % 170) as f64 - 85.0;
            let lon = (i % 360) as f64 - 179.0;
            table.upsert_aircraft(
                AircraftId(format!("AC{i}")),
                EntityState {
                    alt: 30_000.0,
                    heading: (i % 360) as f64,
                    speed: 450.0,
                    ..EntityState::stationary(lat, lon)
                },
            );
        }

        let mut engine = GlobeCameraEngine::new(Options::default());
        let _ = engine.place_at(&GeoPoint::new(40.7, -74.0));
        let snapshots = [
            FrameSnapshot {
                selection: SelectionRef::Aircraft("AC1".into()),
                ..FrameSnapshot::default()
            },
            FrameSnapshot::default(),
        ];
        let mut frame = 0usize;

        group.bench_function(format!("{}_aircraft", count), |b| {
            b.iter(|| {
                // flip the selection every 30 frames so transitions keep starting
                frame += 1;
                let snapshot = &snapshots[(frame / 30) % 2];
                black_box(engine.frame(1.0 / 60.0, snapshot, &table))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, easing_benchmark, geodetic_benchmark, frame_step_benchmark);
criterion_main!(benches);
