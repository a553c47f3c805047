use std::time::Duration;

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use edgesense::monitor::{
    DEFAULT_TICK_INTERVAL, Driver, MonitorSimulator, Pacing, SimulatorConfig, WallClock,
};

const TICK_COUNT: u32 = 1_000;

fn simulator() -> MonitorSimulator {
    let mut sim = MonitorSimulator::seeded(SimulatorConfig::default(), 7, WallClock::local_now());
    sim.start_monitoring();
    sim
}

fn bench_advance(c: &mut Criterion) {
    c.bench_with_input(
        BenchmarkId::new("advance_ticks", TICK_COUNT),
        &TICK_COUNT,
        |b, &ticks| {
            b.iter_batched(
                simulator,
                |mut sim| black_box(sim.advance(DEFAULT_TICK_INTERVAL * ticks)),
                BatchSize::SmallInput,
            );
        },
    );
}

fn bench_virtual_driver(c: &mut Criterion) {
    let window = DEFAULT_TICK_INTERVAL * TICK_COUNT;
    c.bench_with_input(
        BenchmarkId::new("virtual_driver", TICK_COUNT),
        &window,
        |b, &window: &Duration| {
            b.iter_batched(
                simulator,
                |mut sim| {
                    let mut driver = Driver::new(Pacing::Virtual, Vec::new());
                    driver.run(&mut sim, window, |sim| {
                        black_box(sim.alert_log().head());
                    })
                },
                BatchSize::SmallInput,
            );
        },
    );
}

criterion_group!(benches, bench_advance, bench_virtual_driver);
criterion_main!(benches);
