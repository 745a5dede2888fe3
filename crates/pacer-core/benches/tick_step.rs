use criterion::{criterion_group, criterion_main, Criterion};
use pacer_core::{AnimatorFactory, ManualScheduler, PollingAnimatorFactory};
use std::hint::black_box;
use std::rc::Rc;
use std::time::Duration;

/// One full 200ms run on the virtual clock: 21 update dispatches across
/// 20 ticks, with a couple of listeners reading interpolated values.
fn bench_full_run(c: &mut Criterion) {
    c.bench_function("full_run_virtual_200ms", |b| {
        let sched = ManualScheduler::new();
        let factory = PollingAnimatorFactory::new(Rc::new(sched.clone()), Rc::new(sched.clone()));
        let animator = factory.create_animator();
        animator.set_int_values(0, 255);
        animator.set_float_values(0.0, 1.0);
        animator.add_update_listener(|a| {
            black_box(a.animated_int_value());
        });
        animator.add_update_listener(|a| {
            black_box(a.animated_float_value());
        });
        b.iter(|| {
            animator.start();
            sched.advance(Duration::from_millis(250));
        });
    });
}

criterion_group!(benches, bench_full_run);
criterion_main!(benches);
