use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fanin::concurrency::{CompletionQueue, WaitGate};
use fanin::{await_all, Completion, Deadline};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

fn bench_round_inline(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_inline");

    for n in [1usize, 16, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let launchers = (0..n).map(|i| move |done: Completion<usize>| done.complete(i));
                black_box(await_all(launchers, Deadline::after(Duration::from_secs(1))))
            });
        });
    }
    group.finish();
}

fn bench_round_threaded(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_threaded");

    for n in [4usize, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let launchers = (0..n).map(|i| {
                    move |done: Completion<usize>| {
                        thread::spawn(move || done.complete(i));
                    }
                });
                black_box(await_all(launchers, Deadline::after(Duration::from_secs(5))))
            });
        });
    }
    group.finish();
}

fn bench_accumulator(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulator");
    const PRODUCERS: usize = 4;
    const ITEMS: usize = 1000;

    group.bench_function("std_mutex_vec", |b| {
        b.iter(|| {
            let acc = Arc::new(Mutex::new(Vec::with_capacity(PRODUCERS * ITEMS)));
            thread::scope(|s| {
                for p in 0..PRODUCERS {
                    let acc = acc.clone();
                    s.spawn(move || {
                        for i in 0..ITEMS {
                            acc.lock().unwrap().push(p * ITEMS + i);
                        }
                    });
                }
            });
            let len = black_box(acc.lock().unwrap().len());
            len
        });
    });

    group.bench_function("completion_queue_and_gate", |b| {
        b.iter(|| {
            let queue = CompletionQueue::new();
            let (gate, parker) = WaitGate::with_parker();
            let (queue, gate) = (&queue, &gate);
            thread::scope(|s| {
                for p in 0..PRODUCERS {
                    s.spawn(move || {
                        for i in 0..ITEMS {
                            queue.push(p * ITEMS + i);
                            gate.release();
                        }
                    });
                }

                let deadline = Instant::now() + Duration::from_secs(5);
                let mut count = 0;
                for _ in 0..PRODUCERS * ITEMS {
                    if gate.acquire_until(&parker, deadline) {
                        // Safety: this closure is the only consumer.
                        if unsafe { queue.pop_spin() }.is_some() {
                            count += 1;
                        }
                    }
                }
                black_box(count)
            })
        });
    });

    group.finish();
}

criterion_group!(benches, bench_round_inline, bench_round_threaded, bench_accumulator);
criterion_main!(benches);
