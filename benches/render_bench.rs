//! Benchmarks for fragment rendering and watermark application
//!
//! Run with: cargo bench

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wingman::present::{relative_age, render_notification_dropdown};
use wingman::sync::apply_new_messages;
use wingman::{Message, Notification, Page, SenderType, Watermark};

fn timestamp(minutes_ago: i64) -> String {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    (now - Duration::minutes(minutes_ago))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

fn bench_relative_age(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let samples: Vec<String> = [0, 5, 90, 2000, 20000].iter().map(|m| timestamp(*m)).collect();

    c.bench_function("relative_age", |b| {
        b.iter(|| {
            for s in &samples {
                black_box(relative_age(black_box(s), now));
            }
        })
    });
}

fn bench_dropdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("dropdown");
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

    for size in [10, 50] {
        let notifications: Vec<Notification> = (0..size)
            .map(|i| Notification::new_message(format!("c{}", i), "Alex", timestamp(i as i64)))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("render_{}", size), |b| {
            b.iter(|| render_notification_dropdown(black_box(&notifications), now))
        });
    }

    group.finish();
}

fn bench_apply_messages(c: &mut Criterion) {
    let batch: Vec<Message> = (0..100)
        .map(|i| Message::new(i.to_string(), "hello", SenderType::Match, timestamp(100 - i)))
        .collect();
    let since = Watermark::empty();

    c.bench_function("apply_new_messages_100", |b| {
        b.iter(|| {
            let mut page = Page::new();
            let response = wingman::api::MessagesResponse::ok(batch.clone());
            apply_new_messages(&mut page, &since, Ok(response))
        })
    });
}

criterion_group!(benches, bench_relative_age, bench_dropdown, bench_apply_messages);
criterion_main!(benches);
