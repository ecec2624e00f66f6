//! Performance benchmarks for the admission pipeline.
//!
//! These benchmarks measure:
//! - Sanitizer throughput on growing inputs, including adversarial ones
//! - Rate limiter admission for one hot client and many distinct clients
//! - A full dispatch with a notifier that returns immediately

use async_trait::async_trait;
use booking_mcp_server::error::NotifierResult;
use booking_mcp_server::validation::sanitize_str;
use booking_mcp_server::{
    BookingRequest, DispatcherSettings, EmailAddress, MessageId, Notifier, RateLimiter,
    RegionMatcher, RequestDispatcher,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(
        &self,
        _from: &EmailAddress,
        _to: &[EmailAddress],
        _subject: &str,
        _body: &str,
    ) -> NotifierResult<MessageId> {
        Ok(MessageId("bench".to_string()))
    }
}

/// Benchmark sanitization of plain and marked-up text of growing size.
fn bench_sanitize_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize_sizes");

    for size in [100usize, 10_000, 1_000_000].iter() {
        let input = "<b>John</b> Doe onclick=x ".repeat(size / 26 + 1);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| sanitize_str(black_box(input), usize::MAX));
        });
    }

    group.finish();
}

/// Benchmark inputs that make backtracking engines go quadratic.
fn bench_sanitize_adversarial(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize_adversarial");
    group.sample_size(20);

    let cases = [
        ("unclosed_tags", "<".repeat(1_000_000)),
        ("unclosed_script", format!("<script>{}", "a".repeat(1_000_000))),
        ("handler_prefix", "on".repeat(500_000)),
    ];

    for (label, input) in cases.iter() {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), input, |b, input| {
            b.iter(|| sanitize_str(black_box(input), 200));
        });
    }

    group.finish();
}

/// Benchmark rate limiter admission.
fn bench_rate_limiter(c: &mut Criterion) {
    let limiter = RateLimiter::new(5, Duration::from_secs(900));
    c.bench_function("admit_hot_client", |b| {
        b.iter(|| limiter.admit(black_box(Some("hot"))));
    });

    let limiter = RateLimiter::new(5, Duration::from_secs(900));
    let ids: Vec<String> = (0..10_000).map(|i| format!("client-{}", i)).collect();
    let mut next = 0;
    c.bench_function("admit_many_clients", |b| {
        b.iter(|| {
            next = (next + 1) % ids.len();
            limiter.admit(Some(&ids[next]))
        });
    });
}

/// Benchmark one full dispatch, notifier excluded.
fn bench_dispatch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let settings = DispatcherSettings {
        max_name_length: 200,
        max_address_length: 200,
        notifier_timeout: Duration::from_secs(5),
        region_name: "San Francisco".to_string(),
        mail_from: EmailAddress::new("bookings@example.com").unwrap(),
        mail_to: vec![EmailAddress::new("owner@example.com").unwrap()],
    };
    let dispatcher = RequestDispatcher::new(
        RateLimiter::new(usize::MAX, Duration::from_millis(1)),
        RegionMatcher::default(),
        Arc::new(NullNotifier),
        settings,
    );

    c.bench_function("dispatch_in_region", |b| {
        b.to_async(&rt).iter(|| async {
            let request = BookingRequest::new(
                "John Doe",
                "(415) 555-1234",
                "123 Market St, San Francisco, CA 94105",
            );
            dispatcher.dispatch(Some("bench"), request).await
        });
    });
}

criterion_group!(
    benches,
    bench_sanitize_sizes,
    bench_sanitize_adversarial,
    bench_rate_limiter,
    bench_dispatch
);
criterion_main!(benches);
