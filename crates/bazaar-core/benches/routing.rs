//! Routing benchmarks for bazaar-core.

use bazaar_core::{MessageRoute, PresenceRouter};
use bazaar_protocol::{ChatMessage, ConnectionId};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

fn populated_router(sellers: usize) -> (PresenceRouter, Vec<bazaar_core::OutboxReceiver>) {
    let mut router = PresenceRouter::new();
    let mut receivers = Vec::with_capacity(sellers);

    for i in 0..sellers {
        let connection_id = ConnectionId::new(format!("sock-{i}"));
        receivers.push(router.connect(connection_id.clone()));
        router
            .register_seller(format!("seller-{i}"), connection_id, json!({ "shop": i }))
            .unwrap();
    }

    // Drop the registration broadcasts so the queues start empty.
    for rx in &mut receivers {
        while rx.try_recv().is_ok() {}
    }

    (router, receivers)
}

fn bench_route_message(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_message");

    for sellers in [10, 1_000] {
        let (router, mut receivers) = populated_router(sellers);
        let message = ChatMessage::new("customer-0", format!("seller-{}", sellers / 2), "hello");

        let recipient = &mut receivers[sellers / 2];

        group.bench_with_input(BenchmarkId::from_parameter(sellers), &sellers, |b, _| {
            b.iter(|| {
                let delivered = router
                    .route_message(MessageRoute::CustomerToSeller, black_box(message.clone()));
                // Drain so the queue stays empty across samples.
                while recipient.try_recv().is_ok() {}
                delivered
            });
        });
    }

    group.finish();
}

fn bench_route_offline(c: &mut Criterion) {
    let (router, _receivers) = populated_router(1_000);
    let message = ChatMessage::new("customer-0", "nobody", "hello");

    c.bench_function("route_message_offline", |b| {
        b.iter(|| router.route_message(MessageRoute::CustomerToSeller, black_box(message.clone())))
    });
}

fn bench_register_disconnect(c: &mut Criterion) {
    let (mut router, receivers) = populated_router(100);
    // Closed queues keep broadcasts from piling up between iterations.
    drop(receivers);
    let connection_id = ConnectionId::new("sock-bench");

    c.bench_function("register_disconnect_100", |b| {
        b.iter(|| {
            router
                .register_customer("customer-bench", connection_id.clone(), json!(null))
                .unwrap();
            router.handle_disconnect(black_box(&connection_id))
        })
    });
}

criterion_group!(
    benches,
    bench_route_message,
    bench_route_offline,
    bench_register_disconnect
);
criterion_main!(benches);
