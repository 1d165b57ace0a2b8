use common::OrderId;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use domain::{Item, Order, OrderStatus};
use rust_decimal::Decimal;

fn make_items(count: i32) -> Vec<Item> {
    (1..=count)
        .map(|n| {
            Item::new(
                format!("item-{n}"),
                format!("Benchmark Widget {n}"),
                n,
                Decimal::new(999, 2),
            )
            .unwrap()
        })
        .collect()
}

fn bench_create_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("domain/create_order");
    for count in [1, 10, 100] {
        let items = make_items(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &items, |b, items| {
            b.iter(|| Order::create(OrderId::new(), "Bench Customer", items.clone()).unwrap());
        });
    }
    group.finish();
}

fn bench_total(c: &mut Criterion) {
    let order = Order::create(OrderId::new(), "Bench Customer", make_items(100)).unwrap();

    c.bench_function("domain/total_100_items", |b| {
        b.iter(|| black_box(&order).total());
    });
}

fn bench_update_and_cancel(c: &mut Criterion) {
    let base = Order::create(OrderId::new(), "Bench Customer", make_items(5)).unwrap();
    let replacement = make_items(3);

    c.bench_function("domain/update_then_cancel", |b| {
        b.iter(|| {
            let mut order = base.clone();
            order.update_details("Other Customer", replacement.clone()).unwrap();
            order.set_status(OrderStatus::Canceled).unwrap();
            order
        });
    });
}

criterion_group!(benches, bench_create_order, bench_total, bench_update_and_cancel);
criterion_main!(benches);
