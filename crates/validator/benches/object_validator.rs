//! Benchmarks for object validation with nested properties.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tessera_validator::prelude::*;

struct Order {
    id: String,
    quantity: i32,
    email: Option<String>,
    lines: Vec<String>,
}

fn order_validator() -> ObjectValidator<Order> {
    object::<Order>()
        .rule_for("Id", |o| o.id.as_str(), string().not_empty().guid())
        .rule_for("Quantity", |o| &o.quantity, int().between(1, 1_000))
        .rule_for_option("Email", |o| o.email.as_deref(), string().email())
        .rule_for(
            "Lines",
            |o| o.lines.as_slice(),
            array_of::<String>()
                .not_empty()
                .max_count(50)
                .for_each(string().not_blank().max_length(64)),
        )
}

fn valid_order() -> Order {
    Order {
        id: "67e55044-10b1-426f-9247-bb680e5fe0c8".to_owned(),
        quantity: 3,
        email: Some("buyer@example.com".to_owned()),
        lines: (0..10).map(|i| format!("line item {i}")).collect(),
    }
}

fn invalid_order() -> Order {
    Order {
        id: "not-a-guid".to_owned(),
        quantity: 0,
        email: Some("buyer".to_owned()),
        lines: (0..10)
            .map(|i| if i % 3 == 0 { String::new() } else { "x".repeat(80) })
            .collect(),
    }
}

// ============================================================================
// Object validation
// ============================================================================

fn bench_object(c: &mut Criterion) {
    let validator = order_validator();
    let valid = valid_order();
    let invalid = invalid_order();

    c.bench_function("object_valid", |b| {
        b.iter(|| black_box(validator.validate(black_box(&valid))))
    });

    c.bench_function("object_invalid", |b| {
        b.iter(|| black_box(validator.validate(black_box(&invalid))))
    });

    c.bench_function("object_build", |b| b.iter(|| black_box(order_validator())));
}

// ============================================================================
// Union dispatch
// ============================================================================

fn bench_union(c: &mut Criterion) {
    let validator = union(string().guid()).or(long().positive()).or(double().finite());

    let guid = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    c.bench_function("union_first_candidate", |b| {
        b.iter(|| black_box(validator.validate(black_box(&guid))))
    });

    c.bench_function("union_mismatch", |b| {
        b.iter(|| black_box(validator.validate(black_box(&true))))
    });
}

criterion_group!(benches, bench_object, bench_union);
criterion_main!(benches);
