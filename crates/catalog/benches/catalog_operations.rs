use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stockroom_catalog::{Catalog, Product, Rating};
use stockroom_core::ProductId;

fn product(i: usize) -> Product {
    Product {
        id: ProductId::new(format!("p{i}")),
        title: format!("Product {i}"),
        price: 9.99,
        description: String::new(),
        category: format!("c{}", i % 16),
        image: String::new(),
        rating: Rating { rate: 4.0, count: 10 },
        stock: 100,
    }
}

fn seeded(size: usize) -> Catalog {
    let mut catalog = Catalog::new();
    for i in 0..size {
        catalog.add_product(product(i)).unwrap();
    }
    catalog
}

/// Lookups are linear scans; this tracks how they scale with catalog size.
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    for size in [100usize, 1_000, 10_000] {
        let catalog = seeded(size);
        let last = ProductId::new(format!("p{}", size - 1));
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("get_product", size), &size, |b, _| {
            b.iter(|| black_box(catalog.get_product(&last).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("get_products_by_category", size), &size, |b, _| {
            b.iter(|| black_box(catalog.get_products_by_category("c3").unwrap().len()));
        });
    }
    group.finish();
}

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutations");
    for size in [100usize, 1_000] {
        group.bench_with_input(BenchmarkId::new("add_then_remove", size), &size, |b, &size| {
            let mut catalog = seeded(size);
            let extra = product(size);
            b.iter(|| {
                catalog.add_product(extra.clone()).unwrap();
                black_box(catalog.remove_product(&extra.id).unwrap());
            });
        });
        group.bench_with_input(BenchmarkId::new("update_stock", size), &size, |b, &size| {
            let mut catalog = seeded(size);
            let id = ProductId::new(format!("p{}", size / 2));
            b.iter(|| {
                catalog.update_product_stock(&id, 1).unwrap();
                black_box(catalog.update_product_stock(&id, -1).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lookup, bench_mutations);
criterion_main!(benches);
