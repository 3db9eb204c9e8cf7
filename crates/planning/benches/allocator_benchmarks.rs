use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use prodplan_core::{Entity, ProductId, RawMaterialId, RequirementId};
use prodplan_inventory::{RawMaterial, RawMaterialInput};
use prodplan_planning::{compute_plan, Requirement, RequirementInput};
use prodplan_products::{Product, ProductInput};
use rust_decimal::Decimal;

/// Synthetic catalog: every product needs `materials_per_product` materials drawn
/// round-robin from a shared pool, so stock is contested across products.
struct Catalog {
    products: Vec<Product>,
    materials: Vec<RawMaterial>,
    requirements: Vec<Requirement>,
}

fn build_catalog(product_count: usize, material_count: usize, materials_per_product: usize) -> Catalog {
    let products: Vec<Product> = (0..product_count)
        .map(|i| {
            Product::create(
                ProductId::new(),
                &ProductInput {
                    code: format!("P-{i:05}"),
                    name: format!("Product {i}"),
                    price: Decimal::new(((i * 37) % 10_000) as i64 + 100, 2),
                },
            )
            .unwrap()
        })
        .collect();

    let materials: Vec<RawMaterial> = (0..material_count)
        .map(|i| {
            RawMaterial::create(
                RawMaterialId::new(),
                &RawMaterialInput {
                    code: format!("M-{i:05}"),
                    name: format!("Material {i}"),
                    stock_quantity: Decimal::new(1_000_000 + (i as i64 * 7_919) % 500_000, 3),
                },
            )
            .unwrap()
        })
        .collect();

    let mut requirements = Vec::with_capacity(product_count * materials_per_product);
    for (i, p) in products.iter().enumerate() {
        for k in 0..materials_per_product {
            let m = &materials[(i + k * 13) % material_count];
            requirements.push(
                Requirement::create(
                    RequirementId::new(),
                    &RequirementInput {
                        product_id: p.id(),
                        raw_material_id: m.id(),
                        quantity_required: Decimal::new(250 + ((i + k) as i64 % 40) * 125, 3),
                    },
                )
                .unwrap(),
            );
        }
    }

    Catalog {
        products,
        materials,
        requirements,
    }
}

fn bench_compute_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_plan");

    for product_count in [10usize, 100, 1_000].iter() {
        let catalog = build_catalog(*product_count, 50, 4);
        group.throughput(Throughput::Elements(*product_count as u64));
        group.bench_with_input(
            BenchmarkId::new("products", product_count),
            &catalog,
            |b, catalog| {
                b.iter(|| {
                    compute_plan(
                        black_box(&catalog.products),
                        black_box(&catalog.materials),
                        black_box(&catalog.requirements),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_requirement_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("requirement_fan_out");

    for per_product in [1usize, 8, 32].iter() {
        let catalog = build_catalog(200, 64, *per_product);
        group.throughput(Throughput::Elements(catalog.requirements.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("requirements_per_product", per_product),
            &catalog,
            |b, catalog| {
                b.iter(|| compute_plan(&catalog.products, &catalog.materials, &catalog.requirements));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute_plan, bench_requirement_fan_out);
criterion_main!(benches);
