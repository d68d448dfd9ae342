// Criterion benchmarks for Stylo Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stylo_algo::core::{
    fallback::generate_basic, filter_by_occasion, filter_by_weather, is_valid_outfit,
    InMemoryHistory, ValidationPolicy,
};
use stylo_algo::models::{Category, GarmentItem, WeatherSnapshot};

fn garment(id: usize) -> GarmentItem {
    let category = match id % 6 {
        0 => Category::Tops,
        1 => Category::Bottoms,
        2 => Category::Shoes,
        3 => Category::Outerwear,
        4 => Category::Accessories,
        _ => Category::Dresses,
    };
    let color = match id % 4 {
        0 => "white",
        1 => "black",
        2 => "navy",
        _ => "grey",
    };

    GarmentItem {
        id: id as i64,
        owner_id: "bench".to_string(),
        name: format!("{} item {}", color, id),
        category,
        subcategory: None,
        style: Some(if id % 2 == 0 { "casual" } else { "tailored" }.to_string()),
        formality: None,
        fabric_type: None,
        pattern: None,
        colors: vec![color.to_string()],
        warmth_level: Some((id % 5 + 1) as u8),
        weather_suitability: if id % 3 == 0 {
            vec!["cold".to_string(), "rain".to_string()]
        } else {
            vec![]
        },
        occasion_suitability: vec![],
        is_verified: true,
        image_ref: None,
        created_at: None,
    }
}

fn wardrobe(size: usize) -> Vec<GarmentItem> {
    (0..size).map(garment).collect()
}

fn bench_validation(c: &mut Criterion) {
    let wardrobe = wardrobe(100);
    let outfit = [0i64, 1, 2, 3];

    c.bench_function("validate_outfit", |b| {
        b.iter(|| {
            is_valid_outfit(
                black_box(&outfit),
                black_box(&wardrobe),
                black_box(Some(8.0)),
                black_box(ValidationPolicy::Mandatory),
            )
        });
    });
}

fn bench_fallback_generation(c: &mut Criterion) {
    let wardrobe = wardrobe(50);

    c.bench_function("fallback_generation", |b| {
        b.iter(|| {
            let history = InMemoryHistory::new();
            generate_basic(
                black_box(&wardrobe),
                black_box("bench"),
                black_box(None),
                &history,
                black_box(4),
            )
        });
    });
}

fn bench_filtering_pipeline(c: &mut Criterion) {
    let weather = WeatherSnapshot {
        temperature_c: 3.0,
        condition: "rainy".to_string(),
        humidity: None,
        wind_speed: None,
    };

    let mut group = c.benchmark_group("filtering");

    for item_count in [10, 50, 100, 500].iter() {
        let items = wardrobe(*item_count);

        group.bench_with_input(
            BenchmarkId::new("occasion_and_weather", item_count),
            item_count,
            |b, _| {
                b.iter(|| {
                    let pool = filter_by_occasion(black_box(items.clone()), Some("business"));
                    filter_by_weather(black_box(pool), Some(&weather))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_validation,
    bench_fallback_generation,
    bench_filtering_pipeline
);

criterion_main!(benches);
