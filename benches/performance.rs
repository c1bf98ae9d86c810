use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use gift_core::{persistence, query, GiftStore, MemoryKeyValueStore, SortOrder};
use gift_domain::{Category, Gift, GiftStatus, Recipient};
use gift_storage_json::{JsonSlotStorage, StoragePaths};
use tempfile::tempdir;

fn build_sample_gifts(count: usize) -> Vec<Gift> {
    let recipients: Vec<Recipient> = ["Ana", "Ben", "Cleo", "Dev"]
        .into_iter()
        .map(Recipient::new)
        .collect();
    let category = Category::new("General");
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    (0..count)
        .map(|idx| {
            let status = if idx % 3 == 0 {
                GiftStatus::Purchased
            } else {
                GiftStatus::Pending
            };
            Gift::new(
                format!("Gift {:05}", (idx * 7919) % count),
                5.0 + (idx % 100) as f64,
                start + Duration::days((idx % 365) as i64),
                recipients[idx % recipients.len()].clone(),
                category.clone(),
            )
            .with_status(status)
        })
        .collect()
}

fn bench_query(c: &mut Criterion) {
    let gifts = build_sample_gifts(1_000);

    c.bench_function("query_sort_1k", |b| {
        b.iter(|| black_box(query(&gifts, "", SortOrder::Ascending)).len())
    });

    c.bench_function("query_search_1k", |b| {
        b.iter(|| black_box(query(&gifts, black_box("gift 00"), SortOrder::Descending)).len())
    });
}

fn bench_whole_collection_save(c: &mut Criterion) {
    let gifts = build_sample_gifts(1_000);
    let dir = tempdir().expect("tempdir");
    let storage = JsonSlotStorage::new(StoragePaths::under(dir.path())).expect("storage");

    c.bench_function("json_slot_save_1k", |b| {
        b.iter(|| persistence::save(&storage, "gifts", black_box(&gifts)).expect("save"))
    });

    c.bench_function("store_add_to_1k", |b| {
        b.iter_batched(
            || {
                let backend = MemoryKeyValueStore::new();
                persistence::save(&backend, "gifts", &gifts).expect("seed");
                GiftStore::open(backend)
            },
            |mut store| {
                let extra = gifts[0].clone();
                store.add_gift(extra).expect("add");
                black_box(store.gifts().len())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_query, bench_whole_collection_save);
criterion_main!(benches);
