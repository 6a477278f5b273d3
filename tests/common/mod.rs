#![allow(dead_code)]

use housing_finder::models::NewListing;
use housing_finder::Store;

pub const APARTMENT: i64 = 1;
pub const HOUSE: i64 = 2;
pub const STUDIO: i64 = 3;

pub const CENTRAL: i64 = 1;
pub const RIVERSIDE: i64 = 2;
pub const OLD_TOWN: i64 = 3;
pub const NORTHGATE: i64 = 4;

pub const POOL: i64 = 1;
pub const GARDEN: i64 = 2;
pub const FIREPLACE: i64 = 3;
pub const SAUNA: i64 = 4;
pub const GARAGE: i64 = 5;
pub const SEA_VIEW: i64 = 6;

/// Fresh in-memory store with schema and reference data
pub async fn seeded_store() -> Store {
    let store = Store::in_memory().await.unwrap();
    store.init_schema().await.unwrap();
    store.seed_reference_data().await.unwrap();
    store
}

pub fn listing(title: &str, type_id: i64, district_id: i64, price: f64, area: f64) -> NewListing {
    NewListing {
        title: title.to_string(),
        type_id,
        district_id,
        price,
        area,
        ..Default::default()
    }
}

pub async fn add(store: &Store, new: NewListing) -> i64 {
    store.add_listing(&new).await.unwrap()
}

/// Adds `count` plain apartments and returns their ids in insertion order
pub async fn add_many(store: &Store, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let new = listing(
            &format!("Apartment #{}", i + 1),
            APARTMENT,
            CENTRAL,
            50_000.0 + i as f64 * 1_000.0,
            40.0 + i as f64,
        );
        ids.push(add(store, new).await);
    }
    ids
}
