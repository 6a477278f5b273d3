mod common;

use async_trait::async_trait;
use common::*;
use housing_finder::models::NewListing;
use housing_finder::{
    FilterCriteria, KeywordTranslator, ListingFinder, Page, QueryTranslator, Reply, SearchEngine,
    Store,
};
use std::sync::{Arc, Mutex};

/// Returns fixed criteria and remembers the context it was given
struct FixedTranslator {
    filters: FilterCriteria,
    seen_prior: Mutex<Option<FilterCriteria>>,
}

impl FixedTranslator {
    fn new(filters: FilterCriteria) -> Self {
        Self {
            filters,
            seen_prior: Mutex::new(None),
        }
    }
}

#[async_trait]
impl QueryTranslator for FixedTranslator {
    async fn translate(&self, _text: &str) -> FilterCriteria {
        self.filters.clone()
    }

    async fn translate_in_context(&self, text: &str, prior: &FilterCriteria) -> FilterCriteria {
        *self.seen_prior.lock().unwrap() = Some(prior.clone());
        self.translate(text).await
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

async fn keyword_finder(store: &Store) -> ListingFinder {
    let translator = KeywordTranslator::from_store(store).await.unwrap();
    ListingFinder::new(Arc::new(translator), SearchEngine::new(store.clone()), 5)
}

#[tokio::test]
async fn test_free_text_request() {
    let store = seeded_store().await;
    let wanted = add(
        &store,
        NewListing {
            rooms: Some(2),
            has_balcony: true,
            ..listing("Balcony flat", APARTMENT, CENTRAL, 95_000.0, 52.0)
        },
    )
    .await;
    add(
        &store,
        NewListing {
            rooms: Some(2),
            has_balcony: true,
            ..listing("Pricey flat", APARTMENT, CENTRAL, 180_000.0, 52.0)
        },
    )
    .await;
    add(
        &store,
        NewListing {
            rooms: Some(2),
            ..listing("Plain flat", APARTMENT, CENTRAL, 80_000.0, 52.0)
        },
    )
    .await;
    let finder = keyword_finder(&store).await;

    let reply = finder
        .respond("2-room apartment with balcony up to 100000")
        .await;

    match &reply {
        Reply::Listings {
            query,
            filters,
            page,
            listings,
        } => {
            assert_eq!(
                query.as_deref(),
                Some("2-room apartment with balcony up to 100000")
            );
            assert_eq!(filters.type_id, Some(APARTMENT));
            assert_eq!(filters.rooms, Some(2));
            assert_eq!(filters.has_balcony, Some(true));
            assert_eq!(filters.max_price, Some(100_000.0));
            assert_eq!(*page, Page::first(5));
            assert_eq!(listings.len(), 1);
            assert_eq!(listings[0].listing.id, wanted);
        }
        other => panic!("expected listings, got {:?}", other),
    }
    assert!(reply.message().contains("Balcony flat"));
}

#[tokio::test]
async fn test_district_and_feature_names_come_from_the_store() {
    let store = seeded_store().await;
    let wanted = add(
        &store,
        NewListing {
            features: vec![SAUNA],
            ..listing("Sauna house", HOUSE, RIVERSIDE, 250_000.0, 140.0)
        },
    )
    .await;
    add(
        &store,
        NewListing {
            features: vec![SAUNA],
            ..listing("Central sauna house", HOUSE, CENTRAL, 250_000.0, 140.0)
        },
    )
    .await;
    let finder = keyword_finder(&store).await;

    let reply = finder.respond("house in Riverside with a sauna").await;

    let ids: Vec<i64> = reply.listings().iter().map(|d| d.listing.id).collect();
    assert_eq!(ids, vec![wanted]);
}

#[tokio::test]
async fn test_district_choice_ignores_popularity() {
    let store = seeded_store().await;
    sqlx::query("UPDATE districts SET popularity = 99 WHERE id = ?")
        .bind(NORTHGATE)
        .execute(store.pool())
        .await
        .unwrap();

    // The menu follows popularity
    assert_eq!(store.districts().await.unwrap()[0].id, NORTHGATE);

    let translator = KeywordTranslator::from_store(&store).await.unwrap();
    let filters = translator.extract("flat in Central or Northgate");
    assert_eq!(filters.district_id, Some(CENTRAL));
}

#[tokio::test]
async fn test_nothing_found() {
    let store = seeded_store().await;
    add_many(&store, 3).await;
    let finder = keyword_finder(&store).await;

    let reply = finder.respond("house with a pool").await;

    assert_eq!(
        reply,
        Reply::NothingFound {
            query: Some("house with a pool".to_string())
        }
    );
    assert!(reply.listings().is_empty());
    assert!(reply.message().contains("house with a pool"));
}

#[tokio::test]
async fn test_unreadable_text_browses_everything() {
    let store = seeded_store().await;
    let added = add_many(&store, 3).await;
    let finder = keyword_finder(&store).await;

    let reply = finder.respond("something nice please").await;

    let ids: Vec<i64> = reply.listings().iter().map(|d| d.listing.id).collect();
    let newest_first: Vec<i64> = added.into_iter().rev().collect();
    assert_eq!(ids, newest_first);
}

#[tokio::test]
async fn test_failures_become_a_generic_apology() {
    let store = seeded_store().await;
    add_many(&store, 2).await;
    let finder = keyword_finder(&store).await;
    store.close().await;

    let reply = finder.respond("apartment").await;

    assert_eq!(reply, Reply::Unavailable);
    let message = reply.message();
    assert!(message.contains("menu"));
    assert!(!message.to_lowercase().contains("pool"));
    assert!(!message.to_lowercase().contains("sqlite"));
}

#[tokio::test]
async fn test_browse_pages() {
    let store = seeded_store().await;
    let added = add_many(&store, 7).await;
    let translator = FixedTranslator::new(FilterCriteria::default());
    let finder = ListingFinder::new(Arc::new(translator), SearchEngine::new(store), 5);
    let filters = FilterCriteria {
        district_id: Some(CENTRAL),
        ..Default::default()
    };

    let second = finder.browse(filters.clone(), Page::nth(5, 2)).await;

    let ids: Vec<i64> = second.listings().iter().map(|d| d.listing.id).collect();
    assert_eq!(ids, vec![added[1], added[0]]);
    let message = second.message();
    assert!(message.contains("page 2"));
    assert!(message.contains("6. Apartment #2"));

    let third = finder.browse(filters, Page::nth(5, 3)).await;
    assert_eq!(third, Reply::NothingFound { query: None });
}

#[tokio::test]
async fn test_refine_passes_prior_criteria() {
    let store = seeded_store().await;
    add(&store, listing("Studio", STUDIO, CENTRAL, 40_000.0, 25.0)).await;
    let translator = Arc::new(FixedTranslator::new(FilterCriteria {
        type_id: Some(STUDIO),
        ..Default::default()
    }));
    let finder = ListingFinder::new(translator.clone(), SearchEngine::new(store), 5);
    let prior = FilterCriteria {
        district_id: Some(CENTRAL),
        ..Default::default()
    };

    let reply = finder.refine("a studio instead", &prior).await;

    assert_eq!(reply.listings().len(), 1);
    assert_eq!(translator.seen_prior.lock().unwrap().clone(), Some(prior));
}
