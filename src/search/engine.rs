use crate::aggregate::enrich;
use crate::error::Result;
use crate::models::{Listing, ListingDetails};
use crate::search::predicate::Predicate;
use crate::search::types::{FilterCriteria, Page};
use crate::store::Store;
use tracing::debug;

/// Paginated listing lookup over the store
#[derive(Clone)]
pub struct SearchEngine {
    store: Store,
}

impl SearchEngine {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Available listings matching `filters`, newest first.
    ///
    /// Skips the first `offset` matches and returns at most `limit`
    /// enriched listings. A non-positive limit yields an empty page.
    pub async fn search(
        &self,
        filters: &FilterCriteria,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ListingDetails>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let predicate = Predicate::from_filters(filters);
        debug!(
            conditions = predicate.conditions().len(),
            features = predicate.feature_ids().len(),
            limit,
            offset,
            "Searching listings"
        );

        let mut conn = self.store.pool().acquire().await?;
        let mut query = predicate.select_listings(limit, offset.max(0));
        let rows = query
            .build_query_as::<Listing>()
            .fetch_all(&mut *conn)
            .await?;

        let mut listings = Vec::with_capacity(rows.len());
        for row in rows {
            listings.push(enrich(&mut conn, row).await?);
        }

        debug!("Search returned {} listings", listings.len());
        Ok(listings)
    }

    pub async fn search_page(
        &self,
        filters: &FilterCriteria,
        page: Page,
    ) -> Result<Vec<ListingDetails>> {
        self.search(filters, page.limit, page.offset).await
    }
}
