use crate::error::Result;
use crate::models::{FeatureUsage, Stats};
use crate::store::Store;
use tracing::debug;

const TOP_FEATURES: i64 = 5;

/// Catalog statistics over available listings
#[derive(Clone)]
pub struct Aggregator {
    store: Store,
}

impl Aggregator {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn statistics(&self) -> Result<Stats> {
        let pool = self.store.pool();

        // AVG over zero rows is NULL, which decodes to None.
        let (total_listings, average_price, average_area): (i64, Option<f64>, Option<f64>) =
            sqlx::query_as(
                "SELECT COUNT(*), AVG(price), AVG(area) FROM listings WHERE is_available = 1",
            )
            .fetch_one(pool)
            .await?;

        let by_type: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT pt.name, COUNT(*)
            FROM listings l
            JOIN property_types pt ON pt.id = l.type_id
            WHERE l.is_available = 1
            GROUP BY pt.name
            "#,
        )
        .fetch_all(pool)
        .await?;

        let by_district: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT d.name, COUNT(*)
            FROM listings l
            JOIN districts d ON d.id = l.district_id
            WHERE l.is_available = 1
            GROUP BY d.name
            "#,
        )
        .fetch_all(pool)
        .await?;

        let popular_features = sqlx::query_as::<_, FeatureUsage>(
            r#"
            SELECT f.name AS name, COUNT(*) AS count
            FROM listing_features lf
            JOIN features f ON f.id = lf.feature_id
            JOIN listings l ON l.id = lf.listing_id
            WHERE l.is_available = 1
            GROUP BY f.name
            ORDER BY count DESC, f.name ASC
            LIMIT ?
            "#,
        )
        .bind(TOP_FEATURES)
        .fetch_all(pool)
        .await?;

        debug!(total_listings, "Computed catalog statistics");

        Ok(Stats {
            total_listings,
            average_price: average_price.map(round2),
            average_area: average_area.map(round2),
            by_type: by_type.into_iter().collect(),
            by_district: by_district.into_iter().collect(),
            popular_features,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn test_round2() {
        assert_eq!(round2(123.456), 123.46);
        assert_eq!(round2(80.0), 80.0);
        assert_eq!(round2(66.666_666), 66.67);
    }
}
