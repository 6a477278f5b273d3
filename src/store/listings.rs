use super::Store;
use crate::aggregate::enrich;
use crate::error::{CatalogError, Result};
use crate::models::{Listing, ListingDetails, ListingUpdate, NewListing};
use crate::search::predicate::Value;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

impl Store {
    /// Insert a listing and its feature links in one transaction.
    ///
    /// Unknown type, district or feature ids violate a foreign key and
    /// roll the whole insert back.
    pub async fn add_listing(&self, new: &NewListing) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        match insert_listing(&mut tx, new).await {
            Ok(id) => {
                tx.commit().await?;
                info!("Added listing {} ({})", id, new.title);
                Ok(id)
            }
            Err(e) => {
                warn!("Failed to add listing '{}': {}", new.title, e);
                tx.rollback().await?;
                Err(e)
            }
        }
    }

    /// Apply a partial update. Returns `false` when there is no such
    /// listing.
    ///
    /// An update without any field is rejected before the store is touched.
    pub async fn update_listing(&self, id: i64, update: &ListingUpdate) -> Result<bool> {
        if update.is_empty() {
            return Err(CatalogError::ConstraintViolation(format!(
                "update of listing {} carries no fields",
                id
            )));
        }

        let mut tx = self.pool.begin().await?;

        match apply_update(&mut tx, id, update).await {
            Ok(true) => {
                tx.commit().await?;
                info!("Updated listing {}", id);
                Ok(true)
            }
            Ok(false) => {
                tx.rollback().await?;
                debug!("Listing {} not found for update", id);
                Ok(false)
            }
            Err(e) => {
                warn!("Failed to update listing {}: {}", id, e);
                tx.rollback().await?;
                Err(e)
            }
        }
    }

    /// Soft delete: the row, its features and its views are kept, only
    /// the availability flag is cleared
    pub async fn delete_listing(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE listings SET is_available = 0 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await;

        match result {
            Ok(done) => {
                tx.commit().await?;
                let found = done.rows_affected() > 0;
                if found {
                    info!("Listing {} marked unavailable", id);
                }
                Ok(found)
            }
            Err(e) => {
                warn!("Failed to delete listing {}: {}", id, e);
                tx.rollback().await?;
                Err(e.into())
            }
        }
    }

    /// Detail fetch: counts one view and returns the enriched listing,
    /// including unavailable ones
    pub async fn get_listing(&self, id: i64) -> Result<Option<ListingDetails>> {
        let mut tx = self.pool.begin().await?;

        let bumped = sqlx::query("UPDATE listings SET views_count = views_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if bumped.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let listing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        let details = enrich(&mut tx, listing).await?;

        tx.commit().await?;
        Ok(Some(details))
    }

    /// Read a listing without counting a view
    pub async fn find_listing(&self, id: i64) -> Result<Option<ListingDetails>> {
        let mut conn = self.pool.acquire().await?;

        let listing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match listing {
            Some(listing) => Ok(Some(enrich(&mut conn, listing).await?)),
            None => Ok(None),
        }
    }
}

async fn insert_listing(conn: &mut SqliteConnection, new: &NewListing) -> Result<i64> {
    let done = sqlx::query(
        r#"
        INSERT INTO listings (
            title, description, type_id, district_id, address,
            price, area, rooms, floor, total_floors, year_built,
            renovation_year, has_balcony, has_elevator, has_parking,
            image_url, contact_phone, contact_name, latitude, longitude,
            is_available, views_count, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1, 0, ?)
        "#,
    )
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.type_id)
    .bind(new.district_id)
    .bind(&new.address)
    .bind(new.price)
    .bind(new.area)
    .bind(new.rooms)
    .bind(new.floor)
    .bind(new.total_floors)
    .bind(new.year_built)
    .bind(new.renovation_year)
    .bind(new.has_balcony)
    .bind(new.has_elevator)
    .bind(new.has_parking)
    .bind(&new.image_url)
    .bind(&new.contact_phone)
    .bind(&new.contact_name)
    .bind(new.latitude)
    .bind(new.longitude)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    let id = done.last_insert_rowid();
    link_features(conn, id, &new.features).await?;
    Ok(id)
}

async fn link_features(conn: &mut SqliteConnection, listing_id: i64, features: &[i64]) -> Result<()> {
    let unique: BTreeSet<i64> = features.iter().copied().collect();

    for feature_id in unique {
        sqlx::query("INSERT INTO listing_features (listing_id, feature_id) VALUES (?, ?)")
            .bind(listing_id)
            .bind(feature_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

async fn apply_update(conn: &mut SqliteConnection, id: i64, update: &ListingUpdate) -> Result<bool> {
    let assignments = assignments(update);

    let found = if assignments.is_empty() {
        sqlx::query_scalar::<_, i64>("SELECT id FROM listings WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .is_some()
    } else {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE listings SET ");
        for (i, (column, value)) in assignments.into_iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(column).push(" = ");
            value.push_bind_to(&mut builder);
        }
        builder.push(" WHERE id = ").push_bind(id);

        builder.build().execute(&mut *conn).await?.rows_affected() > 0
    };

    if !found {
        return Ok(false);
    }

    if let Some(features) = &update.features {
        sqlx::query("DELETE FROM listing_features WHERE listing_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        link_features(conn, id, features).await?;
    }

    Ok(true)
}

/// Column assignments for every field present in the update
fn assignments(update: &ListingUpdate) -> Vec<(&'static str, Value)> {
    let text = |v: &Option<String>| v.clone().map(Value::Text);

    [
        ("title", text(&update.title)),
        ("description", text(&update.description)),
        ("type_id", update.type_id.map(Value::Int)),
        ("district_id", update.district_id.map(Value::Int)),
        ("address", text(&update.address)),
        ("price", update.price.map(Value::Real)),
        ("area", update.area.map(Value::Real)),
        ("rooms", update.rooms.map(Value::Int)),
        ("floor", update.floor.map(Value::Int)),
        ("total_floors", update.total_floors.map(Value::Int)),
        ("year_built", update.year_built.map(Value::Int)),
        ("renovation_year", update.renovation_year.map(Value::Int)),
        ("has_balcony", update.has_balcony.map(Value::Bool)),
        ("has_elevator", update.has_elevator.map(Value::Bool)),
        ("has_parking", update.has_parking.map(Value::Bool)),
        ("image_url", text(&update.image_url)),
        ("contact_phone", text(&update.contact_phone)),
        ("contact_name", text(&update.contact_name)),
        ("latitude", update.latitude.map(Value::Real)),
        ("longitude", update.longitude.map(Value::Real)),
        ("is_available", update.is_available.map(Value::Bool)),
    ]
    .into_iter()
    .filter_map(|(column, value)| value.map(|v| (column, v)))
    .collect()
}
