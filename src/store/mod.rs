//! Listing store: a cloneable handle over an SQLite pool.
//!
//! Every component receives a [`Store`] at construction. Rows are decoded
//! into the typed records of [`crate::models`] right here at the boundary,
//! and every value that reaches SQL goes through a bound parameter.

mod listings;
pub mod schema;

use crate::error::Result;
use crate::models::{District, Feature, PropertyType};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (and create if missing) the database at `url`, e.g.
    /// `sqlite://real_estate.db`
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to listing store at {}", url);
        Ok(Self { pool })
    }

    /// Private in-memory database on a single long-lived connection
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // Each connection would otherwise see its own empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Create tables and indexes if they do not exist yet
    pub async fn init_schema(&self) -> Result<()> {
        for statement in schema::SCHEMA
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        debug!("Listing store schema ready");
        Ok(())
    }

    /// Install the default property types, districts and features.
    /// Existing rows are left alone.
    pub async fn seed_reference_data(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for &(id, name) in schema::PROPERTY_TYPES {
            sqlx::query("INSERT OR IGNORE INTO property_types (id, name) VALUES (?, ?)")
                .bind(id)
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }

        for &(id, name, popularity) in schema::DISTRICTS {
            sqlx::query("INSERT OR IGNORE INTO districts (id, name, popularity) VALUES (?, ?, ?)")
                .bind(id)
                .bind(name)
                .bind(popularity)
                .execute(&mut *tx)
                .await?;
        }

        for &(id, name) in schema::FEATURES {
            sqlx::query("INSERT OR IGNORE INTO features (id, name) VALUES (?, ?)")
                .bind(id)
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!("Reference data seeded");
        Ok(())
    }

    /// All districts, most popular first
    pub async fn districts(&self) -> Result<Vec<District>> {
        let districts = sqlx::query_as::<_, District>(
            "SELECT id, name, popularity FROM districts ORDER BY popularity DESC, name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(districts)
    }

    pub async fn property_types(&self) -> Result<Vec<PropertyType>> {
        let types = sqlx::query_as::<_, PropertyType>("SELECT id, name FROM property_types ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(types)
    }

    pub async fn features(&self) -> Result<Vec<Feature>> {
        let features = sqlx::query_as::<_, Feature>("SELECT id, name FROM features ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(features)
    }
}
