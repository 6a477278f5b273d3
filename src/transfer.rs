//! JSON export and import of listings.
//!
//! Exported documents are [`ListingDetails`]: the listing columns plus the
//! denormalised `features`, `property_type` and `district` objects. Import
//! resolves those objects back to foreign keys and drops the
//! server-generated `id`, `created_at` and `views_count`.

use crate::error::{CatalogError, Result};
use crate::models::{ListingDetails, NewListing};
use crate::search::{FilterCriteria, Page, SearchEngine};
use crate::store::Store;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

const EXPORT_BATCH: i64 = 100;

#[derive(Debug, Deserialize)]
struct FeatureRef {
    #[serde(alias = "feature_id")]
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TypeRef {
    #[serde(alias = "type_id")]
    id: i64,
}

#[derive(Debug, Deserialize)]
struct DistrictRef {
    #[serde(alias = "district_id")]
    id: i64,
}

/// One imported document. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct ImportedListing {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    type_id: Option<i64>,
    #[serde(default)]
    property_type: Option<TypeRef>,
    #[serde(default)]
    district_id: Option<i64>,
    #[serde(default)]
    district: Option<DistrictRef>,
    #[serde(default)]
    address: Option<String>,
    price: f64,
    area: f64,
    #[serde(default)]
    rooms: Option<i64>,
    #[serde(default)]
    floor: Option<i64>,
    #[serde(default)]
    total_floors: Option<i64>,
    #[serde(default)]
    year_built: Option<i64>,
    #[serde(default)]
    renovation_year: Option<i64>,
    #[serde(default)]
    has_balcony: bool,
    #[serde(default)]
    has_elevator: bool,
    #[serde(default)]
    has_parking: bool,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    contact_phone: Option<String>,
    #[serde(default)]
    contact_name: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    features: Vec<FeatureRef>,
}

impl ImportedListing {
    fn into_new_listing(self) -> Result<NewListing> {
        let type_id = self
            .property_type
            .map(|t| t.id)
            .or(self.type_id)
            .ok_or_else(|| {
                CatalogError::ConstraintViolation(format!("'{}' has no property type", self.title))
            })?;
        let district_id = self
            .district
            .map(|d| d.id)
            .or(self.district_id)
            .ok_or_else(|| {
                CatalogError::ConstraintViolation(format!("'{}' has no district", self.title))
            })?;

        Ok(NewListing {
            title: self.title,
            description: self.description,
            type_id,
            district_id,
            address: self.address,
            price: self.price,
            area: self.area,
            rooms: self.rooms,
            floor: self.floor,
            total_floors: self.total_floors,
            year_built: self.year_built,
            renovation_year: self.renovation_year,
            has_balcony: self.has_balcony,
            has_elevator: self.has_elevator,
            has_parking: self.has_parking,
            image_url: self.image_url,
            contact_phone: self.contact_phone,
            contact_name: self.contact_name,
            latitude: self.latitude,
            longitude: self.longitude,
            features: self.features.into_iter().map(|f| f.id).collect(),
        })
    }
}

/// Outcome of an import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Every available listing, newest first, fetched in batches
pub async fn collect_listings(engine: &SearchEngine) -> Result<Vec<ListingDetails>> {
    let filters = FilterCriteria::default();
    let mut page = Page::first(EXPORT_BATCH);
    let mut listings = Vec::new();

    loop {
        let batch = engine.search_page(&filters, page).await?;
        let exhausted = (batch.len() as i64) < page.limit;
        listings.extend(batch);
        if exhausted {
            break;
        }
        page = page.next();
    }

    Ok(listings)
}

/// Write every available listing to `path` as a pretty JSON array
pub async fn export_to_file(engine: &SearchEngine, path: impl AsRef<Path>) -> Result<usize> {
    let listings = collect_listings(engine).await?;
    let json = serde_json::to_string_pretty(&listings)?;
    tokio::fs::write(path.as_ref(), json).await?;

    info!("Exported {} listings to {}", listings.len(), path.as_ref().display());
    Ok(listings.len())
}

/// Insert each document as a new listing.
///
/// Every record is its own transaction; a record that cannot be decoded
/// or inserted is logged and skipped.
pub async fn import_records(store: &Store, records: Vec<serde_json::Value>) -> ImportReport {
    let mut report = ImportReport::default();

    for (index, record) in records.into_iter().enumerate() {
        let new = serde_json::from_value::<ImportedListing>(record)
            .map_err(CatalogError::from)
            .and_then(ImportedListing::into_new_listing);

        let outcome = match new {
            Ok(new) => store.add_listing(&new).await.map(|_| ()),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => report.imported += 1,
            Err(e) => {
                warn!("Skipping import record {}: {}", index, e);
                report.skipped += 1;
            }
        }
    }

    report
}

pub async fn import_from_file(store: &Store, path: impl AsRef<Path>) -> Result<ImportReport> {
    let raw = tokio::fs::read(path.as_ref()).await?;
    let records: Vec<serde_json::Value> = serde_json::from_slice(&raw)?;

    let report = import_records(store, records).await;
    info!(
        "Imported {} listings from {} ({} skipped)",
        report.imported,
        path.as_ref().display(),
        report.skipped
    );
    Ok(report)
}
