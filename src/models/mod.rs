use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A property type, e.g. apartment or house
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PropertyType {
    pub id: i64,
    pub name: String,
}

/// A city district with its popularity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct District {
    pub id: i64,
    pub name: String,
    pub popularity: i64,
}

/// A named amenity that can be attached to many listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Feature {
    pub id: i64,
    pub name: String,
}

/// Core listing record, one row of the `listings` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub type_id: i64,
    pub district_id: i64,
    pub address: Option<String>,
    pub price: f64,
    pub area: f64,
    pub rooms: Option<i64>,
    pub floor: Option<i64>,
    pub total_floors: Option<i64>,
    pub year_built: Option<i64>,
    pub renovation_year: Option<i64>,
    pub has_balcony: bool,
    pub has_elevator: bool,
    pub has_parking: bool,
    pub image_url: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_available: bool,
    pub views_count: i64,
    pub created_at: DateTime<Utc>,
}

/// A listing together with its type, district and features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDetails {
    #[serde(flatten)]
    pub listing: Listing,
    pub features: Vec<Feature>,
    pub property_type: PropertyType,
    pub district: District,
}

/// Payload for creating a listing.
///
/// Server-generated fields (id, creation time, view counter) are absent on
/// purpose; new listings always start available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub type_id: i64,
    pub district_id: i64,
    #[serde(default)]
    pub address: Option<String>,
    pub price: f64,
    pub area: f64,
    #[serde(default)]
    pub rooms: Option<i64>,
    #[serde(default)]
    pub floor: Option<i64>,
    #[serde(default)]
    pub total_floors: Option<i64>,
    #[serde(default)]
    pub year_built: Option<i64>,
    #[serde(default)]
    pub renovation_year: Option<i64>,
    #[serde(default)]
    pub has_balcony: bool,
    #[serde(default)]
    pub has_elevator: bool,
    #[serde(default)]
    pub has_parking: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub features: Vec<i64>,
}

/// Partial update of a listing. Unset fields are left untouched.
///
/// `features`, when present, replaces the whole feature set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub type_id: Option<i64>,
    pub district_id: Option<i64>,
    pub address: Option<String>,
    pub price: Option<f64>,
    pub area: Option<f64>,
    pub rooms: Option<i64>,
    pub floor: Option<i64>,
    pub total_floors: Option<i64>,
    pub year_built: Option<i64>,
    pub renovation_year: Option<i64>,
    pub has_balcony: Option<bool>,
    pub has_elevator: Option<bool>,
    pub has_parking: Option<bool>,
    pub image_url: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_available: Option<bool>,
    pub features: Option<Vec<i64>>,
}

impl ListingUpdate {
    /// True when no column and no feature set would change
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Usage count of a single feature among available listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeatureUsage {
    pub name: String,
    pub count: i64,
}

/// Catalog summary over available listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_listings: i64,
    /// `None` when there are no available listings
    pub average_price: Option<f64>,
    /// `None` when there are no available listings
    pub average_area: Option<f64>,
    pub by_type: BTreeMap<String, i64>,
    pub by_district: BTreeMap<String, i64>,
    pub popular_features: Vec<FeatureUsage>,
}
