/// Catalog tables. Every statement is idempotent.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS property_types (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS districts (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    popularity INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS features (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS listings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    type_id INTEGER NOT NULL REFERENCES property_types(id),
    district_id INTEGER NOT NULL REFERENCES districts(id),
    address TEXT,
    price REAL NOT NULL,
    area REAL NOT NULL,
    rooms INTEGER,
    floor INTEGER,
    total_floors INTEGER,
    year_built INTEGER,
    renovation_year INTEGER,
    has_balcony BOOLEAN NOT NULL DEFAULT 0,
    has_elevator BOOLEAN NOT NULL DEFAULT 0,
    has_parking BOOLEAN NOT NULL DEFAULT 0,
    image_url TEXT,
    contact_phone TEXT,
    contact_name TEXT,
    latitude REAL,
    longitude REAL,
    is_available BOOLEAN NOT NULL DEFAULT 1,
    views_count INTEGER NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL
);

CREATE TABLE IF NOT EXISTS listing_features (
    listing_id INTEGER NOT NULL REFERENCES listings(id),
    feature_id INTEGER NOT NULL REFERENCES features(id),
    PRIMARY KEY (listing_id, feature_id)
);

CREATE INDEX IF NOT EXISTS idx_listings_available_created
    ON listings (is_available, created_at DESC, id DESC);

CREATE INDEX IF NOT EXISTS idx_listing_features_feature
    ON listing_features (feature_id)
"#;

/// Default property types. Ids are stable because the keyword translator
/// maps type words onto them.
pub const PROPERTY_TYPES: &[(i64, &str)] = &[(1, "apartment"), (2, "house"), (3, "studio")];

pub const DISTRICTS: &[(i64, &str, i64)] = &[
    (1, "Central", 10),
    (2, "Riverside", 8),
    (3, "Old Town", 7),
    (4, "Northgate", 5),
    (5, "Lakeshore", 4),
];

pub const FEATURES: &[(i64, &str)] = &[
    (1, "pool"),
    (2, "garden"),
    (3, "fireplace"),
    (4, "sauna"),
    (5, "garage"),
    (6, "sea view"),
];
