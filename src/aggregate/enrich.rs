use crate::error::Result;
use crate::models::{District, Feature, Listing, ListingDetails, PropertyType};
use sqlx::SqliteConnection;

/// Attach features, type and district to a listing row.
///
/// Runs three bounded lookups on the given connection, so it can be used
/// inside an open transaction.
pub async fn enrich(conn: &mut SqliteConnection, listing: Listing) -> Result<ListingDetails> {
    let features = sqlx::query_as::<_, Feature>(
        r#"
        SELECT f.id, f.name
        FROM features f
        JOIN listing_features lf ON lf.feature_id = f.id
        WHERE lf.listing_id = ?
        ORDER BY f.id
        "#,
    )
    .bind(listing.id)
    .fetch_all(&mut *conn)
    .await?;

    let property_type =
        sqlx::query_as::<_, PropertyType>("SELECT id, name FROM property_types WHERE id = ?")
            .bind(listing.type_id)
            .fetch_one(&mut *conn)
            .await?;

    let district =
        sqlx::query_as::<_, District>("SELECT id, name, popularity FROM districts WHERE id = ?")
            .bind(listing.district_id)
            .fetch_one(&mut *conn)
            .await?;

    Ok(ListingDetails {
        listing,
        features,
        property_type,
        district,
    })
}
