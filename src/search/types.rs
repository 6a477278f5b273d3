use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Structured search constraints.
///
/// A field left at `None` (or an empty feature set) means "no constraint",
/// never "match nothing". `Some(false)` on an amenity is an explicit
/// requirement that the listing lacks it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Minimum price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    /// Maximum price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// Minimum area in square meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_area: Option<f64>,
    /// Maximum area in square meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<i64>,
    /// Exact room count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_balcony: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_elevator: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_parking: Option<bool>,
    /// Listings carrying at least one of these features match
    #[serde(
        skip_serializing_if = "BTreeSet::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub features: BTreeSet<i64>,
}

impl FilterCriteria {
    /// True when no constraint is set at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeSet<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeSet<i64>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A window over an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn first(size: i64) -> Self {
        Self {
            limit: size.max(0),
            offset: 0,
        }
    }

    /// The `number`-th page (one-based) of `size` results
    pub fn nth(size: i64, number: i64) -> Self {
        let first = Self::first(size);
        Self {
            offset: first.limit.saturating_mul(number.max(1) - 1),
            ..first
        }
    }

    pub fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            ..self
        }
    }

    /// Step back one page, stopping at the first one
    pub fn previous(self) -> Self {
        Self {
            offset: (self.offset - self.limit).max(0),
            ..self
        }
    }

    /// One-based page number
    pub fn number(self) -> i64 {
        if self.limit == 0 {
            1
        } else {
            self.offset / self.limit + 1
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_is_empty() {
        assert!(FilterCriteria::default().is_empty());

        let filters = FilterCriteria {
            has_parking: Some(false),
            ..Default::default()
        };
        assert!(!filters.is_empty());
    }

    #[test]
    fn test_criteria_from_sparse_json() {
        let filters: FilterCriteria =
            serde_json::from_str(r#"{"type_id": 1, "max_price": 100000, "features": null}"#)
                .unwrap();

        assert_eq!(filters.type_id, Some(1));
        assert_eq!(filters.max_price, Some(100000.0));
        assert!(filters.features.is_empty());
        assert_eq!(filters.rooms, None);
    }

    #[test]
    fn test_unset_fields_are_not_serialized() {
        let filters = FilterCriteria {
            rooms: Some(2),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&filters).unwrap(), r#"{"rooms":2}"#);
    }

    #[test]
    fn test_page_navigation() {
        let page = Page::first(5);
        assert_eq!(page.number(), 1);

        let second = page.next();
        assert_eq!(second, Page { limit: 5, offset: 5 });
        assert_eq!(second.number(), 2);

        assert_eq!(second.previous(), page);
        assert_eq!(page.previous(), page);

        assert_eq!(Page::nth(5, 3), Page { limit: 5, offset: 10 });
        assert_eq!(Page::nth(5, 0), page);
    }

    #[test]
    fn test_huge_page_numbers_saturate() {
        let far = Page::nth(5, i64::MAX);
        assert_eq!(far, Page { limit: 5, offset: i64::MAX });
        assert_eq!(far.next(), far);
    }
}
