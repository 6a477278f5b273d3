use crate::error::Result;
use crate::models::{District, Feature};
use crate::search::FilterCriteria;
use crate::store::Store;
use crate::translate::traits::QueryTranslator;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Type words in priority order; the first one found decides the type.
/// Ids match the seeded `property_types` table.
const TYPE_KEYWORDS: &[(&str, i64)] = &[
    ("apartment", 1),
    ("flat", 1),
    ("квартир", 1),
    ("house", 2),
    ("дом", 2),
    ("studio", 3),
    ("студи", 3),
];

/// Appended to a digit 1..=9 to recognise a room count
const ROOM_SUFFIXES: &[&str] = &["-room", " room", "-комнатн", " комнат"];

const BALCONY_STEMS: &[&str] = &["balcon", "балкон"];
const ELEVATOR_STEMS: &[&str] = &["elevator", "lift", "лифт"];
const PARKING_STEMS: &[&str] = &["parking", "парковк", "паркинг"];

// Price patterns capture an optional area keyword in front so that
// "area to 80" is never read as a price bound.
static MIN_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?P<area>\b(?:area|площадь)\s+)?\b(?:from|от)\s+(?P<value>\d+)")
        .expect("min price pattern")
});
static MAX_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?P<area>\b(?:area|площадь)\s+)?\b(?:to|до)\s+(?P<value>\d+)")
        .expect("max price pattern")
});
static MIN_AREA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:area|площадь)\s+(?:from|от)\s+(?P<value>\d+)").expect("min area pattern")
});
static MAX_AREA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:area|площадь)\s+(?:to|до)\s+(?P<value>\d+)").expect("max area pattern")
});

/// Known district and feature names the translator can recognise
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    pub districts: Vec<District>,
    pub features: Vec<Feature>,
}

/// Keyword and pattern heuristics standing in for real language
/// understanding
#[derive(Debug, Clone)]
pub struct KeywordTranslator {
    vocabulary: Vocabulary,
}

impl KeywordTranslator {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Load district and feature names from the store. Districts are
    /// matched in id order, independent of popularity.
    pub async fn from_store(store: &Store) -> Result<Self> {
        let mut districts = store.districts().await?;
        districts.sort_by_key(|d| d.id);

        let vocabulary = Vocabulary {
            districts,
            features: store.features().await?,
        };
        debug!(
            "Keyword translator knows {} districts and {} features",
            vocabulary.districts.len(),
            vocabulary.features.len()
        );
        Ok(Self::new(vocabulary))
    }

    /// Deterministic extraction; see [`QueryTranslator::translate`]
    pub fn extract(&self, text: &str) -> FilterCriteria {
        let lowered = text.to_lowercase();

        let type_id = TYPE_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|&(_, id)| id);

        let district_id = self
            .vocabulary
            .districts
            .iter()
            .find(|d| mentions(&lowered, &d.name))
            .map(|d| d.id);

        let rooms = (1..=9i64).find(|n| {
            ROOM_SUFFIXES
                .iter()
                .any(|suffix| lowered.contains(&format!("{n}{suffix}")))
        });

        let features = self
            .vocabulary
            .features
            .iter()
            .filter(|f| mentions(&lowered, &f.name))
            .map(|f| f.id)
            .collect();

        let filters = FilterCriteria {
            min_price: capture_number(&MIN_PRICE, &lowered),
            max_price: capture_number(&MAX_PRICE, &lowered),
            min_area: capture_number(&MIN_AREA, &lowered),
            max_area: capture_number(&MAX_AREA, &lowered),
            district_id,
            type_id,
            rooms,
            has_balcony: contains_any(&lowered, BALCONY_STEMS).then_some(true),
            has_elevator: contains_any(&lowered, ELEVATOR_STEMS).then_some(true),
            has_parking: contains_any(&lowered, PARKING_STEMS).then_some(true),
            features,
        };

        debug!(?filters, "Extracted filters from query text");
        filters
    }
}

#[async_trait]
impl QueryTranslator for KeywordTranslator {
    async fn translate(&self, text: &str) -> FilterCriteria {
        self.extract(text)
    }

    fn name(&self) -> &'static str {
        "keywords"
    }
}

fn mentions(lowered: &str, name: &str) -> bool {
    let name = name.trim().to_lowercase();
    !name.is_empty() && lowered.contains(&name)
}

fn contains_any(lowered: &str, stems: &[&str]) -> bool {
    stems.iter().any(|stem| lowered.contains(stem))
}

/// First match not preceded by an area keyword. Numbers that do not fit
/// are dropped for this field only.
fn capture_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures_iter(text)
        .find(|caps| caps.name("area").is_none())
        .and_then(|caps| caps.name("value"))
        .and_then(|value| value.as_str().parse::<i64>().ok())
        .map(|value| value as f64)
}
