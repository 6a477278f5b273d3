use crate::models::ListingDetails;
use crate::search::{FilterCriteria, Page, SearchEngine};
use crate::translate::QueryTranslator;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{error, info};

const APOLOGY: &str = "Sorry, something went wrong while processing your request.\n\
                       Please try again, or use the menu to search by district, type or features.";

/// What the user gets back for a query
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Listings {
        query: Option<String>,
        filters: FilterCriteria,
        page: Page,
        listings: Vec<ListingDetails>,
    },
    NothingFound {
        query: Option<String>,
    },
    /// Something failed internally; the details stay in the logs
    Unavailable,
}

impl Reply {
    pub fn listings(&self) -> &[ListingDetails] {
        match self {
            Reply::Listings { listings, .. } => listings,
            _ => &[],
        }
    }

    /// Plain-text message for the user
    pub fn message(&self) -> String {
        match self {
            Reply::Listings {
                query,
                page,
                listings,
                ..
            } => {
                let mut out = match query {
                    Some(q) => format!("Results for \"{}\" (page {}):\n", q, page.number()),
                    None => format!("Results (page {}):\n", page.number()),
                };
                for (i, details) in listings.iter().enumerate() {
                    let listing = &details.listing;
                    let _ = writeln!(
                        out,
                        "{}. {} ({:.0})",
                        page.offset + i as i64 + 1,
                        listing.title,
                        listing.price
                    );
                    let rooms = listing
                        .rooms
                        .map(|r| format!("{} rooms, ", r))
                        .unwrap_or_default();
                    let _ = writeln!(
                        out,
                        "   {}{} m², {}, {}",
                        rooms, listing.area, details.property_type.name, details.district.name
                    );
                    if !details.features.is_empty() {
                        let names: Vec<&str> =
                            details.features.iter().map(|f| f.name.as_str()).collect();
                        let _ = writeln!(out, "   Features: {}", names.join(", "));
                    }
                }
                out
            }
            Reply::NothingFound { query: Some(q) } => format!(
                "Nothing matched \"{}\".\nTry changing the search criteria or rephrasing the request.",
                q
            ),
            Reply::NothingFound { query: None } => {
                "Nothing matched these filters.\nTry changing the search criteria.".to_string()
            }
            Reply::Unavailable => APOLOGY.to_string(),
        }
    }
}

/// Text in, reply out: translation, search and failure handling in one
/// place
pub struct ListingFinder {
    translator: Arc<dyn QueryTranslator>,
    engine: SearchEngine,
    page_size: i64,
}

impl ListingFinder {
    pub fn new(translator: Arc<dyn QueryTranslator>, engine: SearchEngine, page_size: i64) -> Self {
        Self {
            translator,
            engine,
            page_size,
        }
    }

    /// Answer a free-text request with the first page of matches
    pub async fn respond(&self, text: &str) -> Reply {
        self.respond_page(text, Page::first(self.page_size)).await
    }

    pub async fn respond_page(&self, text: &str, page: Page) -> Reply {
        let filters = self.translator.translate(text).await;
        info!(translator = self.translator.name(), ?filters, "Translated query");
        self.run(Some(text.to_string()), filters, page).await
    }

    /// Follow-up request, translated with the previous criteria as context
    pub async fn refine(&self, text: &str, prior: &FilterCriteria) -> Reply {
        let filters = self.translator.translate_in_context(text, prior).await;
        info!(translator = self.translator.name(), ?filters, "Translated follow-up query");
        self.run(Some(text.to_string()), filters, Page::first(self.page_size))
            .await
    }

    /// Menu-driven search, or another page of an earlier one
    pub async fn browse(&self, filters: FilterCriteria, page: Page) -> Reply {
        self.run(None, filters, page).await
    }

    async fn run(&self, query: Option<String>, filters: FilterCriteria, page: Page) -> Reply {
        match self.engine.search_page(&filters, page).await {
            Ok(listings) if listings.is_empty() => Reply::NothingFound { query },
            Ok(listings) => Reply::Listings {
                query,
                filters,
                page,
                listings,
            },
            Err(e) => {
                error!("Listing search failed: {}", e);
                Reply::Unavailable
            }
        }
    }
}
