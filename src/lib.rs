//! Conversational search over a real-estate listing catalog.
//!
//! Free text goes through a [`QueryTranslator`] into [`FilterCriteria`],
//! the [`SearchEngine`] runs a bounded, paginated lookup against the
//! [`Store`], and the [`Aggregator`] enriches rows and summarises the
//! catalog.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod finder;
pub mod models;
pub mod search;
pub mod store;
pub mod transfer;
pub mod translate;

pub use aggregate::Aggregator;
pub use config::Config;
pub use error::{CatalogError, Result};
pub use finder::{ListingFinder, Reply};
pub use search::{FilterCriteria, Page, SearchEngine};
pub use store::Store;
pub use translate::{KeywordTranslator, QueryTranslator, RemoteTranslator, Vocabulary};
