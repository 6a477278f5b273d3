pub mod engine;
pub mod predicate;
pub mod types;

pub use engine::SearchEngine;
pub use predicate::Predicate;
pub use types::{FilterCriteria, Page};
