pub mod enrich;
pub mod stats;

pub use enrich::enrich;
pub use stats::Aggregator;
