pub mod keyword;
pub mod remote;
pub mod traits;

pub use keyword::{KeywordTranslator, Vocabulary};
pub use remote::RemoteTranslator;
pub use traits::QueryTranslator;
