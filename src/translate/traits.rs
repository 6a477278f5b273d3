use crate::search::FilterCriteria;
use async_trait::async_trait;

/// Common trait for everything that turns user text into filters.
/// Lets the keyword heuristics be swapped for an external
/// text-understanding service without touching search or statistics.
#[async_trait]
pub trait QueryTranslator: Send + Sync {
    /// Extract filter criteria from free text.
    ///
    /// Never fails: whatever is not understood stays unset, and a broken
    /// backend yields empty criteria.
    async fn translate(&self, text: &str) -> FilterCriteria;

    /// Like [`translate`](Self::translate), with the criteria of the
    /// user's previous request as context
    async fn translate_in_context(&self, text: &str, _prior: &FilterCriteria) -> FilterCriteria {
        self.translate(text).await
    }

    /// Get the name of the translator backend
    fn name(&self) -> &'static str;
}
