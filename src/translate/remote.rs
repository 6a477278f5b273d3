use crate::error::{CatalogError, Result};
use crate::search::FilterCriteria;
use crate::translate::traits::QueryTranslator;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a FilterCriteria>,
}

/// Delegates translation to an external text-understanding service.
///
/// The service receives `{"text": ..., "context": ...}` and answers with a
/// FilterCriteria-shaped JSON object. Failures and timeouts degrade to
/// empty criteria.
pub struct RemoteTranslator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl RemoteTranslator {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("housing-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::ExternalService(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            timeout,
        })
    }

    async fn request(&self, text: &str, context: Option<&FilterCriteria>) -> Result<FilterCriteria> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&TranslateRequest { text, context });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!("Calling text-understanding service at {}", self.endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::ExternalService(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(CatalogError::ExternalService(format!(
                "service returned status {}",
                response.status()
            )));
        }

        response
            .json::<FilterCriteria>()
            .await
            .map_err(|e| CatalogError::ExternalService(format!("undecodable response: {}", e)))
    }

    async fn translate_or_empty(&self, text: &str, context: Option<&FilterCriteria>) -> FilterCriteria {
        match tokio::time::timeout(self.timeout, self.request(text, context)).await {
            Ok(Ok(filters)) => filters,
            Ok(Err(e)) => {
                warn!("Text-understanding service failed, using no constraints: {}", e);
                FilterCriteria::default()
            }
            Err(_) => {
                warn!(
                    "Text-understanding service timed out after {:?}, using no constraints",
                    self.timeout
                );
                FilterCriteria::default()
            }
        }
    }
}

#[async_trait]
impl QueryTranslator for RemoteTranslator {
    async fn translate(&self, text: &str) -> FilterCriteria {
        self.translate_or_empty(text, None).await
    }

    async fn translate_in_context(&self, text: &str, prior: &FilterCriteria) -> FilterCriteria {
        let context = (!prior.is_empty()).then_some(prior);
        self.translate_or_empty(text, context).await
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
