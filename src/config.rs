use crate::error::{CatalogError, Result};
use dotenv::dotenv;
use std::env;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://real_estate.db";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PAGE_SIZE: i64 = 5;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Text-understanding endpoint; keyword heuristics are used when unset
    pub ai_api_url: Option<String>,
    pub ai_api_key: Option<String>,
    pub ai_timeout: Duration,
    pub page_size: i64,
}

impl Config {
    /// Read the environment, after loading `.env` if present
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let ai_timeout_secs = match non_empty("AI_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| CatalogError::Config(format!("AI_TIMEOUT_SECS is not a number: {}", raw)))?,
            None => DEFAULT_AI_TIMEOUT_SECS,
        };

        let page_size = match non_empty("PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(CatalogError::Config(format!(
                        "PAGE_SIZE must be a positive number: {}",
                        raw
                    )))
                }
            },
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            database_url: non_empty("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            ai_api_url: non_empty("AI_API_URL"),
            ai_api_key: non_empty("AI_API_KEY"),
            ai_timeout: Duration::from_secs(ai_timeout_secs),
            page_size,
        })
    }
}
