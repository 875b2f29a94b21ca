//! Content API configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Settings for the episode content API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the content API
    pub base_url: String,

    /// How many episodes one feed read requests
    pub page_limit: usize,

    /// Seconds before the cached feed is considered stale
    pub refresh_interval_secs: u64,

    /// BCP 47 tag for publish-date display, e.g. "pt-BR"
    pub locale: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333".to_string(),
            page_limit: 12,
            // One day, the source feed's own revalidation window
            refresh_interval_secs: 60 * 60 * 24,
            locale: "pt-BR".to_string(),
        }
    }
}

impl ConfigSection for ApiConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = Vec::new();

        results.push(Validator::not_empty(&self.base_url, "api.base_url"));
        if !self.base_url.trim().is_empty()
            && !self.base_url.starts_with("http://")
            && !self.base_url.starts_with("https://")
        {
            results.push(Err(ValidationError::with_value(
                "api.base_url",
                "must start with http:// or https://",
                &self.base_url,
            )));
        }

        results.push(Validator::in_range(self.page_limit, 1, 100, "api.page_limit"));
        results.push(Validator::in_range(
            self.refresh_interval_secs,
            60,
            60 * 60 * 24 * 7,
            "api.refresh_interval_secs",
        ));
        results.push(Validator::not_empty(&self.locale, "api.locale"));

        Validator::collect_errors(results)
    }

    fn section_name(&self) -> &'static str {
        "api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ApiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let mut config = ApiConfig::default();
        config.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let mut config = ApiConfig::default();
        config.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_page_limit_bounds() {
        let mut config = ApiConfig::default();
        config.page_limit = 0;
        assert!(config.validate().is_err());

        config.page_limit = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_refresh_interval_bounds() {
        let mut config = ApiConfig::default();
        config.refresh_interval_secs = 10;
        assert!(config.validate().is_err());
    }
}
