//! Frontend configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::http::DEFAULT_API_BASE_URL;

/// Errors raised while resolving configured values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The base URL does not parse.
    #[error("invalid customer service base URL '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
    /// The base URL parses but cannot carry request paths.
    #[error("customer service base URL '{value}' must be an http(s) URL")]
    UnsupportedBaseUrl { value: String },
}

/// Configuration values for the customer frontend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CUSTOMER_FRONTEND")]
pub struct FrontendSettings {
    /// Customer service base URL.
    pub api_base_url: Option<String>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl FrontendSettings {
    /// Resolve the base URL, preferring `override_url`, then the configured
    /// value, then the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the chosen value is not an http(s) URL.
    pub fn api_base_url(&self, override_url: Option<&str>) -> Result<Url, SettingsError> {
        let raw = override_url
            .or(self.api_base_url.as_deref())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim();
        parse_base_url(raw)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, SettingsError> {
    let url = Url::parse(raw).map_err(|source| SettingsError::InvalidBaseUrl {
        value: raw.to_owned(),
        source,
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(SettingsError::UnsupportedBaseUrl {
            value: raw.to_owned(),
        });
    }
    Ok(url)
}
