//! Console configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::{PageSize, PageSizeError};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3002";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Invalid console configuration values.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The API URL does not parse.
    #[error("invalid api_url {url:?}: {source}")]
    ApiUrl {
        /// Raw configured value.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The page size is zero or not a number.
    #[error("invalid page_size: {0}")]
    PageSize(#[from] PageSizeError),
}

/// Configuration values for the catalog console.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct ConsoleSettings {
    /// Base URL of the catalog REST backend.
    pub api_url: Option<String>,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Rows per page when listing.
    pub page_size: Option<usize>,
    /// Quiet period before an identifier is verified, in milliseconds.
    #[ortho_config(default = 300)]
    pub debounce_ms: u64,
}

impl ConsoleSettings {
    /// Return the backend base URL, falling back to the local default.
    ///
    /// # Errors
    /// Returns [`SettingsError::ApiUrl`] when the value does not parse.
    pub fn api_url(&self) -> Result<Url, SettingsError> {
        let raw = self.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        Url::parse(raw).map_err(|source| SettingsError::ApiUrl {
            url: raw.to_owned(),
            source,
        })
    }

    /// Return the request timeout, falling back to ten seconds.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_ms
            .map_or(DEFAULT_REQUEST_TIMEOUT, Duration::from_millis)
    }

    /// Return the list page size, falling back to the default.
    ///
    /// # Errors
    /// Returns [`SettingsError::PageSize`] when the value is zero.
    pub fn page_size(&self) -> Result<PageSize, SettingsError> {
        Ok(self
            .page_size
            .map(PageSize::new)
            .transpose()?
            .unwrap_or_default())
    }

    /// Return the identifier check debounce.
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
