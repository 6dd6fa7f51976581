use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::capabilities::http::{UrlError, ValidatedUrl};

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2/";
pub const DEFAULT_IMAGE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid api_base_url: {0}")]
    ApiBaseUrl(#[source] UrlError),

    #[error("invalid image_base_url: {0}")]
    ImageBaseUrl(#[source] UrlError),

    #[error("page_size must be between 1 and {max}, got {value}")]
    PageSize { value: u32, max: u32 },
}

/// Shell-supplied catalog settings. Unvalidated until `validate` succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub api_base_url: String,
    pub image_base_url: String,
    pub page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::PageSize {
                value: self.page_size,
                max: MAX_PAGE_SIZE,
            });
        }

        let api_base = ValidatedUrl::new(with_trailing_slash(&self.api_base_url))
            .map_err(ConfigError::ApiBaseUrl)?;
        let image_base = ValidatedUrl::new(with_trailing_slash(&self.image_base_url))
            .map_err(ConfigError::ImageBaseUrl)?;

        Ok(ValidatedConfig {
            api_base: api_base.into_url(),
            image_base: image_base.into_url(),
            page_size: self.page_size,
        })
    }
}

/// Configuration the core actually runs with. Both base URLs end in `/`,
/// so relative joins never drop the last path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    api_base: Url,
    image_base: Url,
    page_size: u32,
}

impl ValidatedConfig {
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn image_base(&self) -> &Url {
        &self.image_base
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// `<image-base><id>.png`
    pub fn image_url(&self, id: u32) -> String {
        format!("{}{id}.png", self.image_base.as_str())
    }
}

fn with_trailing_slash(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}
