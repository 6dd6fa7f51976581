//! Catalog fetcher: request construction for the remote Pokémon catalog and
//! the conversion of every transport outcome into a [`FetchOutcome`].
//!
//! The core never performs I/O itself. Requests go out through the shell's
//! HTTP capability and come back as events; [`into_outcome`] is the single
//! boundary where transport, status and decoding failures collapse into
//! `FetchOutcome::Error`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::capabilities::AppHttp;
use crate::config::{ConfigError, ValidatedConfig};
use crate::detail::PokemonDetail;
use crate::event::Event;

/// Prefix of every user-visible fetch error.
pub const ERROR_PREFIX: &str = "Some Error Occurred: ";

/// Tagged result of a fetch. The only error contract the view layer sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum FetchOutcome<T> {
    InProgress,
    Success(T),
    Error(String),
}

impl<T> FetchOutcome<T> {
    pub fn from_error(error: &CatalogError) -> Self {
        Self::Error(error.user_message())
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            Self::InProgress => FetchOutcome::InProgress,
            Self::Success(data) => FetchOutcome::Success(f(data)),
            Self::Error(message) => FetchOutcome::Error(message),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{0}")]
    Transport(String),

    #[error("HTTP error {status}")]
    Status { status: u16 },

    #[error("response body was empty")]
    EmptyBody,

    #[error("no numeric id in entry url '{url}'")]
    MissingId { url: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl CatalogError {
    /// The message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        format!("{ERROR_PREFIX}{self}")
    }
}

/// Correlates a response with the request that is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One entry of a catalog page, as sent by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(rename = "url")]
    pub source_url: String,
}

/// One fetched page: `{ "count": .., "results": [..] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    #[serde(rename = "results")]
    pub items: Vec<CatalogEntry>,
    #[serde(rename = "count")]
    pub total_count: u32,
}

pub type PageResponse = crux_http::Result<crux_http::Response<PageResult>>;
pub type DetailResponse = crux_http::Result<crux_http::Response<PokemonDetail>>;

pub fn page_url(config: &ValidatedConfig, limit: u32, offset: u32) -> Result<String, CatalogError> {
    if limit == 0 {
        return Err(CatalogError::InvalidRequest {
            reason: "limit must be greater than zero".into(),
        });
    }

    let mut url = config
        .api_base()
        .join("pokemon")
        .map_err(|e| CatalogError::InvalidRequest {
            reason: e.to_string(),
        })?;
    url.query_pairs_mut()
        .append_pair("limit", &limit.to_string())
        .append_pair("offset", &offset.to_string());

    Ok(url.into())
}

/// Detail lookups are keyed by the lower-cased, trimmed name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn detail_url(config: &ValidatedConfig, name: &str) -> Result<String, CatalogError> {
    let name = normalize_name(name);
    if name.is_empty() {
        return Err(CatalogError::InvalidRequest {
            reason: "name must not be empty".into(),
        });
    }

    let mut url = config.api_base().clone();
    url.path_segments_mut()
        .map_err(|()| CatalogError::InvalidRequest {
            reason: "api base url cannot have path segments".into(),
        })?
        .pop_if_empty()
        .push("pokemon")
        .push(&name);

    Ok(url.into())
}

/// `fetchPage`: issues a single page request. Argument errors are returned
/// before anything reaches the network.
pub fn fetch_page<F>(
    http: &AppHttp,
    config: &ValidatedConfig,
    limit: u32,
    offset: u32,
    make_event: F,
) -> Result<(), CatalogError>
where
    F: FnOnce(PageResponse) -> Event + Send + 'static,
{
    let url = page_url(config, limit, offset)?;
    tracing::debug!(url = url.as_str(), limit, offset, "requesting catalog page");
    http.get(url).expect_json::<PageResult>().send(make_event);
    Ok(())
}

/// `fetchDetail`: same contract as [`fetch_page`].
pub fn fetch_detail<F>(
    http: &AppHttp,
    config: &ValidatedConfig,
    name: &str,
    make_event: F,
) -> Result<(), CatalogError>
where
    F: FnOnce(DetailResponse) -> Event + Send + 'static,
{
    let url = detail_url(config, name)?;
    tracing::debug!(url = url.as_str(), "requesting catalog detail");
    http.get(url).expect_json::<PokemonDetail>().send(make_event);
    Ok(())
}

/// Collapses a transport result into a [`FetchOutcome`]. Never panics.
pub fn into_outcome<T>(result: crux_http::Result<crux_http::Response<T>>) -> FetchOutcome<T> {
    let mut response = match result {
        Ok(response) => response,
        Err(e) => return FetchOutcome::from_error(&CatalogError::Transport(e.to_string())),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::from_error(&CatalogError::Status {
            status: status.into(),
        });
    }

    match response.take_body() {
        Some(body) => FetchOutcome::Success(body),
        None => FetchOutcome::from_error(&CatalogError::EmptyBody),
    }
}
