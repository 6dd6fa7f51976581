use thiserror::Error;
use url::Url;

pub const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("URL cannot be empty")]
    Empty,

    #[error("URL '{url}' exceeds maximum length of {max} bytes")]
    TooLong { url: String, max: usize },

    #[error("invalid URL '{url}': {reason}")]
    Parse { url: String, reason: String },

    #[error("invalid scheme '{scheme}' in '{url}', only 'http' and 'https' are allowed")]
    Scheme { url: String, scheme: String },

    #[error("URL '{url}' must have a host")]
    MissingHost { url: String },

    #[error("credentials in URL '{url}' are not allowed")]
    Credentials { url: String },
}

/// An absolute http(s) URL with a host and no embedded credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedUrl {
    url: Url,
}

impl ValidatedUrl {
    pub fn new(url: impl Into<String>) -> Result<Self, UrlError> {
        let url = url.into();
        let trimmed = url.trim();

        if trimmed.is_empty() {
            return Err(UrlError::Empty);
        }

        if trimmed.len() > MAX_URL_LENGTH {
            return Err(UrlError::TooLong {
                url: truncate_url(trimmed),
                max: MAX_URL_LENGTH,
            });
        }

        let parsed = Url::parse(trimmed).map_err(|e| UrlError::Parse {
            url: truncate_url(trimmed),
            reason: e.to_string(),
        })?;

        Self::from_url(parsed)
    }

    pub fn from_url(parsed: Url) -> Result<Self, UrlError> {
        let scheme = parsed.scheme().to_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(UrlError::Scheme {
                url: truncate_url(parsed.as_str()),
                scheme,
            });
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(UrlError::MissingHost {
                url: truncate_url(parsed.as_str()),
            });
        }

        if !parsed.username().is_empty() || parsed.password().is_some() {
            return Err(UrlError::Credentials {
                url: truncate_url(parsed.as_str()),
            });
        }

        Ok(Self { url: parsed })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn into_url(self) -> Url {
        self.url
    }
}

impl std::fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn truncate_url(url: &str) -> String {
    if url.len() <= 100 {
        url.to_string()
    } else {
        let cut = (0..=100).rev().find(|i| url.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &url[..cut])
    }
}
