//! Setup-time loading of token and address lists
//!
//! Lists live either on disk or behind a URL. Loading happens once when the
//! sources are assembled; a list that cannot be loaded is a setup error the
//! caller decides how to handle.

use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::domain::address_info::{AddressList, TokenList};

#[derive(Debug, Error)]
pub enum ListLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to download {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid list at {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where a list is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLocation {
    File(PathBuf),
    Url(String),
}

impl ListLocation {
    /// `http(s)://` strings are URLs, everything else is a path
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for ListLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

pub async fn load_token_list(
    http: &reqwest::Client,
    location: &ListLocation,
) -> Result<TokenList, ListLoadError> {
    let list: TokenList = load_json(http, location).await?;
    debug!(%location, tokens = list.tokens.len(), "loaded token list");
    Ok(list)
}

pub async fn load_address_list(
    http: &reqwest::Client,
    location: &ListLocation,
) -> Result<AddressList, ListLoadError> {
    let list: AddressList = load_json(http, location).await?;
    debug!(%location, addresses = list.addresses.len(), "loaded address list");
    Ok(list)
}

async fn load_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    location: &ListLocation,
) -> Result<T, ListLoadError> {
    let body = match location {
        ListLocation::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| ListLoadError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        ListLocation::Url(url) => {
            let http_err = |source| ListLoadError::Http {
                url: url.clone(),
                source,
            };
            http.get(url)
                .send()
                .await
                .and_then(|response| response.error_for_status())
                .map_err(http_err)?
                .bytes()
                .await
                .map_err(http_err)?
                .to_vec()
        }
    };

    serde_json::from_slice(&body).map_err(|source| ListLoadError::Parse {
        location: location.to_string(),
        source,
    })
}
