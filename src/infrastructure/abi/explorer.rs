//! ABI lookup through an Etherscan-compatible block explorer API

use alloy_json_abi::JsonAbi;
use serde::Deserialize;
use tracing::debug;

use crate::domain::abi::{AbiSource, FetchAbiError};
use crate::infrastructure::http;

/// `{status, message, result}` envelope returned by every explorer endpoint
#[derive(Debug, Deserialize)]
struct ExplorerEnvelope {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Option<serde_json::Value>,
}

impl ExplorerEnvelope {
    fn is_ok(&self) -> bool {
        self.status == "1"
    }

    /// Explorers put the reason in `result` or `message` depending on the error
    fn error_detail(&self) -> String {
        match &self.result {
            Some(serde_json::Value::String(result)) if !result.is_empty() => result.clone(),
            _ => self.message.clone().unwrap_or_default(),
        }
    }
}

/// Fetches verified ABIs via `module=contract&action=getabi`
#[derive(Debug, Clone)]
pub struct ExplorerAbiSource {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ExplorerAbiSource {
    /// `base_url` is the explorer API root, without the trailing `/api`
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: http::client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn with_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn query<'a>(&'a self, address: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut query = vec![
            ("module", "contract"),
            ("action", "getabi"),
            ("address", address),
        ];
        if let Some(key) = &self.api_key {
            query.push(("apikey", key.as_str()));
        }
        query
    }
}

#[async_trait::async_trait]
impl AbiSource for ExplorerAbiSource {
    async fn fetch_abi_for_address(&self, address: &str) -> Result<JsonAbi, FetchAbiError> {
        let url = format!("{}/api", self.base_url);
        debug!(%url, address, "querying explorer");

        let response = self
            .http
            .get(&url)
            .query(&self.query(address))
            .send()
            .await
            .map_err(|err| FetchAbiError::fetching(err.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchAbiError::fetching(format!(
                "Could not fetch ABI. Status: {}",
                response.status()
            )));
        }

        let envelope: ExplorerEnvelope = response.json().await.map_err(|err| {
            FetchAbiError::fetching(format!("Invalid response from {}: {err}", self.base_url))
        })?;

        if !envelope.is_ok() {
            return Err(FetchAbiError::fetching(format!(
                "Error from {}: {}",
                self.base_url,
                envelope.error_detail()
            )));
        }

        match envelope.result {
            Some(serde_json::Value::String(abi)) => serde_json::from_str(&abi).map_err(|err| {
                FetchAbiError::fetching(format!("Invalid ABI from {}: {err}", self.base_url))
            }),
            _ => Err(FetchAbiError::fetching(format!(
                "Missing ABI in response from {}",
                self.base_url
            ))),
        }
    }

    fn name(&self) -> &str {
        "explorer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_is_only_sent_when_set() {
        let without = ExplorerAbiSource::new("https://api.polygonscan.com", None);
        assert!(!without.query("0x01").iter().any(|(k, _)| *k == "apikey"));

        let blank = ExplorerAbiSource::new("https://api.polygonscan.com", Some("  ".into()));
        assert!(!blank.query("0x01").iter().any(|(k, _)| *k == "apikey"));

        let with = ExplorerAbiSource::new("https://api.polygonscan.com/", Some("KEY".into()));
        assert!(with.query("0x01").contains(&("apikey", "KEY")));
        assert_eq!(with.base_url(), "https://api.polygonscan.com");
    }

    #[test]
    fn error_detail_prefers_result_over_message() {
        let envelope: ExplorerEnvelope = serde_json::from_str(
            r#"{"status": "0", "message": "NOTOK", "result": "Contract source code not verified"}"#,
        )
        .unwrap();
        assert!(!envelope.is_ok());
        assert_eq!(envelope.error_detail(), "Contract source code not verified");

        let envelope: ExplorerEnvelope =
            serde_json::from_str(r#"{"status": "0", "message": "NOTOK", "result": ""}"#).unwrap();
        assert_eq!(envelope.error_detail(), "NOTOK");
    }
}
