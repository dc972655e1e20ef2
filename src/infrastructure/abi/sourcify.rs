//! ABI lookup in the Sourcify verification repository

use alloy_json_abi::JsonAbi;
use serde::Deserialize;
use tracing::debug;

use crate::domain::abi::{AbiSource, FetchAbiError};
use crate::infrastructure::http;

pub const SOURCIFY_REPO_URL: &str = "https://repo.sourcify.dev";

/// The part of a Sourcify `metadata.json` we need
#[derive(Debug, Deserialize)]
struct SourcifyMetadata {
    output: SourcifyOutput,
}

#[derive(Debug, Deserialize)]
struct SourcifyOutput {
    abi: JsonAbi,
}

/// Fetches ABIs of fully verified contracts from Sourcify
#[derive(Debug, Clone)]
pub struct SourcifyAbiSource {
    http: reqwest::Client,
    chain_id: u64,
    base_url: String,
}

impl SourcifyAbiSource {
    pub fn new(chain_id: u64) -> Self {
        Self {
            http: http::client(),
            chain_id,
            base_url: SOURCIFY_REPO_URL.to_string(),
        }
    }

    /// Point at a self-hosted or mirrored repository
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn metadata_url(&self, address: &str) -> String {
        format!(
            "{}/contracts/full_match/{}/{}/metadata.json",
            self.base_url, self.chain_id, address
        )
    }
}

#[async_trait::async_trait]
impl AbiSource for SourcifyAbiSource {
    async fn fetch_abi_for_address(&self, address: &str) -> Result<JsonAbi, FetchAbiError> {
        let url = self.metadata_url(address);
        debug!(%url, "querying sourcify");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| FetchAbiError::fetching(err.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchAbiError::fetching(format!(
                "Could not fetch ABI. Status: {}",
                response.status()
            )));
        }

        let metadata: SourcifyMetadata = response.json().await.map_err(|err| {
            FetchAbiError::fetching(format!("Failed to parse Sourcify metadata: {err}"))
        })?;

        Ok(metadata.output.abi)
    }

    fn name(&self) -> &str {
        "sourcify"
    }
}
