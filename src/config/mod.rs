//! User configuration, the network table and default source assembly

mod networks;
mod sources;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub use networks::{network, Network, ProxyReference, BUILTIN_PROXY_REFERENCES, NETWORKS};
pub use sources::{
    abi_sources_for_chain, address_info_sources_for_chain, resolve_known_proxies,
    AbiSourceOptions,
};

/// Chain used when neither the CLI nor the config file names one
pub const DEFAULT_CHAIN_ID: u64 = 42220;

/// A known proxy implementation, given either inline or by a deployed instance
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KnownProxySpec {
    /// Deployed bytecode of the proxy (hex)
    pub bytecode: Option<String>,
    /// Address of a deployed instance whose code is read at startup
    pub reference: Option<String>,
    /// Chain the reference lives on; defaults to the active chain
    pub chain_id: Option<u64>,
    /// Storage slot holding the delegate address
    pub location: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub chain_id: Option<u64>,

    pub explorer_api_key: Option<String>,

    #[serde(default)]
    pub accommodate_rate_limit: bool,

    pub log_level: Option<String>,

    /// Chain id (as a string key) to JSON-RPC URL
    #[serde(default)]
    pub rpc_urls: HashMap<String, String>,

    /// Token lists, as paths or URLs
    #[serde(default)]
    pub token_lists: Vec<String>,

    /// Curated address lists, as paths or URLs
    #[serde(default)]
    pub address_lists: Vec<String>,

    /// Address lists whose entries are flagged as warnings
    #[serde(default)]
    pub warning_lists: Vec<String>,

    #[serde(default)]
    pub known_proxies: Vec<KnownProxySpec>,
}

impl Config {
    pub fn chain_id(&self) -> u64 {
        self.chain_id.unwrap_or(DEFAULT_CHAIN_ID)
    }

    /// Configured RPC URL for `chain_id`, falling back to the network table
    pub fn rpc_url_for(&self, chain_id: u64) -> Option<String> {
        self.rpc_urls
            .get(&chain_id.to_string())
            .filter(|url| !url.trim().is_empty())
            .cloned()
            .or_else(|| network(chain_id).map(|network| network.rpc_url.to_string()))
    }
}

/// Load the config file. A missing file yields the defaults.
pub fn load() -> Result<Config> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str::<Config>(&content)
        .with_context(|| format!("parse config {}", path.display()))
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("NOYOLO_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("noyolo").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("noyolo").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "noyolo", "noyolo")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
chain_id = 1
explorer_api_key = "KEY"
accommodate_rate_limit = true
log_level = "debug"
token_lists = ["./tokens.json", "https://example.org/tokens.json"]
warning_lists = ["./scams.json"]

[rpc_urls]
1 = "http://localhost:8545"

[[known_proxies]]
reference = "0x471EcE3750Da237f93B8E339c536989b8978a438"
chain_id = 42220
location = "0x360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc"

[[known_proxies]]
bytecode = "0x6080"
location = "0x01"
"#
        )
        .unwrap();

        let config = load_from(file.path()).unwrap();
        assert_eq!(config.chain_id(), 1);
        assert_eq!(config.explorer_api_key.as_deref(), Some("KEY"));
        assert!(config.accommodate_rate_limit);
        assert_eq!(config.token_lists.len(), 2);
        assert!(config.address_lists.is_empty());
        assert_eq!(config.warning_lists, vec!["./scams.json"]);
        assert_eq!(config.known_proxies.len(), 2);
        assert_eq!(config.known_proxies[0].chain_id, Some(42220));
        assert_eq!(config.known_proxies[1].bytecode.as_deref(), Some("0x6080"));
        assert_eq!(config.rpc_url_for(1).as_deref(), Some("http://localhost:8545"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.chain_id(), DEFAULT_CHAIN_ID);
        assert!(!config.accommodate_rate_limit);
        assert_eq!(
            config.rpc_url_for(42220).as_deref(),
            Some("https://forno.celo.org")
        );
        assert!(config.rpc_url_for(5).is_none());
    }

    #[test]
    fn invalid_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "chain_id = \"not a number\"").unwrap();
        let err = load_from(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parse config"));
    }
}
