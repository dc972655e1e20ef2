use std::sync::Arc;

use alloy_primitives::U256;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use serde_json::json;
use tracing::{info, warn};

use noyolo::config::{self, AbiSourceOptions};
use noyolo::domain::chain::ChainReader;
use noyolo::infrastructure::ethereum::connect_http;
use noyolo::infrastructure::http;
use noyolo::{logging, Transaction};

/// Printed when the call body cannot be decoded
const DECODE_FAILURE: &str = "Could not decode transaction";

#[derive(Debug, Parser)]
#[command(
    name = "noyolo",
    version,
    about = "Describe an EVM transaction in human terms before you sign it"
)]
struct Args {
    /// Transaction hash, or the target address when DATA is given
    target: String,

    /// Calldata as hex
    data: Option<String>,

    /// Value in wei (decimal or 0x-prefixed hex)
    value: Option<String>,

    /// Chain to describe the transaction on
    #[arg(long)]
    chain_id: Option<u64>,

    /// HTTP JSON-RPC endpoint (e.g. http://localhost:8545)
    #[arg(long)]
    rpc: Option<String>,

    /// Block explorer API key
    #[arg(long, env = "NOYOLO_EXPLORER_API_KEY", hide_env_values = true)]
    explorer_api_key: Option<String>,

    /// Query the block explorer only when unwrapping proxies
    #[arg(long)]
    accommodate_rate_limit: bool,

    /// Sender to assume when describing an explicit call
    #[arg(long)]
    from: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (config, config_error) = match config::load() {
        Ok(config) => (config, None),
        Err(err) => (config::Config::default(), Some(err)),
    };
    logging::init(&logging::level_for_verbosity(
        args.verbose,
        config.log_level.as_deref(),
    ));
    if let Some(err) = config_error {
        warn!(error = %format!("{err:#}"), "ignoring config file");
    }

    let chain_id = args.chain_id.unwrap_or_else(|| config.chain_id());
    let rpc_url = args
        .rpc
        .clone()
        .or_else(|| config.rpc_url_for(chain_id))
        .with_context(|| format!("no RPC endpoint known for chain {chain_id}, pass --rpc"))?;
    let reader: Arc<dyn ChainReader> = Arc::new(connect_http(&rpc_url)?);
    info!(chain_id, endpoint = %reader.endpoint_name(), "connected");

    let tx = transaction_from_args(&args, reader.as_ref()).await?;

    let reader_for = |id: u64| -> Option<Arc<dyn ChainReader>> {
        if id == chain_id {
            return Some(reader.clone());
        }
        let url = config.rpc_url_for(id)?;
        match connect_http(&url) {
            Ok(reader) => Some(Arc::new(reader)),
            Err(err) => {
                warn!(chain_id = id, error = %format!("{err:#}"), "cannot connect");
                None
            }
        }
    };
    let known_proxies =
        config::resolve_known_proxies(chain_id, &config.known_proxies, reader_for).await;

    let options = AbiSourceOptions {
        chain_id,
        explorer_api_key: args
            .explorer_api_key
            .clone()
            .or_else(|| config.explorer_api_key.clone()),
        accommodate_rate_limit: args.accommodate_rate_limit || config.accommodate_rate_limit,
        known_proxies,
    };
    let abi_sources = config::abi_sources_for_chain(&options, reader.clone());
    let info_sources =
        config::address_info_sources_for_chain(chain_id, &config, &http::client()).await;

    let parser = noyolo::Parser::new(abi_sources, info_sources);
    let result = parser.parse(&tx).await;

    if args.json {
        let output = json!({
            "chainId": chain_id,
            "description": result.describe(),
            "error": result.decoded_call.as_ref().err().map(ToString::to_string),
            "addressInfo": result.address_info,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match result.describe() {
        Some(description) => println!("{description}"),
        None => println!("{DECODE_FAILURE}"),
    }
    for (address, info) in result.warnings() {
        if let Some(name) = info.label() {
            eprintln!("warning: {address} is flagged as {name}");
        }
    }
    Ok(())
}

async fn transaction_from_args(args: &Args, reader: &dyn ChainReader) -> Result<Transaction> {
    let Some(data) = &args.data else {
        return reader
            .get_transaction(&args.target)
            .await?
            .with_context(|| format!("transaction {} not found", args.target));
    };

    let value = match &args.value {
        Some(value) => value
            .trim()
            .parse::<U256>()
            .with_context(|| format!("invalid value: {value}"))?,
        None => U256::ZERO,
    };
    Ok(Transaction::new(
        args.from.clone().unwrap_or_default(),
        args.target.clone(),
        data.clone(),
        value,
    ))
}
