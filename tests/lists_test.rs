//! Token and address lists served over HTTP

mod common;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use alloy_primitives::U256;
use noyolo::config::{address_info_sources_for_chain, Config};
use noyolo::domain::address_info::{AddressInfo, FetchContext};
use noyolo::infrastructure::address_info::{
    load_address_list, load_token_list, ListLoadError, ListLocation,
};
use noyolo::Transaction;
use serde_json::json;

use common::*;

async fn list_server() -> String {
    let router = Router::new()
        .route(
            "/tokens.json",
            get(|| async {
                Json(json!({
                    "name": "Stub",
                    "tokens": [
                        {"chainId": 31337, "address": USDC, "symbol": "USDC",
                         "name": "USD Coin", "decimals": 6},
                        {"chainId": 1, "address": USDC, "symbol": "USDC",
                         "name": "USD Coin", "decimals": 6}
                    ]
                }))
            }),
        )
        .route(
            "/curated.json",
            get(|| async {
                Json(json!({"addresses": [
                    {"chainId": 31337, "address": SENDER, "name": "Team Multisig",
                     "description": "Treasury"}
                ]}))
            }),
        )
        .route("/broken.json", get(|| async { "{ not json" }))
        .route(
            "/gone.json",
            get(|| async { (StatusCode::NOT_FOUND, "gone") }),
        );
    serve(router).await
}

#[tokio::test]
async fn loads_lists_from_urls() {
    let base = list_server().await;
    let http = reqwest::Client::new();

    let tokens = load_token_list(&http, &ListLocation::parse(&format!("{base}/tokens.json")))
        .await
        .unwrap();
    assert_eq!(tokens.tokens.len(), 2);

    let curated = load_address_list(&http, &ListLocation::parse(&format!("{base}/curated.json")))
        .await
        .unwrap();
    assert_eq!(curated.addresses[0].description, "Treasury");
}

#[tokio::test]
async fn http_and_parse_failures_are_distinguished() {
    let base = list_server().await;
    let http = reqwest::Client::new();

    let err = load_token_list(&http, &ListLocation::parse(&format!("{base}/gone.json")))
        .await
        .unwrap_err();
    assert!(matches!(err, ListLoadError::Http { .. }));

    let err = load_token_list(&http, &ListLocation::parse(&format!("{base}/broken.json")))
        .await
        .unwrap_err();
    assert!(matches!(err, ListLoadError::Parse { .. }));
}

#[tokio::test]
async fn configured_remote_lists_become_sources() {
    let base = list_server().await;
    let config = Config {
        token_lists: vec![format!("{base}/tokens.json")],
        address_lists: vec![format!("{base}/curated.json"), format!("{base}/gone.json")],
        ..Default::default()
    };

    let sources = address_info_sources_for_chain(31337, &config, &reqwest::Client::new()).await;
    // curated, token, context; the unreachable list is skipped
    assert_eq!(sources.len(), 3);

    let ctx = FetchContext::new(Transaction::new(SENDER, USDC, "0x", U256::ZERO));
    let mut sender = Vec::new();
    let mut token = Vec::new();
    for source in &sources {
        sender.extend(source.fetch_info(SENDER, &ctx).await);
        token.extend(source.fetch_info(USDC, &ctx).await);
    }

    assert_eq!(sender.len(), 2);
    assert_eq!(sender[0].label().as_deref(), Some("Team Multisig"));
    assert!(matches!(sender[1], AddressInfo::Context(_)));
    match token.as_slice() {
        [AddressInfo::Token(info)] => {
            assert_eq!(info.chain_id, 31337);
            assert_eq!(info.source, format!("{base}/tokens.json"));
        }
        other => panic!("expected one token entry, got {other:?}"),
    }
}
