//! Chains with first-class support

/// Static description of a supported chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    pub chain_id: u64,
    pub name: &'static str,
    pub explorer_name: &'static str,
    pub explorer_url: &'static str,
    pub explorer_api_url: &'static str,
    pub rpc_url: &'static str,
    pub token_list_url: Option<&'static str>,
    pub generic_address_list_url: Option<&'static str>,
}

pub const NETWORKS: &[Network] = &[
    Network {
        chain_id: 1,
        name: "Ethereum Mainnet",
        explorer_name: "Etherscan",
        explorer_url: "https://etherscan.io",
        explorer_api_url: "https://api.etherscan.io",
        rpc_url: "https://mainnet-nethermind.blockscout.com/",
        token_list_url: Some("https://gateway.ipfs.io/ipns/tokens.uniswap.org"),
        generic_address_list_url: None,
    },
    Network {
        chain_id: 42220,
        name: "Celo Mainnet",
        explorer_name: "Celo Explorer",
        explorer_url: "https://explorer.celo.org",
        explorer_api_url: "https://explorer.celo.org",
        rpc_url: "https://forno.celo.org",
        token_list_url: Some(
            "https://raw.githubusercontent.com/celo-org/no-yolo-signatures/main/src/static/celoTokenList.json",
        ),
        generic_address_list_url: Some(
            "https://raw.githubusercontent.com/celo-org/no-yolo-signatures/main/src/static/celoGenericAddressList.json",
        ),
    },
    Network {
        chain_id: 137,
        name: "Polygon Mainnet",
        explorer_name: "Polygonscan",
        explorer_url: "https://polygonscan.com",
        explorer_api_url: "https://api.polygonscan.com",
        rpc_url: "https://polygon-rpc.com",
        token_list_url: None,
        generic_address_list_url: None,
    },
];

pub fn network(chain_id: u64) -> Option<&'static Network> {
    NETWORKS.iter().find(|network| network.chain_id == chain_id)
}

/// A deployed instance of a known proxy implementation.
///
/// The proxy's bytecode is read from `address` on `chain_id` at startup and
/// matched against targets on any chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyReference {
    pub name: &'static str,
    pub chain_id: u64,
    pub address: &'static str,
    pub location: &'static str,
}

/// EIP-1967 implementation slot
const EIP1967_IMPLEMENTATION_SLOT: &str =
    "0x360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc";

/// `keccak256("org.zeppelinos.proxy.implementation")`
const ZEPPELINOS_IMPLEMENTATION_SLOT: &str =
    "0x7050c9e0f4ca769c69bd3a8ef740bc37934f8e2c036e5a723fd8ee048ed3f8c3";

pub const BUILTIN_PROXY_REFERENCES: &[ProxyReference] = &[
    // Celo core contract proxy, here the CELO token
    ProxyReference {
        name: "Celo Proxy",
        chain_id: 42220,
        address: "0x471EcE3750Da237f93B8E339c536989b8978a438",
        location: EIP1967_IMPLEMENTATION_SLOT,
    },
    ProxyReference {
        name: "USDC FiatTokenProxy",
        chain_id: 1,
        address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
        location: ZEPPELINOS_IMPLEMENTATION_SLOT,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_networks() {
        assert_eq!(network(42220).map(|n| n.name), Some("Celo Mainnet"));
        assert_eq!(network(137).map(|n| n.explorer_name), Some("Polygonscan"));
        assert!(network(1).and_then(|n| n.token_list_url).is_some());
        assert!(network(10).is_none());
    }

    #[test]
    fn chain_ids_are_unique() {
        for (i, a) in NETWORKS.iter().enumerate() {
            assert!(NETWORKS[i + 1..].iter().all(|b| b.chain_id != a.chain_id));
        }
    }

    #[test]
    fn proxy_references_point_at_supported_chains() {
        for reference in BUILTIN_PROXY_REFERENCES {
            assert!(network(reference.chain_id).is_some(), "{}", reference.name);
            assert_eq!(reference.location.len(), 66);
        }
    }
}
