//! Chain endpoint table
//!
//! Each supported chain has its own snapshot indexer deployment.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::error::{SnapshotError, SnapshotResult};

/// Kovan testnet chain id
pub const KOVAN: u64 = 42;

/// Arbitrum One chain id
pub const ARBITRUM_ONE: u64 = 42161;

const KOVAN_ENDPOINT: &str = "https://snapshot-kovan.risedle.com";

/// One chain's snapshot deployment
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChainEndpoint {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub endpoint: String,
}

impl ChainEndpoint {
    pub fn new(id: u64, name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// Chain id to snapshot base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ChainEndpoints {
    endpoints: BTreeMap<u64, String>,
}

impl ChainEndpoints {
    /// An empty table
    pub fn empty() -> Self {
        Self {
            endpoints: BTreeMap::new(),
        }
    }

    /// Build from configured chains; later entries win
    pub fn from_chains<'a>(chains: impl IntoIterator<Item = &'a ChainEndpoint>) -> Self {
        let mut table = Self::empty();
        for chain in chains {
            table.insert(chain.id, &chain.endpoint);
        }
        table
    }

    /// Add or replace a chain's endpoint. Trailing slashes are dropped.
    pub fn insert(&mut self, chain_id: u64, endpoint: impl AsRef<str>) {
        let endpoint = endpoint.as_ref().trim_end_matches('/').to_string();
        self.endpoints.insert(chain_id, endpoint);
    }

    /// Base URL for a chain
    pub fn get(&self, chain_id: u64) -> SnapshotResult<&str> {
        self.endpoints
            .get(&chain_id)
            .map(String::as_str)
            .ok_or(SnapshotError::UnsupportedChain(chain_id))
    }

    /// Supported chain ids, ascending
    pub fn chain_ids(&self) -> Vec<u64> {
        self.endpoints.keys().copied().collect()
    }
}

impl Default for ChainEndpoints {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert(KOVAN, KOVAN_ENDPOINT);
        table
    }
}

/// Default chains written into a fresh config
pub fn default_chains() -> Vec<ChainEndpoint> {
    vec![ChainEndpoint::new(KOVAN, "kovan", KOVAN_ENDPOINT)]
}

/// Check that `address` is `0x` followed by 40 hex digits
pub fn validate_address(address: &str) -> SnapshotResult<()> {
    static ADDRESS: OnceLock<regex::Regex> = OnceLock::new();
    let pattern = ADDRESS.get_or_init(|| {
        regex::Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is valid")
    });

    if pattern.is_match(address) {
        Ok(())
    } else {
        Err(SnapshotError::InvalidAddress(address.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = ChainEndpoints::default();
        assert_eq!(table.get(KOVAN).unwrap(), "https://snapshot-kovan.risedle.com");
        assert!(matches!(
            table.get(ARBITRUM_ONE),
            Err(SnapshotError::UnsupportedChain(ARBITRUM_ONE))
        ));
    }

    #[test]
    fn test_from_chains_trims_slash() {
        let chains = vec![
            ChainEndpoint::new(ARBITRUM_ONE, "arbitrum", "https://snapshot.example.com/"),
            ChainEndpoint::new(KOVAN, "kovan", "http://localhost:9000"),
        ];
        let table = ChainEndpoints::from_chains(&chains);

        assert_eq!(table.get(ARBITRUM_ONE).unwrap(), "https://snapshot.example.com");
        assert_eq!(table.get(KOVAN).unwrap(), "http://localhost:9000");
        assert_eq!(table.chain_ids(), vec![KOVAN, ARBITRUM_ONE]);
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("0x46D06cf8052eA6FdbF71736AF33eD23686eA1452").is_ok());
        assert!(validate_address("46D06cf8052eA6FdbF71736AF33eD23686eA1452").is_err());
        assert!(validate_address("0x46D06cf8052eA6FdbF71736AF33eD23686eA145").is_err());
        assert!(validate_address("0x46D06cf8052eA6FdbF71736AF33eD23686eA145z").is_err());
        assert!(validate_address("0x46d06cf8052ea6fdbf71736af33ed23686ea1452/../x").is_err());
    }
}
