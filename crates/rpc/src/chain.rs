//! Chain id encoding and the EIP-3085 chain parameters wallets understand.

use alloy_primitives::ChainId;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Error returned when a wallet reports a chain id we can't interpret.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChainIdError {
    #[error("invalid hex chain id {0:?}")]
    InvalidHex(String),
    #[error("chain id must be a non-negative integer or hex string, got {0}")]
    InvalidValue(serde_json::Value),
}

/// Either a JSON integer or a hex string, the two shapes wallets use for chain ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrHex {
    /// An integer
    Int(u64),
    /// A `0x` prefixed hex string
    Hex(String),
}

impl NumberOrHex {
    /// Converts into a canonical [`ChainId`].
    pub fn into_chain_id(self) -> Result<ChainId, ChainIdError> {
        match self {
            Self::Int(id) => Ok(id),
            Self::Hex(s) => parse_hex_chain_id(&s),
        }
    }
}

/// Parses a chain id as reported by a wallet, either `0x89` or `137`.
pub fn parse_chain_id(value: &serde_json::Value) -> Result<ChainId, ChainIdError> {
    match value {
        serde_json::Value::String(s) => parse_hex_chain_id(s),
        serde_json::Value::Number(n) => {
            n.as_u64().ok_or_else(|| ChainIdError::InvalidValue(value.clone()))
        }
        other => Err(ChainIdError::InvalidValue(other.clone())),
    }
}

/// Parses a hex chain id, the `0x` prefix is optional.
pub fn parse_hex_chain_id(s: &str) -> Result<ChainId, ChainIdError> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    ChainId::from_str_radix(digits, 16).map_err(|_| ChainIdError::InvalidHex(s.to_string()))
}

/// Encodes a chain id the way wallet RPC methods expect it, lowercase and `0x` prefixed.
pub fn to_hex_chain_id(chain_id: ChainId) -> String {
    format!("{chain_id:#x}")
}

/// Serde helpers that write a chain id as hex and read it from either representation.
pub mod hex_chain_id {
    use super::*;

    pub fn serialize<S>(chain_id: &ChainId, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex_chain_id(*chain_id))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ChainId, D::Error>
    where
        D: Deserializer<'de>,
    {
        NumberOrHex::deserialize(deserializer)?.into_chain_id().map_err(de::Error::custom)
    }
}

/// Parameter of `wallet_switchEthereumChain`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchEthereumChainParameter {
    #[serde(with = "hex_chain_id")]
    pub chain_id: ChainId,
}

/// Native currency of a chain added through `wallet_addEthereumChain`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    /// 2-6 characters long
    pub symbol: String,
    pub decimals: u8,
}

/// Parameter of `wallet_addEthereumChain`, see <https://eips.ethereum.org/EIPS/eip-3085>
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEthereumChainParameter {
    #[serde(with = "hex_chain_id")]
    pub chain_id: ChainId,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_explorer_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_urls: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_hex_and_integer_chain_ids() {
        assert_eq!(parse_chain_id(&json!("0x89")).unwrap(), 137);
        assert_eq!(parse_chain_id(&json!("0X1")).unwrap(), 1);
        assert_eq!(parse_chain_id(&json!(10)).unwrap(), 10);
        assert_eq!(to_hex_chain_id(137), "0x89");
        assert_eq!(to_hex_chain_id(42161), "0xa4b1");
    }

    #[test]
    fn rejects_garbage_chain_ids() {
        assert_eq!(parse_chain_id(&json!("0xzz")), Err(ChainIdError::InvalidHex("0xzz".into())));
        assert!(parse_chain_id(&json!(-1)).is_err());
        assert!(parse_chain_id(&json!(null)).is_err());
        assert!(parse_chain_id(&json!("")).is_err());
    }

    #[test]
    fn add_chain_parameter_wire_format() {
        let params = AddEthereumChainParameter {
            chain_id: 137,
            chain_name: "Polygon".into(),
            native_currency: NativeCurrency {
                name: "Polygon Matic".into(),
                symbol: "MATIC".into(),
                decimals: 18,
            },
            rpc_urls: vec!["https://polygon-rpc.com/".into()],
            block_explorer_urls: Some(vec!["https://polygonscan.com/".into()]),
            icon_urls: None,
        };
        similar_asserts::assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "chainId": "0x89",
                "chainName": "Polygon",
                "nativeCurrency": { "name": "Polygon Matic", "symbol": "MATIC", "decimals": 18 },
                "rpcUrls": ["https://polygon-rpc.com/"],
                "blockExplorerUrls": ["https://polygonscan.com/"]
            })
        );

        let decoded: AddEthereumChainParameter = serde_json::from_value(json!({
            "chainId": 137,
            "chainName": "Polygon",
            "nativeCurrency": { "name": "Polygon Matic", "symbol": "MATIC", "decimals": 18 },
            "rpcUrls": ["https://polygon-rpc.com/"],
            "blockExplorerUrls": ["https://polygonscan.com/"]
        }))
        .unwrap();
        assert_eq!(decoded, params);
    }
}
