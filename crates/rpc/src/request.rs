use crate::chain::{AddEthereumChainParameter, SwitchEthereumChainParameter};
use serde::{Deserialize, Serialize};

/// Arguments of an EIP-1193 `request` call.
/// Reference: <https://eips.ethereum.org/EIPS/eip-1193#request>
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestArguments {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl RequestArguments {
    /// A request without parameters.
    pub fn new(method: impl Into<String>) -> Self {
        Self { method: method.into(), params: None }
    }

    /// A request with the given parameters.
    pub fn with_params(method: impl Into<String>, params: serde_json::Value) -> Self {
        Self { method: method.into(), params: Some(params) }
    }
}

/// The wallet methods the connector issues.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum EthereumRequest {
    #[serde(rename = "eth_accounts")]
    Accounts,

    #[serde(rename = "eth_requestAccounts")]
    RequestAccounts,

    #[serde(rename = "eth_chainId")]
    ChainId,

    #[serde(rename = "wallet_switchEthereumChain")]
    SwitchEthereumChain([SwitchEthereumChainParameter; 1]),

    #[serde(rename = "wallet_addEthereumChain")]
    AddEthereumChain([AddEthereumChainParameter; 1]),
}

impl EthereumRequest {
    /// Returns the RPC method name.
    pub const fn method(&self) -> &'static str {
        match self {
            Self::Accounts => "eth_accounts",
            Self::RequestAccounts => "eth_requestAccounts",
            Self::ChainId => "eth_chainId",
            Self::SwitchEthereumChain(_) => "wallet_switchEthereumChain",
            Self::AddEthereumChain(_) => "wallet_addEthereumChain",
        }
    }
}

impl From<EthereumRequest> for RequestArguments {
    fn from(request: EthereumRequest) -> Self {
        let method = request.method();
        let params = match request {
            EthereumRequest::Accounts | EthereumRequest::RequestAccounts | EthereumRequest::ChainId => {
                None
            }
            // plain data structs, serializing them into a `Value` can't fail
            EthereumRequest::SwitchEthereumChain(params) => serde_json::to_value(params).ok(),
            EthereumRequest::AddEthereumChain(params) => serde_json::to_value(params).ok(),
        };
        Self { method: method.to_string(), params }
    }
}

impl TryFrom<&RequestArguments> for EthereumRequest {
    type Error = serde_json::Error;

    fn try_from(args: &RequestArguments) -> Result<Self, Self::Error> {
        serde_json::to_value(args).and_then(serde_json::from_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn switch_chain_request_shape() {
        let args = RequestArguments::from(EthereumRequest::SwitchEthereumChain([
            SwitchEthereumChainParameter { chain_id: 137 },
        ]));
        similar_asserts::assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({ "method": "wallet_switchEthereumChain", "params": [{ "chainId": "0x89" }] })
        );
    }

    #[test]
    fn parameterless_requests_omit_params() {
        let args = RequestArguments::from(EthereumRequest::RequestAccounts);
        assert_eq!(serde_json::to_value(&args).unwrap(), json!({ "method": "eth_requestAccounts" }));
        assert_eq!(EthereumRequest::try_from(&args).unwrap(), EthereumRequest::RequestAccounts);
    }

    #[test]
    fn unknown_methods_are_not_ethereum_requests() {
        let args = RequestArguments::with_params("eth_getBalance", json!(["0x0", "latest"]));
        assert!(EthereumRequest::try_from(&args).is_err());
    }
}
