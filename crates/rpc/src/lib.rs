//! # portal-rpc
//!
//! Wire types for talking to injected wallets:
//! - [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193) request arguments and provider errors
//! - [EIP-3085](https://eips.ethereum.org/EIPS/eip-3085) chain parameters
//! - chain id parsing and hex encoding

pub mod chain;
pub mod error;
pub mod request;

pub use chain::{
    AddEthereumChainParameter, ChainIdError, NativeCurrency, NumberOrHex,
    SwitchEthereumChainParameter, parse_chain_id, parse_hex_chain_id, to_hex_chain_id,
};
pub use error::{ErrorCode, RpcError};
pub use request::{EthereumRequest, RequestArguments};
