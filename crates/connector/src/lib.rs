//! # portal-connector
//!
//! Drives a wallet connection over any EIP-1193 [`Provider`](portal_eip6963::Provider), usually
//! the [`ProxyProvider`](portal_eip6963::ProxyProvider) in front of the discovered wallets.
//!
//! - [`Eip1193Connector`] restores sessions and activates wallets, negotiating the chain
//! - [`ConnectionStore`] holds the resulting connection state
//! - [`ActivationState`] and [`wallet_options`] back the wallet picker

pub mod actions;
pub mod activation;
pub mod config;
pub mod connector;
pub mod options;
pub mod state;

pub use actions::{Actions, CancelActivation, MAX_SAFE_CHAIN_ID, StateError, StateUpdate};
pub use activation::{ActivationState, ActivationStatus};
pub use config::{ConnectorConfig, ExtractConfigError};
pub use connector::{ConnectorError, DesiredChain, Eip1193Connector, ErrorCallback};
pub use options::{Connection, ConnectionKind, WalletOption, wallet_options};
pub use state::{ConnectionState, ConnectionStore};
