//! The list of wallets offered to the user.

use portal_eip6963::{ProviderInfo, ProviderMap};
use std::fmt;

/// The kinds of connection a user can pick from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    Injected,
    CoinbaseWallet,
    WalletConnect,
    UniswapWallet,
    Network,
    /// A wallet discovered through EIP-6963, behind the proxy provider.
    Eip6963Injected,
}

impl ConnectionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Injected => "INJECTED",
            Self::CoinbaseWallet => "COINBASE_WALLET",
            Self::WalletConnect => "WALLET_CONNECT_V2",
            Self::UniswapWallet => "UNISWAP_WALLET_V2",
            Self::Network => "NETWORK",
            Self::Eip6963Injected => "EIP_6963_INJECTED",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A statically known connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub kind: ConnectionKind,
    pub name: String,
    /// Whether the connection should be offered in this environment.
    pub should_display: bool,
}

impl Connection {
    pub fn new(kind: ConnectionKind, name: impl Into<String>) -> Self {
        Self { kind, name: name.into(), should_display: true }
    }

    pub fn hidden(mut self) -> Self {
        self.should_display = false;
        self
    }
}

/// An entry of the wallet list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletOption {
    Connection(Connection),
    /// A discovered wallet, connected to through the proxy provider.
    Injected(ProviderInfo),
}

impl WalletOption {
    pub fn kind(&self) -> ConnectionKind {
        match self {
            Self::Connection(connection) => connection.kind,
            Self::Injected(_) => ConnectionKind::Eip6963Injected,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Connection(connection) => &connection.name,
            Self::Injected(info) => &info.name,
        }
    }

    /// The rdns of a discovered wallet.
    pub fn rdns(&self) -> Option<&str> {
        match self {
            Self::Connection(_) => None,
            Self::Injected(info) => Some(&info.rdns),
        }
    }
}

/// Builds the wallet list.
///
/// Displayable `connections` come first, in order. Discovered wallets are then inserted in
/// announcement order: the `recently_used` one second, every other one right before the last
/// entry.
pub fn wallet_options(
    connections: &[Connection],
    injected: &ProviderMap,
    recently_used: Option<&str>,
) -> Vec<WalletOption> {
    let mut options: Vec<_> = connections
        .iter()
        .filter(|connection| connection.should_display)
        .cloned()
        .map(WalletOption::Connection)
        .collect();

    for provider in injected.values() {
        let index = if recently_used == Some(provider.info.rdns.as_str()) {
            1
        } else {
            options.len().saturating_sub(1)
        };
        options.insert(index.min(options.len()), WalletOption::Injected(provider.info.clone()));
    }

    options
}
