//! The EIP-1193 provider interface every injected wallet exposes.

use alloy_primitives::{Address, ChainId};
use async_trait::async_trait;
use portal_rpc::{NumberOrHex, RequestArguments, RpcError};
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

/// Errors returned by [`Provider::request`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The wallet rejected or failed the request.
    #[error(transparent)]
    Rpc(#[from] RpcError),
    /// The proxy has no wallet selected to forward to.
    #[error("no wallet provider is currently selected")]
    NoActiveProvider,
}

impl ProviderError {
    /// Returns the wallet error code, if the error came from the wallet.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rpc(err) => Some(err.effective_code()),
            Self::NoActiveProvider => None,
        }
    }
}

/// Names of the events an EIP-1193 provider emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderEventKind {
    Connect,
    Disconnect,
    ChainChanged,
    AccountsChanged,
    Message,
}

impl ProviderEventKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::ChainChanged => "chainChanged",
            Self::AccountsChanged => "accountsChanged",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ProviderEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event emitted by a provider, with the payload EIP-1193 defines for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderEvent {
    /// The provider can submit requests to `chain_id`.
    Connect { chain_id: NumberOrHex },
    /// The provider lost its connection to all chains.
    Disconnect(RpcError),
    ChainChanged(NumberOrHex),
    AccountsChanged(Vec<Address>),
    Message { kind: String, data: serde_json::Value },
}

impl ProviderEvent {
    pub fn connect(chain_id: ChainId) -> Self {
        Self::Connect { chain_id: NumberOrHex::Hex(portal_rpc::to_hex_chain_id(chain_id)) }
    }

    pub fn chain_changed(chain_id: ChainId) -> Self {
        Self::ChainChanged(NumberOrHex::Hex(portal_rpc::to_hex_chain_id(chain_id)))
    }

    pub const fn kind(&self) -> ProviderEventKind {
        match self {
            Self::Connect { .. } => ProviderEventKind::Connect,
            Self::Disconnect(_) => ProviderEventKind::Disconnect,
            Self::ChainChanged(_) => ProviderEventKind::ChainChanged,
            Self::AccountsChanged(_) => ProviderEventKind::AccountsChanged,
            Self::Message { .. } => ProviderEventKind::Message,
        }
    }
}

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(0);

/// A registered event callback.
///
/// Every listener gets a unique id when it is created. Clones share that id, so a clone handed to
/// [`Provider::remove_listener`] removes the original registration.
#[derive(Clone)]
pub struct Listener {
    id: u64,
    callback: Arc<dyn Fn(&ProviderEvent) + Send + Sync>,
}

impl Listener {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&ProviderEvent) + Send + Sync + 'static,
    {
        Self { id: NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed), callback: Arc::new(callback) }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Invokes the callback with `event`.
    pub fn call(&self, event: &ProviderEvent) {
        (self.callback)(event)
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Listener {}

impl Hash for Listener {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener").field(&self.id).finish()
    }
}

/// Standard EIP-1193 provider interface
/// Reference: <https://eips.ethereum.org/EIPS/eip-1193>
#[async_trait]
pub trait Provider: Send + Sync + fmt::Debug {
    /// Submits an RPC request to the wallet.
    async fn request(&self, args: RequestArguments) -> Result<serde_json::Value, ProviderError>;

    /// Registers `listener` for `event`.
    fn on(&self, event: ProviderEventKind, listener: Listener);

    /// Removes a listener previously registered with [`Provider::on`].
    fn remove_listener(&self, event: ProviderEventKind, listener: &Listener);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_clones_share_identity() {
        let a = Listener::new(|_| {});
        let b = Listener::new(|_| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn event_kinds_use_eip1193_names() {
        assert_eq!(ProviderEvent::chain_changed(137).kind().as_str(), "chainChanged");
        assert_eq!(ProviderEvent::AccountsChanged(vec![]).kind().to_string(), "accountsChanged");
        assert_eq!(
            ProviderEvent::connect(1),
            ProviderEvent::Connect { chain_id: NumberOrHex::Hex("0x1".into()) }
        );
    }

    #[test]
    fn error_code_follows_wallet_error() {
        let err = ProviderError::from(RpcError::unrecognized_chain());
        assert_eq!(err.code(), Some(4902));
        assert_eq!(ProviderError::NoActiveProvider.code(), None);
    }
}
