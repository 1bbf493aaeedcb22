//! The broadcast channel wallets and dapps use to find each other.

use crate::types::ProviderDetail;
use parking_lot::RwLock;
use std::{fmt, sync::Arc};
use tracing::trace;

/// Event a wallet dispatches to announce itself.
pub const ANNOUNCE_PROVIDER_EVENT: &str = "eip6963:announceProvider";
/// Event a dapp dispatches to ask every wallet to announce itself.
pub const REQUEST_PROVIDER_EVENT: &str = "eip6963:requestProvider";

/// Callback invoked for every `eip6963:announceProvider` event.
pub type AnnounceHandler = Arc<dyn Fn(ProviderDetail) + Send + Sync>;

/// The environment wallets announce themselves in, e.g. the browser window.
pub trait Environment: Send + Sync {
    /// Starts delivering every future announcement to `handler`.
    fn add_announce_listener(&self, handler: AnnounceHandler);

    /// Dispatches `eip6963:requestProvider`.
    ///
    /// Wallets answer asynchronously, zero or more times, through the announce listeners.
    fn request_providers(&self);
}

/// An in-process [`Environment`].
///
/// Wallets registered with [`LocalEnvironment::register_wallet`] announce themselves when they
/// load and again on every provider request, like browser extensions do.
#[derive(Default)]
pub struct LocalEnvironment {
    handlers: RwLock<Vec<AnnounceHandler>>,
    wallets: RwLock<Vec<ProviderDetail>>,
}

impl LocalEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a wallet: it announces itself now and answers later provider requests.
    pub fn register_wallet(&self, detail: ProviderDetail) {
        self.wallets.write().push(detail.clone());
        self.announce(detail);
    }

    /// Dispatches a single `eip6963:announceProvider` event.
    pub fn announce(&self, detail: ProviderDetail) {
        trace!(target: "eip6963", event = ANNOUNCE_PROVIDER_EVENT, rdns = %detail.info.rdns, "dispatch");
        let handlers = self.handlers.read().clone();
        for handler in handlers {
            handler(detail.clone());
        }
    }

    /// Number of announce listeners attached.
    pub fn listener_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl Environment for LocalEnvironment {
    fn add_announce_listener(&self, handler: AnnounceHandler) {
        self.handlers.write().push(handler);
    }

    fn request_providers(&self) {
        trace!(target: "eip6963", event = REQUEST_PROVIDER_EVENT, "dispatch");
        let wallets = self.wallets.read().clone();
        for wallet in wallets {
            self.announce(wallet);
        }
    }
}

impl fmt::Debug for LocalEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalEnvironment")
            .field("listeners", &self.handlers.read().len())
            .field("wallets", &self.wallets.read().iter().map(|w| &w.info.rdns).collect::<Vec<_>>())
            .finish()
    }
}
