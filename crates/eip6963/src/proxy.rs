use crate::{
    provider::{Listener, Provider, ProviderError, ProviderEventKind},
    registry::ProviderRegistry,
    types::DetectedProvider,
};
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use portal_rpc::RequestArguments;
use std::sync::Arc;
use tracing::debug;

/// A [`Provider`] that forwards to whichever announced wallet is currently selected.
///
/// Listeners registered on the proxy are kept in its own table and moved from one wallet to the
/// next on every [`ProxyProvider::set_current_provider`], so consumers bind them once.
#[derive(Debug)]
pub struct ProxyProvider {
    registry: Arc<ProviderRegistry>,
    current: RwLock<Option<DetectedProvider>>,
    /// Lock order: `listeners` before `current`.
    listeners: Mutex<IndexMap<ProviderEventKind, Vec<Listener>>>,
}

impl ProxyProvider {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry, current: RwLock::new(None), listeners: Mutex::new(IndexMap::new()) }
    }

    /// Points the proxy at the wallet announced under `rdns`.
    ///
    /// Every listener is detached from the previous wallet and the same listener is attached to
    /// the new one. If `rdns` isn't in the registry the proxy is left without a wallet. Returns
    /// `true` if a wallet was found.
    pub fn set_current_provider(&self, rdns: &str) -> bool {
        let next = self.registry.get(rdns);
        let listeners = self.listeners.lock();
        let previous = std::mem::replace(&mut *self.current.write(), next.clone());

        for (event, listeners) in listeners.iter() {
            for listener in listeners {
                if let Some(previous) = &previous {
                    previous.provider.remove_listener(*event, listener);
                }
                if let Some(next) = &next {
                    next.provider.on(*event, listener.clone());
                }
            }
        }

        debug!(
            target: "eip6963",
            from = previous.as_ref().map(|p| p.info.rdns.as_str()),
            to = rdns,
            found = next.is_some(),
            "switched proxied provider"
        );
        next.is_some()
    }

    /// Returns the wallet requests are currently forwarded to.
    pub fn current_provider(&self) -> Option<DetectedProvider> {
        self.current.read().clone()
    }

    /// Returns the rdns of the wallet requests are currently forwarded to.
    pub fn current_rdns(&self) -> Option<String> {
        self.current.read().as_ref().map(|p| p.info.rdns.clone())
    }

    /// Registers `listener` for `event` on every wallet the proxy forwards to, now and after
    /// later switches.
    pub fn on(&self, event: ProviderEventKind, listener: Listener) -> &Self {
        let mut listeners = self.listeners.lock();
        if let Some(current) = &*self.current.read() {
            current.provider.on(event, listener.clone());
        }
        listeners.entry(event).or_default().push(listener);
        self
    }

    /// Removes `listener` from the current wallet and from the proxy.
    pub fn remove_listener(&self, event: ProviderEventKind, listener: &Listener) -> &Self {
        let mut listeners = self.listeners.lock();
        if let Some(current) = &*self.current.read() {
            current.provider.remove_listener(event, listener);
        }
        // forget it too, otherwise the next switch would attach it again
        if let Some(registered) = listeners.get_mut(&event) {
            registered.retain(|l| l != listener);
        }
        self
    }

    /// Number of listeners registered for `event` through the proxy.
    pub fn listener_count(&self, event: ProviderEventKind) -> usize {
        self.listeners.lock().get(&event).map_or(0, Vec::len)
    }
}

#[async_trait]
impl Provider for ProxyProvider {
    async fn request(&self, args: RequestArguments) -> Result<serde_json::Value, ProviderError> {
        let provider = self
            .current
            .read()
            .as_ref()
            .map(|current| current.provider.clone())
            .ok_or(ProviderError::NoActiveProvider)?;
        provider.request(args).await
    }

    fn on(&self, event: ProviderEventKind, listener: Listener) {
        Self::on(self, event, listener);
    }

    fn remove_listener(&self, event: ProviderEventKind, listener: &Listener) {
        Self::remove_listener(self, event, listener);
    }
}
