use crate::{
    environment::Environment,
    types::{DetectedProvider, ProviderDetail},
};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use std::{
    fmt,
    sync::{
        Arc, Weak,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};
use tracing::trace;

/// Announced wallets keyed by rdns, in announcement order.
pub type ProviderMap = IndexMap<String, DetectedProvider>;

type ChangeListener = Arc<dyn Fn() + Send + Sync>;
type ChangeListeners = Mutex<IndexMap<u64, ChangeListener>>;

/// Registry of every wallet that announced itself through EIP-6963.
///
/// Create one per process with [`ProviderRegistry::new`], call [`ProviderRegistry::initialize`]
/// once and share the `Arc` with every consumer.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<Arc<ProviderMap>>,
    listeners: Arc<ChangeListeners>,
    next_listener_id: AtomicU64,
    injectors_present: AtomicBool,
    initialized: AtomicBool,
}

impl ProviderRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Starts listening for announcements in `environment` and asks every wallet already loaded
    /// to announce itself.
    ///
    /// The announce listener is only attached by the first call, later calls just request the
    /// providers again.
    pub fn initialize(self: &Arc<Self>, environment: &dyn Environment) {
        if !self.initialized.swap(true, Ordering::AcqRel) {
            let registry = Arc::downgrade(self);
            environment.add_announce_listener(Arc::new(move |detail: ProviderDetail| {
                if let Some(registry) = registry.upgrade() {
                    registry.on_announce(detail);
                }
            }));
        }
        environment.request_providers();
    }

    /// Handles a single announcement, returns `true` if the registry changed.
    ///
    /// Subscribers are notified after the change is visible through [`Self::snapshot`].
    pub fn on_announce(&self, detail: ProviderDetail) -> bool {
        // ignore improperly formatted eip6963 providers
        if !detail.info.is_complete() {
            trace!(target: "eip6963", info = ?detail.info, "ignoring incomplete announcement");
            return false;
        }

        self.injectors_present.store(true, Ordering::Relaxed);

        {
            let mut providers = self.providers.write();
            if providers.get(&detail.info.rdns).is_some_and(|p| p.info == detail.info) {
                trace!(target: "eip6963", rdns = %detail.info.rdns, "ignoring duplicate announcement");
                return false;
            }
            trace!(target: "eip6963", rdns = %detail.info.rdns, name = %detail.info.name, "provider announced");
            Arc::make_mut(&mut *providers).insert(detail.info.rdns.clone(), detail.into());
        }

        self.notify();
        true
    }

    /// Registers `listener` to be called after every change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().insert(id, Arc::new(listener));
        Subscription { id, listeners: Arc::downgrade(&self.listeners) }
    }

    /// Returns the current providers.
    ///
    /// The returned `Arc` is only replaced when an announcement changes the registry, so
    /// `Arc::ptr_eq` between two snapshots tells whether anything changed in between.
    pub fn snapshot(&self) -> Arc<ProviderMap> {
        self.providers.read().clone()
    }

    /// Returns the provider announced under `rdns`.
    pub fn get(&self, rdns: &str) -> Option<DetectedProvider> {
        self.providers.read().get(rdns).cloned()
    }

    /// Whether any wallet has announced itself so far, including duplicate announcements.
    pub fn injectors_present(&self) -> bool {
        self.injectors_present.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }

    fn notify(&self) {
        let listeners = self.listeners.lock().values().cloned().collect::<Vec<_>>();
        for listener in listeners {
            listener();
        }
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers.read().keys().collect::<Vec<_>>())
            .field("subscribers", &self.listeners.lock().len())
            .field("injectors_present", &self.injectors_present())
            .finish()
    }
}

/// Handle returned by [`ProviderRegistry::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<ChangeListeners>,
}

impl Subscription {
    /// Removes the listener. Calling it again is a no-op.
    pub fn unsubscribe(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().shift_remove(&self.id);
        }
    }
}
