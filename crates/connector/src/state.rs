use crate::actions::{Actions, CancelActivation, MAX_SAFE_CHAIN_ID, StateError, StateUpdate};
use alloy_primitives::{Address, ChainId};
use parking_lot::Mutex;
use std::sync::Arc;

/// Snapshot of a wallet connection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionState {
    pub chain_id: Option<ChainId>,
    /// `None` until the wallet reported its accounts.
    pub accounts: Option<Vec<Address>>,
    pub activating: bool,
}

impl ConnectionState {
    /// Returns `true` if the wallet reported both a chain and at least one account.
    pub fn is_active(&self) -> bool {
        self.chain_id.is_some()
            && self.accounts.as_ref().is_some_and(|accounts| !accounts.is_empty())
            && !self.activating
    }

    /// The first reported account.
    pub fn account(&self) -> Option<Address> {
        self.accounts.as_ref().and_then(|accounts| accounts.first().copied())
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: ConnectionState,
    /// Bumped by every update so a stale cancel can tell it was overtaken.
    nullifier: u64,
}

/// The default [`Actions`] implementation, keeping the state in memory.
#[derive(Clone, Debug, Default)]
pub struct ConnectionStore {
    inner: Arc<Mutex<Inner>>,
}

impl ConnectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> ConnectionState {
        self.inner.lock().state.clone()
    }
}

impl Actions for ConnectionStore {
    fn start_activation(&self) -> CancelActivation {
        let nullifier = {
            let mut inner = self.inner.lock();
            inner.nullifier += 1;
            inner.state.activating = true;
            inner.nullifier
        };

        let inner = self.inner.clone();
        CancelActivation::new(move || {
            let mut inner = inner.lock();
            // only revert if nothing happened since the activation started
            if inner.nullifier == nullifier {
                inner.state.activating = false;
            }
        })
    }

    fn update(&self, update: StateUpdate) -> Result<(), StateError> {
        if let Some(chain_id) = update.chain_id
            && !(1..=MAX_SAFE_CHAIN_ID).contains(&chain_id)
        {
            return Err(StateError::InvalidChainId(chain_id));
        }

        let mut inner = self.inner.lock();
        inner.nullifier += 1;
        let state = &mut inner.state;
        if let Some(chain_id) = update.chain_id {
            state.chain_id = Some(chain_id);
        }
        if let Some(accounts) = update.accounts {
            state.accounts = Some(accounts);
        }
        // activation is done once we know both
        if state.activating && state.chain_id.is_some() && state.accounts.is_some() {
            state.activating = false;
        }
        Ok(())
    }

    fn reset_state(&self) {
        let mut inner = self.inner.lock();
        inner.nullifier += 1;
        inner.state = ConnectionState::default();
    }
}
