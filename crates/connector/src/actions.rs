use alloy_primitives::{Address, ChainId};
use std::fmt;

/// Largest chain id a wallet may report, `Number.MAX_SAFE_INTEGER`.
pub const MAX_SAFE_CHAIN_ID: ChainId = 9_007_199_254_740_991;

/// Error returned when an update would put the connection into an invalid state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("invalid chain id {0}")]
    InvalidChainId(ChainId),
}

/// Partial update of the connection state, missing fields keep their value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateUpdate {
    pub chain_id: Option<ChainId>,
    pub accounts: Option<Vec<Address>>,
}

impl StateUpdate {
    pub fn new(chain_id: ChainId, accounts: Vec<Address>) -> Self {
        Self { chain_id: Some(chain_id), accounts: Some(accounts) }
    }

    pub fn chain_id(chain_id: ChainId) -> Self {
        Self { chain_id: Some(chain_id), accounts: None }
    }

    pub fn accounts(accounts: Vec<Address>) -> Self {
        Self { chain_id: None, accounts: Some(accounts) }
    }
}

/// Reverts an activation started with [`Actions::start_activation`].
pub struct CancelActivation(Box<dyn FnOnce() + Send>);

impl CancelActivation {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self(Box::new(cancel))
    }

    pub fn cancel(self) {
        (self.0)()
    }
}

impl fmt::Debug for CancelActivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CancelActivation")
    }
}

/// The connection state machine a connector reports to.
pub trait Actions: Send + Sync {
    /// Marks the connection as activating.
    fn start_activation(&self) -> CancelActivation;

    /// Merges `update` into the connection state.
    fn update(&self, update: StateUpdate) -> Result<(), StateError>;

    /// Forgets the connection.
    fn reset_state(&self);
}
