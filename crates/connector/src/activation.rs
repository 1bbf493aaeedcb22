use crate::{
    connector::{ConnectorError, DesiredChain, Eip1193Connector},
    options::{ConnectionKind, WalletOption},
};
use parking_lot::Mutex;
use portal_eip6963::ProxyProvider;
use portal_rpc::ErrorCode;
use tracing::{debug, warn};

/// What the user sees of an activation attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActivationStatus {
    #[default]
    Idle,
    Pending {
        kind: ConnectionKind,
    },
    Error {
        kind: ConnectionKind,
        message: String,
    },
}

/// Tracks user initiated activations.
#[derive(Debug, Default)]
pub struct ActivationState {
    status: Mutex<ActivationStatus>,
}

impl ActivationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ActivationStatus {
        self.status.lock().clone()
    }

    /// Returns `true` while some activation is pending.
    pub fn is_pending(&self) -> bool {
        matches!(*self.status.lock(), ActivationStatus::Pending { .. })
    }

    /// Clears a previous error.
    pub fn reset(&self) {
        *self.status.lock() = ActivationStatus::Idle;
    }

    /// Activates `connector` on behalf of the `kind` option.
    ///
    /// The status is pending while the wallet answers, then idle on success. Failures leave an
    /// error status behind, except for user rejections which go back to idle. The error is
    /// returned either way.
    pub async fn try_activation(
        &self,
        kind: ConnectionKind,
        connector: &Eip1193Connector,
        desired: Option<DesiredChain>,
    ) -> Result<(), ConnectorError> {
        *self.status.lock() = ActivationStatus::Pending { kind };

        let result = connector.activate(desired).await;

        let status = match &result {
            Ok(()) => ActivationStatus::Idle,
            Err(err) if err.code() == Some(ErrorCode::UserRejectedRequest.code()) => {
                debug!(target: "connector", %kind, "user rejected activation");
                ActivationStatus::Idle
            }
            Err(err) => {
                warn!(target: "connector", %kind, %err, "activation failed");
                ActivationStatus::Error { kind, message: err.to_string() }
            }
        };
        *self.status.lock() = status;
        result
    }

    /// Points `proxy` at the wallet announced under `rdns` and activates `connector`, which must
    /// be built on top of `proxy`.
    pub async fn select_injected(
        &self,
        proxy: &ProxyProvider,
        connector: &Eip1193Connector,
        rdns: &str,
        desired: Option<DesiredChain>,
    ) -> Result<(), ConnectorError> {
        if !proxy.set_current_provider(rdns) {
            debug!(target: "connector", rdns, "selected wallet is not announced");
        }
        self.try_activation(ConnectionKind::Eip6963Injected, connector, desired).await
    }

    /// Reconnects the recently used injected wallet without prompting the user.
    ///
    /// Honors [`ConnectorConfig`](crate::ConnectorConfig) of `connector`: nothing happens when
    /// `eager_connect` is off, no `recently_used_injector` is set or that wallet hasn't announced
    /// itself. Returns `true` if an eager connection was attempted, the outcome is in the
    /// connection state.
    pub async fn restore(&self, proxy: &ProxyProvider, connector: &Eip1193Connector) -> bool {
        let config = connector.config();
        if !config.eager_connect {
            return false;
        }
        let Some(rdns) = config.recently_used_injector.as_deref() else { return false };
        if !proxy.set_current_provider(rdns) {
            debug!(target: "connector", rdns, "recently used wallet is not announced");
            return false;
        }
        connector.connect_eagerly().await;
        true
    }

    /// Returns `true` if `option` is the one being activated.
    ///
    /// Discovered wallets share a connection kind, so they must also be the wallet `proxy`
    /// currently forwards to.
    pub fn is_option_pending(&self, option: &WalletOption, proxy: &ProxyProvider) -> bool {
        let ActivationStatus::Pending { kind } = *self.status.lock() else { return false };
        kind == option.kind()
            && option.rdns().is_none_or(|rdns| proxy.current_rdns().as_deref() == Some(rdns))
    }
}
