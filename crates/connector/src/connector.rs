use crate::{
    actions::{Actions, StateError, StateUpdate},
    config::ConnectorConfig,
};
use alloy_primitives::{Address, ChainId};
use portal_eip6963::{Listener, Provider, ProviderError, ProviderEvent, ProviderEventKind};
use portal_rpc::{
    AddEthereumChainParameter, ChainIdError, EthereumRequest, NumberOrHex, RpcError,
    SwitchEthereumChainParameter, parse_chain_id,
};
use std::{fmt, sync::Arc};
use tracing::{debug, warn};

/// Callback receiving the error of a provider `disconnect` event.
pub type ErrorCallback = Arc<dyn Fn(&RpcError) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("unexpected `{method}` response: {source}")]
    Response {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    ChainId(#[from] ChainIdError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error("no accounts returned")]
    NoAccounts,
    #[error("wallet stayed on chain {received} after switching to chain {desired}")]
    ChainMismatch { desired: ChainId, received: ChainId },
}

impl ConnectorError {
    /// Returns the wallet error code, if the wallet failed the request.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Provider(err) => err.code(),
            _ => None,
        }
    }
}

/// The chain `activate` should end up on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DesiredChain {
    /// Switch to a chain the wallet already knows.
    Id(ChainId),
    /// Switch to a chain, adding it to the wallet first if needed.
    Parameters(AddEthereumChainParameter),
}

impl DesiredChain {
    pub fn chain_id(&self) -> ChainId {
        match self {
            Self::Id(chain_id) => *chain_id,
            Self::Parameters(params) => params.chain_id,
        }
    }
}

impl From<ChainId> for DesiredChain {
    fn from(chain_id: ChainId) -> Self {
        Self::Id(chain_id)
    }
}

impl From<AddEthereumChainParameter> for DesiredChain {
    fn from(params: AddEthereumChainParameter) -> Self {
        Self::Parameters(params)
    }
}

/// Connects an EIP-1193 [`Provider`] to the connection state.
///
/// The provider may be a single wallet or a [`portal_eip6963::ProxyProvider`]. Provider events
/// are forwarded to the [`Actions`] for as long as the provider lives.
pub struct Eip1193Connector {
    provider: Arc<dyn Provider>,
    actions: Arc<dyn Actions>,
    config: ConnectorConfig,
}

impl Eip1193Connector {
    pub fn new(
        actions: Arc<dyn Actions>,
        provider: Arc<dyn Provider>,
        on_error: Option<ErrorCallback>,
    ) -> Self {
        Self::with_config(actions, provider, on_error, ConnectorConfig::default())
    }

    pub fn with_config(
        actions: Arc<dyn Actions>,
        provider: Arc<dyn Provider>,
        on_error: Option<ErrorCallback>,
        config: ConnectorConfig,
    ) -> Self {
        let a = actions.clone();
        provider.on(
            ProviderEventKind::Connect,
            Listener::new(move |event| {
                if let ProviderEvent::Connect { chain_id } = event {
                    update_chain_id(a.as_ref(), chain_id.clone());
                }
            }),
        );

        let a = actions.clone();
        provider.on(
            ProviderEventKind::Disconnect,
            Listener::new(move |event| {
                if let ProviderEvent::Disconnect(error) = event {
                    warn!(target: "connector", %error, "provider disconnected");
                    a.reset_state();
                    if let Some(on_error) = &on_error {
                        on_error(error);
                    }
                }
            }),
        );

        let a = actions.clone();
        provider.on(
            ProviderEventKind::ChainChanged,
            Listener::new(move |event| {
                if let ProviderEvent::ChainChanged(chain_id) = event {
                    update_chain_id(a.as_ref(), chain_id.clone());
                }
            }),
        );

        let a = actions.clone();
        provider.on(
            ProviderEventKind::AccountsChanged,
            Listener::new(move |event| {
                if let ProviderEvent::AccountsChanged(accounts) = event
                    && let Err(err) = a.update(StateUpdate::accounts(accounts.clone()))
                {
                    warn!(target: "connector", %err, "ignoring accountsChanged");
                }
            }),
        );

        Self { provider, actions, config }
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Restores an already authorized session without prompting the user.
    ///
    /// Never fails: if the wallet has no authorized accounts, or anything goes wrong, the
    /// connection state is reset.
    pub async fn connect_eagerly(&self) {
        let _cancel = self.actions.start_activation();

        if let Err(err) = self.try_connect_eagerly().await {
            debug!(target: "connector", %err, "could not connect eagerly");
            // the cancel handle is useless here: wallets may emit `connect` while we wait, which
            // counts as an intermediate update
            self.actions.reset_state();
        }
    }

    async fn try_connect_eagerly(&self) -> Result<(), ConnectorError> {
        // Wallets may resolve eth_chainId and hang on eth_accounts pending user interaction, which
        // may include changing chains; they should be requested serially, with accounts first, so
        // that the chainId can settle.
        let accounts = self.request_accounts(EthereumRequest::Accounts).await?;
        if accounts.is_empty() {
            return Err(ConnectorError::NoAccounts);
        }
        let chain_id = self.request_chain_id().await?;
        debug!(target: "connector", chain_id, ?accounts, "connected eagerly");
        self.actions.update(StateUpdate::new(chain_id, accounts))?;
        Ok(())
    }

    /// Asks the wallet for its accounts, prompting the user if needed, and makes sure it ends up
    /// on the desired chain.
    pub async fn activate(&self, desired: Option<DesiredChain>) -> Result<(), ConnectorError> {
        let desired_chain_id = desired.as_ref().map(DesiredChain::chain_id);
        let mut switches = 0;

        loop {
            // accounts first, see `try_connect_eagerly`
            let accounts = self.request_accounts(EthereumRequest::RequestAccounts).await?;
            let received_chain_id = self.request_chain_id().await?;

            let desired_chain_id = match desired_chain_id {
                Some(desired) if desired != received_chain_id => desired,
                _ => {
                    self.actions.update(StateUpdate::new(received_chain_id, accounts))?;
                    return Ok(());
                }
            };

            if switches >= self.config.chain_switch_retries {
                return Err(ConnectorError::ChainMismatch {
                    desired: desired_chain_id,
                    received: received_chain_id,
                });
            }
            switches += 1;

            self.switch_chain(desired_chain_id, desired.as_ref()).await?;
        }
    }

    /// Switches the wallet to `chain_id`, adding the chain first if the wallet doesn't know it and
    /// we have its parameters.
    async fn switch_chain(
        &self,
        chain_id: ChainId,
        desired: Option<&DesiredChain>,
    ) -> Result<(), ConnectorError> {
        debug!(target: "connector", chain_id, "switching chain");
        let switch =
            EthereumRequest::SwitchEthereumChain([SwitchEthereumChainParameter { chain_id }]);
        let err = match self.provider.request(switch.into()).await {
            Ok(_) => return Ok(()),
            Err(err) => err,
        };

        match desired {
            Some(DesiredChain::Parameters(params))
                if err.code() == Some(self.config.unrecognized_chain_code) =>
            {
                debug!(target: "connector", chain_id, chain_name = %params.chain_name, "adding chain");
                let add = EthereumRequest::AddEthereumChain([params.clone()]);
                self.provider.request(add.into()).await?;
                Ok(())
            }
            _ => Err(err.into()),
        }
    }

    async fn request_accounts(
        &self,
        request: EthereumRequest,
    ) -> Result<Vec<Address>, ConnectorError> {
        let method = request.method();
        let value = self.provider.request(request.into()).await?;
        serde_json::from_value(value).map_err(|source| ConnectorError::Response { method, source })
    }

    async fn request_chain_id(&self) -> Result<ChainId, ConnectorError> {
        let value = self.provider.request(EthereumRequest::ChainId.into()).await?;
        Ok(parse_chain_id(&value)?)
    }
}

impl fmt::Debug for Eip1193Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Eip1193Connector")
            .field("provider", &self.provider)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn update_chain_id(actions: &dyn Actions, chain_id: NumberOrHex) {
    let result = chain_id
        .into_chain_id()
        .map_err(ConnectorError::from)
        .and_then(|chain_id| Ok(actions.update(StateUpdate::chain_id(chain_id))?));
    if let Err(err) = result {
        warn!(target: "connector", %err, "ignoring chain id update");
    }
}
