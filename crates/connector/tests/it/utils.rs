use alloy_primitives::{Address, address};
use portal_connector::{ConnectionStore, ConnectorConfig, Eip1193Connector};
use portal_eip6963::{
    LocalEnvironment, ProviderDetail, ProviderRegistry, ProxyProvider,
    test_utils::{MockProvider, provider_info},
};
use serde_json::json;
use std::sync::Arc;

pub const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const BOB: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

/// A wallet answering account and chain requests with fixed values.
pub fn wallet(account: Address, chain_id: &str) -> Arc<MockProvider> {
    let wallet = Arc::new(MockProvider::default());
    wallet.set_response("eth_accounts", Ok(json!([account])));
    wallet.set_response("eth_requestAccounts", Ok(json!([account])));
    wallet.set_response("eth_chainId", Ok(json!(chain_id)));
    wallet
}

pub fn detail(rdns: &str, name: &str, wallet: &Arc<MockProvider>) -> ProviderDetail {
    ProviderDetail::new(provider_info(rdns, name), wallet.clone())
}

/// A dapp wired the way an application would: registry, proxy and a connector on the proxy.
pub struct Dapp {
    pub env: LocalEnvironment,
    pub registry: Arc<ProviderRegistry>,
    pub proxy: Arc<ProxyProvider>,
    pub store: ConnectionStore,
    pub connector: Eip1193Connector,
}

impl Dapp {
    pub fn new() -> Self {
        Self::with_config(ConnectorConfig::default())
    }

    pub fn with_config(config: ConnectorConfig) -> Self {
        let env = LocalEnvironment::new();
        let registry = ProviderRegistry::new();
        let proxy = Arc::new(ProxyProvider::new(registry.clone()));
        let store = ConnectionStore::new();
        let connector =
            Eip1193Connector::with_config(Arc::new(store.clone()), proxy.clone(), None, config);
        Self { env, registry, proxy, store, connector }
    }

    pub fn start(&self) {
        self.registry.initialize(&self.env);
    }
}
