use crate::utils::{ALICE, BOB, Dapp, detail, wallet};
use portal_connector::{Connection, ConnectionKind, ConnectorConfig, WalletOption, wallet_options};
use portal_eip6963::Environment;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

#[test]
fn discovers_wallets_loaded_before_and_after_start() {
    crate::init_tracing();
    let dapp = Dapp::new();
    let metamask = wallet(ALICE, "0x1");
    let rabby = wallet(BOB, "0x1");

    dapp.env.register_wallet(detail("io.metamask", "MetaMask", &metamask));
    assert!(dapp.registry.is_empty());

    let changes = Arc::new(AtomicUsize::new(0));
    let c = changes.clone();
    let _subscription = dapp.registry.subscribe(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });

    dapp.start();
    assert_eq!(dapp.env.listener_count(), 1);
    assert_eq!(dapp.registry.len(), 1);

    dapp.env.register_wallet(detail("io.rabby", "Rabby", &rabby));
    assert_eq!(changes.load(Ordering::SeqCst), 2);

    // a second request makes every wallet announce again, which changes nothing
    let before = dapp.registry.snapshot();
    dapp.env.request_providers();
    assert!(Arc::ptr_eq(&before, &dapp.registry.snapshot()));
    assert_eq!(dapp.env.listener_count(), 1);
    assert_eq!(changes.load(Ordering::SeqCst), 2);

    let rdns: Vec<_> = dapp.registry.snapshot().keys().cloned().collect();
    assert_eq!(rdns, ["io.metamask", "io.rabby"]);
    assert!(dapp.registry.injectors_present());
}

#[test]
fn discovered_wallets_are_offered() {
    let dapp = Dapp::with_config(ConnectorConfig {
        recently_used_injector: Some("io.rabby".to_string()),
        ..Default::default()
    });
    dapp.start();
    dapp.env.register_wallet(detail("io.metamask", "MetaMask", &wallet(ALICE, "0x1")));
    dapp.env.register_wallet(detail("io.rabby", "Rabby", &wallet(BOB, "0x1")));

    let connections = [
        Connection::new(ConnectionKind::UniswapWallet, "Uniswap Wallet"),
        Connection::new(ConnectionKind::WalletConnect, "WalletConnect"),
        Connection::new(ConnectionKind::CoinbaseWallet, "Coinbase Wallet"),
    ];
    let recently_used = dapp.connector.config().recently_used_injector.as_deref();
    let options = wallet_options(&connections, &dapp.registry.snapshot(), recently_used);

    let rdns: Vec<_> = options.iter().map(WalletOption::rdns).collect();
    assert_eq!(rdns, [None, Some("io.rabby"), None, Some("io.metamask"), None]);
}
