use crate::utils::{ALICE, BOB, Dapp, detail, wallet};
use portal_connector::{ActivationState, ActivationStatus, ConnectionState, ConnectorConfig};
use portal_eip6963::{ProviderEvent, ProviderEventKind};

#[tokio::test(flavor = "current_thread")]
async fn eagerly_reconnects_recently_used_wallet() {
    crate::init_tracing();
    let config = ConnectorConfig {
        recently_used_injector: Some("io.rabby".to_string()),
        ..Default::default()
    };
    let dapp = Dapp::with_config(config);
    let metamask = wallet(ALICE, "0x1");
    let rabby = wallet(BOB, "0x89");
    dapp.env.register_wallet(detail("io.metamask", "MetaMask", &metamask));
    dapp.env.register_wallet(detail("io.rabby", "Rabby", &rabby));
    dapp.start();

    assert!(ActivationState::new().restore(&dapp.proxy, &dapp.connector).await);

    assert_eq!(rabby.methods(), ["eth_accounts", "eth_chainId"]);
    assert!(metamask.methods().is_empty());
    similar_asserts::assert_eq!(
        dapp.store.state(),
        ConnectionState { chain_id: Some(137), accounts: Some(vec![BOB]), activating: false }
    );
    assert_eq!(dapp.proxy.current_rdns().as_deref(), Some("io.rabby"));
}

#[tokio::test(flavor = "current_thread")]
async fn listeners_follow_the_selected_wallet() {
    let dapp = Dapp::new();
    let metamask = wallet(ALICE, "0x1");
    let rabby = wallet(BOB, "0xa");
    dapp.env.register_wallet(detail("io.metamask", "MetaMask", &metamask));
    dapp.env.register_wallet(detail("io.rabby", "Rabby", &rabby));
    dapp.start();
    let activation = ActivationState::new();

    activation.select_injected(&dapp.proxy, &dapp.connector, "io.metamask", None).await.unwrap();
    assert_eq!(dapp.store.state().account(), Some(ALICE));
    assert_eq!(metamask.listener_count(ProviderEventKind::AccountsChanged), 1);

    activation.select_injected(&dapp.proxy, &dapp.connector, "io.rabby", None).await.unwrap();
    assert_eq!(activation.status(), ActivationStatus::Idle);
    assert_eq!(dapp.store.state().chain_id, Some(10));
    assert_eq!(metamask.listener_count(ProviderEventKind::AccountsChanged), 0);
    assert_eq!(rabby.listener_count(ProviderEventKind::AccountsChanged), 1);
    assert_eq!(dapp.proxy.listener_count(ProviderEventKind::AccountsChanged), 1);

    // the previous wallet no longer reaches the dapp
    metamask.emit(ProviderEvent::chain_changed(1));
    assert_eq!(dapp.store.state().chain_id, Some(10));

    rabby.emit(ProviderEvent::chain_changed(137));
    rabby.emit(ProviderEvent::AccountsChanged(vec![ALICE]));
    assert_eq!(
        dapp.store.state(),
        ConnectionState { chain_id: Some(137), accounts: Some(vec![ALICE]), activating: false }
    );

    rabby.emit(ProviderEvent::Disconnect(portal_rpc::RpcError::disconnected()));
    assert_eq!(dapp.store.state(), ConnectionState::default());
}
