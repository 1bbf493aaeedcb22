//! # portal-eip6963
//!
//! Multi wallet discovery following:
//! - [EIP-6963](https://eips.ethereum.org/EIPS/eip-6963): Multi Injected Provider Discovery
//! - [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193): Ethereum Provider JavaScript API
//!
//! ## Architecture
//!
//! 1. Wallets announce themselves through an [`Environment`]
//! 2. The [`ProviderRegistry`] validates, deduplicates and stores announcements, notifying its
//!    subscribers after every change
//! 3. The [`ProxyProvider`] forwards requests to the wallet the user picked, moving every
//!    registered listener along when the pick changes

pub mod environment;
pub mod provider;
pub mod proxy;
pub mod registry;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use environment::{
    ANNOUNCE_PROVIDER_EVENT, AnnounceHandler, Environment, LocalEnvironment,
    REQUEST_PROVIDER_EVENT,
};
pub use provider::{Listener, Provider, ProviderError, ProviderEvent, ProviderEventKind};
pub use proxy::ProxyProvider;
pub use registry::{ProviderMap, ProviderRegistry, Subscription};
pub use types::{DetectedProvider, ProviderDetail, ProviderInfo, is_data_uri};
