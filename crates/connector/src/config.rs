//! Connector configuration, read from `portal.toml` and `PORTAL_` environment variables.

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use portal_rpc::ErrorCode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::trace;

/// Represents a failed attempt to extract a [`ConnectorConfig`] from a [`Figment`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("failed to extract portal config: {0}")]
pub struct ExtractConfigError(#[from] figment::Error);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// How many times `activate` switches chains before giving up on a wallet that keeps
    /// reporting the wrong chain.
    pub chain_switch_retries: usize,
    /// Error code wallets return from `wallet_switchEthereumChain` for unknown chains.
    pub unrecognized_chain_code: i64,
    /// Whether to try restoring an authorized session on start-up.
    pub eager_connect: bool,
    /// rdns of the injected wallet the user connected with last.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recently_used_injector: Option<String>,
}

impl ConnectorConfig {
    /// The name of the configuration file.
    pub const FILE_NAME: &'static str = "portal.toml";

    /// Prefix of the environment variables overriding the file.
    pub const ENV_PREFIX: &'static str = "PORTAL_";

    /// Loads the config from the current directory.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment())
    }

    /// Loads the config from `root`.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment_with_root(root))
    }

    /// Attempts to extract a `ConnectorConfig` from `provider`.
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        let figment = Figment::from(provider);
        trace!(target: "connector", metadata = ?figment.metadata().collect::<Vec<_>>(), "load config");
        Ok(figment.extract()?)
    }

    /// Defaults, merged with `portal.toml` in the current directory and the environment.
    pub fn figment() -> Figment {
        Self::figment_with_root(".")
    }

    /// Defaults, merged with `portal.toml` in `root` and the environment.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        Figment::from(Self::default())
            .merge(Toml::file(root.as_ref().join(Self::FILE_NAME)))
            .merge(Env::prefixed(Self::ENV_PREFIX))
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            chain_switch_retries: 1,
            unrecognized_chain_code: ErrorCode::UnrecognizedChain.code(),
            eager_connect: true,
            recently_used_injector: None,
        }
    }
}

impl Provider for ConnectorConfig {
    fn metadata(&self) -> Metadata {
        Metadata::named("Portal Connector Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn figment_is_default() {
        Jail::expect_with(|_| {
            let config: ConnectorConfig = ConnectorConfig::figment().extract()?;
            assert_eq!(config, ConnectorConfig::default());
            assert_eq!(config.unrecognized_chain_code, 4902);
            Ok(())
        });
    }

    #[test]
    fn file_and_env_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                ConnectorConfig::FILE_NAME,
                r#"
                chain_switch_retries = 3
                recently_used_injector = "io.rabby"
            "#,
            )?;
            jail.set_env("PORTAL_EAGER_CONNECT", "false");
            jail.set_env("PORTAL_CHAIN_SWITCH_RETRIES", "2");

            let config = ConnectorConfig::load().map_err(|err| err.0)?;
            similar_asserts::assert_eq!(
                config,
                ConnectorConfig {
                    chain_switch_retries: 2,
                    eager_connect: false,
                    recently_used_injector: Some("io.rabby".into()),
                    ..Default::default()
                }
            );
            Ok(())
        });
    }

    #[test]
    fn invalid_values_fail_extraction() {
        Jail::expect_with(|jail| {
            jail.create_file(ConnectorConfig::FILE_NAME, "chain_switch_retries = \"many\"")?;
            let err = ConnectorConfig::load().unwrap_err();
            assert!(err.to_string().contains("chain_switch_retries"));
            Ok(())
        });
    }
}
