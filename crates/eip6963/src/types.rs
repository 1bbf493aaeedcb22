use crate::provider::Provider;
use alloy_primitives::Address;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

static RE_DATA_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:(image/(?-u:[-+\w.])+)(;?(?-u:\w)+=(?-u:[-\w])+)*(;base64)?,.*")
        .expect("invalid regex")
});

/// Returns `true` if `uri` is an RFC 2397 data URI holding an image.
pub fn is_data_uri(uri: &str) -> bool {
    RE_DATA_URI.is_match(uri)
}

/// Metadata a wallet announces about itself.
/// Reference: <https://eips.ethereum.org/EIPS/eip-6963#provider-info>
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Locally unique id of the provider instance, UUIDv4.
    #[serde(default)]
    pub uuid: String,
    /// Human readable wallet name.
    #[serde(default)]
    pub name: String,
    /// Icon as a data URI.
    #[serde(default)]
    pub icon: String,
    /// Reverse DNS identifier, e.g. `io.metamask`.
    #[serde(default)]
    pub rdns: String,
}

impl ProviderInfo {
    /// Returns `true` if none of the required fields is empty.
    pub fn is_complete(&self) -> bool {
        !self.rdns.is_empty() && !self.icon.is_empty() && !self.name.is_empty() && !self.uuid.is_empty()
    }

    pub fn has_data_uri_icon(&self) -> bool {
        is_data_uri(&self.icon)
    }
}

/// Payload of an `eip6963:announceProvider` event.
#[derive(Clone, Debug)]
pub struct ProviderDetail {
    pub info: ProviderInfo,
    pub provider: Arc<dyn Provider>,
}

impl ProviderDetail {
    pub fn new(info: ProviderInfo, provider: Arc<dyn Provider>) -> Self {
        Self { info, provider }
    }
}

/// An announced wallet as tracked by the registry.
#[derive(Clone, Debug)]
pub struct DetectedProvider {
    pub info: ProviderInfo,
    pub provider: Arc<dyn Provider>,
    /// Always empty when announced, accounts are tracked by the connector.
    pub accounts: Vec<Address>,
}

impl From<ProviderDetail> for DetectedProvider {
    fn from(detail: ProviderDetail) -> Self {
        Self { info: detail.info, provider: detail.provider, accounts: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_image_data_uris() {
        assert!(is_data_uri("data:image/svg+xml;base64,PHN2Zz48L3N2Zz4="));
        assert!(is_data_uri("data:image/png;charset=utf-8;base64,iVBORw0KGgo="));
        assert!(is_data_uri("data:image/svg+xml,<svg></svg>"));
        assert!(!is_data_uri("https://example.com/icon.png"));
        assert!(!is_data_uri("data:text/plain,hello"));
        assert!(!is_data_uri("data:image/png;base64"));
    }

    #[test]
    fn data_uri_word_characters_are_ascii() {
        assert!(!is_data_uri("data:image/svg+xml;charsét=utf-8,<svg/>"));
        assert!(!is_data_uri("data:image/pngé,iVBORw0KGgo="));
        assert!(is_data_uri("data:image/x_icon;v=1_0,AAAB"));
    }

    #[test]
    fn info_requires_all_fields() {
        let info = ProviderInfo {
            uuid: "350670db-19fa-4704-a166-e52e178b59d2".into(),
            name: "Example Wallet".into(),
            icon: "data:image/svg+xml,<svg></svg>".into(),
            rdns: "com.example.wallet".into(),
        };
        assert!(info.is_complete());
        assert!(info.has_data_uri_icon());
        assert!(!ProviderInfo { icon: String::new(), ..info.clone() }.is_complete());

        let partial: ProviderInfo = serde_json::from_str(r#"{"name":"No rdns"}"#).unwrap();
        assert!(!partial.is_complete());
    }
}
