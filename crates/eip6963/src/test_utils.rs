//! In-memory wallet used by the tests of this and downstream crates.

use crate::{
    provider::{Listener, Provider, ProviderError, ProviderEvent, ProviderEventKind},
    types::ProviderInfo,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use portal_rpc::{RequestArguments, RpcError};
use std::collections::{HashMap, VecDeque};

type Response = Result<serde_json::Value, RpcError>;

/// A scripted [`Provider`].
///
/// Responses are looked up by method: queued responses are used first, in order, then the sticky
/// response set with [`MockProvider::set_response`]. Unknown methods fail with `MethodNotFound`.
#[derive(Debug, Default)]
pub struct MockProvider {
    requests: Mutex<Vec<RequestArguments>>,
    queued: Mutex<HashMap<String, VecDeque<Response>>>,
    sticky: Mutex<HashMap<String, Response>>,
    listeners: Mutex<Vec<(ProviderEventKind, Listener)>>,
}

impl MockProvider {
    /// Answers every future `method` request with `response`.
    pub fn set_response(&self, method: &str, response: Response) {
        self.sticky.lock().insert(method.to_string(), response);
    }

    /// Answers the next `method` request with `response`.
    pub fn push_response(&self, method: &str, response: Response) {
        self.queued.lock().entry(method.to_string()).or_default().push_back(response);
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RequestArguments> {
        self.requests.lock().clone()
    }

    /// Methods of all requests received so far.
    pub fn methods(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.method.clone()).collect()
    }

    pub fn listener_count(&self, event: ProviderEventKind) -> usize {
        self.listeners.lock().iter().filter(|(e, _)| *e == event).count()
    }

    /// Delivers `event` to the listeners registered for its kind.
    pub fn emit(&self, event: ProviderEvent) {
        let kind = event.kind();
        let listeners = self
            .listeners
            .lock()
            .iter()
            .filter(|(e, _)| *e == kind)
            .map(|(_, l)| l.clone())
            .collect::<Vec<_>>();
        for listener in listeners {
            listener.call(&event);
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn request(&self, args: RequestArguments) -> Result<serde_json::Value, ProviderError> {
        self.requests.lock().push(args.clone());
        let queued = self.queued.lock().get_mut(&args.method).and_then(VecDeque::pop_front);
        let response = match queued {
            Some(response) => response,
            None => self
                .sticky
                .lock()
                .get(&args.method)
                .cloned()
                .unwrap_or_else(|| Err(RpcError::method_not_found())),
        };
        response.map_err(Into::into)
    }

    fn on(&self, event: ProviderEventKind, listener: Listener) {
        self.listeners.lock().push((event, listener));
    }

    fn remove_listener(&self, event: ProviderEventKind, listener: &Listener) {
        let mut listeners = self.listeners.lock();
        if let Some(pos) = listeners.iter().position(|(e, l)| *e == event && l == listener) {
            listeners.remove(pos);
        }
    }
}

/// Complete provider info for `rdns`, deterministic so re-announcements compare equal.
pub fn provider_info(rdns: &str, name: &str) -> ProviderInfo {
    ProviderInfo {
        uuid: format!("{:0>8}-0000-4000-8000-000000000000", rdns.len()),
        name: name.to_string(),
        icon: "data:image/svg+xml,<svg></svg>".to_string(),
        rdns: rdns.to_string(),
    }
}
