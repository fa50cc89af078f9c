// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity observation.
//!
//! An observer publishes the current [`NetworkState`] on a tokio `watch`
//! channel. The sync engine subscribes with
//! [`SyncEngine::subscribe`](crate::engine::SyncEngine::subscribe), which
//! returns a [`ConnectivitySubscription`] owning the listening task.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Reachability as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetworkState {
    /// A network interface is up.
    pub connected: bool,
    /// Whether the internet is reachable through it, if known.
    pub internet_reachable: Option<bool>,
}

impl NetworkState {
    pub fn online() -> Self {
        NetworkState {
            connected: true,
            internet_reachable: Some(true),
        }
    }

    pub fn offline() -> Self {
        NetworkState {
            connected: false,
            internet_reachable: None,
        }
    }

    /// State derived from a direct reachability check of the backend.
    pub fn from_reachability(reachable: bool) -> Self {
        NetworkState {
            connected: reachable,
            internet_reachable: Some(reachable),
        }
    }

    /// Connected, and reachability is either unknown or confirmed.
    pub fn is_online(&self) -> bool {
        self.connected && self.internet_reachable != Some(false)
    }
}

/// Source of connectivity changes.
pub trait ConnectivityObserver: Send + Sync {
    /// Subscribe to state changes. The receiver starts at the current state.
    fn watch(&self) -> watch::Receiver<NetworkState>;
}

/// Observer driven by explicit updates, e.g. from a platform callback.
pub struct NetworkMonitor {
    tx: watch::Sender<NetworkState>,
}

impl NetworkMonitor {
    pub fn new(initial: NetworkState) -> Self {
        let (tx, _) = watch::channel(initial);
        NetworkMonitor { tx }
    }

    /// Publish a new state. Subscribers are only woken when it differs from
    /// the current one.
    pub fn set(&self, state: NetworkState) {
        self.tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }

    pub fn current(&self) -> NetworkState {
        *self.tx.borrow()
    }
}

impl ConnectivityObserver for NetworkMonitor {
    fn watch(&self) -> watch::Receiver<NetworkState> {
        self.tx.subscribe()
    }
}

/// Observer that periodically opens a TCP connection to the backend host.
///
/// The probe task stops when the probe is dropped.
pub struct ReachabilityProbe {
    rx: watch::Receiver<NetworkState>,
    cancel: CancellationToken,
}

impl ReachabilityProbe {
    /// Start probing `target` (`host:port`) every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(target: String, interval: Duration, timeout: Duration) -> Self {
        let (tx, rx) = watch::channel(NetworkState::offline());
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            loop {
                let state = probe(&target, timeout).await;
                let changed = tx.send_if_modified(|current| {
                    if *current == state {
                        false
                    } else {
                        *current = state;
                        true
                    }
                });
                if changed {
                    tracing::debug!("Reachability of {} changed: {:?}", target, state);
                }

                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tx.closed() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        });

        ReachabilityProbe { rx, cancel }
    }
}

impl ConnectivityObserver for ReachabilityProbe {
    fn watch(&self) -> watch::Receiver<NetworkState> {
        self.rx.clone()
    }
}

impl Drop for ReachabilityProbe {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Check once whether `target` (`host:port`) accepts TCP connections.
pub async fn probe(target: &str, timeout: Duration) -> NetworkState {
    let reachable = matches!(
        tokio::time::timeout(timeout, TcpStream::connect(target)).await,
        Ok(Ok(_))
    );
    NetworkState::from_reachability(reachable)
}

/// Extract the `host:port` to probe from a backend URL.
///
/// Returns `None` for URLs without a host.
pub fn probe_target(url: &str) -> Option<String> {
    let (default_port, rest) = if let Some(rest) = url.strip_prefix("wss://") {
        (443, rest)
    } else if let Some(rest) = url.strip_prefix("https://") {
        (443, rest)
    } else if let Some(rest) = url.strip_prefix("ws://") {
        (80, rest)
    } else if let Some(rest) = url.strip_prefix("http://") {
        (80, rest)
    } else {
        return None;
    };

    let authority = rest.split('/').next().unwrap_or_default();
    if authority.is_empty() {
        return None;
    }

    let has_port = match authority.rfind(']') {
        // IPv6 literal: a port follows the closing bracket
        Some(end) => authority[end..].contains(':'),
        None => authority.contains(':'),
    };

    if has_port {
        Some(authority.to_string())
    } else {
        Some(format!("{}:{}", authority, default_port))
    }
}

/// Handle to a running connectivity listener.
///
/// Dropping the subscription stops the listener; [`unsubscribe`] also waits
/// for it to finish, including any drain it already started.
///
/// [`unsubscribe`]: ConnectivitySubscription::unsubscribe
pub struct ConnectivitySubscription {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ConnectivitySubscription {
    pub(crate) fn new(cancel: CancellationToken, handle: JoinHandle<()>) -> Self {
        ConnectivitySubscription {
            cancel,
            handle: Some(handle),
        }
    }

    /// Returns true while the listener task is running.
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop listening and wait for the listener to exit.
    pub async fn unsubscribe(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!("Connectivity listener ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for ConnectivitySubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
