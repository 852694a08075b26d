use std::time::Duration;

use jog_tracker_lib::{location_sample::LocationSample, network_info::NetworkInfo};
use tokio::sync::mpsc;

use crate::SharedStore;

/// Why the location source failed to deliver a fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationErrorKind {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unsupported,
}

impl LocationErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            LocationErrorKind::PermissionDenied => "Location access denied by user",
            LocationErrorKind::PositionUnavailable => "Location information unavailable",
            LocationErrorKind::Timeout => "Location request timed out",
            LocationErrorKind::Unsupported => "Geolocation is not supported on this platform",
        }
    }
}

/// Options handed to the platform watch call.
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    pub maximum_age: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5),
        }
    }
}

pub type LocationEvent = Result<LocationSample, LocationErrorKind>;

/// A platform location watcher. Implementations deliver events in
/// arrival order on the returned channel until stopped.
pub trait LocationSource {
    fn start_watching(&mut self, options: WatchOptions) -> anyhow::Result<mpsc::Receiver<LocationEvent>>;
    fn stop_watching(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectivityEvent {
    Online(bool),
    /// A new descriptor, or None when the platform has no network
    /// information API and a fallback must be synthesized.
    Info(Option<NetworkInfo>),
}

pub trait ConnectivitySource {
    fn subscribe(&mut self) -> anyhow::Result<mpsc::Receiver<ConnectivityEvent>>;
}

/// Receives the edge-triggered hydration-due signal. Whether and how a
/// system notification is shown (including permission handling) is the
/// sink's business, not the store's.
pub trait NotificationSink: Send + Sync {
    fn hydration_due(&self);
}

/// Folds a location event into the store.
pub async fn apply_location_event(store: &SharedStore, event: LocationEvent) {
    match event {
        Ok(sample) => {
            tracing::debug!("Location updated: {:.6}, {:.6}", sample.latitude(), sample.longitude());
            store.lock().await.record_location(sample);
        }
        Err(kind) => {
            tracing::warn!("Geolocation error: {}", kind.message());
            store.lock().await.record_location_error(Some(kind.message().into()));
        }
    }
}

/// Folds a connectivity event into the store, synthesizing the fallback
/// descriptor when the platform offers none.
pub async fn apply_connectivity_event(store: &SharedStore, event: ConnectivityEvent) {
    match event {
        ConnectivityEvent::Online(is_online) => {
            tracing::info!("Network status: {}", if is_online { "Online" } else { "Offline" });
            store.lock().await.set_online_status(is_online);
        }
        ConnectivityEvent::Info(Some(info)) => {
            store.lock().await.set_network_info(info);
        }
        ConnectivityEvent::Info(None) => {
            tracing::warn!("Network information API not available, using fallback descriptor");
            let mut guard = store.lock().await;
            let fallback = NetworkInfo::fallback(guard.is_online());
            guard.set_network_info(fallback);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use super::*;
    use crate::store::JogStore;

    #[tokio::test]
    async fn location_error_is_absorbed_into_state() {
        let store = Arc::new(Mutex::new(JogStore::new()));
        apply_location_event(&store, Err(LocationErrorKind::PermissionDenied)).await;

        let snapshot = store.lock().await.snapshot();
        assert_eq!(snapshot.location_error.as_deref(), Some("Location access denied by user"));
    }

    #[tokio::test]
    async fn missing_descriptor_synthesizes_fallback() {
        let store = Arc::new(Mutex::new(JogStore::new()));

        apply_connectivity_event(&store, ConnectivityEvent::Online(false)).await;
        apply_connectivity_event(&store, ConnectivityEvent::Info(None)).await;

        let snapshot = store.lock().await.snapshot();
        assert!(!snapshot.is_online);
        assert_eq!(snapshot.network_info.unwrap().effective_type.as_deref(), Some("offline"));
    }
}
