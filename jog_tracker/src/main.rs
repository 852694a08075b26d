use std::{sync::Arc, time::Duration};

use chrono::Utc;
use jog_tracker::{
    SharedStore,
    sensors::{
        ConnectivitySource, LocationSource, NotificationSink, WatchOptions,
        apply_connectivity_event, apply_location_event,
    },
    sim::{SimulatedConnectivitySource, SimulatedLocationSource},
    store::JogStore,
    timers::SessionTimers,
};
use jog_tracker_lib::{
    format_util::{format_distance, format_duration},
    network_info::ConnectionQuality,
};
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn hydration_due(&self) {
        tracing::info!("Time to hydrate!");
    }
}

/// Runs a short simulated jogging session end to end: fake GPS and
/// connectivity feeds drive the store, the session timers run against
/// the real clock, and the final snapshot is printed as JSON.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting simulated jogging session...");

    let store: SharedStore = Arc::new(Mutex::new(JogStore::new()));
    let sink = Arc::new(LogNotificationSink);

    let mut connectivity = SimulatedConnectivitySource::new();
    let mut connectivity_rx = connectivity.subscribe()?;

    // ~500 m per fix step at this latitude, four fixes per second.
    let mut location = SimulatedLocationSource::new(
        (56.162939, 10.203921),
        0.0001,
        Duration::from_millis(250),
        20,
    );

    store.lock().await.start_session(Utc::now());

    // Presentation's job in the real app: observe is_jogging and bring
    // the timers and the location watch up with the session.
    let mut timers = SessionTimers::new();
    timers.start(store.clone(), sink);
    let mut location_rx = location.start_watching(WatchOptions::default())?;

    let deadline = tokio::time::sleep(Duration::from_secs(6));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            Some(event) = location_rx.recv() => apply_location_event(&store, event).await,
            Some(event) = connectivity_rx.recv() => apply_connectivity_event(&store, event).await,
            _ = &mut deadline => break,
        }
    }

    location.stop_watching();
    timers.stop();
    store.lock().await.stop_session(Utc::now());

    let snapshot = store.lock().await.snapshot();
    let quality = ConnectionQuality::classify(snapshot.network_info.as_ref());

    tracing::info!("Session time: {}", format_duration(snapshot.session_duration_secs));
    tracing::info!("Distance covered: {}", format_distance(snapshot.total_distance_km));
    tracing::info!("Connection quality: {}", quality.label());
    if quality.is_degraded() {
        tracing::warn!("Slow connection detected. GPS tracking may be affected.");
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
