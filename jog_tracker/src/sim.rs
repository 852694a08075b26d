use std::time::Duration;

use chrono::Utc;
use jog_tracker_lib::{location_sample::LocationSample, network_info::NetworkInfo};
use rand::Rng;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::sensors::{
    ConnectivityEvent, ConnectivitySource, LocationEvent, LocationSource, WatchOptions,
};

/// Fake GPS walking a straight line of fixes with a little jitter,
/// used by the demo binary and anywhere a real sensor is unavailable.
pub struct SimulatedLocationSource {
    start: (f64, f64),
    step_deg: f64,
    cadence: Duration,
    fix_count: usize,
    task: Option<JoinHandle<()>>,
}

impl SimulatedLocationSource {
    pub fn new(start: (f64, f64), step_deg: f64, cadence: Duration, fix_count: usize) -> Self {
        Self {
            start,
            step_deg,
            cadence,
            fix_count,
            task: None,
        }
    }
}

impl LocationSource for SimulatedLocationSource {
    fn start_watching(&mut self, _options: WatchOptions) -> anyhow::Result<mpsc::Receiver<LocationEvent>> {
        self.stop_watching();

        let (tx, rx) = mpsc::channel(16);
        let (lat, lon) = self.start;
        let step = self.step_deg;
        let cadence = self.cadence;
        let fix_count = self.fix_count;

        self.task = Some(tokio::spawn(async move {
            for i in 0..fix_count {
                tokio::time::sleep(cadence).await;

                let jitter = rand::rng().random_range(-0.000002..0.000002);
                let accuracy = rand::rng().random_range(5.0..15.0);
                let sample = LocationSample::new(
                    lat + jitter,
                    lon + i as f64 * step,
                    Some(accuracy),
                    Utc::now(),
                );

                if tx.send(Ok(sample)).await.is_err() {
                    break;
                }
            }
        }));

        Ok(rx)
    }

    fn stop_watching(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for SimulatedLocationSource {
    fn drop(&mut self) {
        self.stop_watching();
    }
}

/// Fake connectivity feed: comes up online on a 4g descriptor, then
/// degrades to 3g halfway through the demo.
pub struct SimulatedConnectivitySource {
    task: Option<JoinHandle<()>>,
}

impl SimulatedConnectivitySource {
    pub fn new() -> Self {
        Self { task: None }
    }
}

impl Default for SimulatedConnectivitySource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivitySource for SimulatedConnectivitySource {
    fn subscribe(&mut self) -> anyhow::Result<mpsc::Receiver<ConnectivityEvent>> {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let (tx, rx) = mpsc::channel(8);
        self.task = Some(tokio::spawn(async move {
            let initial = NetworkInfo {
                connection_type: Some("cellular".into()),
                effective_type: Some("4g".into()),
                downlink_mbps: Some(24.3),
                rtt_ms: Some(45),
            };
            let _ = tx.send(ConnectivityEvent::Online(true)).await;
            let _ = tx.send(ConnectivityEvent::Info(Some(initial))).await;

            tokio::time::sleep(Duration::from_secs(3)).await;

            let degraded = NetworkInfo {
                connection_type: Some("cellular".into()),
                effective_type: Some("3g".into()),
                downlink_mbps: Some(2.1),
                rtt_ms: Some(210),
            };
            let _ = tx.send(ConnectivityEvent::Info(Some(degraded))).await;
        }));

        Ok(rx)
    }
}

impl Drop for SimulatedConnectivitySource {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_fixes_arrive_in_order() {
        let mut source = SimulatedLocationSource::new(
            (56.162939, 10.203921),
            0.0001,
            Duration::from_millis(5),
            5,
        );
        let mut rx = source.start_watching(WatchOptions::default()).unwrap();

        let mut last_lon = f64::MIN;
        for _ in 0..5 {
            let sample = rx.recv().await.unwrap().unwrap();
            assert!(sample.longitude() > last_lon);
            last_lon = sample.longitude();
        }
    }

    #[tokio::test]
    async fn connectivity_feed_starts_online() {
        let mut source = SimulatedConnectivitySource::new();
        let mut rx = source.subscribe().unwrap();

        assert_eq!(rx.recv().await, Some(ConnectivityEvent::Online(true)));
        match rx.recv().await {
            Some(ConnectivityEvent::Info(Some(info))) => {
                assert_eq!(info.effective_type.as_deref(), Some("4g"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
