use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A single positioning fix from the location source.
/// Position is stored as (x = longitude, y = latitude) in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub position: Point<f64>,
    /// Reported horizontal accuracy in meters, if the source provides one.
    pub accuracy: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl LocationSample {
    pub fn new(latitude: f64, longitude: f64, accuracy: Option<f64>, timestamp: DateTime<Utc>) -> Self {
        Self {
            position: Point::new(longitude, latitude),
            accuracy,
            timestamp,
        }
    }

    /// Builds a sample from the epoch-millisecond timestamps that
    /// positioning APIs report. Returns None for out-of-range timestamps.
    pub fn from_epoch_millis(latitude: f64, longitude: f64, accuracy: Option<f64>, timestamp_ms: i64) -> Option<Self> {
        let timestamp = DateTime::from_timestamp_millis(timestamp_ms)?;
        Some(Self::new(latitude, longitude, accuracy, timestamp))
    }

    pub fn latitude(&self) -> f64 {
        self.position.y()
    }

    pub fn longitude(&self) -> f64 {
        self.position.x()
    }
}

#[test]
fn epoch_millis_round_trip() {
    let sample = LocationSample::from_epoch_millis(56.162939, 10.203921, Some(12.5), 1_700_000_000_000).unwrap();
    assert_eq!(sample.latitude(), 56.162939);
    assert_eq!(sample.longitude(), 10.203921);
    assert_eq!(sample.timestamp.timestamp_millis(), 1_700_000_000_000);
}
