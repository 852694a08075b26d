use chrono::{DateTime, Duration, Utc};
use jog_tracker_lib::{
    geo_util, location_sample::LocationSample, network_info::NetworkInfo,
};
use serde::Serialize;

/// Only the most recent samples are trailed while jogging.
pub const HISTORY_CAP: usize = 50;

/// Reminder intervals offered to the user, in minutes.
pub const HYDRATION_INTERVALS: [u32; 4] = [10, 15, 20, 30];

const DEFAULT_HYDRATION_INTERVAL: u32 = 15;

/// Single source of truth for session lifecycle, location trail,
/// connectivity and hydration scheduling. All cross-field invariants
/// are enforced atomically inside each operation; readers get cloned
/// snapshots and never touch fields directly.
#[derive(Debug)]
pub struct JogStore {
    is_jogging: bool,
    session_start_time: Option<DateTime<Utc>>,
    // Authoritative only while idle. Live elapsed time derives from
    // session_start_time via tick().
    session_duration_secs: u64,

    current_location: Option<LocationSample>,
    location_history: Vec<LocationSample>,
    location_error: Option<String>,

    network_info: Option<NetworkInfo>,
    is_online: bool,

    hydration_enabled: bool,
    last_hydration_time: Option<DateTime<Utc>>,
    hydration_interval_mins: u32,
    next_hydration_time: Option<DateTime<Utc>>,
    // Latched once the due edge has been signaled, so repeated polls
    // past the deadline fire the notification only once.
    hydration_due_signaled: bool,
}

/// Read view handed to presentation collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct JogSnapshot {
    pub is_jogging: bool,
    pub session_start_time: Option<DateTime<Utc>>,
    pub session_duration_secs: u64,

    pub current_location: Option<LocationSample>,
    pub location_history: Vec<LocationSample>,
    pub location_error: Option<String>,
    pub total_distance_km: f64,

    pub network_info: Option<NetworkInfo>,
    pub is_online: bool,

    pub hydration_enabled: bool,
    pub last_hydration_time: Option<DateTime<Utc>>,
    pub hydration_interval_mins: u32,
    pub next_hydration_time: Option<DateTime<Utc>>,
}

impl JogStore {
    pub fn new() -> Self {
        Self {
            is_jogging: false,
            session_start_time: None,
            session_duration_secs: 0,
            current_location: None,
            location_history: Vec::new(),
            location_error: None,
            network_info: None,
            is_online: true,
            hydration_enabled: true,
            last_hydration_time: None,
            hydration_interval_mins: DEFAULT_HYDRATION_INTERVAL,
            next_hydration_time: None,
            hydration_due_signaled: false,
        }
    }

    /// Starts a session. Restarting while already active is allowed and
    /// behaves like a fresh start.
    pub fn start_session(&mut self, now: DateTime<Utc>) {
        self.is_jogging = true;
        self.session_start_time = Some(now);
        self.session_duration_secs = 0;
        self.location_history.clear();
        self.location_error = None;

        self.next_hydration_time = self
            .hydration_enabled
            .then(|| now + Duration::minutes(self.hydration_interval_mins as i64));
        self.hydration_due_signaled = false;

        tracing::info!("Jogging session started at {now}");
    }

    /// Ends the session, freezing the elapsed duration. The trail and
    /// last hydration time are kept for post-session inspection.
    pub fn stop_session(&mut self, now: DateTime<Utc>) {
        let duration_secs = match self.session_start_time {
            Some(start) => (now - start).num_seconds().max(0) as u64,
            None => 0,
        };

        self.is_jogging = false;
        self.session_start_time = None;
        self.session_duration_secs = duration_secs;
        self.next_hydration_time = None;
        self.hydration_due_signaled = false;

        tracing::info!("Jogging session ended. Duration: {} minutes", duration_secs / 60);
    }

    /// Stop and wipe everything from the previous session.
    pub fn reset_session(&mut self, now: DateTime<Utc>) {
        self.stop_session(now);
        self.session_duration_secs = 0;
        self.current_location = None;
        self.location_history.clear();
        self.location_error = None;
        self.last_hydration_time = None;

        tracing::info!("Session reset");
    }

    /// 1-second cadence duration update. No-op while idle.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if let (true, Some(start)) = (self.is_jogging, self.session_start_time) {
            self.session_duration_secs = (now - start).num_seconds().max(0) as u64;
        }
    }

    /// Applies a location fix. The trail only grows while jogging;
    /// idle samples update the current position without being trailed.
    pub fn record_location(&mut self, sample: LocationSample) {
        if self.is_jogging {
            self.location_history.push(sample.clone());
            if self.location_history.len() > HISTORY_CAP {
                let excess = self.location_history.len() - HISTORY_CAP;
                self.location_history.drain(..excess);
            }
        }
        self.current_location = Some(sample);
        self.location_error = None;
    }

    /// Location failures are surfaced, not fatal: the session keeps
    /// running and the last known position stays visible.
    pub fn record_location_error(&mut self, error: Option<String>) {
        self.location_error = error;
    }

    pub fn set_network_info(&mut self, info: NetworkInfo) {
        self.network_info = Some(info);
    }

    pub fn set_online_status(&mut self, is_online: bool) {
        self.is_online = is_online;
    }

    pub fn toggle_hydration(&mut self, now: DateTime<Utc>) {
        self.hydration_enabled = !self.hydration_enabled;

        self.next_hydration_time = (self.hydration_enabled && self.is_jogging)
            .then(|| now + Duration::minutes(self.hydration_interval_mins as i64));
        self.hydration_due_signaled = false;
    }

    pub fn record_hydration(&mut self, now: DateTime<Utc>) {
        self.last_hydration_time = Some(now);

        self.next_hydration_time = (self.hydration_enabled && self.is_jogging)
            .then(|| now + Duration::minutes(self.hydration_interval_mins as i64));
        self.hydration_due_signaled = false;

        tracing::info!("Hydration recorded at {now}");
    }

    /// Stores a new reminder interval. A pending deadline is left as is;
    /// the new interval applies from the next recomputation onwards.
    /// Values outside the offered set are ignored.
    pub fn set_hydration_interval(&mut self, minutes: u32) {
        if !HYDRATION_INTERVALS.contains(&minutes) {
            tracing::warn!("Ignoring hydration interval of {minutes} minutes, allowed: {HYDRATION_INTERVALS:?}");
            return;
        }
        self.hydration_interval_mins = minutes;
    }

    /// Time left until the hydration deadline. None while idle or when
    /// no deadline is pending; non-positive values mean the reminder is due.
    pub fn hydration_countdown(&self, now: DateTime<Utc>) -> Option<Duration> {
        if !self.is_jogging {
            return None;
        }
        self.next_hydration_time.map(|next| next - now)
    }

    /// Edge-triggered due check, meant to be polled every second.
    /// Returns true exactly once per transition into the due state; the
    /// latch re-arms when the deadline advances past now or is cleared.
    pub fn poll_hydration_due(&mut self, now: DateTime<Utc>) -> bool {
        let due = match self.hydration_countdown(now) {
            Some(remaining) => remaining <= Duration::zero(),
            None => false,
        };

        if !due {
            self.hydration_due_signaled = false;
            return false;
        }

        if self.hydration_due_signaled {
            false
        } else {
            self.hydration_due_signaled = true;
            true
        }
    }

    pub fn is_jogging(&self) -> bool {
        self.is_jogging
    }

    pub fn is_online(&self) -> bool {
        self.is_online
    }

    pub fn total_distance_km(&self) -> f64 {
        geo_util::total_distance_km(&self.location_history)
    }

    pub fn snapshot(&self) -> JogSnapshot {
        JogSnapshot {
            is_jogging: self.is_jogging,
            session_start_time: self.session_start_time,
            session_duration_secs: self.session_duration_secs,
            current_location: self.current_location.clone(),
            location_history: self.location_history.clone(),
            location_error: self.location_error.clone(),
            total_distance_km: self.total_distance_km(),
            network_info: self.network_info.clone(),
            is_online: self.is_online,
            hydration_enabled: self.hydration_enabled,
            last_hydration_time: self.last_hydration_time,
            hydration_interval_mins: self.hydration_interval_mins,
            next_hydration_time: self.next_hydration_time,
        }
    }
}

impl Default for JogStore {
    fn default() -> Self {
        Self::new()
    }
}
