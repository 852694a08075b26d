use chrono::Duration;

/// Session clock, "M:SS" below an hour, "H:MM:SS" above.
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Hydration countdown, "M:SS" with zero-padded seconds.
/// Anything at or past the deadline renders as "0:00".
pub fn format_countdown(remaining: Duration) -> String {
    let ms = remaining.num_milliseconds().max(0);
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{minutes}:{seconds:02}")
}

/// Short distances read better in meters.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{km:.2} km")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formats() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(3725), "1:02:05");
    }

    #[test]
    fn countdown_formats() {
        assert_eq!(format_countdown(Duration::milliseconds(125_000)), "2:05");
        assert_eq!(format_countdown(Duration::milliseconds(5_000)), "0:05");
        assert_eq!(format_countdown(Duration::milliseconds(0)), "0:00");
        assert_eq!(format_countdown(Duration::milliseconds(-3_000)), "0:00");
    }

    #[test]
    fn distance_formats() {
        assert_eq!(format_distance(0.85), "850 m");
        assert_eq!(format_distance(1.2449), "1.24 km");
    }
}
