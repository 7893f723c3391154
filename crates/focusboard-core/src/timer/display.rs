use serde::{Deserialize, Serialize};

/// What the display sink gets on every timer render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub remaining_secs: u64,
    pub duration_secs: u64,
    pub running: bool,
    /// `MM:SS`; minutes grow past two digits for long durations.
    pub clock: String,
    /// 0.0 ..= 100.0
    pub percent_remaining: f64,
}

impl TimerView {
    pub fn new(remaining_secs: u64, duration_secs: u64, running: bool) -> Self {
        Self {
            remaining_secs,
            duration_secs,
            running,
            clock: format_clock(remaining_secs),
            percent_remaining: percent_remaining(remaining_secs, duration_secs),
        }
    }
}

/// Discrete cues emitted by the countdown, separate from renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerSignal {
    NearExpiry,
    Expired,
}

pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn percent_remaining(remaining_secs: u64, duration_secs: u64) -> f64 {
    if duration_secs == 0 {
        return 0.0;
    }
    (remaining_secs as f64 / duration_secs as f64 * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
    }

    #[test]
    fn clock_keeps_long_minutes() {
        assert_eq!(format_clock(120 * 60 + 9), "120:09");
    }

    #[test]
    fn percent_tracks_remaining_fraction() {
        assert_eq!(percent_remaining(750, 1500), 50.0);
        assert_eq!(percent_remaining(1500, 1500), 100.0);
        assert_eq!(percent_remaining(0, 0), 0.0);
    }
}
