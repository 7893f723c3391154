use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the system produces an Event.
/// Hosts print or log them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        remaining_secs: u64,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Remaining time crossed the pre-expiry threshold.
    TimerNearExpiry {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown ran out; the timer is idle again.
    TimerExpired {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    DurationSet {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    GoalAdded {
        index: usize,
        text: String,
        at: DateTime<Utc>,
    },
    GoalToggled {
        index: usize,
        done: bool,
        at: DateTime<Utc>,
    },
    GoalDeleted {
        index: usize,
        text: String,
        at: DateTime<Utc>,
    },
    GoalsCleared {
        removed: usize,
        at: DateTime<Utc>,
    },
    GoalsExported {
        filename: String,
        rows: usize,
        at: DateTime<Utc>,
    },
    ThemeChanged {
        dark: bool,
        at: DateTime<Utc>,
    },
}
