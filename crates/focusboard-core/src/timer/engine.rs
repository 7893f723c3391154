//! Countdown timer engine.
//!
//! The engine owns the countdown state and a [`TickSource`]. It never sleeps
//! or spawns on its own: the tick source schedules, the host forwards each
//! [`Tick`] to [`CountdownTimer::on_tick`], and [`CountdownTimer::tick`] is the
//! pure one-second transition.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running          (only if remaining > 0)
//! Running --pause|reset--> Idle
//! Running --tick at 0--> Idle       (expired)
//! Idle --reset--> Idle              (re-arms remaining)
//! ```

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::display::{TimerSignal, TimerView};
use super::ticker::{Tick, TickSource};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::sinks::{AlertChannel, DisplaySink};

/// 25 minutes.
pub const DEFAULT_DURATION_SECS: u64 = 25 * 60;
pub const DEFAULT_NEAR_EXPIRY_SECS: u64 = 5;
/// Each tick takes exactly one second off the clock.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

const EXPIRED_MESSAGE: &str = "Time's up!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// Construction-time parameters of a countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSettings {
    pub duration_secs: u64,
    /// Remaining seconds at which the near-expiry cue fires; 0 disables it.
    pub near_expiry_secs: u64,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            near_expiry_secs: DEFAULT_NEAR_EXPIRY_SECS,
        }
    }
}

/// Parse a user-entered minute count.
///
/// Accepts surrounding whitespace; rejects anything that is not a positive
/// whole number.
pub fn parse_minutes(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let minutes: i64 = trimmed
        .parse()
        .map_err(|_| CoreError::invalid("minutes", format!("'{trimmed}' is not a whole number")))?;
    if minutes <= 0 {
        return Err(CoreError::invalid("minutes", "must be a positive number"));
    }
    u32::try_from(minutes).map_err(|_| CoreError::invalid("minutes", "too large"))
}

/// Single countdown with start/pause/reset/set-duration transitions.
pub struct CountdownTimer<T, D, A> {
    duration_secs: u64,
    remaining_secs: u64,
    running: bool,
    near_expiry_secs: u64,
    near_expiry_fired: bool,
    /// Generation of the tick period currently armed, if any.
    generation: Option<u64>,
    ticker: T,
    sink: D,
    alert: A,
}

impl<T: TickSource, D: DisplaySink, A: AlertChannel> CountdownTimer<T, D, A> {
    /// Create an idle timer with the default 25-minute duration.
    pub fn new(ticker: T, sink: D, alert: A) -> Self {
        Self::with_settings(TimerSettings::default(), ticker, sink, alert)
    }

    pub fn with_settings(settings: TimerSettings, ticker: T, sink: D, alert: A) -> Self {
        let duration_secs = settings.duration_secs.max(1);
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            running: false,
            near_expiry_secs: settings.near_expiry_secs,
            near_expiry_fired: false,
            generation: None,
            ticker,
            sink,
            alert,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn view(&self) -> TimerView {
        TimerView::new(self.remaining_secs, self.duration_secs, self.running)
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn alert(&self) -> &A {
        &self.alert
    }

    /// Push the current view to the display sink.
    pub fn render(&mut self) {
        let view = self.view();
        self.sink.render_timer(&view);
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        if self.remaining_secs == 0 {
            tracing::debug!("start ignored: countdown already at zero");
            return None;
        }
        self.running = true;
        self.generation = Some(self.ticker.arm(TICK_PERIOD));
        tracing::info!(remaining_secs = self.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            remaining_secs: self.remaining_secs,
            duration_secs: self.duration_secs,
            at: Utc::now(),
        })
    }

    /// Entry point for ticks coming from the tick source.
    ///
    /// Ticks from a period that has since been cancelled are dropped.
    pub fn on_tick(&mut self, tick: Tick) -> Option<Event> {
        if !self.running || self.generation != Some(tick.generation) {
            tracing::debug!(generation = tick.generation, "dropping stale tick");
            return None;
        }
        self.tick()
    }

    /// One-second transition. No-op while idle.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }

        if self.remaining_secs == 0 {
            self.halt();
            self.sink.timer_signal(TimerSignal::Expired);
            self.alert.notify(EXPIRED_MESSAGE);
            tracing::info!(duration_secs = self.duration_secs, "timer expired");
            return Some(Event::TimerExpired {
                duration_secs: self.duration_secs,
                at: Utc::now(),
            });
        }

        self.remaining_secs -= 1;
        self.render();

        if self.near_expiry_secs > 0
            && self.remaining_secs == self.near_expiry_secs
            && !self.near_expiry_fired
        {
            self.near_expiry_fired = true;
            self.sink.timer_signal(TimerSignal::NearExpiry);
            return Some(Event::TimerNearExpiry {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            });
        }

        Some(Event::TimerTicked {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        let was_running = self.running;
        self.halt();
        if !was_running {
            return None;
        }
        tracing::info!(remaining_secs = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.halt();
        self.remaining_secs = self.duration_secs;
        self.near_expiry_fired = false;
        self.render();
        Some(Event::TimerReset {
            duration_secs: self.duration_secs,
            at: Utc::now(),
        })
    }

    /// Set a new duration in whole minutes and re-arm the countdown to it.
    ///
    /// Does not start or stop the timer. On error nothing changes.
    pub fn set_duration(&mut self, minutes: u32) -> Result<Event> {
        if minutes == 0 {
            return Err(CoreError::invalid("minutes", "must be a positive number"));
        }
        self.duration_secs = u64::from(minutes) * 60;
        self.remaining_secs = self.duration_secs;
        self.near_expiry_fired = false;
        self.render();
        tracing::info!(duration_secs = self.duration_secs, "duration set");
        Ok(Event::DurationSet {
            duration_secs: self.duration_secs,
            at: Utc::now(),
        })
    }

    /// [`set_duration`](Self::set_duration) from raw user text.
    pub fn set_duration_input(&mut self, raw: &str) -> Result<Event> {
        let minutes = parse_minutes(raw)?;
        self.set_duration(minutes)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn halt(&mut self) {
        self.ticker.disarm();
        self.generation = None;
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::testing::{RecordingSink, ScriptedAlerts};
    use crate::timer::ManualTicker;
    use proptest::prelude::*;

    type TestTimer = CountdownTimer<ManualTicker, RecordingSink, ScriptedAlerts>;

    fn timer() -> TestTimer {
        CountdownTimer::new(ManualTicker::new(), RecordingSink::default(), ScriptedAlerts::default())
    }

    fn timer_with(duration_secs: u64) -> TestTimer {
        let settings = TimerSettings {
            duration_secs,
            ..TimerSettings::default()
        };
        CountdownTimer::with_settings(
            settings,
            ManualTicker::new(),
            RecordingSink::default(),
            ScriptedAlerts::default(),
        )
    }

    #[test]
    fn starts_idle_with_default_duration() {
        let t = timer();
        assert_eq!(t.state(), TimerState::Idle);
        assert_eq!(t.remaining_secs(), 1500);
        assert_eq!(t.duration_secs(), 1500);
    }

    #[test]
    fn start_twice_arms_one_source() {
        let mut t = timer();
        assert!(t.start().is_some());
        assert!(t.start().is_none());
        assert_eq!(t.ticker().arm_count(), 1);
        assert_eq!(t.ticker().period(), Some(Duration::from_secs(1)));
        assert_eq!(t.state(), TimerState::Running);
    }

    #[test]
    fn custom_settings_still_tick_once_per_second() {
        let mut t = CountdownTimer::with_settings(
            TimerSettings {
                duration_secs: 0,
                near_expiry_secs: 0,
            },
            ManualTicker::new(),
            RecordingSink::default(),
            ScriptedAlerts::default(),
        );
        assert_eq!(t.duration_secs(), 1);
        assert!(t.start().is_some());
        assert_eq!(t.ticker().period(), Some(TICK_PERIOD));
    }

    #[test]
    fn tick_decrements_and_renders() {
        let mut t = timer();
        t.start();
        let event = t.tick();
        assert!(matches!(event, Some(Event::TimerTicked { remaining_secs: 1499, .. })));
        assert_eq!(t.remaining_secs(), 1499);
        let last = t.sink().timer_views.last().unwrap();
        assert_eq!(last.clock, "24:59");
    }

    #[test]
    fn tick_while_idle_is_ignored() {
        let mut t = timer();
        assert!(t.tick().is_none());
        assert_eq!(t.remaining_secs(), 1500);
    }

    #[test]
    fn near_expiry_fires_once_at_threshold() {
        let mut t = timer_with(7);
        t.start();
        assert!(matches!(t.tick(), Some(Event::TimerTicked { remaining_secs: 6, .. })));
        assert!(matches!(t.tick(), Some(Event::TimerNearExpiry { remaining_secs: 5, .. })));
        assert!(matches!(t.tick(), Some(Event::TimerTicked { remaining_secs: 4, .. })));
        assert_eq!(t.sink().signals, vec![TimerSignal::NearExpiry]);
    }

    #[test]
    fn near_expiry_not_repeated_after_pause_and_resume() {
        let mut t = timer_with(6);
        t.start();
        t.tick();
        t.pause();
        t.start();
        t.tick();
        assert_eq!(t.sink().signals, vec![TimerSignal::NearExpiry]);
    }

    #[test]
    fn near_expiry_rearmed_by_reset() {
        let mut t = timer_with(6);
        t.start();
        t.tick();
        t.reset();
        t.start();
        t.tick();
        assert_eq!(t.sink().signals, vec![TimerSignal::NearExpiry, TimerSignal::NearExpiry]);
    }

    #[test]
    fn expires_exactly_once() {
        let mut t = timer_with(2);
        t.start();
        t.tick();
        t.tick();
        assert_eq!(t.remaining_secs(), 0);
        assert!(t.is_running());

        let event = t.tick();
        assert!(matches!(event, Some(Event::TimerExpired { .. })));
        assert_eq!(t.state(), TimerState::Idle);
        assert!(!t.ticker().is_armed());

        assert!(t.tick().is_none());
        assert!(t.tick().is_none());
        assert_eq!(t.sink().signals, vec![TimerSignal::Expired]);
        assert_eq!(t.alert().messages, vec!["Time's up!".to_string()]);
    }

    #[test]
    fn start_at_zero_is_noop() {
        let mut t = timer_with(1);
        t.start();
        t.tick();
        t.tick();
        assert_eq!(t.state(), TimerState::Idle);
        assert!(t.start().is_none());
        assert_eq!(t.state(), TimerState::Idle);
    }

    #[test]
    fn pause_keeps_remaining_and_drops_stale_ticks() {
        let mut t = timer();
        t.start();
        t.tick();
        let stale = t.ticker().fire().unwrap();
        assert!(t.pause().is_some());
        assert!(t.pause().is_none());
        assert_eq!(t.remaining_secs(), 1499);

        for _ in 0..10 {
            assert!(t.on_tick(stale).is_none());
            assert!(t.tick().is_none());
        }
        assert_eq!(t.remaining_secs(), 1499);
    }

    #[test]
    fn tick_from_previous_period_rejected_after_restart() {
        let mut t = timer();
        t.start();
        let stale = t.ticker().fire().unwrap();
        t.pause();
        t.start();
        assert!(t.on_tick(stale).is_none());
        assert_eq!(t.remaining_secs(), 1500);

        let fresh = t.ticker().fire().unwrap();
        assert!(t.on_tick(fresh).is_some());
        assert_eq!(t.remaining_secs(), 1499);
    }

    #[test]
    fn reset_restores_duration_and_stops() {
        let mut t = timer();
        t.start();
        t.tick();
        t.tick();
        t.reset();
        assert_eq!(t.remaining_secs(), 1500);
        assert_eq!(t.state(), TimerState::Idle);
        assert!(!t.ticker().is_armed());
        assert_eq!(t.sink().timer_views.last().unwrap().clock, "25:00");
    }

    #[test]
    fn set_duration_rejects_zero_and_leaves_state() {
        let mut t = timer();
        t.start();
        t.tick();
        assert!(matches!(t.set_duration(0), Err(CoreError::InvalidInput { .. })));
        assert_eq!(t.remaining_secs(), 1499);
        assert_eq!(t.duration_secs(), 1500);
        assert!(t.is_running());
    }

    #[test]
    fn set_duration_input_validates_text() {
        let mut t = timer();
        for raw in ["", "abc", "-3", "0", "1.5", "99999999999"] {
            assert!(
                matches!(t.set_duration_input(raw), Err(CoreError::InvalidInput { .. })),
                "accepted {raw:?}"
            );
        }
        assert_eq!(t.duration_secs(), 1500);

        t.set_duration_input(" 10 ").unwrap();
        assert_eq!(t.duration_secs(), 600);
        assert_eq!(t.remaining_secs(), 600);
        assert_eq!(t.state(), TimerState::Idle);
        assert_eq!(t.sink().timer_views.last().unwrap().clock, "10:00");
    }

    #[test]
    fn parse_minutes_accepts_positive_integers() {
        assert_eq!(parse_minutes("45").unwrap(), 45);
        assert_eq!(parse_minutes("\t1\n").unwrap(), 1);
    }

    proptest! {
        #[test]
        fn set_duration_then_reset_rearms(minutes in 1u32..100_000, ticks in 0usize..50) {
            let mut t = timer();
            t.start();
            for _ in 0..ticks {
                t.tick();
            }
            t.set_duration(minutes).unwrap();
            t.reset();
            prop_assert_eq!(t.remaining_secs(), u64::from(minutes) * 60);
            prop_assert!(!t.is_running());
        }

        #[test]
        fn running_tick_decrements_by_one(remaining in 1u64..10_000) {
            let mut t = timer_with(remaining);
            t.start();
            t.tick();
            prop_assert_eq!(t.remaining_secs(), remaining - 1);
        }
    }
}
