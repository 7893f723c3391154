//! Periodic tick sources.
//!
//! A tick source only schedules; it never touches timer state. Each time it
//! is armed it hands out a new generation number, and every tick it emits
//! carries that number. The timer drops ticks whose generation is not the one
//! it armed last, so a tick queued just before `disarm` can never land.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Shortest period a tokio interval accepts.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// One firing of a tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// Something that can fire ticks at a fixed period until cancelled.
pub trait TickSource {
    /// Begin firing every `period`. Returns the generation of the new
    /// period, or of the current one if already armed.
    fn arm(&mut self, period: Duration) -> u64;

    /// Cancel any pending firing. Idempotent.
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;
}

/// Tick source backed by a tokio interval task.
///
/// Ticks are delivered on the receiver returned by [`IntervalTicker::channel`];
/// the host loop forwards them to `CountdownTimer::on_tick`.
/// Must be armed from within a tokio runtime.
#[derive(Debug)]
pub struct IntervalTicker {
    tx: mpsc::UnboundedSender<Tick>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl IntervalTicker {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ticker = Self {
            tx,
            task: None,
            generation: 0,
        };
        (ticker, rx)
    }
}

impl TickSource for IntervalTicker {
    fn arm(&mut self, period: Duration) -> u64 {
        if self.task.is_some() {
            return self.generation;
        }
        let period = period.max(MIN_PERIOD);
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        let start = tokio::time::Instant::now() + period;
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));
        tracing::debug!(generation, ?period, "tick source armed");
        generation
    }

    fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(generation = self.generation, "tick source disarmed");
        }
    }

    fn is_armed(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.disarm();
    }
}

/// Tick source with no clock: the host fires ticks by hand.
///
/// Useful for hosts with their own scheduler and for driving the timer
/// deterministically.
#[derive(Debug, Default)]
pub struct ManualTicker {
    armed: bool,
    generation: u64,
    arm_count: usize,
    period: Option<Duration>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tick the source would emit now, if armed.
    pub fn fire(&self) -> Option<Tick> {
        self.armed.then_some(Tick {
            generation: self.generation,
        })
    }

    /// How many times a new period was actually started.
    pub fn arm_count(&self) -> usize {
        self.arm_count
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl TickSource for ManualTicker {
    fn arm(&mut self, period: Duration) -> u64 {
        if !self.armed {
            self.armed = true;
            self.generation += 1;
            self.arm_count += 1;
            self.period = Some(period);
        }
        self.generation
    }

    fn disarm(&mut self) {
        self.armed = false;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}
