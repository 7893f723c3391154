//! # Focusboard Core Library
//!
//! State machines behind the Focusboard productivity widget: a countdown
//! timer, a persisted goal checklist with CSV export, and a theme flag.
//! Rendering, prompting and file delivery are left to the host through the
//! traits in [`sinks`]; the CLI is one such host.
//!
//! ## Architecture
//!
//! - **Timer**: [`CountdownTimer`] plus a cancellable [`TickSource`]. The
//!   engine exposes `tick()` as a plain transition; scheduling lives in the
//!   tick source.
//! - **Goals**: [`GoalStore`] keeps an ordered list, persisted as JSON after
//!   every mutation.
//! - **Storage**: [`PersistentStore`] with SQLite ([`Database`]) and in-memory
//!   ([`MemoryStore`]) backends, and TOML [`Config`].

pub mod error;
pub mod events;
pub mod goals;
pub mod sinks;
pub mod storage;
pub mod theme;
pub mod timer;

pub use error::{ConfigError, CoreError, StoreError};
pub use events::Event;
pub use goals::{Goal, GoalStore, GoalsView};
pub use sinks::{AlertChannel, DisplaySink, FileDelivery};
pub use storage::{Config, Database, MemoryStore, PersistentStore};
pub use theme::ThemePreference;
pub use timer::{
    CountdownTimer, IntervalTicker, ManualTicker, Tick, TickSource, TimerSettings, TimerSignal,
    TimerState, TimerView,
};
