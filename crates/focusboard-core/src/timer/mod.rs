mod display;
mod engine;
mod ticker;

pub use display::{format_clock, percent_remaining, TimerSignal, TimerView};
pub use engine::{parse_minutes, CountdownTimer, TimerSettings, TimerState, TICK_PERIOD};
pub use ticker::{IntervalTicker, ManualTicker, Tick, TickSource};
