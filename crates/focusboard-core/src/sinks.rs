//! Collaborators the state machines talk to.
//!
//! The core never renders, prompts or writes files itself. A host (the CLI,
//! a GUI shell, a test) supplies implementations of these traits.

use crate::error::Result;
use crate::goals::GoalsView;
use crate::timer::{TimerSignal, TimerView};

/// Receives render updates from the timer, goal list and theme.
pub trait DisplaySink {
    fn render_timer(&mut self, view: &TimerView);

    fn render_goals(&mut self, view: &GoalsView<'_>);

    /// Near-expiry and expiry cues, e.g. for playing a sound.
    fn timer_signal(&mut self, _signal: TimerSignal) {}

    fn render_theme(&mut self, _dark: bool) {}
}

/// User-notification primitive: plain messages and a yes/no gate.
pub trait AlertChannel {
    fn notify(&mut self, message: &str);

    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Hands an exported document to the user (download, save to disk, ...).
pub trait FileDelivery {
    fn deliver(&mut self, filename: &str, contents: &str) -> Result<()>;
}
