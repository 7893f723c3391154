//! Terminal implementations of the core's display, alert and delivery ports.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use focusboard_core::error::Result as CoreResult;
use focusboard_core::{
    AlertChannel, CoreError, DisplaySink, FileDelivery, GoalsView, TimerSignal, TimerView,
};

/// Renders to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl DisplaySink for StdoutSink {
    fn render_timer(&mut self, view: &TimerView) {
        let marker = if view.running { '>' } else { '|' };
        println!("{marker} {} ({:.0}%)", view.clock, view.percent_remaining);
    }

    fn render_goals(&mut self, view: &GoalsView<'_>) {
        if view.goals.is_empty() {
            println!("  (no goals)");
        }
        for (i, goal) in view.goals.iter().enumerate() {
            let check = if goal.done { 'x' } else { ' ' };
            println!("{:>3}. [{check}] {}", i + 1, goal.text);
        }
        println!("{}", view.summary);
    }

    fn timer_signal(&mut self, signal: TimerSignal) {
        match signal {
            // Terminal bell stands in for the chime.
            TimerSignal::NearExpiry => println!("\x07almost there..."),
            TimerSignal::Expired => println!("\x07"),
        }
    }

    fn render_theme(&mut self, dark: bool) {
        println!("theme: {}", theme_name(dark));
    }
}

pub fn theme_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

/// Messages go to stderr; confirmations use queued answers first, then
/// fall back to a `[y/N]` prompt on stdin.
#[derive(Debug, Default)]
pub struct TerminalAlerts {
    answers: VecDeque<bool>,
}

impl TerminalAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next confirmation without prompting.
    pub fn answer_next(&mut self, yes: bool) {
        self.answers.push_back(yes);
    }
}

impl AlertChannel for TerminalAlerts {
    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if let Some(answer) = self.answers.pop_front() {
            return answer;
        }
        eprint!("{prompt} [y/N] ");
        let _ = std::io::stderr().flush();
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(_) => is_yes(&line),
            Err(e) => {
                tracing::warn!(error = %e, "could not read confirmation");
                false
            }
        }
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Writes delivered files into a directory. Names carrying a path are
/// refused so a file can never land outside it.
#[derive(Debug)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileDelivery for DirectoryDelivery {
    fn deliver(&mut self, filename: &str, contents: &str) -> CoreResult<()> {
        if filename.contains(['/', '\\']) || matches!(filename, "" | "." | "..") {
            return Err(CoreError::InvalidInput {
                field: "filename".into(),
                message: format!("'{filename}' is not a bare file name"),
            });
        }
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        std::fs::write(&path, contents)?;
        println!("saved {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("nope"));
    }

    #[test]
    fn queued_answers_skip_the_prompt() {
        let mut alerts = TerminalAlerts::new();
        alerts.answer_next(true);
        alerts.answer_next(false);
        assert!(alerts.confirm("sure?"));
        assert!(!alerts.confirm("sure?"));
    }

    #[test]
    fn delivery_stays_inside_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut delivery = DirectoryDelivery::new(&out);

        for name in ["/tmp/goals.csv", "../goals.csv", "sub\\goals.csv", ".."] {
            let err = delivery.deliver(name, "Goal,Status\n").unwrap_err();
            assert!(matches!(err, CoreError::InvalidInput { .. }), "{name}");
        }
        assert!(!out.exists());

        delivery.deliver("goals.csv", "Goal,Status\n").unwrap();
        let written = std::fs::read_to_string(out.join("goals.csv")).unwrap();
        assert_eq!(written, "Goal,Status\n");
    }
}
