//! Interactive session: timer, goals and theme mounted side by side.
//!
//! Runs on a current-thread tokio runtime; stdin lines and timer ticks are
//! multiplexed with `select!`, so every state change happens on one thread.

use std::num::{NonZeroU32, NonZeroUsize};

use clap::Args;
use focusboard_core::timer::parse_minutes;
use focusboard_core::{
    AlertChannel, Config, CountdownTimer, Database, Event, GoalStore, IntervalTicker,
    ThemePreference, Tick,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{describe, to_index};
use crate::host::{is_yes, theme_name, DirectoryDelivery, StdoutSink, TerminalAlerts};

const HELP: &str = "\
commands:
  start | pause | reset | set <minutes> | status
  add <text> | done <n> | rm <n> | clear | goals | export
  theme | help | quit";

#[derive(Args)]
pub struct SessionArgs {
    /// Countdown length in minutes (default from config)
    #[arg(long)]
    minutes: Option<NonZeroU32>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Start,
    Pause,
    Reset,
    Set(String),
    Status,
    Add(String),
    Done(String),
    Remove(String),
    Clear,
    Goals,
    Export,
    Theme,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim().to_string()),
        None => (line, String::new()),
    };
    match head.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "start" => Command::Start,
        "pause" => Command::Pause,
        "reset" => Command::Reset,
        "set" => Command::Set(rest),
        "status" => Command::Status,
        "add" => Command::Add(rest),
        "done" | "toggle" => Command::Done(rest),
        "rm" | "delete" => Command::Remove(rest),
        "clear" => Command::Clear,
        "goals" | "list" => Command::Goals,
        "export" => Command::Export,
        "theme" => Command::Theme,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session {
    timer: CountdownTimer<IntervalTicker, StdoutSink, TerminalAlerts>,
    goals: GoalStore<Database, StdoutSink, TerminalAlerts>,
    theme: ThemePreference<Database>,
    alerts: TerminalAlerts,
    export_filename: String,
    awaiting_clear: bool,
}

impl Session {
    fn handle(&mut self, line: &str) -> Flow {
        if self.awaiting_clear {
            self.awaiting_clear = false;
            self.goals.alert_mut().answer_next(is_yes(line));
            let event = self.goals.clear_all();
            self.record(event);
            return Flow::Continue;
        }

        match parse_command(line) {
            Command::Start => {
                let event = self.timer.start();
                self.record(event);
            }
            Command::Pause => {
                let event = self.timer.pause();
                self.record(event);
            }
            Command::Reset => {
                let event = self.timer.reset();
                self.record(event);
            }
            Command::Set(raw) => {
                let result = parse_minutes(&raw).and_then(|m| self.timer.set_duration(m));
                match result {
                    Ok(event) => self.record(Some(event)),
                    Err(_) => self.alerts.notify("Please enter a valid number of minutes."),
                }
            }
            Command::Status => self.timer.render(),
            Command::Add(text) => match self.goals.add(&text) {
                Ok(event) => self.record(Some(event)),
                Err(_) => self.alerts.notify("Please enter a goal."),
            },
            Command::Done(raw) => {
                if let Some(number) = self.goal_number(&raw) {
                    let result = self.goals.toggle_done(to_index(number));
                    self.report(result);
                }
            }
            Command::Remove(raw) => {
                if let Some(number) = self.goal_number(&raw) {
                    let result = self.goals.delete(to_index(number));
                    self.report(result);
                }
            }
            Command::Clear => {
                eprint!("Are you sure you want to clear all goals? [y/N] ");
                self.awaiting_clear = true;
            }
            Command::Goals => self.goals.render(),
            Command::Export => {
                let mut delivery = DirectoryDelivery::new(".");
                let result = self.goals.export(&mut delivery, &self.export_filename);
                self.report(result);
            }
            Command::Theme => {
                let event = self.theme.toggle(&mut StdoutSink, &mut self.alerts);
                self.record(Some(event));
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Flow::Quit,
            Command::Empty => {}
            Command::Unknown(word) => {
                self.alerts
                    .notify(&format!("unknown command '{word}' (try 'help')"));
            }
        }
        Flow::Continue
    }

    fn on_tick(&mut self, tick: Tick) {
        let event = self.timer.on_tick(tick);
        self.record(event);
    }

    fn goal_number(&mut self, raw: &str) -> Option<NonZeroUsize> {
        match raw.trim().parse() {
            Ok(number) => Some(number),
            Err(_) => {
                self.alerts.notify("Please enter a goal number.");
                None
            }
        }
    }

    fn report(&mut self, result: focusboard_core::error::Result<Event>) {
        match result {
            Ok(event) => self.record(Some(event)),
            Err(e) => self.alerts.notify(&describe(e)),
        }
    }

    fn record(&self, event: Option<Event>) {
        if let Some(event) = event {
            tracing::debug!(?event, "session event");
        }
    }
}

pub fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_session(args))
}

async fn run_session(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut settings = config.timer_settings();
    if let Some(minutes) = args.minutes {
        settings.duration_secs = u64::from(minutes.get()) * 60;
    }

    let (ticker, mut ticks) = IntervalTicker::channel();
    let mut session = Session {
        timer: CountdownTimer::with_settings(settings, ticker, StdoutSink, TerminalAlerts::new()),
        goals: GoalStore::load(Database::open()?, StdoutSink, TerminalAlerts::new()),
        theme: ThemePreference::load(Database::open()?),
        alerts: TerminalAlerts::new(),
        export_filename: config.goals.export_filename.clone(),
        awaiting_clear: false,
    };

    println!("{HELP}");
    println!("theme: {}", theme_name(session.theme.is_dark()));
    session.timer.render();
    session.goals.render();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(tick) = ticks.recv() => session.on_tick(tick),
            line = lines.next_line() => match line? {
                Some(line) => {
                    if session.handle(&line) == Flow::Quit {
                        break;
                    }
                }
                None => break,
            },
        }
    }

    let event = session.timer.pause();
    session.record(event);
    Ok(())
}
