use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Subcommand;
use focusboard_core::{Config, Database, GoalStore};

use super::{describe, to_index};
use crate::host::{DirectoryDelivery, StdoutSink, TerminalAlerts};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a goal
    Add {
        /// Goal text (surrounding whitespace is trimmed)
        text: String,
    },
    /// List goals
    List {
        /// Print the stored JSON instead of the checklist
        #[arg(long)]
        json: bool,
    },
    /// Mark a goal done, or pending again
    Toggle {
        /// Goal number as shown by `list`
        number: NonZeroUsize,
    },
    /// Delete a goal
    Delete {
        /// Goal number as shown by `list`
        number: NonZeroUsize,
    },
    /// Delete every goal
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Export goals as CSV
    Export {
        /// Directory to write into (default: current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut goals = GoalStore::load(db, StdoutSink, TerminalAlerts::new());

    match action {
        GoalAction::Add { text } => {
            goals.add(&text).map_err(describe)?;
        }
        GoalAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(goals.goals())?);
            } else {
                goals.render();
            }
        }
        GoalAction::Toggle { number } => {
            goals.toggle_done(to_index(number)).map_err(describe)?;
        }
        GoalAction::Delete { number } => {
            goals.delete(to_index(number)).map_err(describe)?;
        }
        GoalAction::Clear { yes } => {
            if yes {
                goals.alert_mut().answer_next(true);
            }
            if goals.clear_all().is_none() {
                println!("nothing cleared");
            }
        }
        GoalAction::Export { out } => {
            let config = Config::load_or_default();
            let mut delivery = DirectoryDelivery::new(out.unwrap_or_else(|| PathBuf::from(".")));
            goals
                .export(&mut delivery, &config.goals.export_filename)
                .map_err(describe)?;
        }
    }
    Ok(())
}
