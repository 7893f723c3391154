use clap::Subcommand;
use focusboard_core::{Database, ThemePreference};

use crate::host::{theme_name, StdoutSink, TerminalAlerts};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut theme = ThemePreference::load(Database::open()?);
    match action {
        ThemeAction::Show => println!("{}", theme_name(theme.is_dark())),
        ThemeAction::Toggle => {
            theme.toggle(&mut StdoutSink, &mut TerminalAlerts::new());
        }
    }
    Ok(())
}
