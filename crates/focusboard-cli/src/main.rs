use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod host;

#[derive(Parser)]
#[command(name = "focusboard", version, about = "Focusboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive countdown and goal checklist
    Session(commands::session::SessionArgs),
    /// Goal checklist management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Light/dark theme preference
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Session(args) => commands::session::run(args),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
