use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "kickup", version, about = "KickUp CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Keepy-uppy drill sessions
    Drill {
        #[command(subcommand)]
        action: commands::drill::DrillAction,
    },
    /// Form feedback sessions
    Feedback {
        #[command(subcommand)]
        action: commands::feedback::FeedbackAction,
    },
    /// Daily streak and freezes
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Find nearby players
    Players {
        #[command(subcommand)]
        action: commands::players::PlayersAction,
    },
    /// Daily health check
    Health {
        #[command(subcommand)]
        action: commands::health::HealthAction,
    },
    /// Player profile, badges and rewards
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
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
        Commands::Drill { action } => commands::drill::run(action),
        Commands::Feedback { action } => commands::feedback::run(action),
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Players { action } => commands::players::run(action),
        Commands::Health { action } => commands::health::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
