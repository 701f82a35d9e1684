use clap::Subcommand;
use kickup_core::storage::Database;
use kickup_core::{Config, HealthCheck};
use serde_json::json;

use super::{load_state, save_state};

#[derive(Subcommand)]
pub enum HealthAction {
    /// Log today's mood and fatigue (1-10)
    Log {
        #[arg(long)]
        mood: u8,
        /// Defaults to 8 after a tiring drill, 5 otherwise
        #[arg(long)]
        fatigue: Option<u8>,
    },
}

pub fn run(action: HealthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        HealthAction::Log { mood, fatigue } => {
            let db = Database::open()?;
            let config = Config::load_or_default();
            let mut state = load_state(&db, &config)?;

            let fatigue = fatigue.unwrap_or_else(|| state.suggested_fatigue());
            let events = state.log_health(HealthCheck { mood, fatigue })?;
            save_state(&db, &state)?;

            let output = json!({
                "fatigue": fatigue,
                "fatigue_flag": state.fatigue_flag,
                "events": events,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
