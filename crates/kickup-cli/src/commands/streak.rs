use chrono::{Local, NaiveDate};
use clap::Subcommand;
use kickup_core::storage::Database;
use kickup_core::Config;
use serde_json::json;

use super::{load_state, save_state};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Check in for today
    CheckIn {
        /// Day to check in for (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print the current streak
    Status,
    /// Add a freeze to the inventory
    BuyFreeze,
    /// Arm a freeze to bridge the next missed day
    ArmFreeze,
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let mut state = load_state(&db, &config)?;

    match action {
        StreakAction::CheckIn { today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let (outcome, events) = state.check_in(today);
            save_state(&db, &state)?;
            let output = json!({
                "outcome": outcome,
                "message": outcome.message(),
                "streak": state.streak,
                "events": events,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        StreakAction::Status => {
            println!("{}", serde_json::to_string_pretty(&state.streak)?);
        }
        StreakAction::BuyFreeze => {
            let event = state.buy_freeze();
            save_state(&db, &state)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        StreakAction::ArmFreeze => {
            let event = state.arm_freeze();
            save_state(&db, &state)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }
    Ok(())
}
