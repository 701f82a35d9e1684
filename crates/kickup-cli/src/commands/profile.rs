use clap::Subcommand;
use kickup_core::storage::Database;
use kickup_core::Config;

use super::{load_state, save_state};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print profile, streak and fatigue flag as JSON
    Show,
    /// Award XP
    GainXp {
        amount: u32,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let mut state = load_state(&db, &config)?;

    match action {
        ProfileAction::Show => {
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        ProfileAction::GainXp { amount } => {
            let events = state.gain_xp(amount);
            save_state(&db, &state)?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
    }
    Ok(())
}
