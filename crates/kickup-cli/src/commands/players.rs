use std::path::PathBuf;

use clap::Subcommand;
use kickup_core::matchmaking::{
    demo_roster, find_players, load_roster, AgeGroup, GeoPoint, MatchCandidate, MatchQuery,
    Position, SkillLevel,
};
use kickup_core::storage::Database;
use kickup_core::Config;
use serde_json::json;

use super::{load_state, save_state};

#[derive(Subcommand)]
pub enum PlayersAction {
    /// Find visible players near a location, nearest first
    Find {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Search radius in km (defaults to matchmaking.default_radius_km)
        #[arg(long)]
        radius: Option<f64>,
        /// Requester age (defaults to profile.age)
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        skill: Option<SkillLevel>,
        #[arg(long)]
        position: Option<Position>,
        #[arg(long)]
        age_group: Option<AgeGroup>,
        /// JSON roster file (defaults to the built-in sample roster)
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Challenge a player from the roster to a match
    Challenge {
        /// Player id
        id: String,
        /// JSON roster file (defaults to the built-in sample roster)
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// List challenges sent so far
    Pending,
}

fn roster_from(path: Option<PathBuf>) -> Result<Vec<MatchCandidate>, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => load_roster(&path)?,
        None => demo_roster(),
    })
}

pub fn run(action: PlayersAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlayersAction::Find {
            lat,
            lon,
            radius,
            age,
            skill,
            position,
            age_group,
            roster,
        } => {
            let config = Config::load_or_default();
            let origin = GeoPoint::new(lat, lon);
            origin.validate()?;

            let roster = roster_from(roster)?;

            let mut query = MatchQuery::new(
                origin,
                radius.unwrap_or(config.matchmaking.default_radius_km),
                age.unwrap_or(config.profile.age),
            );
            query.skill_level = skill;
            query.position = position;
            query.age_group = age_group;

            let matches = find_players(&query, &roster);
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
        PlayersAction::Challenge { id, roster } => {
            let roster = roster_from(roster)?;
            let player = roster
                .iter()
                .find(|p| p.id == id)
                .ok_or_else(|| format!("no player with id '{id}'"))?;

            let db = Database::open()?;
            let config = Config::load_or_default();
            let mut state = load_state(&db, &config)?;
            let event = state.challenge(player)?;
            save_state(&db, &state)?;

            let output = json!({
                "player": player.display_name,
                "event": event,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        PlayersAction::Pending => {
            let db = Database::open()?;
            let config = Config::load_or_default();
            let state = load_state(&db, &config)?;
            println!("{}", serde_json::to_string_pretty(&state.pending_matches)?);
        }
    }
    Ok(())
}
