pub mod config;
pub mod drill;
pub mod feedback;
pub mod health;
pub mod players;
pub mod profile;
pub mod streak;

use kickup_core::storage::Database;
use kickup_core::{AppState, Config, StreakStore, UserProfile};
use tracing::warn;

const PROFILE_KEY: &str = "kickup_profile";

/// Load the persisted app state. Identity (name, age) always comes from
/// config; the streak comes from its own keys.
pub fn load_state(db: &Database, config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    let stored = db
        .kv_get(PROFILE_KEY)?
        .and_then(|json| match serde_json::from_str::<AppState>(&json) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(error = %e, "discarding unreadable profile");
                None
            }
        });

    let mut state = stored.unwrap_or_else(|| {
        AppState::new(UserProfile::new(
            config.profile.username.clone(),
            config.profile.age,
        ))
    });
    state.profile.username = config.profile.username.clone();
    state.profile.age = config.profile.age;
    state.streak = StreakStore::new(db).load()?;
    Ok(state)
}

pub fn save_state(db: &Database, state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(state)?;
    db.kv_set(PROFILE_KEY, &json)?;
    StreakStore::new(db).save(&state.streak)?;
    Ok(())
}
