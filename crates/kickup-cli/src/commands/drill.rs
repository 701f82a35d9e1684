use chrono::{Local, Utc};
use clap::Subcommand;
use kickup_core::drill::{
    format_clock, Detector, DrillDriver, DrillSession, ScriptedDetector, SimulatedDetector,
};
use kickup_core::storage::Database;
use kickup_core::Config;
use serde_json::json;

use super::{load_state, save_state};

#[derive(Subcommand)]
pub enum DrillAction {
    /// Run a full drill with a simulated or scripted detector
    Run {
        /// Seconds of active drilling
        #[arg(long, default_value = "60")]
        seconds: u32,
        /// Seed for the simulated detectors (defaults to drill.seed)
        #[arg(long)]
        seed: Option<u64>,
        /// Scripted detector readings, e.g. "1,0,1"
        #[arg(long, value_delimiter = ',')]
        script: Option<Vec<u8>>,
    },
    /// List recent drills
    History {
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Show the best drill on record
    Best,
}

pub fn run(action: DrillAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        DrillAction::Run {
            seconds,
            seed,
            script,
        } => {
            let config = Config::load_or_default();
            let seed = seed.unwrap_or(config.drill.seed);
            let detector: Box<dyn Detector> = match script {
                Some(readings) => Box::new(ScriptedDetector::new(
                    readings.into_iter().map(|r| r != 0).collect::<Vec<_>>(),
                )),
                None => Box::new(SimulatedDetector::new(
                    seed,
                    config.drill.detection_probability,
                )),
            };

            let mut driver = DrillDriver::new(detector, config.drill.detection_interval_secs);
            let mut session = DrillSession::new();
            let events = driver.run_to_summary(&mut session, seconds);
            let summary = session.summary().ok_or("drill did not reach its summary")?;

            let record_id = db.record_drill(summary, Utc::now())?;
            let mut state = load_state(&db, &config)?;
            let mut fatigue =
                SimulatedDetector::new(seed.wrapping_add(1), config.drill.fatigue_probability);
            let rewards =
                state.log_drill_session(summary, Local::now().naive_local(), &mut fatigue);
            save_state(&db, &state)?;

            let output = json!({
                "id": record_id,
                "title": session.state().title(),
                "clock": format_clock(summary.elapsed_seconds),
                "summary": summary,
                "events": events,
                "rewards": rewards,
                "fatigue_flag": state.fatigue_flag,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        DrillAction::History { limit } => {
            let history = db.drill_history(limit)?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        DrillAction::Best => {
            let best = db.best_drill()?;
            println!("{}", serde_json::to_string_pretty(&best)?);
        }
    }
    Ok(())
}
