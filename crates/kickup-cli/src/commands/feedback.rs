use clap::Subcommand;
use kickup_core::feedback::{FeedbackEvent, FeedbackSession};
use serde_json::json;

#[derive(Subcommand)]
pub enum FeedbackAction {
    /// Walk through one form analysis and print the coaching tips
    Run {
        /// Times joint tracking is lost before locking on
        #[arg(long, default_value = "0")]
        lose_tracking: u32,
    },
}

pub fn run(action: FeedbackAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        FeedbackAction::Run { lose_tracking } => {
            let mut script = vec![FeedbackEvent::Start, FeedbackEvent::BodyFound];
            for _ in 0..lose_tracking {
                script.extend([FeedbackEvent::LostTracking, FeedbackEvent::BodyFound]);
            }
            script.extend([FeedbackEvent::JointsLocked, FeedbackEvent::AnalysisComplete]);

            let mut session = FeedbackSession::new();
            let events: Vec<_> = script
                .into_iter()
                .filter_map(|event| session.send(event))
                .collect();

            let output = json!({
                "state": session.state(),
                "tracking_losses": session.tracking_losses(),
                "tips": session.tips(),
                "events": events,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
