//! Form feedback session.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> ScanningBody -> DetectingJoints -> AnalyzingForm -> GeneratingFeedback
//!              ^                 |                                  |
//!              +--LostTracking---+                                  |
//!              +-------------------------Restart--------------------+
//! Idle <-------------------------------Dismiss----------------------+
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::tips::{generate_tips, CoachingTip};
use crate::events::Event;
use crate::machine::{Flow, Machine, Rule, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackState {
    Idle,
    ScanningBody,
    DetectingJoints,
    AnalyzingForm,
    GeneratingFeedback,
}

impl FeedbackState {
    pub const ALL: [FeedbackState; 5] = [
        FeedbackState::Idle,
        FeedbackState::ScanningBody,
        FeedbackState::DetectingJoints,
        FeedbackState::AnalyzingForm,
        FeedbackState::GeneratingFeedback,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackEvent {
    Start,
    BodyFound,
    JointsLocked,
    LostTracking,
    AnalysisComplete,
    Dismiss,
    Restart,
}

impl FeedbackEvent {
    pub const ALL: [FeedbackEvent; 7] = [
        FeedbackEvent::Start,
        FeedbackEvent::BodyFound,
        FeedbackEvent::JointsLocked,
        FeedbackEvent::LostTracking,
        FeedbackEvent::AnalysisComplete,
        FeedbackEvent::Dismiss,
        FeedbackEvent::Restart,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackEffect {
    BeginScan,
    CountTrackingLoss,
    GenerateTips,
    ClearTips,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackContext {
    pub tips: Vec<CoachingTip>,
    /// Times joint tracking dropped back to body scanning in this attempt.
    pub tracking_losses: u32,
}

pub struct FeedbackFlow;

impl Flow for FeedbackFlow {
    type State = FeedbackState;
    type Event = FeedbackEvent;
    type Effect = FeedbackEffect;
    type Context = FeedbackContext;

    const NAME: &'static str = "feedback";
    const INITIAL: FeedbackState = FeedbackState::Idle;
    const RULES: &'static [Rule<FeedbackState, FeedbackEvent, FeedbackEffect>] = &[
        Rule {
            from: FeedbackState::Idle,
            on: FeedbackEvent::Start,
            to: FeedbackState::ScanningBody,
            effects: &[FeedbackEffect::BeginScan],
        },
        Rule {
            from: FeedbackState::ScanningBody,
            on: FeedbackEvent::BodyFound,
            to: FeedbackState::DetectingJoints,
            effects: &[],
        },
        Rule {
            from: FeedbackState::DetectingJoints,
            on: FeedbackEvent::JointsLocked,
            to: FeedbackState::AnalyzingForm,
            effects: &[],
        },
        Rule {
            from: FeedbackState::DetectingJoints,
            on: FeedbackEvent::LostTracking,
            to: FeedbackState::ScanningBody,
            effects: &[FeedbackEffect::CountTrackingLoss],
        },
        Rule {
            from: FeedbackState::AnalyzingForm,
            on: FeedbackEvent::AnalysisComplete,
            to: FeedbackState::GeneratingFeedback,
            effects: &[FeedbackEffect::GenerateTips],
        },
        Rule {
            from: FeedbackState::GeneratingFeedback,
            on: FeedbackEvent::Dismiss,
            to: FeedbackState::Idle,
            effects: &[FeedbackEffect::ClearTips],
        },
        Rule {
            from: FeedbackState::GeneratingFeedback,
            on: FeedbackEvent::Restart,
            to: FeedbackState::ScanningBody,
            effects: &[FeedbackEffect::ClearTips, FeedbackEffect::BeginScan],
        },
    ];

    fn apply(context: &mut FeedbackContext, effect: FeedbackEffect) {
        match effect {
            FeedbackEffect::BeginScan => context.tracking_losses = 0,
            FeedbackEffect::CountTrackingLoss => {
                context.tracking_losses = context.tracking_losses.saturating_add(1)
            }
            FeedbackEffect::GenerateTips => context.tips = generate_tips(),
            FeedbackEffect::ClearTips => context.tips.clear(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackSession {
    machine: Machine<FeedbackFlow>,
}

impl FeedbackSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FeedbackState {
        self.machine.state()
    }

    pub fn tips(&self) -> &[CoachingTip] {
        &self.machine.context().tips
    }

    /// The tip to show first while feedback is on screen.
    pub fn current_tip(&self) -> Option<&CoachingTip> {
        self.tips().first()
    }

    pub fn tracking_losses(&self) -> u32 {
        self.machine.context().tracking_losses
    }

    pub fn snapshot(&self) -> Snapshot<FeedbackState, FeedbackContext> {
        self.machine.snapshot()
    }

    pub fn send(&mut self, event: FeedbackEvent) -> Option<Event> {
        let from = self.state();
        let effects = self.machine.send(event)?;
        let to = self.state();

        if effects.contains(&FeedbackEffect::GenerateTips) {
            if let Some(tip) = self.current_tip() {
                return Some(Event::FeedbackReady {
                    tip: tip.text.clone(),
                    tip_count: self.tips().len(),
                    at: Utc::now(),
                });
            }
        }
        (from != to).then(|| Event::FeedbackStateChanged {
            from,
            to,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::tips::TipFocus;
    use crate::machine::transition;

    fn analyzed() -> FeedbackSession {
        let mut session = FeedbackSession::new();
        for event in [
            FeedbackEvent::Start,
            FeedbackEvent::BodyFound,
            FeedbackEvent::JointsLocked,
            FeedbackEvent::AnalysisComplete,
        ] {
            session.send(event);
        }
        session
    }

    #[test]
    fn full_pass_generates_tips() {
        let session = analyzed();
        assert_eq!(session.state(), FeedbackState::GeneratingFeedback);
        assert_eq!(session.tips().len(), 3);
        assert_eq!(session.current_tip().map(|t| t.focus), Some(TipFocus::Balance));
    }

    #[test]
    fn analysis_complete_reports_first_tip() {
        let mut session = FeedbackSession::new();
        session.send(FeedbackEvent::Start);
        session.send(FeedbackEvent::BodyFound);
        session.send(FeedbackEvent::JointsLocked);
        match session.send(FeedbackEvent::AnalysisComplete) {
            Some(Event::FeedbackReady { tip, tip_count, .. }) => {
                assert_eq!(tip, "Stay light on the balls of your feet");
                assert_eq!(tip_count, 3);
            }
            other => panic!("Expected FeedbackReady, got {other:?}"),
        }
    }

    #[test]
    fn lost_tracking_regresses_to_scanning() {
        let mut session = FeedbackSession::new();
        session.send(FeedbackEvent::Start);
        session.send(FeedbackEvent::BodyFound);
        session.send(FeedbackEvent::LostTracking);
        assert_eq!(session.state(), FeedbackState::ScanningBody);
        assert_eq!(session.tracking_losses(), 1);

        session.send(FeedbackEvent::BodyFound);
        session.send(FeedbackEvent::LostTracking);
        assert_eq!(session.tracking_losses(), 2);
    }

    #[test]
    fn dismiss_returns_to_idle_and_clears_tips() {
        let mut session = analyzed();
        session.send(FeedbackEvent::Dismiss);
        assert_eq!(session.state(), FeedbackState::Idle);
        assert!(session.current_tip().is_none());
    }

    #[test]
    fn restart_rescans_without_stale_tips() {
        let mut session = analyzed();
        session.send(FeedbackEvent::Restart);
        assert_eq!(session.state(), FeedbackState::ScanningBody);
        assert!(session.tips().is_empty());
        assert_eq!(session.tracking_losses(), 0);
    }

    #[test]
    fn lost_tracking_ignored_outside_joint_detection() {
        let mut session = analyzed();
        let before = session.snapshot();
        assert!(session.send(FeedbackEvent::LostTracking).is_none());
        assert_eq!(session.snapshot(), before);
    }

    // Path from Idle that ends in each state.
    fn session_in(state: FeedbackState) -> FeedbackSession {
        let path: &[FeedbackEvent] = match state {
            FeedbackState::Idle => &[],
            FeedbackState::ScanningBody => &[FeedbackEvent::Start],
            FeedbackState::DetectingJoints => &[FeedbackEvent::Start, FeedbackEvent::BodyFound],
            FeedbackState::AnalyzingForm => &[
                FeedbackEvent::Start,
                FeedbackEvent::BodyFound,
                FeedbackEvent::JointsLocked,
            ],
            FeedbackState::GeneratingFeedback => return analyzed(),
        };
        let mut session = FeedbackSession::new();
        for &event in path {
            session.send(event);
        }
        assert_eq!(session.state(), state);
        session
    }

    #[test]
    fn invalid_events_leave_session_untouched() {
        for state in FeedbackState::ALL {
            for event in FeedbackEvent::ALL {
                if transition::<FeedbackFlow>(state, event).is_some() {
                    continue;
                }
                let mut session = session_in(state);
                let before = session.snapshot();
                assert!(session.send(event).is_none(), "{state:?} accepted {event:?}");
                assert_eq!(session.snapshot(), before, "{state:?} changed on {event:?}");
            }
        }
    }
}
