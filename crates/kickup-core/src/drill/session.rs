//! Guided drill session.
//!
//! ## State Transitions
//!
//! ```text
//! Calibrating -> PlacingAnchor -> FittingBody -> Active -> Summary
//!                                                  ^ Tick / DetectionEvent
//! Summary --Reset--> Calibrating
//! ```
//!
//! Metrics only move while `Active` and are frozen once `Summary` is reached.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::machine::{Flow, Machine, Rule, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillState {
    Calibrating,
    PlacingAnchor,
    FittingBody,
    Active,
    Summary,
}

impl DrillState {
    pub const ALL: [DrillState; 5] = [
        DrillState::Calibrating,
        DrillState::PlacingAnchor,
        DrillState::FittingBody,
        DrillState::Active,
        DrillState::Summary,
    ];

    /// Screen title for this step.
    pub fn title(&self) -> &'static str {
        match self {
            DrillState::Calibrating => "Calibration",
            DrillState::PlacingAnchor => "Place Anchor",
            DrillState::FittingBody => "Body Fit",
            DrillState::Active => "Drill Active",
            DrillState::Summary => "Great Session!",
        }
    }

    /// Instruction shown to the player, if the step needs one.
    pub fn instructions(&self) -> Option<&'static str> {
        match self {
            DrillState::Calibrating => Some("Point camera at the floor"),
            DrillState::PlacingAnchor => Some("Tap to place the ball anchor"),
            DrillState::FittingBody => Some("Stand in the frame"),
            DrillState::Active | DrillState::Summary => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillEvent {
    PlaneDetected,
    UserConfirm,
    PoseValid,
    /// One second of active drilling elapsed.
    Tick,
    /// The detector saw a touch on the ball.
    DetectionEvent,
    Stop,
    Reset,
}

impl DrillEvent {
    pub const ALL: [DrillEvent; 7] = [
        DrillEvent::PlaneDetected,
        DrillEvent::UserConfirm,
        DrillEvent::PoseValid,
        DrillEvent::Tick,
        DrillEvent::DetectionEvent,
        DrillEvent::Stop,
        DrillEvent::Reset,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillEffect {
    CountSecond,
    CountDetection,
    /// Session ended; the metrics are final.
    Finish,
    ClearMetrics,
}

/// Counters accumulated while the drill is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillMetrics {
    pub elapsed_seconds: u32,
    pub detection_count: u32,
}

/// Transition table of the juggling drill.
pub struct DrillFlow;

impl Flow for DrillFlow {
    type State = DrillState;
    type Event = DrillEvent;
    type Effect = DrillEffect;
    type Context = DrillMetrics;

    const NAME: &'static str = "drill";
    const INITIAL: DrillState = DrillState::Calibrating;
    const RULES: &'static [Rule<DrillState, DrillEvent, DrillEffect>] = &[
        Rule {
            from: DrillState::Calibrating,
            on: DrillEvent::PlaneDetected,
            to: DrillState::PlacingAnchor,
            effects: &[],
        },
        Rule {
            from: DrillState::PlacingAnchor,
            on: DrillEvent::UserConfirm,
            to: DrillState::FittingBody,
            effects: &[],
        },
        Rule {
            from: DrillState::FittingBody,
            on: DrillEvent::PoseValid,
            to: DrillState::Active,
            effects: &[],
        },
        Rule {
            from: DrillState::Active,
            on: DrillEvent::Tick,
            to: DrillState::Active,
            effects: &[DrillEffect::CountSecond],
        },
        Rule {
            from: DrillState::Active,
            on: DrillEvent::DetectionEvent,
            to: DrillState::Active,
            effects: &[DrillEffect::CountDetection],
        },
        Rule {
            from: DrillState::Active,
            on: DrillEvent::Stop,
            to: DrillState::Summary,
            effects: &[DrillEffect::Finish],
        },
        Rule {
            from: DrillState::Summary,
            on: DrillEvent::Reset,
            to: DrillState::Calibrating,
            effects: &[DrillEffect::ClearMetrics],
        },
    ];

    fn apply(metrics: &mut DrillMetrics, effect: DrillEffect) {
        match effect {
            DrillEffect::CountSecond => {
                metrics.elapsed_seconds = metrics.elapsed_seconds.saturating_add(1)
            }
            DrillEffect::CountDetection => {
                metrics.detection_count = metrics.detection_count.saturating_add(1)
            }
            DrillEffect::ClearMetrics => *metrics = DrillMetrics::default(),
            DrillEffect::Finish => {}
        }
    }
}

/// A drill session driven one event at a time by an external timer and
/// detector.
#[derive(Debug, Clone, Default)]
pub struct DrillSession {
    machine: Machine<DrillFlow>,
}

impl DrillSession {
    /// Start a session in `Calibrating` with zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> DrillState {
        self.machine.state()
    }

    pub fn metrics(&self) -> DrillMetrics {
        *self.machine.context()
    }

    pub fn is_active(&self) -> bool {
        self.state() == DrillState::Active
    }

    /// Final metrics, available once the session reached `Summary`.
    pub fn summary(&self) -> Option<DrillMetrics> {
        (self.state() == DrillState::Summary).then(|| self.metrics())
    }

    pub fn snapshot(&self) -> Snapshot<DrillState, DrillMetrics> {
        self.machine.snapshot()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Feed one event. Returns an [`Event`] when the session visibly
    /// changed step; counters ticking inside `Active` and ignored events
    /// return `None`.
    pub fn send(&mut self, event: DrillEvent) -> Option<Event> {
        let from = self.state();
        let effects = self.machine.send(event)?;
        let to = self.state();

        if effects.contains(&DrillEffect::Finish) {
            let metrics = self.metrics();
            return Some(Event::DrillCompleted {
                elapsed_seconds: metrics.elapsed_seconds,
                detection_count: metrics.detection_count,
                at: Utc::now(),
            });
        }
        if effects.contains(&DrillEffect::ClearMetrics) {
            return Some(Event::DrillReset { at: Utc::now() });
        }
        (from != to).then(|| Event::DrillStateChanged {
            from,
            to,
            at: Utc::now(),
        })
    }
}

/// Format seconds as `m:ss` for the timer readout.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::transition;

    fn active_session() -> DrillSession {
        let mut session = DrillSession::new();
        session.send(DrillEvent::PlaneDetected);
        session.send(DrillEvent::UserConfirm);
        session.send(DrillEvent::PoseValid);
        session
    }

    #[test]
    fn walks_setup_steps_in_order() {
        let mut session = DrillSession::new();
        assert_eq!(session.state(), DrillState::Calibrating);

        assert!(session.send(DrillEvent::PlaneDetected).is_some());
        assert_eq!(session.state(), DrillState::PlacingAnchor);

        assert!(session.send(DrillEvent::UserConfirm).is_some());
        assert_eq!(session.state(), DrillState::FittingBody);

        assert!(session.send(DrillEvent::PoseValid).is_some());
        assert_eq!(session.state(), DrillState::Active);
    }

    #[test]
    fn ticks_and_detections_accumulate_while_active() {
        let mut session = active_session();
        for _ in 0..3 {
            assert!(session.send(DrillEvent::Tick).is_none());
        }
        session.send(DrillEvent::DetectionEvent);
        assert_eq!(
            session.metrics(),
            DrillMetrics {
                elapsed_seconds: 3,
                detection_count: 1
            }
        );
    }

    #[test]
    fn stop_reports_final_metrics() {
        let mut session = active_session();
        session.send(DrillEvent::Tick);
        session.send(DrillEvent::DetectionEvent);
        session.send(DrillEvent::DetectionEvent);

        match session.send(DrillEvent::Stop) {
            Some(Event::DrillCompleted {
                elapsed_seconds,
                detection_count,
                ..
            }) => {
                assert_eq!(elapsed_seconds, 1);
                assert_eq!(detection_count, 2);
            }
            other => panic!("Expected DrillCompleted, got {other:?}"),
        }
        assert_eq!(session.summary().map(|m| m.detection_count), Some(2));
    }

    #[test]
    fn metrics_frozen_after_summary() {
        let mut session = active_session();
        session.send(DrillEvent::Tick);
        session.send(DrillEvent::Stop);
        let frozen = session.metrics();

        assert!(session.send(DrillEvent::Tick).is_none());
        assert!(session.send(DrillEvent::DetectionEvent).is_none());
        assert_eq!(session.metrics(), frozen);
        assert_eq!(session.state(), DrillState::Summary);
    }

    #[test]
    fn counters_ignored_before_active() {
        let mut session = DrillSession::new();
        session.send(DrillEvent::Tick);
        session.send(DrillEvent::DetectionEvent);
        session.send(DrillEvent::Stop);
        assert_eq!(session.state(), DrillState::Calibrating);
        assert_eq!(session.metrics(), DrillMetrics::default());
    }

    #[test]
    fn reset_only_from_summary() {
        let mut session = active_session();
        session.send(DrillEvent::Tick);
        assert!(session.send(DrillEvent::Reset).is_none());
        assert_eq!(session.state(), DrillState::Active);

        session.send(DrillEvent::Stop);
        assert!(matches!(
            session.send(DrillEvent::Reset),
            Some(Event::DrillReset { .. })
        ));
        assert_eq!(session.state(), DrillState::Calibrating);
        assert_eq!(session.metrics(), DrillMetrics::default());
    }

    #[test]
    fn table_is_deterministic() {
        for state in DrillState::ALL {
            for event in DrillEvent::ALL {
                let matches = DrillFlow::RULES
                    .iter()
                    .filter(|r| r.from == state && r.on == event)
                    .count();
                assert!(matches <= 1, "{state:?} x {event:?} has {matches} rules");
                assert_eq!(
                    transition::<DrillFlow>(state, event).is_some(),
                    matches == 1
                );
            }
        }
    }

    #[test]
    fn summary_is_only_left_by_reset() {
        for event in DrillEvent::ALL {
            let next = transition::<DrillFlow>(DrillState::Summary, event);
            if event == DrillEvent::Reset {
                assert_eq!(next.map(|t| t.to), Some(DrillState::Calibrating));
            } else {
                assert!(next.is_none());
            }
        }
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(75), "1:15");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn step_copy() {
        assert_eq!(DrillState::Calibrating.title(), "Calibration");
        assert_eq!(
            DrillState::PlacingAnchor.instructions(),
            Some("Tap to place the ball anchor")
        );
        assert!(DrillState::Active.instructions().is_none());
    }
}
