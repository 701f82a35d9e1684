//! Caller-owned loop that plays the role of the app's timers.
//!
//! Real time is not simulated here: one loop iteration stands for one
//! second. The app drives [`DrillSession`] from its own interval timers;
//! this driver exists for the CLI and for tests.

use tracing::debug;

use super::detector::Detector;
use super::session::{DrillEvent, DrillSession, DrillState};
use crate::events::Event;

/// Drives a [`DrillSession`] with one-second ticks and periodic detector
/// polls.
#[derive(Debug, Clone)]
pub struct DrillDriver<D> {
    detector: D,
    detection_interval_secs: u32,
}

impl<D: Detector> DrillDriver<D> {
    /// Poll `detector` every `detection_interval_secs` seconds (at least 1).
    pub fn new(detector: D, detection_interval_secs: u32) -> Self {
        Self {
            detector,
            detection_interval_secs: detection_interval_secs.max(1),
        }
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Run up to `seconds` seconds of active drilling.
    ///
    /// Stops early if the session leaves `Active`. Returns the events the
    /// session emitted.
    pub fn run_active(&mut self, session: &mut DrillSession, seconds: u32) -> Vec<Event> {
        let mut events = Vec::new();
        for second in 1..=seconds {
            if !session.is_active() {
                break;
            }
            events.extend(session.send(DrillEvent::Tick));
            if second % self.detection_interval_secs == 0 && self.detector.detect() {
                events.extend(session.send(DrillEvent::DetectionEvent));
            }
        }
        events
    }

    /// Walk a fresh session through setup, drill for `seconds`, then stop.
    ///
    /// A session that is not in `Calibrating` only receives the events
    /// valid for its current step; the rest are ignored by the machine.
    pub fn run_to_summary(&mut self, session: &mut DrillSession, seconds: u32) -> Vec<Event> {
        let mut events = Vec::new();
        for setup in [
            DrillEvent::PlaneDetected,
            DrillEvent::UserConfirm,
            DrillEvent::PoseValid,
        ] {
            events.extend(session.send(setup));
        }
        events.extend(self.run_active(session, seconds));
        events.extend(session.send(DrillEvent::Stop));

        if session.state() == DrillState::Summary {
            let metrics = session.metrics();
            debug!(
                elapsed_seconds = metrics.elapsed_seconds,
                detection_count = metrics.detection_count,
                "drill finished"
            );
        }
        events
    }
}
