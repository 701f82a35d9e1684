use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::drill::DrillState;
use crate::feedback::FeedbackState;
use crate::streak::CheckInOutcome;

/// Every observable change in the core produces an Event.
/// The UI renders them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    DrillStateChanged {
        from: DrillState,
        to: DrillState,
        at: DateTime<Utc>,
    },
    /// Drill reached its summary screen.
    DrillCompleted {
        elapsed_seconds: u32,
        detection_count: u32,
        at: DateTime<Utc>,
    },
    DrillReset {
        at: DateTime<Utc>,
    },
    FeedbackStateChanged {
        from: FeedbackState,
        to: FeedbackState,
        at: DateTime<Utc>,
    },
    /// Coaching tips are ready; `tip` is the one to show first.
    FeedbackReady {
        tip: String,
        tip_count: usize,
        at: DateTime<Utc>,
    },
    StreakCheckedIn {
        outcome: CheckInOutcome,
        current_streak: u32,
        date: NaiveDate,
        at: DateTime<Utc>,
    },
    FreezePurchased {
        freeze_inventory: u32,
        at: DateTime<Utc>,
    },
    FreezeArmed {
        success: bool,
        freeze_inventory: u32,
        at: DateTime<Utc>,
    },
    BadgeUnlocked {
        badge_id: String,
        name: String,
        at: DateTime<Utc>,
    },
    RewardUnlocked {
        item: String,
        at: DateTime<Utc>,
    },
    /// A finished drill looked exhausting; the next health check opens
    /// with high fatigue pre-filled.
    FatigueDetected {
        at: DateTime<Utc>,
    },
    /// Match challenge sent; it stays pending until the other player answers.
    ChallengeSent {
        request_id: String,
        player_id: String,
        at: DateTime<Utc>,
    },
    /// Health check flagged high fatigue; rest is suggested over training.
    SmartRestActivated {
        fatigue: u8,
        at: DateTime<Utc>,
    },
}
