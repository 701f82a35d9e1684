//! Day-based login streak with freeze tokens.
//!
//! A check-in on the day after the last one extends the streak. A longer gap
//! resets it to 1 unless a freeze is armed, in which case the freeze is
//! consumed and the streak still grows by one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Persisted streak state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub current_streak: u32,
    /// Day of the last counted check-in; `None` before the first one.
    pub last_check_in: Option<NaiveDate>,
    /// Freezes bought but not armed.
    pub freeze_inventory: u32,
    /// A freeze is waiting to bridge the next gap.
    pub freeze_armed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckInOutcome {
    AlreadyCheckedInToday,
    FirstCheckIn,
    Extended,
    SavedByFreeze,
    Reset,
}

impl CheckInOutcome {
    /// Short message for the home screen banner.
    pub fn message(&self) -> &'static str {
        match self {
            CheckInOutcome::AlreadyCheckedInToday => "Already checked in today",
            CheckInOutcome::FirstCheckIn => "Streak started!",
            CheckInOutcome::Extended => "Streak extended!",
            CheckInOutcome::SavedByFreeze => "Streak saved by freeze!",
            CheckInOutcome::Reset => "Streak lost. Back to day 1",
        }
    }
}

/// Apply today's check-in to `record`.
///
/// Dates are compared at day granularity. A `today` earlier than the last
/// check-in leaves the record untouched.
pub fn check_in(today: NaiveDate, record: StreakRecord) -> (StreakRecord, CheckInOutcome) {
    let Some(last) = record.last_check_in else {
        let next = StreakRecord {
            current_streak: 1,
            last_check_in: Some(today),
            ..record
        };
        return (next, CheckInOutcome::FirstCheckIn);
    };

    let gap_days = (today - last).num_days();
    if gap_days <= 0 {
        if gap_days < 0 {
            warn!(%today, %last, "check-in date precedes last check-in; ignoring");
        }
        return (record, CheckInOutcome::AlreadyCheckedInToday);
    }

    let mut next = StreakRecord {
        last_check_in: Some(today),
        ..record
    };
    let outcome = if gap_days == 1 {
        next.current_streak = record.current_streak.saturating_add(1);
        CheckInOutcome::Extended
    } else if record.freeze_armed {
        next.freeze_armed = false;
        next.current_streak = record.current_streak.saturating_add(1);
        CheckInOutcome::SavedByFreeze
    } else {
        next.current_streak = 1;
        CheckInOutcome::Reset
    };
    (next, outcome)
}

/// Add one freeze to the inventory. Paying for it happens elsewhere.
pub fn buy_freeze(record: StreakRecord) -> StreakRecord {
    StreakRecord {
        freeze_inventory: record.freeze_inventory.saturating_add(1),
        ..record
    }
}

/// Move one freeze from the inventory to armed.
///
/// Fails without touching the record when the inventory is empty or a
/// freeze is already armed.
pub fn arm_freeze(record: StreakRecord) -> (StreakRecord, bool) {
    if record.freeze_inventory == 0 || record.freeze_armed {
        return (record, false);
    }
    let next = StreakRecord {
        freeze_inventory: record.freeze_inventory - 1,
        freeze_armed: true,
        ..record
    };
    (next, true)
}

impl StreakRecord {
    /// In-place form of [`check_in`].
    pub fn check_in(&mut self, today: NaiveDate) -> CheckInOutcome {
        let (next, outcome) = check_in(today, *self);
        *self = next;
        outcome
    }

    pub fn buy_freeze(&mut self) {
        *self = buy_freeze(*self);
    }

    pub fn arm_freeze(&mut self) -> bool {
        let (next, armed) = arm_freeze(*self);
        *self = next;
        armed
    }
}
