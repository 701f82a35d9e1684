//! Player profile and the application state built around it.
//!
//! [`AppState`] is owned by the caller and passed by `&mut` into each
//! operation; nothing here is global. Every mutation reports what happened
//! as a list of [`Event`]s for the UI.

use chrono::{NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::drill::{Detector, DrillMetrics};
use crate::error::ValidationError;
use crate::events::Event;
use crate::health::{HealthCheck, SMART_REST_FATIGUE};
use crate::matchmaking::{
    visible_to, GeoPoint, MatchCandidate, MatchQuery, MatchRequest, MatchStatus, Position,
    SkillLevel,
};
use crate::streak::{CheckInOutcome, StreakRecord};

pub const BADGE_EARLY_RISER: &str = "early_riser";
pub const BADGE_STREAK_KEEPER: &str = "streak_keeper";
pub const BADGE_PRO_PROSPECT: &str = "pro_prospect";

/// XP needed for the Pro Prospect badge.
pub const PRO_PROSPECT_XP: u32 = 1000;
/// Consecutive days needed for the Streak Keeper badge.
pub const STREAK_KEEPER_DAYS: u32 = 7;
/// Drills finished before this hour count as early.
pub const EARLY_RISER_HOUR: u32 = 8;
/// Chance that a finished drill trips the simulated fatigue monitor.
pub const FATIGUE_PROBABILITY: f64 = 0.3;

const DEFAULT_FATIGUE: u8 = 5;

const STARTER_KIT: &str = "Basic Kit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub unlocked: bool,
}

fn badge_catalog() -> Vec<Badge> {
    [
        (BADGE_EARLY_RISER, "Early Riser", "Complete a drill before 8am"),
        (BADGE_STREAK_KEEPER, "Streak Keeper", "Check in 7 days in a row"),
        (BADGE_PRO_PROSPECT, "Pro Prospect", "Reach 1000 XP"),
    ]
    .into_iter()
    .map(|(id, name, description)| Badge {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        unlocked: false,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    /// Real age; drives the matchmaking privacy filter.
    pub age: u32,
    pub position: Position,
    pub skill_level: SkillLevel,
    pub xp: u32,
    /// Most touches in a single drill.
    pub best_drill_score: u32,
    /// Unlocked kit items, in unlock order.
    pub inventory: Vec<String>,
    pub badges: Vec<Badge>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>, age: u32) -> Self {
        Self {
            username: username.into(),
            age,
            position: Position::Midfielder,
            skill_level: SkillLevel::Intermediate,
            xp: 0,
            best_drill_score: 0,
            inventory: vec![STARTER_KIT.to_string()],
            badges: badge_catalog(),
        }
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b.id == id && b.unlocked)
    }
}

/// Everything the app tracks about the local player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub profile: UserProfile,
    #[serde(default)]
    pub streak: StreakRecord,
    /// Raised by a tiring drill or a high-fatigue health check; the
    /// calendar suggests rest.
    #[serde(default)]
    pub fatigue_flag: bool,
    /// Challenges sent to other players, oldest first.
    #[serde(default)]
    pub pending_matches: Vec<MatchRequest>,
}

impl AppState {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            streak: StreakRecord::default(),
            fatigue_flag: false,
            pending_matches: Vec::new(),
        }
    }

    fn unlock_badge(&mut self, id: &str) -> Option<Event> {
        let badge = self
            .profile
            .badges
            .iter_mut()
            .find(|b| b.id == id && !b.unlocked)?;
        badge.unlocked = true;
        info!(badge = %badge.name, "badge unlocked");
        Some(Event::BadgeUnlocked {
            badge_id: badge.id.clone(),
            name: badge.name.clone(),
            at: Utc::now(),
        })
    }

    fn unlock_reward(&mut self, item: String) -> Option<Event> {
        if self.profile.inventory.contains(&item) {
            return None;
        }
        self.profile.inventory.push(item.clone());
        Some(Event::RewardUnlocked {
            item,
            at: Utc::now(),
        })
    }

    pub fn gain_xp(&mut self, amount: u32) -> Vec<Event> {
        self.profile.xp = self.profile.xp.saturating_add(amount);
        if self.profile.xp >= PRO_PROSPECT_XP {
            self.unlock_badge(BADGE_PRO_PROSPECT).into_iter().collect()
        } else {
            Vec::new()
        }
    }

    /// Record a finished drill. The score is the touch count.
    ///
    /// Beating the personal best unlocks an elite kit tier of
    /// `score / 10`. `fatigue` is polled once; a hit raises the fatigue
    /// flag so the next health check opens pre-filled.
    pub fn log_drill_session(
        &mut self,
        summary: DrillMetrics,
        finished_at: NaiveDateTime,
        fatigue: &mut impl Detector,
    ) -> Vec<Event> {
        let mut events = Vec::new();
        let score = summary.detection_count;

        if score > self.profile.best_drill_score {
            self.profile.best_drill_score = score;
            events.extend(self.unlock_reward(format!("Elite Kit (Level {})", score / 10)));
        }
        if finished_at.hour() < EARLY_RISER_HOUR {
            events.extend(self.unlock_badge(BADGE_EARLY_RISER));
        }
        if fatigue.detect() {
            self.fatigue_flag = true;
            info!(score, "fatigue detected after drill");
            events.push(Event::FatigueDetected { at: Utc::now() });
        }
        events
    }

    pub fn check_in(&mut self, today: NaiveDate) -> (CheckInOutcome, Vec<Event>) {
        let outcome = self.streak.check_in(today);
        info!(?outcome, streak = self.streak.current_streak, "check-in");

        let mut events = vec![Event::StreakCheckedIn {
            outcome,
            current_streak: self.streak.current_streak,
            date: today,
            at: Utc::now(),
        }];
        if self.streak.current_streak >= STREAK_KEEPER_DAYS {
            events.extend(self.unlock_badge(BADGE_STREAK_KEEPER));
        }
        (outcome, events)
    }

    pub fn buy_freeze(&mut self) -> Event {
        self.streak.buy_freeze();
        Event::FreezePurchased {
            freeze_inventory: self.streak.freeze_inventory,
            at: Utc::now(),
        }
    }

    pub fn arm_freeze(&mut self) -> Event {
        let success = self.streak.arm_freeze();
        Event::FreezeArmed {
            success,
            freeze_inventory: self.streak.freeze_inventory,
            at: Utc::now(),
        }
    }

    /// Apply a health check. High fatigue raises the fatigue flag, any
    /// other reading clears it.
    pub fn log_health(&mut self, check: HealthCheck) -> Result<Vec<Event>, ValidationError> {
        check.validate()?;
        self.fatigue_flag = check.needs_rest();
        if self.fatigue_flag {
            Ok(vec![Event::SmartRestActivated {
                fatigue: check.fatigue,
                at: Utc::now(),
            }])
        } else {
            Ok(Vec::new())
        }
    }

    /// Fatigue level the health check starts from.
    pub fn suggested_fatigue(&self) -> u8 {
        if self.fatigue_flag {
            SMART_REST_FATIGUE
        } else {
            DEFAULT_FATIGUE
        }
    }

    /// Challenge `player` to a match.
    ///
    /// Only players this player may see in search can be challenged, and
    /// only one challenge per player can be pending.
    pub fn challenge(&mut self, player: &MatchCandidate) -> Result<Event, ValidationError> {
        if !visible_to(self.profile.age, player) {
            return Err(ValidationError::InvalidValue {
                field: "player".into(),
                message: format!("player '{}' is not available", player.id),
            });
        }
        let already_pending = self
            .pending_matches
            .iter()
            .any(|m| m.to_player_id == player.id && m.status == MatchStatus::Pending);
        if already_pending {
            return Err(ValidationError::InvalidValue {
                field: "player".into(),
                message: format!("challenge to '{}' already pending", player.id),
            });
        }

        let request = MatchRequest {
            id: format!("match-{}", self.pending_matches.len() + 1),
            from_username: self.profile.username.clone(),
            to_player_id: player.id.clone(),
            status: MatchStatus::Pending,
            created_at: Utc::now(),
        };
        info!(player = %player.display_name, "challenge sent");
        let event = Event::ChallengeSent {
            request_id: request.id.clone(),
            player_id: request.to_player_id.clone(),
            at: request.created_at,
        };
        self.pending_matches.push(request);
        Ok(event)
    }

    /// Player search around `origin` on behalf of this player.
    pub fn match_query(&self, origin: GeoPoint, radius_km: f64) -> MatchQuery {
        MatchQuery::new(origin, radius_km, self.profile.age)
    }
}
