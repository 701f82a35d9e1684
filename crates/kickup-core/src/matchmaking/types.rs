use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Age at which a requester only sees adult players.
pub const ADULT_AGE: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Pro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "UNDER_12")]
    Under12,
    #[serde(rename = "UNDER_15")]
    Under15,
    #[serde(rename = "UNDER_18")]
    Under18,
    #[serde(rename = "ADULT")]
    Adult,
}

impl AgeGroup {
    pub fn is_minor(&self) -> bool {
        !matches!(self, AgeGroup::Adult)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

// Wire names double as CLI spellings; matching ignores case and accepts '-'
// for '_'.
macro_rules! wire_names {
    ($ty:ident, $field:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
                match normalized.as_str() {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(ValidationError::InvalidValue {
                        field: $field.into(),
                        message: format!("unknown value '{s}'"),
                    }),
                }
            }
        }
    };
}

wire_names!(SkillLevel, "skill_level", {
    Beginner => "BEGINNER",
    Intermediate => "INTERMEDIATE",
    Advanced => "ADVANCED",
    Pro => "PRO",
});

wire_names!(AgeGroup, "age_group", {
    Under12 => "UNDER_12",
    Under15 => "UNDER_15",
    Under18 => "UNDER_18",
    Adult => "ADULT",
});

wire_names!(Position, "position", {
    Goalkeeper => "GOALKEEPER",
    Defender => "DEFENDER",
    Midfielder => "MIDFIELDER",
    Forward => "FORWARD",
});

/// A point on Earth in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Boundary check for untrusted input. The filter itself never calls
    /// this.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let lat_ok = (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(ValidationError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Read-only roster entry supplied by the roster provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub id: String,
    #[serde(alias = "username")]
    pub display_name: String,
    pub skill_level: SkillLevel,
    pub age_group: AgeGroup,
    pub position: Position,
    pub location: GeoPoint,
}

/// Search parameters for [`find_players`](super::find_players).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    pub origin: GeoPoint,
    pub radius_km: f64,
    pub requester_age: u32,
    #[serde(default)]
    pub skill_level: Option<SkillLevel>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub age_group: Option<AgeGroup>,
}

impl MatchQuery {
    pub fn new(origin: GeoPoint, radius_km: f64, requester_age: u32) -> Self {
        Self {
            origin,
            radius_km,
            requester_age,
            skill_level: None,
            position: None,
            age_group: None,
        }
    }

    pub fn with_skill_level(mut self, skill_level: SkillLevel) -> Self {
        self.skill_level = Some(skill_level);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_age_group(mut self, age_group: AgeGroup) -> Self {
        self.age_group = Some(age_group);
        self
    }

    pub fn requester_is_minor(&self) -> bool {
        self.requester_age < ADULT_AGE
    }
}

/// A candidate with its distance from the query origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: MatchCandidate,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A challenge sent by the local player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub id: String,
    pub from_username: String,
    pub to_player_id: String,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}
