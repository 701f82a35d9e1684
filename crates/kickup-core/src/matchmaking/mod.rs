mod filter;
mod geo;
mod roster;
mod types;

pub use filter::{find_players, visible_to};
pub use geo::{haversine_km, EARTH_RADIUS_KM};
pub use roster::{demo_roster, load_roster};
pub use types::{
    AgeGroup, GeoPoint, MatchCandidate, MatchQuery, MatchRequest, MatchStatus, Position,
    RankedCandidate, SkillLevel, ADULT_AGE,
};
