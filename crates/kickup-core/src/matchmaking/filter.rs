//! Privacy-first player search.
//!
//! Pipeline, in order:
//! 1. privacy: minors only see minors, adults only see adults
//! 2. distance from the query origin
//! 3. radius
//! 4. optional skill / position / age-group filters
//! 5. ascending distance, ties in roster order

use tracing::debug;

use super::geo::haversine_km;
use super::types::{MatchCandidate, MatchQuery, RankedCandidate};

/// Whether a requester of `requester_age` may see `candidate` at all.
pub fn visible_to(requester_age: u32, candidate: &MatchCandidate) -> bool {
    let requester_is_minor = requester_age < super::types::ADULT_AGE;
    candidate.age_group.is_minor() == requester_is_minor
}

fn matches_attributes(query: &MatchQuery, candidate: &MatchCandidate) -> bool {
    query.skill_level.map_or(true, |s| s == candidate.skill_level)
        && query.position.map_or(true, |p| p == candidate.position)
        && query.age_group.map_or(true, |g| g == candidate.age_group)
}

/// Filter and rank `roster` for `query`.
///
/// Never panics: NaN distances (from malformed coordinates) and a NaN
/// radius simply exclude the affected candidates.
pub fn find_players(query: &MatchQuery, roster: &[MatchCandidate]) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = roster
        .iter()
        .filter(|candidate| visible_to(query.requester_age, candidate))
        .map(|candidate| RankedCandidate {
            distance_km: haversine_km(query.origin, candidate.location),
            candidate: candidate.clone(),
        })
        .filter(|r| r.distance_km <= query.radius_km)
        .filter(|r| matches_attributes(query, &r.candidate))
        .collect();

    // `sort_by` is stable, so equal distances keep roster order.
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    debug!(
        roster = roster.len(),
        matched = ranked.len(),
        radius_km = query.radius_km,
        "player search"
    );
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchmaking::types::{AgeGroup, GeoPoint, Position, SkillLevel};

    const NYC: GeoPoint = GeoPoint {
        latitude: 40.7128,
        longitude: -74.0060,
    };

    fn player(
        id: &str,
        age_group: AgeGroup,
        skill_level: SkillLevel,
        position: Position,
        latitude: f64,
        longitude: f64,
    ) -> MatchCandidate {
        MatchCandidate {
            id: id.into(),
            display_name: format!("player-{id}"),
            skill_level,
            age_group,
            position,
            location: GeoPoint::new(latitude, longitude),
        }
    }

    fn ids(result: &[RankedCandidate]) -> Vec<&str> {
        result.iter().map(|r| r.candidate.id.as_str()).collect()
    }

    #[test]
    fn adult_nearby_only() {
        let roster = vec![
            player("near-adult", AgeGroup::Adult, SkillLevel::Advanced, Position::Forward, 40.7138, -74.0070),
            player("far-minor", AgeGroup::Under18, SkillLevel::Beginner, Position::Midfielder, 40.7580, -73.9855),
        ];
        let query = MatchQuery::new(NYC, 5.0, 25);
        let result = find_players(&query, &roster);

        assert_eq!(ids(&result), vec!["near-adult"]);
        let d = result[0].distance_km;
        assert!(d > 0.12 && d < 0.15, "got {d}");
    }

    #[test]
    fn minors_never_see_adults() {
        let roster = vec![
            player("a", AgeGroup::Adult, SkillLevel::Pro, Position::Defender, 40.7128, -74.0060),
            player("b", AgeGroup::Under15, SkillLevel::Pro, Position::Defender, 40.7130, -74.0062),
            player("c", AgeGroup::Under12, SkillLevel::Beginner, Position::Goalkeeper, 40.7140, -74.0060),
        ];
        let query = MatchQuery::new(NYC, 100.0, 14).with_age_group(AgeGroup::Adult);
        assert!(find_players(&query, &roster).is_empty());

        let query = MatchQuery::new(NYC, 100.0, 14);
        assert_eq!(ids(&find_players(&query, &roster)), vec!["b", "c"]);
    }

    #[test]
    fn seventeen_vs_eighteen() {
        let roster = vec![
            player("minor", AgeGroup::Under18, SkillLevel::Intermediate, Position::Midfielder, 40.7128, -74.0060),
            player("adult", AgeGroup::Adult, SkillLevel::Intermediate, Position::Midfielder, 40.7128, -74.0060),
        ];
        assert_eq!(ids(&find_players(&MatchQuery::new(NYC, 1.0, 17), &roster)), vec!["minor"]);
        assert_eq!(ids(&find_players(&MatchQuery::new(NYC, 1.0, 18), &roster)), vec!["adult"]);
    }

    #[test]
    fn attribute_filters_narrow() {
        let roster = vec![
            player("fw-pro", AgeGroup::Adult, SkillLevel::Pro, Position::Forward, 40.7129, -74.0060),
            player("gk-pro", AgeGroup::Adult, SkillLevel::Pro, Position::Goalkeeper, 40.7130, -74.0060),
            player("fw-beg", AgeGroup::Adult, SkillLevel::Beginner, Position::Forward, 40.7131, -74.0060),
        ];
        let query = MatchQuery::new(NYC, 10.0, 30)
            .with_skill_level(SkillLevel::Pro)
            .with_position(Position::Forward);
        assert_eq!(ids(&find_players(&query, &roster)), vec!["fw-pro"]);
    }

    #[test]
    fn sorted_by_distance_with_stable_ties() {
        let roster = vec![
            player("far", AgeGroup::Adult, SkillLevel::Pro, Position::Forward, 40.75, -74.0060),
            player("tie-1", AgeGroup::Adult, SkillLevel::Pro, Position::Forward, 40.72, -74.0060),
            player("near", AgeGroup::Adult, SkillLevel::Pro, Position::Forward, 40.7130, -74.0060),
            player("tie-2", AgeGroup::Adult, SkillLevel::Pro, Position::Forward, 40.72, -74.0060),
        ];
        let result = find_players(&MatchQuery::new(NYC, 50.0, 40), &roster);
        assert_eq!(ids(&result), vec!["near", "tie-1", "tie-2", "far"]);
    }

    #[test]
    fn radius_is_inclusive() {
        let roster = vec![player("here", AgeGroup::Adult, SkillLevel::Pro, Position::Forward, 40.7128, -74.0060)];
        assert_eq!(find_players(&MatchQuery::new(NYC, 0.0, 30), &roster).len(), 1);
    }

    #[test]
    fn malformed_input_does_not_panic() {
        let roster = vec![
            player("nan", AgeGroup::Adult, SkillLevel::Pro, Position::Forward, f64::NAN, 0.0),
            player("wild", AgeGroup::Adult, SkillLevel::Pro, Position::Forward, 500.0, -900.0),
        ];
        let result = find_players(&MatchQuery::new(NYC, 50_000.0, 30), &roster);
        assert_eq!(ids(&result), vec!["wild"]);

        assert!(find_players(&MatchQuery::new(NYC, f64::NAN, 30), &roster).is_empty());
    }

    #[test]
    fn roster_is_not_mutated() {
        let roster = vec![player("x", AgeGroup::Adult, SkillLevel::Pro, Position::Forward, 40.7128, -74.0060)];
        let before = roster.clone();
        let _ = find_players(&MatchQuery::new(NYC, 5.0, 30), &roster);
        assert_eq!(roster, before);
    }
}
