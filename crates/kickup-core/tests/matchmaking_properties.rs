//! Property tests for the player search filter.

use kickup_core::matchmaking::{
    find_players, haversine_km, visible_to, AgeGroup, GeoPoint, MatchCandidate, MatchQuery,
    Position, SkillLevel, ADULT_AGE,
};
use proptest::prelude::*;

fn age_group() -> impl Strategy<Value = AgeGroup> {
    prop::sample::select(vec![
        AgeGroup::Under12,
        AgeGroup::Under15,
        AgeGroup::Under18,
        AgeGroup::Adult,
    ])
}

fn candidate() -> impl Strategy<Value = MatchCandidate> {
    (
        "[a-z]{4,8}",
        age_group(),
        -0.5f64..0.5,
        -0.5f64..0.5,
    )
        .prop_map(|(id, age_group, dlat, dlon)| MatchCandidate {
            display_name: id.to_uppercase(),
            id,
            skill_level: SkillLevel::Intermediate,
            age_group,
            position: Position::Midfielder,
            location: GeoPoint::new(51.5 + dlat, -0.12 + dlon),
        })
}

fn roster() -> impl Strategy<Value = Vec<MatchCandidate>> {
    prop::collection::vec(candidate(), 0..40)
}

const LONDON: GeoPoint = GeoPoint {
    latitude: 51.5,
    longitude: -0.12,
};

#[test]
fn minors_and_adults_never_meet() {
    proptest!(|(roster in roster(), age in 5u32..60, radius in 0.0f64..100.0)| {
        let query = MatchQuery::new(LONDON, radius, age);
        for ranked in find_players(&query, &roster) {
            prop_assert_eq!(ranked.candidate.age_group.is_minor(), age < ADULT_AGE);
        }
    });
}

#[test]
fn results_are_sorted_within_radius() {
    proptest!(|(roster in roster(), age in 5u32..60, radius in 0.0f64..100.0)| {
        let query = MatchQuery::new(LONDON, radius, age);
        let result = find_players(&query, &roster);
        for pair in result.windows(2) {
            prop_assert!(pair[0].distance_km <= pair[1].distance_km);
        }
        for ranked in &result {
            prop_assert!(ranked.distance_km <= radius);
            prop_assert_eq!(ranked.distance_km, haversine_km(LONDON, ranked.candidate.location));
        }
    });
}

#[test]
fn nothing_visible_and_close_is_dropped() {
    proptest!(|(roster in roster(), age in 5u32..60)| {
        let query = MatchQuery::new(LONDON, 1_000.0, age);
        let expected = roster.iter().filter(|c| visible_to(age, c)).count();
        prop_assert_eq!(find_players(&query, &roster).len(), expected);
    });
}
