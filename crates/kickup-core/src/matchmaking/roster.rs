//! Roster sources for player search.

use std::path::Path;

use super::types::{AgeGroup, GeoPoint, MatchCandidate, Position, SkillLevel};
use crate::error::Result;

/// Read a JSON array of candidates from `path`.
pub fn load_roster(path: &Path) -> Result<Vec<MatchCandidate>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Built-in sample roster: three players around New York and one in LA.
pub fn demo_roster() -> Vec<MatchCandidate> {
    let entry = |id: &str,
                 name: &str,
                 skill_level: SkillLevel,
                 age_group: AgeGroup,
                 position: Position,
                 latitude: f64,
                 longitude: f64| MatchCandidate {
        id: id.into(),
        display_name: name.into(),
        skill_level,
        age_group,
        position,
        location: GeoPoint::new(latitude, longitude),
    };

    vec![
        entry("1", "Striker99", SkillLevel::Advanced, AgeGroup::Adult, Position::Forward, 40.7128, -74.0060),
        entry("2", "MidfieldMaestro", SkillLevel::Intermediate, AgeGroup::Under18, Position::Midfielder, 40.7138, -74.0070),
        entry("3", "GoalieOne", SkillLevel::Beginner, AgeGroup::Under12, Position::Goalkeeper, 40.7580, -73.9855),
        entry("4", "ProDefender", SkillLevel::Pro, AgeGroup::Adult, Position::Defender, 34.0522, -118.2437),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchmaking::{find_players, MatchQuery};
    use std::io::Write;

    #[test]
    fn demo_roster_from_times_square() {
        let origin = GeoPoint::new(40.7580, -73.9855);
        let minors = find_players(&MatchQuery::new(origin, 10.0, 16), &demo_roster());
        let names: Vec<&str> = minors.iter().map(|r| r.candidate.display_name.as_str()).collect();
        assert_eq!(names, vec!["GoalieOne", "MidfieldMaestro"]);
    }

    #[test]
    fn load_roster_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&demo_roster()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let roster = load_roster(file.path()).unwrap();
        assert_eq!(roster, demo_roster());
    }

    #[test]
    fn load_roster_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[{\"id\": 1}]").unwrap();
        assert!(load_roster(file.path()).is_err());
    }
}
