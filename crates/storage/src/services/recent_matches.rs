use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Match, Matchweek, Schedule};

/// Played matches of one competition's latest played round.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentMatches {
    pub competition_id: Uuid,
    pub season: String,
    pub matchweek_id: String,
    pub matchweek_name: String,
    pub matches: Vec<Match>,
}

/// Last matchweek, in fixture order, with at least one played match.
pub fn latest_played_matchweek(schedule: &Schedule) -> Option<&Matchweek> {
    schedule
        .matchweeks()
        .iter()
        .rev()
        .find(|mw| mw.has_played_matches())
}

/// Latest played matches grouped per competition, in the order the
/// competitions first appear. Competitions without a played match are left
/// out.
pub fn latest_played_matches(schedules: &[Schedule]) -> Vec<RecentMatches> {
    let mut groups: Vec<RecentMatches> = Vec::new();
    let mut positions: HashMap<Uuid, usize> = HashMap::new();

    for schedule in schedules {
        let Some(matchweek) = latest_played_matchweek(schedule) else {
            continue;
        };

        let played = matchweek.matches.iter().filter(|m| m.is_played()).cloned();

        match positions.get(&schedule.competition_id) {
            Some(&index) => groups[index].matches.extend(played),
            None => {
                positions.insert(schedule.competition_id, groups.len());
                groups.push(RecentMatches {
                    competition_id: schedule.competition_id,
                    season: schedule.season.clone(),
                    matchweek_id: matchweek.id.clone(),
                    matchweek_name: matchweek.name.clone(),
                    matches: played.collect(),
                });
            }
        }
    }

    groups
}
