// Team records and division standings for a season, derived from pitcher
// wins and losses.

use std::collections::{BTreeMap, HashMap};

use statline_core::model::{DivisionLayout, Divisions, StatRow};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandingsRow {
    pub team: String,
    pub record: TeamRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DivisionStandings {
    pub division: String,
    pub teams: Vec<StandingsRow>,
}

/// Sum pitcher decisions per team for one season. Multi-team summary rows
/// are skipped; their stints are counted under the real teams. Ties are the
/// scheduled sessions not accounted for by a decision.
pub fn team_records(season: &str, pitching: &[StatRow], scheduled_sessions: u32) -> HashMap<String, TeamRecord> {
    let mut decisions: HashMap<String, (u32, u32)> = HashMap::new();
    for row in pitching {
        if row.season() != Some(season) || row.is_multi_team() || row.team().is_empty() {
            continue;
        }
        let entry = decisions.entry(row.team().to_string()).or_default();
        entry.0 += row.stat("W").max(0.0).round() as u32;
        entry.1 += row.stat("L").max(0.0).round() as u32;
    }

    decisions
        .into_iter()
        .map(|(team, (wins, losses))| {
            let played = wins + losses;
            let record = TeamRecord {
                wins,
                losses,
                ties: scheduled_sessions.saturating_sub(played),
                pct: if played > 0 {
                    f64::from(wins) / f64::from(played)
                } else {
                    0.0
                },
            };
            (team, record)
        })
        .collect()
}

/// Division layout for a season, following references to other seasons.
pub fn division_layout<'a>(season: &str, divisions: &'a Divisions) -> Option<&'a BTreeMap<String, Vec<String>>> {
    let mut key = season;
    // A reference chain can be at most as long as the number of seasons.
    for _ in 0..=divisions.len() {
        match divisions.get(key)? {
            DivisionLayout::Divisions(layout) => return Some(layout),
            DivisionLayout::SameAs(other) => key = other,
        }
    }
    warn!("Division layout for {} refers back to itself", season);
    None
}

/// Standings per division, best winning percentage first. Teams listed in a
/// division without any recorded decisions show 0-0-0.
pub fn standings(
    season: &str,
    records: &HashMap<String, TeamRecord>,
    divisions: &Divisions,
) -> Vec<DivisionStandings> {
    let Some(layout) = division_layout(season, divisions) else {
        warn!("No division layout for {}", season);
        return Vec::new();
    };

    layout
        .iter()
        .map(|(division, teams)| {
            let mut rows: Vec<StandingsRow> = teams
                .iter()
                .map(|team| StandingsRow {
                    team: team.clone(),
                    record: records.get(team).copied().unwrap_or_default(),
                })
                .collect();
            rows.sort_by(|a, b| {
                b.record
                    .pct
                    .partial_cmp(&a.record.pct)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            DivisionStandings {
                division: division.clone(),
                teams: rows,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
