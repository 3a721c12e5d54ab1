// League data model: stat rows, season metadata, franchise history,
// divisions and the player directory.

use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet, HashMap};

// ---------------------------------------------------------------------------
// Sides
// ---------------------------------------------------------------------------

/// Which dataset a row (or a leaderboard) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Hitting,
    Pitching,
}

impl Side {
    /// Column holding the player id in the compact stat table.
    pub fn id_column(&self) -> &'static str {
        match self {
            Side::Hitting => "Hitter ID",
            Side::Pitching => "Pitcher ID",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Hitting => "batting",
            Side::Pitching => "pitching",
        }
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Aggregation granularity of a stat row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Career,
    /// Summed across one franchise's history; `team` holds the franchise key.
    Franchise,
    /// Summed by player archetype; `player_type` holds the archetype.
    Type,
    /// A single season, e.g. `"S10"`.
    Season(String),
}

impl Scope {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Career" => Scope::Career,
            "Franchise" => Scope::Franchise,
            "Type" => Scope::Type,
            other => Scope::Season(other.to_string()),
        }
    }

    pub fn season(&self) -> Option<&str> {
        match self {
            Scope::Season(s) => Some(s),
            _ => None,
        }
    }
}

/// Numeric part of a season identifier (`"S10"` -> 10).
pub fn season_number(season: &str) -> Option<u32> {
    season.get(1..)?.parse().ok()
}

/// Sort season identifiers by their number, newest first. Identifiers without
/// a number sort last.
pub fn sort_seasons_desc(seasons: &mut [String]) {
    seasons.sort_by(|a, b| season_number(b).cmp(&season_number(a)));
}

// ---------------------------------------------------------------------------
// Stat rows
// ---------------------------------------------------------------------------

/// One aggregated record for a player over a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub player_id: i64,
    pub scope: Scope,
    /// Team abbreviation, a multi-team marker such as `"2TM"`, or a franchise
    /// key for `Franchise` rows.
    pub team: Option<String>,
    pub player_type: Option<String>,
    /// Partial-season stint of a traded player; never ranked on its own
    /// unless a team filter asks for it.
    pub is_sub_row: bool,
    pub stats: HashMap<String, f64>,
}

impl StatRow {
    /// Numeric value of a field; missing fields read as zero.
    pub fn stat(&self, key: &str) -> f64 {
        self.stats.get(key).copied().unwrap_or(0.0)
    }

    pub fn team(&self) -> &str {
        self.team.as_deref().unwrap_or("")
    }

    pub fn season(&self) -> Option<&str> {
        self.scope.season()
    }

    /// True for the season summary row of a player who appeared for several
    /// teams (`"2TM"`, `"3TM"`, ...).
    pub fn is_multi_team(&self) -> bool {
        let team = self.team();
        team.len() > 2
            && team.ends_with("TM")
            && team[..team.len() - 2].chars().all(|c| c.is_ascii_digit())
    }
}

// ---------------------------------------------------------------------------
// Season metadata
// ---------------------------------------------------------------------------

/// The in-progress season and how many of its sessions have been played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSeason {
    pub season: String,
    pub sessions_completed: u32,
}

#[derive(Debug, Clone, Default)]
pub struct SeasonInfo {
    /// Scheduled sessions per season identifier.
    pub sessions: HashMap<String, u32>,
    pub current: Option<CurrentSeason>,
}

impl SeasonInfo {
    /// Scheduled sessions for a season, zero when unknown.
    pub fn scheduled(&self, season: &str) -> u32 {
        self.sessions.get(season).copied().unwrap_or(0)
    }

    pub fn is_current(&self, season: &str) -> bool {
        self.current.as_ref().is_some_and(|c| c.season == season)
    }
}

// ---------------------------------------------------------------------------
// Franchise history
// ---------------------------------------------------------------------------

/// Sentinel end season meaning "still active".
pub const OPEN_ENDED_SEASON: u32 = 9999;

/// One interval of a franchise's history under a single abbreviation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamEra {
    pub abbr: String,
    pub name: String,
    pub start: u32,
    /// `None` while the era is still active.
    #[serde(deserialize_with = "deserialize_era_end", default)]
    pub end: Option<u32>,
    #[serde(default)]
    pub logo_light: Option<String>,
    #[serde(default)]
    pub logo_dark: Option<String>,
}

impl TeamEra {
    pub fn contains(&self, season: u32) -> bool {
        season >= self.start && self.end.map_or(true, |end| season <= end)
    }
}

/// Franchise key -> ordered eras.
pub type FranchiseHistory = BTreeMap<String, Vec<TeamEra>>;

fn deserialize_era_end<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawEnd {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<RawEnd>::deserialize(deserializer)? {
        None => None,
        Some(RawEnd::Number(n)) if !n.is_finite() || n >= OPEN_ENDED_SEASON as f64 => None,
        Some(RawEnd::Number(n)) => Some(n as u32),
        Some(RawEnd::Text(t)) => t.trim().parse().ok().filter(|n| *n < OPEN_ENDED_SEASON),
    })
}

// ---------------------------------------------------------------------------
// Divisions
// ---------------------------------------------------------------------------

/// A season's division layout, or a reference to another season's layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DivisionLayout {
    SameAs(String),
    Divisions(BTreeMap<String, Vec<String>>),
}

pub type Divisions = BTreeMap<String, DivisionLayout>;

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerNames {
    #[serde(rename = "currentName")]
    pub current_name: String,
    #[serde(rename = "formerNames", default)]
    pub former_names: Vec<String>,
}

pub type PlayerDirectory = HashMap<i64, PlayerNames>;

// ---------------------------------------------------------------------------
// Assembled snapshot
// ---------------------------------------------------------------------------

/// Everything loaded from the data directory. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct LeagueData {
    pub hitting: Vec<StatRow>,
    pub pitching: Vec<StatRow>,
    pub seasons: SeasonInfo,
    pub franchises: FranchiseHistory,
    pub divisions: Divisions,
    pub players: PlayerDirectory,
}

impl LeagueData {
    pub fn rows(&self, side: Side) -> &[StatRow] {
        match side {
            Side::Hitting => &self.hitting,
            Side::Pitching => &self.pitching,
        }
    }

    /// Seasons with at least one primary (non-sub) row in either dataset,
    /// oldest first.
    pub fn seasons_with_stats(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .hitting
            .iter()
            .chain(self.pitching.iter())
            .filter(|r| !r.is_sub_row)
            .filter_map(|r| r.season())
            .filter(|s| s.starts_with('S'))
            .collect();
        let mut seasons: Vec<String> = set.into_iter().map(String::from).collect();
        seasons.sort_by_key(|s| season_number(s));
        seasons
    }

    pub fn player_name(&self, id: i64) -> &str {
        self.players
            .get(&id)
            .map(|p| p.current_name.as_str())
            .unwrap_or("Unknown")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
