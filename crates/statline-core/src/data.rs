// Dataset loading for the precomputed league JSON files.
//
// Stat tables use the compact `{"columns": [...], "data": [[...], ...]}`
// layout. Every numeric cell becomes a stat field; strings, nulls and
// non-finite numbers are dropped so that they read as zero downstream.

use crate::model::{
    CurrentSeason, Divisions, FranchiseHistory, LeagueData, PlayerDirectory, Scope, SeasonInfo,
    Side, StatRow,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

pub const HITTING_FILE: &str = "hitting_stats.json";
pub const PITCHING_FILE: &str = "pitching_stats.json";
pub const SEASONS_FILE: &str = "season_games_map.json";
pub const CURRENT_SEASON_FILE: &str = "current_season_info.json";
pub const TEAM_HISTORY_FILE: &str = "team_history.json";
pub const DIVISIONS_FILE: &str = "divisions.json";
pub const PLAYERS_FILE: &str = "player_id_map.json";

/// Columns consumed as row metadata rather than stats.
const SEASON_COLUMN: &str = "Season";
const TEAM_COLUMN: &str = "Team";
const TYPE_COLUMN: &str = "Type";
const SUB_ROW_COLUMN: &str = "is_sub_row";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("{path} is missing required column `{column}`")]
    MissingColumn { path: String, column: String },
}

// ---------------------------------------------------------------------------
// Raw serde structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CompactTable {
    columns: Vec<String>,
    data: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RawCurrentSeason {
    #[serde(default)]
    season: Option<String>,
    #[serde(default)]
    session: Option<f64>,
}

// ---------------------------------------------------------------------------
// Reader-based parsers (private, enable testing without temp files)
// ---------------------------------------------------------------------------

/// Failure modes of a compact stat table, before a path is attached.
#[derive(Debug)]
enum TableError {
    Json(serde_json::Error),
    MissingColumn(String),
}

fn stat_rows_from_reader<R: Read>(rdr: R, side: Side) -> Result<Vec<StatRow>, TableError> {
    let table: CompactTable = serde_json::from_reader(rdr).map_err(TableError::Json)?;
    rows_from_table(table, side).map_err(TableError::MissingColumn)
}

/// Returns `Err(column)` when a column the rows cannot live without is absent.
fn rows_from_table(table: CompactTable, side: Side) -> Result<Vec<StatRow>, String> {
    let index_of = |name: &str| table.columns.iter().position(|c| c == name);

    let id_idx = index_of(side.id_column()).ok_or_else(|| side.id_column().to_string())?;
    let season_idx = index_of(SEASON_COLUMN).ok_or_else(|| SEASON_COLUMN.to_string())?;
    let team_idx = index_of(TEAM_COLUMN);
    let type_idx = index_of(TYPE_COLUMN);
    let sub_idx = index_of(SUB_ROW_COLUMN);
    let metadata = [Some(id_idx), Some(season_idx), team_idx, type_idx, sub_idx];

    let mut rows = Vec::with_capacity(table.data.len());
    for (line, cells) in table.data.iter().enumerate() {
        let Some(player_id) = cells.get(id_idx).and_then(as_player_id) else {
            warn!("skipping {} row {}: missing player id", side.label(), line);
            continue;
        };
        let Some(season) = cells.get(season_idx).and_then(Value::as_str) else {
            warn!("skipping {} row {} (player {}): missing season", side.label(), line, player_id);
            continue;
        };

        let text_at = |idx: Option<usize>| {
            idx.and_then(|i| cells.get(i))
                .and_then(Value::as_str)
                .map(|s| s.to_string())
        };

        let mut stats = HashMap::new();
        for (i, cell) in cells.iter().enumerate() {
            if metadata.contains(&Some(i)) {
                continue;
            }
            let Some(name) = table.columns.get(i) else {
                continue;
            };
            if let Some(v) = cell.as_f64().filter(|v| v.is_finite()) {
                stats.insert(name.clone(), v);
            }
        }

        rows.push(StatRow {
            player_id,
            scope: Scope::parse(season),
            team: text_at(team_idx),
            player_type: text_at(type_idx),
            is_sub_row: sub_idx
                .and_then(|i| cells.get(i))
                .and_then(Value::as_bool)
                .unwrap_or(false),
            stats,
        });
    }
    Ok(rows)
}

fn as_player_id(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn season_sessions_from_reader<R: Read>(rdr: R) -> Result<HashMap<String, u32>, serde_json::Error> {
    let raw: HashMap<String, Value> = serde_json::from_reader(rdr)?;
    let mut sessions = HashMap::new();
    for (season, value) in raw {
        match value.as_f64().filter(|v| v.is_finite() && *v >= 0.0) {
            Some(n) => {
                sessions.insert(season, n.round() as u32);
            }
            None => warn!("ignoring session count for {}: not a number", season),
        }
    }
    Ok(sessions)
}

fn current_season_from_reader<R: Read>(rdr: R) -> Result<Option<CurrentSeason>, serde_json::Error> {
    let raw: RawCurrentSeason = serde_json::from_reader(rdr)?;
    Ok(raw.season.map(|season| CurrentSeason {
        season,
        sessions_completed: raw
            .session
            .filter(|s| s.is_finite() && *s >= 0.0)
            .map(|s| s as u32)
            .unwrap_or(0),
    }))
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<std::fs::File, DataError> {
    std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn json_error(path: &Path, source: serde_json::Error) -> DataError {
    DataError::Json {
        path: path.display().to_string(),
        source,
    }
}

/// Load one side's stat rows from a compact table file.
pub fn load_stat_rows(path: &Path, side: Side) -> Result<Vec<StatRow>, DataError> {
    let file = open(path)?;
    stat_rows_from_reader(std::io::BufReader::new(file), side).map_err(|e| match e {
        TableError::Json(source) => json_error(path, source),
        TableError::MissingColumn(column) => DataError::MissingColumn {
            path: path.display().to_string(),
            column,
        },
    })
}

/// Load the scheduled sessions per season plus the current-season pointer.
pub fn load_season_info(sessions_path: &Path, current_path: &Path) -> Result<SeasonInfo, DataError> {
    let sessions = season_sessions_from_reader(std::io::BufReader::new(open(sessions_path)?))
        .map_err(|e| json_error(sessions_path, e))?;
    let current = current_season_from_reader(std::io::BufReader::new(open(current_path)?))
        .map_err(|e| json_error(current_path, e))?;
    Ok(SeasonInfo { sessions, current })
}

/// Load any serde-deserializable JSON document.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let file = open(path)?;
    serde_json::from_reader(std::io::BufReader::new(file)).map_err(|e| json_error(path, e))
}

/// Like `load_json`, but a missing file yields the default value.
fn load_optional_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, DataError> {
    if !path.exists() {
        warn!("{} not found; continuing without it", path.display());
        return Ok(T::default());
    }
    load_json(path)
}

/// Load every dataset from `dir`.
///
/// Stat tables and season metadata are required. Franchise history,
/// divisions and the player directory are optional.
pub fn load_league_data(dir: &Path) -> Result<LeagueData, DataError> {
    let hitting = load_stat_rows(&dir.join(HITTING_FILE), Side::Hitting)?;
    let pitching = load_stat_rows(&dir.join(PITCHING_FILE), Side::Pitching)?;
    let seasons = load_season_info(&dir.join(SEASONS_FILE), &dir.join(CURRENT_SEASON_FILE))?;
    let franchises: FranchiseHistory = load_optional_json(&dir.join(TEAM_HISTORY_FILE))?;
    let divisions: Divisions = load_optional_json(&dir.join(DIVISIONS_FILE))?;
    let players: PlayerDirectory = load_optional_json(&dir.join(PLAYERS_FILE))?;

    info!(
        "Loaded {} hitting rows, {} pitching rows, {} seasons, {} franchises, {} players",
        hitting.len(),
        pitching.len(),
        seasons.sessions.len(),
        franchises.len(),
        players.len()
    );
    if let Some(current) = &seasons.current {
        debug!(
            "Current season {} at session {}",
            current.season, current.sessions_completed
        );
    }

    Ok(LeagueData {
        hitting,
        pitching,
        seasons,
        franchises,
        divisions,
        players,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
