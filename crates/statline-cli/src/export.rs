// CSV export of leaderboard rows.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use statline_baseball::format::format_stat;
use statline_baseball::leaderboard::Leaderboards;
use statline_core::model::LeagueData;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    tier: &'a str,
    rank: usize,
    player_id: i64,
    player: &'a str,
    season: &'a str,
    team: &'a str,
    stat: &'a str,
    value: f64,
    display: String,
}

/// Write every shown row of every tier. Returns the number of rows written.
pub fn write_csv<W: Write>(writer: W, boards: &Leaderboards<'_>, data: &LeagueData) -> Result<usize, csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut written = 0;
    for tier in &boards.tiers {
        for ranked in &tier.rows {
            wtr.serialize(ExportRow {
                tier: &tier.key,
                rank: ranked.rank,
                player_id: ranked.row.player_id,
                player: data.player_name(ranked.row.player_id),
                season: ranked.row.season().unwrap_or(""),
                team: ranked.row.team(),
                stat: &boards.stat,
                value: ranked.value,
                display: format_stat(&boards.stat, ranked.value),
            })?;
            written += 1;
        }
    }
    wtr.flush()?;
    Ok(written)
}

pub fn write_csv_file(path: &Path, boards: &Leaderboards<'_>, data: &LeagueData) -> anyhow::Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(file, boards, data).with_context(|| format!("failed to write {}", path.display()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
