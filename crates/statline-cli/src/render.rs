// Plain-text rendering of leaderboards, standings, search results and the
// stat list.

use std::fmt::Write;

use statline_baseball::catalog::{self, CATALOG};
use statline_baseball::format::format_stat;
use statline_baseball::franchise::FranchiseResolver;
use statline_baseball::leaderboard::{LeaderboardTier, Leaderboards};
use statline_baseball::qualification::TierKind;
use statline_baseball::search::Suggestion;
use statline_baseball::standings::DivisionStandings;
use statline_core::model::{season_number, LeagueData, Side, StatRow};

// ---------------------------------------------------------------------------
// Leaderboards
// ---------------------------------------------------------------------------

/// Drop every tier except the one named by `wanted`. Returns false when no
/// tier matches.
pub fn keep_tier(boards: &mut Leaderboards<'_>, wanted: &str) -> bool {
    let wanted = wanted.trim().to_lowercase();
    boards.tiers.retain(|t| match t.kind {
        TierKind::AllTime => wanted == "all-time" || wanted == "alltime",
        TierKind::SingleSeason => wanted == "single-season" || wanted == "single",
        TierKind::Season => t.key.to_lowercase() == wanted,
    });
    !boards.tiers.is_empty()
}

pub fn leaderboards(boards: &Leaderboards<'_>, data: &LeagueData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} leaders: {}", capitalize(boards.side.label()), boards.stat);
    for tier in &boards.tiers {
        out.push('\n');
        out.push_str(&tier_text(tier, &boards.stat, data));
    }
    out
}

/// Team column for a row: the season prefix matters on the single-season
/// list, where rows from different seasons sit side by side.
fn team_cell(kind: TierKind, row: &StatRow) -> String {
    match (kind, row.season()) {
        (TierKind::SingleSeason, Some(season)) => format!("{season} {}", row.team()),
        _ => row.team().to_string(),
    }
}

pub fn tier_text(tier: &LeaderboardTier<'_>, stat: &str, data: &LeagueData) -> String {
    let mut out = String::new();
    match &tier.qualification_label {
        Some(label) => {
            let _ = writeln!(out, "{} ({})", tier.title(), label);
        }
        None => {
            let _ = writeln!(out, "{}", tier.title());
        }
    }

    if tier.rows.is_empty() && tier.tie.is_none() {
        let _ = writeln!(out, "  No qualified players");
        return out;
    }

    let lines: Vec<(String, &str, String, String)> = tier
        .rows
        .iter()
        .map(|r| {
            (
                r.rank.to_string(),
                data.player_name(r.row.player_id),
                team_cell(tier.kind, r.row),
                format_stat(stat, r.value),
            )
        })
        .collect();
    let name_width = lines.iter().map(|l| l.1.chars().count()).max().unwrap_or(0);
    let team_width = lines.iter().map(|l| l.2.chars().count()).max().unwrap_or(0);
    let value_width = lines.iter().map(|l| l.3.len()).max().unwrap_or(0);

    for (rank, name, team, value) in &lines {
        let _ = writeln!(
            out,
            "  {rank:>3}  {name:<name_width$}  {team:<team_width$}  {value:>value_width$}"
        );
    }
    if let Some(tie) = &tier.tie {
        let _ = writeln!(
            out,
            "  {} players tied with {}",
            tie.count,
            format_stat(stat, tie.value)
        );
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

pub fn standings(season: &str, table: &[DivisionStandings], franchises: &FranchiseResolver<'_>) -> String {
    let mut out = String::new();
    let heading = match season_number(season) {
        Some(n) => format!("Season {n} standings"),
        None => format!("{season} standings"),
    };
    let _ = writeln!(out, "{heading}");

    for division in table {
        let names: Vec<String> = division
            .teams
            .iter()
            .map(|row| {
                let franchise = franchises.franchise_for(&row.team, season);
                format!("{} ({})", franchises.name_for(franchise, season), row.team)
            })
            .collect();
        let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0).max(4);

        let _ = writeln!(out, "\n{}", division.division);
        let _ = writeln!(out, "  {:<width$}  {:>3}  {:>3}  {:>3}  {:>5}", "Team", "W", "L", "T", "PCT");
        for (row, name) in division.teams.iter().zip(&names) {
            let r = row.record;
            let _ = writeln!(
                out,
                "  {:<width$}  {:>3}  {:>3}  {:>3}  {:>5}",
                name,
                r.wins,
                r.losses,
                r.ties,
                format_stat("W-L%", r.pct)
            );
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Search and stat list
// ---------------------------------------------------------------------------

pub fn suggestions(hits: &[Suggestion]) -> String {
    if hits.is_empty() {
        return "No players found\n".to_string();
    }
    let mut out = String::new();
    for hit in hits {
        let _ = writeln!(out, "  {:>6}  {}", hit.player_id, hit.name);
    }
    out
}

pub fn stat_list(side: Side) -> String {
    let mut out = String::new();
    let labels = catalog::stats_for(side);
    let width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
    for label in labels {
        let Some(def) = CATALOG.iter().find(|d| d.label == label) else {
            continue;
        };
        let _ = writeln!(
            out,
            "  {label:<width$}  {:<16}  {}",
            def.kind.label(),
            def.description
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
