// Stat catalog: every leaderboard stat, the row field it reads on each side,
// and how it ranks.
//
// Display labels and row fields differ (`SO` reads `K`, pitching `BA` reads
// the opponent average `BAA`). All aliasing lives in `CATALOG`; nothing is
// inferred from naming.

use statline_core::model::{Side, StatRow};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How a stat qualifies and breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// Cumulative total; no qualification minimum.
    Counting,
    /// Rate stat qualified on plate appearances or outs.
    Rate,
    /// Qualified on attempts (SB + CS), ties broken by attempts.
    StolenBasePct,
    /// Qualified on decisions (W + L), ties broken by decisions.
    WinLossPct,
}

impl StatKind {
    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Counting => "counting",
            StatKind::Rate => "rate",
            StatKind::StolenBasePct => "rate (attempts)",
            StatKind::WinLossPct => "rate (decisions)",
        }
    }
}

/// Where a stat's value comes from in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    Raw(&'static str),
    /// Computed from other fields on read; never stored back into the row.
    Sum {
        key: &'static str,
        parts: &'static [&'static str],
    },
}

impl StatField {
    pub fn key(&self) -> &'static str {
        match self {
            StatField::Raw(key) => key,
            StatField::Sum { key, .. } => key,
        }
    }

    pub fn value(&self, row: &StatRow) -> f64 {
        match self {
            StatField::Raw(key) => row.stat(key),
            StatField::Sum { parts, .. } => parts.iter().map(|p| row.stat(p)).sum(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SideDef {
    pub field: StatField,
    pub lower_is_better: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct StatDef {
    pub label: &'static str,
    pub description: &'static str,
    pub kind: StatKind,
    pub hitting: Option<SideDef>,
    pub pitching: Option<SideDef>,
}

impl StatDef {
    fn side(&self, side: Side) -> Option<&SideDef> {
        match side {
            Side::Hitting => self.hitting.as_ref(),
            Side::Pitching => self.pitching.as_ref(),
        }
    }

    pub fn offered_on(&self, side: Side) -> bool {
        self.side(side).is_some()
    }

    pub fn field(&self, side: Side) -> Option<StatField> {
        self.side(side).map(|s| s.field)
    }

    pub fn is_lower_better(&self, side: Side) -> bool {
        self.side(side).is_some_and(|s| s.lower_is_better)
    }

    pub fn is_counting(&self) -> bool {
        self.kind == StatKind::Counting
    }

    /// Counting stats that may rank players at zero or below.
    pub fn can_be_non_positive(&self) -> bool {
        SIGNED_COUNTING_STATS.contains(&self.label)
    }

    /// Secondary tie-break volume (attempts or decisions), if this stat has one.
    pub fn tiebreak_volume(&self, side: Side, row: &StatRow) -> Option<f64> {
        match self.kind {
            StatKind::StolenBasePct => {
                let (sb, cs) = attempt_fields(side);
                Some(row.stat(sb) + row.stat(cs))
            }
            StatKind::WinLossPct => Some(row.stat("W") + row.stat("L")),
            StatKind::Counting | StatKind::Rate => None,
        }
    }
}

/// Stolen-base and caught-stealing fields for a side.
pub fn attempt_fields(side: Side) -> (&'static str, &'static str) {
    match side {
        Side::Hitting => ("SB", "CS"),
        Side::Pitching => ("SB_A", "CS_A"),
    }
}

const SIGNED_COUNTING_STATS: &[&str] = &["WAR", "WPA", "RE24"];

const GROUND_OUTS: StatField = StatField::Sum {
    key: "GO",
    parts: &["LGO", "RGO"],
};

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

const fn hi(key: &'static str) -> Option<SideDef> {
    Some(SideDef {
        field: StatField::Raw(key),
        lower_is_better: false,
    })
}

const fn lo(key: &'static str) -> Option<SideDef> {
    Some(SideDef {
        field: StatField::Raw(key),
        lower_is_better: true,
    })
}

const fn derived(field: StatField) -> Option<SideDef> {
    Some(SideDef {
        field,
        lower_is_better: false,
    })
}

const fn stat(
    label: &'static str,
    description: &'static str,
    kind: StatKind,
    hitting: Option<SideDef>,
    pitching: Option<SideDef>,
) -> StatDef {
    StatDef {
        label,
        description,
        kind,
        hitting,
        pitching,
    }
}

use StatKind::{Counting, Rate, StolenBasePct, WinLossPct};

pub const CATALOG: &[StatDef] = &[
    // General
    stat("WAR", "Wins Above Replacement", Counting, hi("WAR"), hi("WAR")),
    stat("WPA", "Win Probability Added", Counting, hi("WPA"), hi("WPA")),
    stat("RE24", "Run Expectancy based on 24 base-out states", Counting, hi("RE24"), lo("RE24")),
    stat("G", "Games Played", Counting, hi("G"), hi("G")),
    stat("Avg Diff", "Average Difference", Rate, lo("Avg Diff"), hi("Avg Diff")),
    // Batting counts (pitching reads the allowed-against variant where one exists)
    stat("PA", "Plate Appearances", Counting, hi("PA"), None),
    stat("AB", "At Bats", Counting, hi("AB"), None),
    stat("R", "Runs Scored", Counting, hi("R"), None),
    stat("H", "Hits", Counting, hi("H"), hi("H")),
    stat("1B", "Singles", Counting, hi("1B"), hi("1B")),
    stat("2B", "Doubles", Counting, hi("2B"), hi("2B_A")),
    stat("3B", "Triples", Counting, hi("3B"), hi("3B_A")),
    stat("HR", "Home Runs", Counting, hi("HR"), hi("HR")),
    stat("RBI", "Runs Batted In", Counting, hi("RBI"), None),
    stat("SB", "Stolen Bases", Counting, hi("SB"), hi("SB_A")),
    stat("CS", "Caught Stealing", Counting, hi("CS"), hi("CS_A")),
    stat("BB", "Walks (Bases on Balls)", Counting, hi("BB"), hi("BB")),
    stat("IBB", "Intentional Walks", Counting, hi("IBB"), hi("IBB")),
    stat("SO", "Strikeouts", Counting, hi("K"), hi("K")),
    stat("Auto K", "Automatic Strikeouts", Counting, hi("Auto K"), None),
    stat("TB", "Total Bases", Counting, hi("TB"), None),
    stat("GIDP", "Grounded Into Double Play", Counting, hi("GIDP"), None),
    stat("SH", "Sacrifice Hits (Bunts)", Counting, hi("SH"), None),
    stat("SF", "Sacrifice Flies", Counting, hi("SF"), None),
    // Batted-ball outs
    stat("RGO", "Right-side Ground Outs", Counting, hi("RGO"), hi("RGO")),
    stat("LGO", "Left-side Ground Outs", Counting, hi("LGO"), hi("LGO")),
    stat("GO", "Ground Outs", Counting, derived(GROUND_OUTS), derived(GROUND_OUTS)),
    stat("FO", "Fly Outs", Counting, hi("FO"), hi("FO")),
    stat("PO", "Pop Outs", Counting, hi("PO"), hi("PO")),
    stat("LO", "Line Outs", Counting, hi("LO"), hi("LO")),
    // Batting rates (pitching reads the opponent line)
    stat("BA", "Batting Average", Rate, hi("AVG"), lo("BAA")),
    stat("OBP", "On-base Percentage", Rate, hi("OBP"), lo("OBPA")),
    stat("SLG", "Slugging Percentage", Rate, hi("SLG"), lo("SLGA")),
    stat("OPS", "On-base Plus Slugging", Rate, hi("OPS"), lo("OPSA")),
    stat("OPS+", "OPS adjusted for park and league", Rate, hi("OPS+"), None),
    stat("BABIP", "Batting Average on Balls In Play", Rate, hi("BABIP"), lo("BABIP_A")),
    stat("ISO", "Isolated Power", Rate, hi("ISO"), None),
    stat("HR%", "Home Run Percentage", Rate, hi("HR%"), lo("HR%_A")),
    stat("SO%", "Strikeout Percentage", Rate, hi("SO%"), None),
    stat("K%", "Strikeout Percentage", Rate, None, hi("K%_A")),
    stat("BB%", "Walk Percentage", Rate, hi("BB%"), lo("BB%_A")),
    stat("GB%", "Ground Ball Percentage", Rate, hi("GB%"), hi("GB%_A")),
    stat("FB%", "Fly Ball Percentage", Rate, hi("FB%"), hi("FB%_A")),
    stat("GB/FB", "Ground Ball to Fly Ball Ratio", Rate, hi("GB/FB"), hi("GB/FB_A")),
    stat("SB%", "Stolen Base Percentage", StolenBasePct, hi("SB%"), lo("SB%_A")),
    // Pitching
    stat("W", "Wins", Counting, None, hi("W")),
    stat("L", "Losses", Counting, None, hi("L")),
    stat("W-L%", "Win-Loss Percentage", WinLossPct, None, hi("W-L%")),
    stat("GS", "Games Started", Counting, None, hi("GS")),
    stat("GF", "Games Finished", Counting, None, hi("GF")),
    stat("CG", "Complete Games", Counting, None, hi("CG")),
    stat("SHO", "Shutouts", Counting, None, hi("SHO")),
    stat("SV", "Saves", Counting, None, hi("SV")),
    stat("HLD", "Holds", Counting, None, hi("HLD")),
    stat("IP", "Innings Pitched", Counting, None, hi("IP")),
    stat("ER", "Earned Runs", Counting, None, hi("R")),
    stat("Auto BB", "Automatic Walks", Counting, None, hi("Auto BB")),
    stat("BF", "Batters Faced", Counting, None, hi("BF")),
    stat("ERA", "Earned Run Average", Rate, None, lo("ERA")),
    stat(
        "ERA-",
        "ERA adjusted for park and league, where 100 is average and lower is better",
        Rate,
        None,
        lo("ERA-"),
    ),
    stat("FIP", "Fielding Independent Pitching", Rate, None, lo("FIP")),
    stat("WHIP", "Walks + Hits per Inning Pitched", Rate, None, lo("WHIP")),
    stat("H6", "Hits per 6 Innings", Rate, None, lo("H/6")),
    stat("HR6", "Home Runs per 6 Innings", Rate, None, lo("HR/6")),
    stat("BB6", "Walks per 6 Innings", Rate, None, lo("BB/6")),
    stat("SO6", "Strikeouts per 6 Innings", Rate, None, hi("K/6")),
    stat("SO/BB", "Strikeout to Walk Ratio", Rate, None, hi("K/BB")),
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

pub fn lookup(label: &str) -> Option<&'static StatDef> {
    CATALOG.iter().find(|d| d.label == label)
}

/// Row field behind a display label on one side; `None` if the stat is not
/// offered there.
pub fn resolve_field(label: &str, side: Side) -> Option<StatField> {
    lookup(label).and_then(|d| d.field(side))
}

pub fn is_counting_stat(label: &str) -> bool {
    lookup(label).is_some_and(StatDef::is_counting)
}

pub fn is_lower_better(label: &str, side: Side) -> bool {
    lookup(label).is_some_and(|d| d.is_lower_better(side))
}

/// Labels offered on a side, sorted.
pub fn stats_for(side: Side) -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = CATALOG
        .iter()
        .filter(|d| d.offered_on(side))
        .map(|d| d.label)
        .collect();
    labels.sort_unstable();
    labels
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
