// Leaderboard builder: all-time, single-season and per-season top lists for
// one stat.
//
// Rows are type-filtered once and their rank keys computed up front; every
// tier then filters and sorts that shared candidate list.

use std::cmp::Ordering;

use statline_core::model::{
    season_number, sort_seasons_desc, FranchiseHistory, LeagueData, Scope, SeasonInfo, Side, StatRow,
};
use tracing::{debug, warn};

use crate::catalog::{self, StatDef, StatField, StatKind};
use crate::franchise::FranchiseResolver;
use crate::qualification::{
    CareerMinimums, Qualification, QualificationCalculator, QualificationRates, Threshold, TierKind,
};
use crate::ties::{competition_ranks, truncate, TieInfo};

pub const DEFAULT_LENGTH: usize = 10;
pub const ALL_TIME_KEY: &str = "All-Time";
pub const SINGLE_SEASON_KEY: &str = "Single Season";

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRequest {
    pub side: Side,
    /// Franchise key or team abbreviation.
    pub team: Option<String>,
    /// Player archetype. Hitting matches exactly; pitching matches by prefix
    /// (`"SP"` covers `"SP-A"`).
    pub player_type: Option<String>,
    /// Invert the sort so the worst qualifiers come first.
    pub reverse: bool,
    /// Rows per tier; zero means the default.
    pub length: usize,
    pub rates: QualificationRates,
    pub career: CareerMinimums,
}

impl LeaderboardRequest {
    pub fn new(side: Side) -> Self {
        LeaderboardRequest {
            side,
            team: None,
            player_type: None,
            reverse: false,
            length: DEFAULT_LENGTH,
            rates: QualificationRates::default(),
            career: CareerMinimums::default(),
        }
    }

    fn limit(&self) -> usize {
        if self.length == 0 {
            DEFAULT_LENGTH
        } else {
            self.length
        }
    }

    fn team(&self) -> Option<&str> {
        self.team.as_deref().filter(|t| !t.is_empty())
    }

    fn player_type(&self) -> Option<&str> {
        self.player_type.as_deref().filter(|t| !t.is_empty())
    }
}

/// League metadata a leaderboard needs besides the rows themselves.
#[derive(Debug, Clone)]
pub struct LeagueContext<'a> {
    pub seasons: &'a SeasonInfo,
    pub franchises: &'a FranchiseHistory,
    pub seasons_with_stats: Vec<String>,
}

impl<'a> LeagueContext<'a> {
    pub fn from_data(data: &'a LeagueData) -> Self {
        LeagueContext {
            seasons: &data.seasons,
            franchises: &data.franchises,
            seasons_with_stats: data.seasons_with_stats(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow<'a> {
    pub rank: usize,
    pub row: &'a StatRow,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardTier<'a> {
    pub kind: TierKind,
    /// `"All-Time"`, `"Single Season"` or a season identifier.
    pub key: String,
    pub rows: Vec<RankedRow<'a>>,
    /// Qualified rows before truncation.
    pub candidates: usize,
    pub is_counting_stat: bool,
    pub qualification: Option<Threshold>,
    pub qualification_label: Option<String>,
    pub tie: Option<TieInfo>,
}

impl<'a> LeaderboardTier<'a> {
    fn empty(kind: TierKind, key: String) -> Self {
        LeaderboardTier {
            kind,
            key,
            rows: Vec::new(),
            candidates: 0,
            is_counting_stat: false,
            qualification: None,
            qualification_label: None,
            tie: None,
        }
    }

    pub fn title(&self) -> String {
        match self.kind {
            TierKind::AllTime => ALL_TIME_KEY.to_string(),
            TierKind::SingleSeason => SINGLE_SEASON_KEY.to_string(),
            TierKind::Season => match season_number(&self.key) {
                Some(n) => format!("Season {n}"),
                None => self.key.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboards<'a> {
    pub stat: String,
    pub side: Side,
    /// `None` when the stat is not offered for the side.
    pub field: Option<StatField>,
    /// All-time, single-season, then each season newest first.
    pub tiers: Vec<LeaderboardTier<'a>>,
}

impl<'a> Leaderboards<'a> {
    pub fn tier(&self, key: &str) -> Option<&LeaderboardTier<'a>> {
        self.tiers.iter().find(|t| t.key == key)
    }

    pub fn all_time(&self) -> Option<&LeaderboardTier<'a>> {
        self.tier(ALL_TIME_KEY)
    }

    pub fn single_season(&self) -> Option<&LeaderboardTier<'a>> {
        self.tier(SINGLE_SEASON_KEY)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Primary value plus the optional volume tie-break. Two rows are tied
/// exactly when their keys are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RankKey {
    value: f64,
    volume: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    row: &'a StatRow,
    key: RankKey,
}

impl Candidate<'_> {
    fn tied_with(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

fn compare(a: &RankKey, b: &RankKey, lower_is_better: bool, reverse: bool) -> Ordering {
    let primary = if lower_is_better {
        a.value.partial_cmp(&b.value)
    } else {
        b.value.partial_cmp(&a.value)
    }
    .unwrap_or(Ordering::Equal);
    let ordering = primary.then_with(|| match (a.volume, b.volume) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    });
    if reverse {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Build every tier of a leaderboard for `stat` from one side's rows.
pub fn build<'a>(
    stat: &str,
    rows: &'a [StatRow],
    ctx: &LeagueContext<'_>,
    req: &LeaderboardRequest,
) -> Leaderboards<'a> {
    let mut seasons = ctx.seasons_with_stats.clone();
    sort_seasons_desc(&mut seasons);

    let resolved = catalog::lookup(stat).and_then(|def| def.field(req.side).map(|field| (def, field)));
    let Some((def, field)) = resolved else {
        warn!("Stat {} is not available for {} leaderboards", stat, req.side.label());
        let mut tiers = vec![
            LeaderboardTier::empty(TierKind::AllTime, ALL_TIME_KEY.to_string()),
            LeaderboardTier::empty(TierKind::SingleSeason, SINGLE_SEASON_KEY.to_string()),
        ];
        tiers.extend(seasons.into_iter().map(|s| LeaderboardTier::empty(TierKind::Season, s)));
        return Leaderboards {
            stat: stat.to_string(),
            side: req.side,
            field: None,
            tiers,
        };
    };

    let builder = TierBuilder {
        def,
        side: req.side,
        req,
        calc: QualificationCalculator::new(ctx.seasons, req.rates, req.career),
        franchises: FranchiseResolver::new(ctx.franchises),
    };

    let candidates: Vec<Candidate<'a>> = rows
        .iter()
        .filter(|row| builder.type_matches(row))
        .map(|row| Candidate {
            row,
            key: RankKey {
                value: field.value(row),
                volume: def.tiebreak_volume(req.side, row),
            },
        })
        .collect();
    debug!(
        "Building {} {} leaderboards from {} of {} rows (field {})",
        req.side.label(),
        stat,
        candidates.len(),
        rows.len(),
        field.key()
    );

    let mut tiers = Vec::with_capacity(seasons.len() + 2);
    tiers.push(builder.all_time(&candidates));
    tiers.push(builder.single_season(&candidates));
    for season in &seasons {
        tiers.push(builder.season(&candidates, season));
    }

    Leaderboards {
        stat: stat.to_string(),
        side: req.side,
        field: Some(field),
        tiers,
    }
}

struct TierBuilder<'c> {
    def: &'static StatDef,
    side: Side,
    req: &'c LeaderboardRequest,
    calc: QualificationCalculator<'c>,
    franchises: FranchiseResolver<'c>,
}

impl<'c> TierBuilder<'c> {
    fn type_matches(&self, row: &StatRow) -> bool {
        let Some(wanted) = self.req.player_type() else {
            return true;
        };
        let Some(player_type) = row.player_type.as_deref() else {
            return false;
        };
        match self.side {
            Side::Hitting => player_type == wanted,
            Side::Pitching => player_type.starts_with(wanted),
        }
    }

    fn all_time<'a>(&self, candidates: &[Candidate<'a>]) -> LeaderboardTier<'a> {
        let pool: Vec<Candidate<'a>> = candidates
            .iter()
            .filter(|c| match (self.req.player_type(), self.req.team()) {
                (Some(t), _) => c.row.scope == Scope::Type && c.row.player_type.as_deref() == Some(t),
                (None, Some(team)) => c.row.scope == Scope::Franchise && c.row.team() == team,
                (None, None) => c.row.scope == Scope::Career,
            })
            .copied()
            .collect();
        let qualification = self
            .calc
            .minimum_threshold(TierKind::AllTime, self.def.kind, self.side, None);
        self.finish(TierKind::AllTime, ALL_TIME_KEY.to_string(), pool, qualification, true)
    }

    fn single_season<'a>(&self, candidates: &[Candidate<'a>]) -> LeaderboardTier<'a> {
        let excluded = match self.def.kind {
            StatKind::Counting | StatKind::Rate => self.calc.season_excluded_from_single_season(),
            StatKind::StolenBasePct | StatKind::WinLossPct => None,
        };

        let pool = candidates.iter().filter(|c| {
            c.row
                .season()
                .is_some_and(|season| Some(season) != excluded && self.on_team_any_season(c.row, season))
        });

        // Session-scaled minimums differ per row, so they are applied here
        // and the tier itself carries no single threshold.
        let (pool, qualification): (Vec<Candidate<'a>>, Qualification) = match self.def.kind {
            StatKind::Rate => (
                pool.filter(|c| self.qualifies_in_own_season(c.row)).copied().collect(),
                Qualification::Exempt,
            ),
            kind => (
                pool.copied().collect(),
                self.calc.minimum_threshold(TierKind::SingleSeason, kind, self.side, None),
            ),
        };
        self.finish(TierKind::SingleSeason, SINGLE_SEASON_KEY.to_string(), pool, qualification, false)
    }

    fn season<'a>(&self, candidates: &[Candidate<'a>], season: &str) -> LeaderboardTier<'a> {
        let pool: Vec<Candidate<'a>> = candidates
            .iter()
            .filter(|c| c.row.season() == Some(season) && self.on_team_in_season(c.row, season))
            .copied()
            .collect();
        let qualification = self
            .calc
            .minimum_threshold(TierKind::Season, self.def.kind, self.side, Some(season));
        self.finish(TierKind::Season, season.to_string(), pool, qualification, true)
    }

    fn qualifies_in_own_season(&self, row: &StatRow) -> bool {
        match self
            .calc
            .minimum_threshold(TierKind::SingleSeason, StatKind::Rate, self.side, row.season())
        {
            Qualification::Exempt => true,
            Qualification::Minimum(t) => t.admits(row, self.side),
            Qualification::Unavailable => false,
        }
    }

    /// Team scoping for the single-season tier: a franchise matches any of
    /// its abbreviations valid in the row's season.
    fn on_team_any_season(&self, row: &StatRow, season: &str) -> bool {
        match self.req.team() {
            Some(team) if self.franchises.is_franchise(team) => {
                self.franchises.matches(team, row.team(), season)
            }
            Some(team) => row.team() == team,
            None => !row.is_sub_row,
        }
    }

    /// Team scoping for one season: a franchise matches only the abbreviation
    /// it used that season.
    fn on_team_in_season(&self, row: &StatRow, season: &str) -> bool {
        match self.req.team() {
            Some(team) if self.franchises.is_franchise(team) => self
                .franchises
                .abbr_for(team, season)
                .is_some_and(|abbr| row.team() == abbr),
            Some(team) => row.team() == team,
            None => !row.is_sub_row,
        }
    }

    fn finish<'a>(
        &self,
        kind: TierKind,
        key: String,
        pool: Vec<Candidate<'a>>,
        qualification: Qualification,
        show_label: bool,
    ) -> LeaderboardTier<'a> {
        let (threshold, mut pool) = match qualification {
            Qualification::Exempt => (None, pool),
            Qualification::Minimum(t) => {
                let admitted: Vec<Candidate<'a>> = pool.into_iter().filter(|c| t.admits(c.row, self.side)).collect();
                (Some(t), admitted)
            }
            Qualification::Unavailable => {
                debug!("{} {}: no sessions recorded, tier left empty", self.def.label, key);
                (None, Vec::new())
            }
        };

        if self.def.is_counting() && !self.def.can_be_non_positive() {
            pool.retain(|c| c.key.value > 0.0);
        }

        let lower_is_better = self.def.is_lower_better(self.side);
        pool.sort_by(|a, b| compare(&a.key, &b.key, lower_is_better, self.req.reverse));

        let cut = truncate(&pool, self.req.limit(), Candidate::tied_with);
        let ranks = competition_ranks(cut.shown, Candidate::tied_with);
        let rows = cut
            .shown
            .iter()
            .zip(ranks)
            .map(|(c, rank)| RankedRow {
                rank,
                row: c.row,
                value: c.key.value,
            })
            .collect::<Vec<_>>();
        let tie = cut.tie.map(|t| TieInfo {
            count: t.count,
            value: t.boundary.key.value,
        });

        debug!(
            "{} {}: {} qualified, {} shown{}",
            self.def.label,
            key,
            pool.len(),
            rows.len(),
            if tie.is_some() { ", tie at cutoff" } else { "" }
        );

        LeaderboardTier {
            kind,
            key,
            rows,
            candidates: pool.len(),
            is_counting_stat: self.def.is_counting(),
            qualification: threshold,
            qualification_label: if show_label { threshold.map(|t| t.label()) } else { None },
            tie,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use statline_core::model::{CurrentSeason, TeamEra};
    use std::collections::HashMap;

    fn row(id: i64, scope: &str, team: &str, stats: &[(&str, f64)]) -> StatRow {
        StatRow {
            player_id: id,
            scope: Scope::parse(scope),
            team: Some(team.to_string()),
            player_type: None,
            is_sub_row: false,
            stats: stats.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    fn typed(mut r: StatRow, player_type: &str) -> StatRow {
        r.player_type = Some(player_type.into());
        r
    }

    fn sub(mut r: StatRow) -> StatRow {
        r.is_sub_row = true;
        r
    }

    fn seasons(entries: &[(&str, u32)], current: Option<(&str, u32)>) -> SeasonInfo {
        SeasonInfo {
            sessions: entries.iter().map(|(s, n)| (s.to_string(), *n)).collect::<HashMap<_, _>>(),
            current: current.map(|(season, done)| CurrentSeason {
                season: season.into(),
                sessions_completed: done,
            }),
        }
    }

    fn context<'a>(info: &'a SeasonInfo, history: &'a FranchiseHistory, with_stats: &[&str]) -> LeagueContext<'a> {
        LeagueContext {
            seasons: info,
            franchises: history,
            seasons_with_stats: with_stats.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn ids(tier: &LeaderboardTier<'_>) -> Vec<i64> {
        tier.rows.iter().map(|r| r.row.player_id).collect()
    }

    #[test]
    fn tiers_come_in_order() {
        let info = seasons(&[("S1", 10), ("S2", 10), ("S10", 10)], None);
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1", "S2", "S10"]);
        let boards = build("HR", &[], &ctx, &LeaderboardRequest::new(Side::Hitting));
        let keys: Vec<&str> = boards.tiers.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["All-Time", "Single Season", "S10", "S2", "S1"]);
        assert_eq!(boards.tiers[2].title(), "Season 10");
    }

    #[test]
    fn unknown_stat_yields_empty_tiers() {
        let info = seasons(&[("S1", 10)], None);
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1"]);
        let rows = vec![row(1, "Career", "AAA", &[("PA", 500.0), ("AVG", 0.3)])];
        let boards = build("ERA", &rows, &ctx, &LeaderboardRequest::new(Side::Hitting));
        assert!(boards.field.is_none());
        assert_eq!(boards.tiers.len(), 3);
        assert!(boards.tiers.iter().all(|t| t.rows.is_empty()));
    }

    #[test]
    fn counting_stats_drop_non_positive_values() {
        let info = seasons(&[("S1", 10)], None);
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1"]);
        let rows = vec![
            row(1, "S1", "AAA", &[("HR", 3.0), ("WAR", -0.5)]),
            row(2, "S1", "AAA", &[("HR", 0.0), ("WAR", 0.0)]),
            row(3, "S1", "AAA", &[("WAR", 1.0)]),
        ];
        let req = LeaderboardRequest::new(Side::Hitting);

        let hr = build("HR", &rows, &ctx, &req);
        let tier = hr.tier("S1").unwrap();
        assert_eq!(ids(tier), vec![1]);
        assert!(tier.is_counting_stat);
        assert!(tier.qualification_label.is_none());

        let war = build("WAR", &rows, &ctx, &req);
        assert_eq!(ids(war.tier("S1").unwrap()), vec![3, 2, 1]);
    }

    #[test]
    fn lower_is_better_and_reverse() {
        let info = seasons(&[("S1", 10)], None);
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1"]);
        let rows = vec![
            row(1, "S1", "AAA", &[("IP", 20.0), ("ERA", 3.5)]),
            row(2, "S1", "AAA", &[("IP", 20.0), ("ERA", 1.5)]),
            row(3, "S1", "AAA", &[("IP", 20.0), ("ERA", 2.5)]),
        ];
        let mut req = LeaderboardRequest::new(Side::Pitching);
        assert_eq!(ids(build("ERA", &rows, &ctx, &req).tier("S1").unwrap()), vec![2, 3, 1]);
        req.reverse = true;
        assert_eq!(ids(build("ERA", &rows, &ctx, &req).tier("S1").unwrap()), vec![1, 3, 2]);
    }

    #[test]
    fn win_loss_ties_break_on_decisions() {
        let info = seasons(&[("S1", 10)], None);
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1"]);
        let rows = vec![
            row(1, "S1", "AAA", &[("W", 3.0), ("L", 1.0), ("W-L%", 0.75)]),
            row(2, "S1", "AAA", &[("W", 6.0), ("L", 2.0), ("W-L%", 0.75)]),
            row(3, "S1", "AAA", &[("W", 2.0), ("L", 0.0), ("W-L%", 1.0)]),
        ];
        let boards = build("W-L%", &rows, &ctx, &LeaderboardRequest::new(Side::Pitching));
        let tier = boards.tier("S1").unwrap();
        // Two decisions is below the three-decision minimum.
        assert_eq!(ids(tier), vec![2, 1]);
        assert_eq!(tier.rows[0].rank, 1);
        assert_eq!(tier.rows[1].rank, 2);
        assert_eq!(tier.qualification_label.as_deref(), Some("3 Decisions min"));
    }

    fn win_loss_rows(second_wins: f64, second_losses: f64) -> Vec<StatRow> {
        vec![
            row(1, "S1", "AAA", &[("W", 3.0), ("L", 1.0), ("W-L%", 0.75)]),
            row(2, "S1", "AAA", &[("W", second_wins), ("L", second_losses), ("W-L%", 0.75)]),
            row(3, "S1", "AAA", &[("W", 4.0), ("L", 0.0), ("W-L%", 1.0)]),
        ]
    }

    #[test]
    fn equal_win_loss_with_different_decisions_is_not_a_tie_at_cutoff() {
        let info = seasons(&[("S1", 10)], None);
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1"]);
        let rows = win_loss_rows(6.0, 2.0);
        let mut req = LeaderboardRequest::new(Side::Pitching);
        req.length = 2;

        let boards = build("W-L%", &rows, &ctx, &req);
        let tier = boards.tier("S1").unwrap();
        assert_eq!(ids(tier), vec![3, 2]);
        assert_eq!(tier.rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2]);
        assert!(tier.tie.is_none());

        // Worst first: four decisions ranks below eight at the same percentage.
        req.reverse = true;
        req.length = 1;
        let boards = build("W-L%", &rows, &ctx, &req);
        let tier = boards.tier("S1").unwrap();
        assert_eq!(ids(tier), vec![1]);
        assert!(tier.tie.is_none());
    }

    #[test]
    fn equal_win_loss_and_decisions_tie_at_cutoff() {
        let info = seasons(&[("S1", 10)], None);
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1"]);
        let rows = win_loss_rows(3.0, 1.0);
        let mut req = LeaderboardRequest::new(Side::Pitching);
        req.length = 2;

        let boards = build("W-L%", &rows, &ctx, &req);
        let tier = boards.tier("S1").unwrap();
        assert_eq!(ids(tier), vec![3]);
        assert_eq!(tier.tie, Some(TieInfo { count: 2, value: 0.75 }));

        req.reverse = true;
        req.length = 1;
        let boards = build("W-L%", &rows, &ctx, &req);
        let tier = boards.tier("S1").unwrap();
        assert!(tier.rows.is_empty());
        assert_eq!(tier.tie, Some(TieInfo { count: 2, value: 0.75 }));
    }

    #[test]
    fn type_filter_exact_for_hitters_prefix_for_pitchers() {
        let info = seasons(&[("S1", 10)], None);
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1"]);

        let hitters = vec![
            typed(row(1, "S1", "AAA", &[("HR", 5.0)]), "Power"),
            typed(row(2, "S1", "AAA", &[("HR", 9.0)]), "Power Plus"),
        ];
        let mut req = LeaderboardRequest::new(Side::Hitting);
        req.player_type = Some("Power".into());
        assert_eq!(ids(build("HR", &hitters, &ctx, &req).tier("S1").unwrap()), vec![1]);

        let pitchers = vec![
            typed(row(10, "S1", "AAA", &[("W", 5.0)]), "SP-A"),
            typed(row(11, "S1", "AAA", &[("W", 7.0)]), "RP-A"),
            typed(row(12, "Type", "", &[("W", 40.0)]), "SP"),
        ];
        let mut req = LeaderboardRequest::new(Side::Pitching);
        req.player_type = Some("SP".into());
        let boards = build("W", &pitchers, &ctx, &req);
        assert_eq!(ids(boards.tier("S1").unwrap()), vec![10]);
        assert_eq!(ids(boards.all_time().unwrap()), vec![12]);
    }

    #[test]
    fn franchise_filter_follows_abbreviation_changes() {
        let info = seasons(&[("S1", 10), ("S2", 10)], None);
        let mut history = FranchiseHistory::new();
        history.insert(
            "Hawks".into(),
            vec![
                TeamEra {
                    abbr: "HWK".into(),
                    name: "Hawktown Hawks".into(),
                    start: 1,
                    end: Some(1),
                    logo_light: None,
                    logo_dark: None,
                },
                TeamEra {
                    abbr: "HAW".into(),
                    name: "Harbor Hawks".into(),
                    start: 2,
                    end: None,
                    logo_light: None,
                    logo_dark: None,
                },
            ],
        );
        let ctx = context(&info, &history, &["S1", "S2"]);
        let rows = vec![
            row(1, "S1", "HWK", &[("HR", 5.0)]),
            row(2, "S1", "HAW", &[("HR", 6.0)]),
            row(3, "S2", "HAW", &[("HR", 7.0)]),
            row(4, "S2", "2TM", &[("HR", 8.0)]),
            sub(row(4, "S2", "HAW", &[("HR", 4.0)])),
            row(1, "Franchise", "Hawks", &[("HR", 5.0)]),
        ];
        let mut req = LeaderboardRequest::new(Side::Hitting);
        req.team = Some("Hawks".into());
        let boards = build("HR", &rows, &ctx, &req);

        assert_eq!(ids(boards.tier("S1").unwrap()), vec![1]);
        assert_eq!(ids(boards.tier("S2").unwrap()), vec![3, 4]);
        assert_eq!(ids(boards.single_season().unwrap()), vec![3, 1, 4]);
        assert_eq!(ids(boards.all_time().unwrap()), vec![1]);

        // Without a team filter the stint rows stay out and the summary row ranks.
        let boards = build("HR", &rows, &ctx, &LeaderboardRequest::new(Side::Hitting));
        assert_eq!(ids(boards.tier("S2").unwrap()), vec![4, 3]);
    }

    #[test]
    fn raw_team_filter_when_no_franchise_matches() {
        let info = seasons(&[("S1", 10)], None);
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1"]);
        let rows = vec![
            row(1, "S1", "ZZZ", &[("HR", 5.0)]),
            sub(row(2, "S1", "ZZZ", &[("HR", 2.0)])),
            row(3, "S1", "YYY", &[("HR", 9.0)]),
        ];
        let mut req = LeaderboardRequest::new(Side::Hitting);
        req.team = Some("ZZZ".into());
        assert_eq!(ids(build("HR", &rows, &ctx, &req).tier("S1").unwrap()), vec![1, 2]);
    }

    #[test]
    fn current_season_before_halfway_is_left_out_of_single_season() {
        let info = seasons(&[("S1", 10), ("S2", 10)], Some(("S2", 4)));
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1", "S2"]);
        let rows = vec![
            row(1, "S1", "AAA", &[("PA", 30.0), ("HR", 5.0), ("AVG", 0.300)]),
            row(2, "S2", "AAA", &[("PA", 10.0), ("HR", 6.0), ("AVG", 0.400)]),
        ];
        let req = LeaderboardRequest::new(Side::Hitting);

        let avg = build("BA", &rows, &ctx, &req);
        assert_eq!(ids(avg.single_season().unwrap()), vec![1]);
        // Per-season tier scales by the four sessions played.
        let s2 = avg.tier("S2").unwrap();
        assert_eq!(ids(s2), vec![2]);
        assert_eq!(s2.qualification_label.as_deref(), Some("8 PA min"));

        let hr = build("HR", &rows, &ctx, &req);
        assert_eq!(ids(hr.single_season().unwrap()), vec![1]);
    }

    #[test]
    fn current_season_past_halfway_counts_toward_single_season() {
        let info = seasons(&[("S1", 10), ("S2", 10)], Some(("S2", 6)));
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1", "S2"]);
        let rows = vec![
            row(1, "S1", "AAA", &[("HR", 5.0)]),
            row(2, "S2", "AAA", &[("HR", 6.0)]),
        ];
        let boards = build("HR", &rows, &ctx, &LeaderboardRequest::new(Side::Hitting));
        assert_eq!(ids(boards.single_season().unwrap()), vec![2, 1]);
    }

    #[test]
    fn zero_session_season_empties_rate_tiers_only() {
        let info = seasons(&[("S1", 0)], None);
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1"]);
        let rows = vec![row(1, "S1", "AAA", &[("PA", 30.0), ("HR", 2.0), ("AVG", 0.3)])];
        let req = LeaderboardRequest::new(Side::Hitting);

        let avg = build("BA", &rows, &ctx, &req);
        assert!(avg.tier("S1").unwrap().rows.is_empty());
        assert!(avg.tier("S1").unwrap().qualification_label.is_none());
        assert!(avg.single_season().unwrap().rows.is_empty());

        let hr = build("HR", &rows, &ctx, &req);
        assert_eq!(ids(hr.tier("S1").unwrap()), vec![1]);
    }

    #[test]
    fn unscheduled_current_season_stays_out_of_rate_tiers() {
        let info = seasons(&[("S1", 10), ("S2", 0)], Some(("S2", 8)));
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1", "S2"]);
        let rows = vec![
            row(1, "S1", "AAA", &[("PA", 30.0), ("AVG", 0.300)]),
            row(2, "S2", "AAA", &[("PA", 40.0), ("AVG", 0.400)]),
        ];
        let boards = build("BA", &rows, &ctx, &LeaderboardRequest::new(Side::Hitting));
        let s2 = boards.tier("S2").unwrap();
        assert!(s2.rows.is_empty());
        assert!(s2.qualification_label.is_none());
        assert_eq!(ids(boards.single_season().unwrap()), vec![1]);
    }

    #[test]
    fn pitching_season_minimum_uses_rounded_outs() {
        let info = seasons(&[("S1", 10)], None);
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1"]);
        let rows = vec![
            // 9.667 innings rounds to 29 outs; the minimum is 30.
            row(1, "S1", "AAA", &[("IP", 9.667), ("ERA", 1.0)]),
            row(2, "S1", "AAA", &[("IP", 10.0), ("ERA", 2.0)]),
        ];
        let boards = build("ERA", &rows, &ctx, &LeaderboardRequest::new(Side::Pitching));
        let tier = boards.tier("S1").unwrap();
        assert_eq!(ids(tier), vec![2]);
        assert_eq!(tier.qualification_label.as_deref(), Some("10.0 IP min"));
    }

    #[test]
    fn zero_length_falls_back_to_default() {
        let info = seasons(&[("S1", 10)], None);
        let history = FranchiseHistory::new();
        let ctx = context(&info, &history, &["S1"]);
        let rows: Vec<StatRow> = (1..=15)
            .map(|i| row(i, "S1", "AAA", &[("HR", i as f64)]))
            .collect();
        let mut req = LeaderboardRequest::new(Side::Hitting);
        req.length = 0;
        let boards = build("HR", &rows, &ctx, &req);
        let tier = boards.tier("S1").unwrap();
        assert_eq!(tier.rows.len(), DEFAULT_LENGTH);
        assert_eq!(tier.candidates, 15);
    }
}
