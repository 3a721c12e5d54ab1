// Qualification thresholds: the minimum volume a player needs before a rate
// stat is ranked.
//
// Single-season minimums scale with the sessions a season has (or has played
// so far). All-time minimums are fixed.

use statline_core::config::{CareerConfig, QualificationConfig};
use statline_core::model::{SeasonInfo, Side, StatRow};

use crate::catalog::{attempt_fields, StatKind};
use crate::format::{format_stat, round_half_up};

pub const DEFAULT_PA_PER_SESSION: f64 = 2.0;
pub const DEFAULT_OUTS_PER_SESSION: u32 = 3;
pub const DEFAULT_MIN_ATTEMPTS: u32 = 3;
pub const DEFAULT_MIN_DECISIONS: u32 = 3;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Per-session rates and fixed single-season minimums.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualificationRates {
    pub pa_per_session: f64,
    pub outs_per_session: u32,
    pub min_attempts: u32,
    pub min_decisions: u32,
}

impl Default for QualificationRates {
    fn default() -> Self {
        QualificationRates {
            pa_per_session: DEFAULT_PA_PER_SESSION,
            outs_per_session: DEFAULT_OUTS_PER_SESSION,
            min_attempts: DEFAULT_MIN_ATTEMPTS,
            min_decisions: DEFAULT_MIN_DECISIONS,
        }
    }
}

impl QualificationRates {
    /// Replace zero, negative or non-finite settings with the defaults.
    pub fn effective(self) -> Self {
        let defaults = Self::default();
        QualificationRates {
            pa_per_session: if self.pa_per_session.is_finite() && self.pa_per_session > 0.0 {
                self.pa_per_session
            } else {
                defaults.pa_per_session
            },
            outs_per_session: nonzero_or(self.outs_per_session, defaults.outs_per_session),
            min_attempts: nonzero_or(self.min_attempts, defaults.min_attempts),
            min_decisions: nonzero_or(self.min_decisions, defaults.min_decisions),
        }
    }
}

impl From<&QualificationConfig> for QualificationRates {
    fn from(config: &QualificationConfig) -> Self {
        QualificationRates {
            pa_per_session: config.pa_per_session,
            outs_per_session: config.outs_per_session,
            min_attempts: config.min_attempts,
            min_decisions: config.min_decisions,
        }
    }
}

fn nonzero_or(value: u32, fallback: u32) -> u32 {
    if value == 0 {
        fallback
    } else {
        value
    }
}

/// Fixed minimums for all-time leaderboards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CareerMinimums {
    pub min_pa: u32,
    /// Innings, not outs.
    pub min_ip: f64,
    pub min_attempts: u32,
    pub min_decisions: u32,
}

impl Default for CareerMinimums {
    fn default() -> Self {
        CareerMinimums {
            min_pa: 100,
            min_ip: 50.0,
            min_attempts: 10,
            min_decisions: 10,
        }
    }
}

impl From<&CareerConfig> for CareerMinimums {
    fn from(config: &CareerConfig) -> Self {
        CareerMinimums {
            min_pa: config.min_pa,
            min_ip: config.min_ip,
            min_attempts: config.min_attempts,
            min_decisions: config.min_decisions,
        }
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Which leaderboard a threshold is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierKind {
    AllTime,
    /// Best individual seasons across every season.
    SingleSeason,
    /// One specific season.
    Season,
}

/// Volume measure a threshold is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualMetric {
    PlateAppearances,
    InningsPitched,
    Outs,
    Attempts,
    Decisions,
}

impl QualMetric {
    pub fn volume(&self, row: &StatRow, side: Side) -> f64 {
        match self {
            QualMetric::PlateAppearances => row.stat("PA"),
            QualMetric::InningsPitched => row.stat("IP"),
            QualMetric::Outs => outs_from_innings(row.stat("IP")),
            QualMetric::Attempts => {
                let (sb, cs) = attempt_fields(side);
                row.stat(sb) + row.stat(cs)
            }
            QualMetric::Decisions => row.stat("W") + row.stat("L"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub metric: QualMetric,
    pub value: f64,
}

impl Threshold {
    pub fn admits(&self, row: &StatRow, side: Side) -> bool {
        self.metric.volume(row, side) >= self.value
    }

    /// Human-readable minimum, e.g. `"21 PA min"` or `"10.0 IP min"`.
    /// Outs are shown as innings.
    pub fn label(&self) -> String {
        let (amount, unit) = match self.metric {
            QualMetric::PlateAppearances => (self.value.ceil().to_string(), "PA"),
            QualMetric::InningsPitched => (format_stat("IP", self.value), "IP"),
            QualMetric::Outs => (format_stat("IP", self.value / 3.0), "IP"),
            QualMetric::Attempts => (round_half_up(self.value).to_string(), "Attempts"),
            QualMetric::Decisions => (round_half_up(self.value).to_string(), "Decisions"),
        };
        format!("{amount} {unit} min")
    }
}

/// Outcome of asking for a tier's minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Qualification {
    /// Counting stats rank everyone.
    Exempt,
    Minimum(Threshold),
    /// The season has no sessions to scale by; nobody qualifies.
    Unavailable,
}

/// Innings (`12.333`) to whole outs (`37`), halves rounded up.
pub fn outs_from_innings(ip: f64) -> f64 {
    round_half_up(ip * 3.0) as f64
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct QualificationCalculator<'a> {
    seasons: &'a SeasonInfo,
    rates: QualificationRates,
    career: CareerMinimums,
}

impl<'a> QualificationCalculator<'a> {
    pub fn new(seasons: &'a SeasonInfo, rates: QualificationRates, career: CareerMinimums) -> Self {
        QualificationCalculator {
            seasons,
            rates: rates.effective(),
            career,
        }
    }

    /// Sessions to scale a season's minimum by: sessions played so far for
    /// the current season, otherwise the scheduled count. A season with no
    /// scheduled sessions stays at zero whatever has been played.
    pub fn sessions_for(&self, season: &str) -> u32 {
        let scheduled = self.seasons.scheduled(season);
        if scheduled == 0 {
            return 0;
        }
        match &self.seasons.current {
            Some(current) if current.season == season && current.sessions_completed > 0 => {
                current.sessions_completed
            }
            _ => scheduled,
        }
    }

    /// The current season, while it has not passed the halfway point. Its
    /// rows are left out of the single-season leaderboard for counting and
    /// session-scaled stats.
    pub fn season_excluded_from_single_season(&self) -> Option<&'a str> {
        let current = self.seasons.current.as_ref()?;
        let total = self.seasons.scheduled(&current.season);
        if total > 0 && f64::from(current.sessions_completed) <= f64::from(total) / 2.0 {
            Some(current.season.as_str())
        } else {
            None
        }
    }

    /// Minimum for a leaderboard tier. `season` is needed for
    /// session-scaled minimums on single-season and per-season tiers.
    pub fn minimum_threshold(
        &self,
        tier: TierKind,
        kind: StatKind,
        side: Side,
        season: Option<&str>,
    ) -> Qualification {
        let all_time = tier == TierKind::AllTime;
        match kind {
            StatKind::Counting => Qualification::Exempt,
            StatKind::StolenBasePct => Qualification::Minimum(Threshold {
                metric: QualMetric::Attempts,
                value: f64::from(if all_time {
                    self.career.min_attempts
                } else {
                    self.rates.min_attempts
                }),
            }),
            StatKind::WinLossPct => Qualification::Minimum(Threshold {
                metric: QualMetric::Decisions,
                value: f64::from(if all_time {
                    self.career.min_decisions
                } else {
                    self.rates.min_decisions
                }),
            }),
            StatKind::Rate if all_time => Qualification::Minimum(match side {
                Side::Hitting => Threshold {
                    metric: QualMetric::PlateAppearances,
                    value: f64::from(self.career.min_pa),
                },
                Side::Pitching => Threshold {
                    metric: QualMetric::InningsPitched,
                    value: self.career.min_ip,
                },
            }),
            StatKind::Rate => {
                let sessions = season.map_or(0, |s| self.sessions_for(s));
                if sessions == 0 {
                    return Qualification::Unavailable;
                }
                Qualification::Minimum(self.session_scaled(side, sessions))
            }
        }
    }

    fn session_scaled(&self, side: Side, sessions: u32) -> Threshold {
        match side {
            Side::Hitting => Threshold {
                metric: QualMetric::PlateAppearances,
                value: self.rates.pa_per_session * f64::from(sessions),
            },
            Side::Pitching => Threshold {
                metric: QualMetric::Outs,
                value: f64::from(self.rates.outs_per_session) * f64::from(sessions),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use statline_core::model::{CurrentSeason, Scope};
    use std::collections::HashMap;

    fn seasons(current: Option<(&str, u32)>) -> SeasonInfo {
        SeasonInfo {
            sessions: HashMap::from([
                ("S9".to_string(), 12),
                ("S10".to_string(), 10),
                ("S11".to_string(), 10),
                ("S12".to_string(), 0),
            ]),
            current: current.map(|(season, done)| CurrentSeason {
                season: season.into(),
                sessions_completed: done,
            }),
        }
    }

    fn calc(info: &SeasonInfo) -> QualificationCalculator<'_> {
        QualificationCalculator::new(info, QualificationRates::default(), CareerMinimums::default())
    }

    fn row(stats: &[(&str, f64)]) -> StatRow {
        StatRow {
            player_id: 1,
            scope: Scope::Season("S10".into()),
            team: None,
            player_type: None,
            is_sub_row: false,
            stats: stats.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    fn minimum(q: Qualification) -> Threshold {
        match q {
            Qualification::Minimum(t) => t,
            other => panic!("expected a minimum, got {other:?}"),
        }
    }

    #[test]
    fn hitting_season_minimum_scales_with_sessions() {
        let info = seasons(None);
        let t = minimum(calc(&info).minimum_threshold(TierKind::Season, StatKind::Rate, Side::Hitting, Some("S10")));
        assert_eq!(t.metric, QualMetric::PlateAppearances);
        assert_eq!(t.value, 20.0);
        assert_eq!(t.label(), "20 PA min");
    }

    #[test]
    fn pitching_season_minimum_is_in_outs_shown_as_innings() {
        let info = seasons(None);
        let t = minimum(calc(&info).minimum_threshold(TierKind::Season, StatKind::Rate, Side::Pitching, Some("S10")));
        assert_eq!(t.metric, QualMetric::Outs);
        assert_eq!(t.value, 30.0);
        assert_eq!(t.label(), "10.0 IP min");
    }

    #[test]
    fn current_season_uses_sessions_completed() {
        let info = seasons(Some(("S11", 4)));
        let c = calc(&info);
        assert_eq!(c.sessions_for("S11"), 4);
        assert_eq!(c.sessions_for("S10"), 10);
        let t = minimum(c.minimum_threshold(TierKind::Season, StatKind::Rate, Side::Hitting, Some("S11")));
        assert_eq!(t.value, 8.0);

        // No sessions played yet: fall back to the schedule.
        let info = seasons(Some(("S11", 0)));
        assert_eq!(calc(&info).sessions_for("S11"), 10);
    }

    #[test]
    fn unscheduled_current_season_stays_unavailable() {
        // S12 is scheduled at zero sessions; games played do not revive it.
        let info = seasons(Some(("S12", 8)));
        let c = calc(&info);
        assert_eq!(c.sessions_for("S12"), 0);
        assert_eq!(
            c.minimum_threshold(TierKind::Season, StatKind::Rate, Side::Hitting, Some("S12")),
            Qualification::Unavailable
        );
        // Missing from the schedule entirely.
        let info = seasons(Some(("S13", 8)));
        assert_eq!(calc(&info).sessions_for("S13"), 0);
    }

    #[test]
    fn fractional_plate_appearance_minimum_rounds_up_in_label() {
        let info = seasons(None);
        let rates = QualificationRates {
            pa_per_session: 2.05,
            ..Default::default()
        };
        let c = QualificationCalculator::new(&info, rates, CareerMinimums::default());
        let t = minimum(c.minimum_threshold(TierKind::Season, StatKind::Rate, Side::Hitting, Some("S10")));
        assert!((t.value - 20.5).abs() < 1e-9);
        assert_eq!(t.label(), "21 PA min");
        assert!(!t.admits(&row(&[("PA", 20.0)]), Side::Hitting));
        assert!(t.admits(&row(&[("PA", 21.0)]), Side::Hitting));
    }

    #[test]
    fn zero_session_season_is_unavailable() {
        let info = seasons(None);
        let c = calc(&info);
        assert_eq!(
            c.minimum_threshold(TierKind::Season, StatKind::Rate, Side::Hitting, Some("S12")),
            Qualification::Unavailable
        );
        assert_eq!(
            c.minimum_threshold(TierKind::Season, StatKind::Rate, Side::Hitting, Some("S77")),
            Qualification::Unavailable
        );
        assert_eq!(
            c.minimum_threshold(TierKind::Season, StatKind::Counting, Side::Hitting, Some("S12")),
            Qualification::Exempt
        );
    }

    #[test]
    fn all_time_minimums_are_fixed() {
        let info = seasons(None);
        let c = calc(&info);
        let pa = minimum(c.minimum_threshold(TierKind::AllTime, StatKind::Rate, Side::Hitting, None));
        assert_eq!((pa.metric, pa.value), (QualMetric::PlateAppearances, 100.0));
        assert_eq!(pa.label(), "100 PA min");

        let ip = minimum(c.minimum_threshold(TierKind::AllTime, StatKind::Rate, Side::Pitching, None));
        assert_eq!((ip.metric, ip.value), (QualMetric::InningsPitched, 50.0));
        assert_eq!(ip.label(), "50.0 IP min");

        let dec = minimum(c.minimum_threshold(TierKind::AllTime, StatKind::WinLossPct, Side::Pitching, None));
        assert_eq!(dec.label(), "10 Decisions min");
        let att = minimum(c.minimum_threshold(TierKind::AllTime, StatKind::StolenBasePct, Side::Hitting, None));
        assert_eq!(att.label(), "10 Attempts min");
    }

    #[test]
    fn season_volume_minimums_use_fixed_settings() {
        let info = seasons(None);
        let c = calc(&info);
        let dec = minimum(c.minimum_threshold(TierKind::SingleSeason, StatKind::WinLossPct, Side::Pitching, None));
        assert_eq!(dec.value, 3.0);
        let att = minimum(c.minimum_threshold(TierKind::Season, StatKind::StolenBasePct, Side::Pitching, Some("S12")));
        assert_eq!(att.value, 3.0);
        assert!(att.admits(&row(&[("SB_A", 2.0), ("CS_A", 1.0)]), Side::Pitching));
        assert!(!att.admits(&row(&[("SB", 2.0), ("CS", 1.0)]), Side::Pitching));
    }

    #[test]
    fn non_positive_settings_fall_back_to_defaults() {
        let rates = QualificationRates {
            pa_per_session: -1.0,
            outs_per_session: 0,
            min_attempts: 0,
            min_decisions: 5,
        }
        .effective();
        assert_eq!(rates.pa_per_session, DEFAULT_PA_PER_SESSION);
        assert_eq!(rates.outs_per_session, DEFAULT_OUTS_PER_SESSION);
        assert_eq!(rates.min_attempts, DEFAULT_MIN_ATTEMPTS);
        assert_eq!(rates.min_decisions, 5);
    }

    #[test]
    fn halfway_rule_for_current_season() {
        assert_eq!(calc(&seasons(Some(("S10", 5)))).season_excluded_from_single_season(), Some("S10"));
        assert_eq!(calc(&seasons(Some(("S10", 6)))).season_excluded_from_single_season(), None);
        // Unknown schedule: nothing to compare against.
        assert_eq!(calc(&seasons(Some(("S12", 0)))).season_excluded_from_single_season(), None);
        assert_eq!(calc(&seasons(None)).season_excluded_from_single_season(), None);
    }

    #[test]
    fn outs_round_half_up() {
        assert_eq!(outs_from_innings(10.0), 30.0);
        assert_eq!(outs_from_innings(9.666_667), 29.0);
        assert_eq!(outs_from_innings(10.333_333), 31.0);
        assert_eq!(outs_from_innings(0.5), 2.0);
    }
}
