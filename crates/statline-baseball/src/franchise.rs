// Franchise history lookups: which abbreviation and name a franchise used in
// a given season.

use std::fmt;

use statline_core::model::{season_number, FranchiseHistory, TeamEra};
use tracing::warn;

/// Logo variant to pick for an era.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Problems in a franchise's era list that make lookups ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EraIssue {
    EndsBeforeStart { franchise: String, abbr: String },
    Overlap { franchise: String, first: String, second: String },
    Gap { franchise: String, after: u32, resumes: u32 },
}

impl fmt::Display for EraIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EraIssue::EndsBeforeStart { franchise, abbr } => {
                write!(f, "{franchise}: era {abbr} ends before it starts")
            }
            EraIssue::Overlap { franchise, first, second } => {
                write!(f, "{franchise}: eras {first} and {second} overlap")
            }
            EraIssue::Gap { franchise, after, resumes } => {
                write!(f, "{franchise}: no era covers seasons {} to {}", after + 1, resumes - 1)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FranchiseResolver<'a> {
    history: &'a FranchiseHistory,
}

impl<'a> FranchiseResolver<'a> {
    pub fn new(history: &'a FranchiseHistory) -> Self {
        FranchiseResolver { history }
    }

    pub fn is_franchise(&self, key: &str) -> bool {
        self.history.contains_key(key)
    }

    pub fn franchise_keys(&self) -> impl Iterator<Item = &'a str> {
        self.history.keys().map(String::as_str)
    }

    /// Era of `franchise` covering `season`, if any.
    pub fn era(&self, franchise: &str, season: &str) -> Option<&'a TeamEra> {
        let number = season_number(season)?;
        self.history
            .get(franchise)?
            .iter()
            .find(|era| era.contains(number))
    }

    /// Abbreviation the franchise used in `season`.
    pub fn abbr_for(&self, franchise: &str, season: &str) -> Option<&'a str> {
        self.era(franchise, season).map(|e| e.abbr.as_str())
    }

    /// Display name of the franchise in `season`, falling back to the key.
    pub fn name_for<'k>(&self, franchise: &'k str, season: &str) -> &'k str
    where
        'a: 'k,
    {
        self.era(franchise, season)
            .map(|e| e.name.as_str())
            .unwrap_or(franchise)
    }

    pub fn logo_for(&self, franchise: &str, season: &str, theme: Theme) -> Option<&'a str> {
        let era = self.era(franchise, season)?;
        match theme {
            Theme::Light => era.logo_light.as_deref(),
            Theme::Dark => era.logo_dark.as_deref(),
        }
    }

    /// Franchise that used `abbr` in `season`, falling back to the
    /// abbreviation itself.
    pub fn franchise_for<'k>(&self, abbr: &'k str, season: &str) -> &'k str
    where
        'a: 'k,
    {
        let Some(number) = season_number(season) else {
            return abbr;
        };
        self.history
            .iter()
            .find(|(_, eras)| eras.iter().any(|e| e.abbr == abbr && e.contains(number)))
            .map(|(key, _)| key.as_str())
            .unwrap_or(abbr)
    }

    /// True when `team` is the abbreviation `franchise` used in `season`.
    pub fn matches(&self, franchise: &str, team: &str, season: &str) -> bool {
        let Some(number) = season_number(season) else {
            return false;
        };
        self.history
            .get(franchise)
            .is_some_and(|eras| eras.iter().any(|e| e.abbr == team && e.contains(number)))
    }

    /// Check every franchise for inverted, overlapping or non-contiguous eras.
    /// Each issue is logged; lookups still take the first matching era.
    pub fn validate(&self) -> Vec<EraIssue> {
        let mut issues = Vec::new();
        for (franchise, eras) in self.history {
            let mut sorted: Vec<&TeamEra> = eras.iter().collect();
            sorted.sort_by_key(|e| e.start);

            for era in &sorted {
                if era.end.is_some_and(|end| end < era.start) {
                    issues.push(EraIssue::EndsBeforeStart {
                        franchise: franchise.clone(),
                        abbr: era.abbr.clone(),
                    });
                }
            }

            for pair in sorted.windows(2) {
                let (prev, next) = (pair[0], pair[1]);
                match prev.end {
                    None => issues.push(EraIssue::Overlap {
                        franchise: franchise.clone(),
                        first: prev.abbr.clone(),
                        second: next.abbr.clone(),
                    }),
                    Some(end) if end >= next.start => issues.push(EraIssue::Overlap {
                        franchise: franchise.clone(),
                        first: prev.abbr.clone(),
                        second: next.abbr.clone(),
                    }),
                    Some(end) if end + 1 < next.start => issues.push(EraIssue::Gap {
                        franchise: franchise.clone(),
                        after: end,
                        resumes: next.start,
                    }),
                    Some(_) => {}
                }
            }
        }

        for issue in &issues {
            warn!("Franchise history: {}", issue);
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn era(abbr: &str, name: &str, start: u32, end: Option<u32>) -> TeamEra {
        TeamEra {
            abbr: abbr.into(),
            name: name.into(),
            start,
            end,
            logo_light: Some(format!("{abbr}-light.png")),
            logo_dark: None,
        }
    }

    fn history() -> FranchiseHistory {
        let mut h = FranchiseHistory::new();
        h.insert(
            "Hawks".into(),
            vec![
                era("HWK", "Hawktown Hawks", 1, Some(4)),
                era("HAW", "Harbor Hawks", 5, None),
            ],
        );
        h.insert("Owls".into(), vec![era("OWL", "Oakley Owls", 1, None)]);
        h
    }

    #[test]
    fn abbreviation_follows_eras() {
        let h = history();
        let r = FranchiseResolver::new(&h);
        assert_eq!(r.abbr_for("Hawks", "S4"), Some("HWK"));
        assert_eq!(r.abbr_for("Hawks", "S5"), Some("HAW"));
        assert_eq!(r.abbr_for("Hawks", "S99"), Some("HAW"));
        assert_eq!(r.abbr_for("Hawks", "Career"), None);
        assert_eq!(r.abbr_for("Nobody", "S1"), None);
    }

    #[test]
    fn names_and_reverse_lookup_fall_back() {
        let h = history();
        let r = FranchiseResolver::new(&h);
        assert_eq!(r.name_for("Hawks", "S2"), "Hawktown Hawks");
        assert_eq!(r.name_for("Nobody", "S2"), "Nobody");
        assert_eq!(r.franchise_for("HAW", "S6"), "Hawks");
        assert_eq!(r.franchise_for("HAW", "S2"), "HAW");
        assert_eq!(r.franchise_for("OWL", "S2"), "Owls");
    }

    #[test]
    fn logos_by_theme() {
        let h = history();
        let r = FranchiseResolver::new(&h);
        assert_eq!(r.logo_for("Hawks", "S1", Theme::Light), Some("HWK-light.png"));
        assert_eq!(r.logo_for("Hawks", "S1", Theme::Dark), None);
    }

    #[test]
    fn matches_checks_abbreviation_and_season() {
        let h = history();
        let r = FranchiseResolver::new(&h);
        assert!(r.matches("Hawks", "HWK", "S3"));
        assert!(!r.matches("Hawks", "HWK", "S5"));
        assert!(r.matches("Hawks", "HAW", "S5"));
        assert!(!r.matches("Owls", "HAW", "S5"));
    }

    #[test]
    fn clean_history_validates() {
        let h = history();
        assert!(FranchiseResolver::new(&h).validate().is_empty());
    }

    #[test]
    fn validate_reports_overlaps_and_gaps() {
        let mut h = FranchiseHistory::new();
        h.insert(
            "Gappy".into(),
            vec![era("AAA", "A", 1, Some(2)), era("BBB", "B", 5, None)],
        );
        h.insert(
            "Overlap".into(),
            vec![era("CCC", "C", 1, Some(4)), era("DDD", "D", 3, None)],
        );
        h.insert("Inverted".into(), vec![era("EEE", "E", 6, Some(2))]);

        let issues = FranchiseResolver::new(&h).validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&EraIssue::Gap {
            franchise: "Gappy".into(),
            after: 2,
            resumes: 5,
        }));
        assert!(issues.iter().any(|i| matches!(i, EraIssue::Overlap { franchise, .. } if franchise == "Overlap")));
        assert!(issues.iter().any(|i| matches!(i, EraIssue::EndsBeforeStart { franchise, .. } if franchise == "Inverted")));
        assert_eq!(issues[0].to_string(), "Gappy: no era covers seasons 3 to 4");
    }
}
