// Player name search over current and former names.

use statline_core::model::PlayerDirectory;

pub const MIN_QUERY_LEN: usize = 2;
pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub player_id: i64,
    /// Current name, even when a former name matched.
    pub name: String,
}

/// Lowercased names mapped to player ids, in player-id order.
#[derive(Debug, Clone, Default)]
pub struct PlayerIndex {
    names: Vec<(String, i64)>,
    current: Vec<(i64, String)>,
}

impl PlayerIndex {
    pub fn new(directory: &PlayerDirectory) -> Self {
        let mut ids: Vec<i64> = directory.keys().copied().collect();
        ids.sort_unstable();

        let mut index = PlayerIndex::default();
        for id in ids {
            let Some(player) = directory.get(&id) else {
                continue;
            };
            index.current.push((id, player.current_name.clone()));
            for name in std::iter::once(&player.current_name).chain(player.former_names.iter()) {
                index.insert(name.to_lowercase(), id);
            }
        }
        index
    }

    /// Later players claiming an identical name take it over.
    fn insert(&mut self, name: String, id: i64) {
        match self.names.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = id,
            None => self.names.push((name, id)),
        }
    }

    fn current_name(&self, id: i64) -> Option<&str> {
        self.current
            .binary_search_by_key(&id, |(pid, _)| *pid)
            .ok()
            .map(|i| self.current[i].1.as_str())
    }

    /// Exact, case-insensitive name lookup.
    pub fn lookup(&self, name: &str) -> Option<i64> {
        let wanted = name.trim().to_lowercase();
        self.names.iter().find(|(n, _)| *n == wanted).map(|(_, id)| *id)
    }

    /// Up to ten players whose current or former name contains the query.
    /// A numeric query also matches a player id exactly.
    pub fn search(&self, query: &str) -> Vec<Suggestion> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        let mut found: Vec<i64> = Vec::new();
        for (name, id) in &self.names {
            if name.contains(&query) && !found.contains(id) {
                found.push(*id);
            }
        }
        if let Ok(id) = query.parse::<i64>() {
            if self.current_name(id).is_some() && !found.contains(&id) {
                found.push(id);
            }
        }

        found
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .filter_map(|id| {
                self.current_name(id).map(|name| Suggestion {
                    player_id: id,
                    name: name.to_string(),
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
