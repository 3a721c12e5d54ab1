// Library root: the leaderboard engine and the league views built on the
// loaded datasets.

pub mod catalog;
pub mod format;
pub mod franchise;
pub mod leaderboard;
pub mod qualification;
pub mod search;
pub mod standings;
pub mod ties;
