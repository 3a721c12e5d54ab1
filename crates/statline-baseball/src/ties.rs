// Tie handling at the leaderboard cutoff and competition ranking.

/// Rows tied at the cutoff that were left off a truncated leaderboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TieInfo {
    /// How many rows in the full list share the tied value.
    pub count: usize,
    pub value: f64,
}

#[derive(Debug)]
pub struct Tie<'a, T> {
    pub count: usize,
    /// Last row that would have fit under the limit.
    pub boundary: &'a T,
}

#[derive(Debug)]
pub struct Truncation<'a, T> {
    pub shown: &'a [T],
    pub tie: Option<Tie<'a, T>>,
}

/// Cut a sorted list down to `limit` rows without splitting a tie.
///
/// When the rows on both sides of the cutoff are tied, the whole tied group
/// is dropped and reported instead, so the list may come back shorter than
/// `limit`.
pub fn truncate<'a, T, F>(sorted: &'a [T], limit: usize, tied: F) -> Truncation<'a, T>
where
    F: Fn(&T, &T) -> bool,
{
    if limit == 0 {
        return Truncation {
            shown: &[],
            tie: None,
        };
    }
    if sorted.len() <= limit || !tied(&sorted[limit - 1], &sorted[limit]) {
        return Truncation {
            shown: &sorted[..limit.min(sorted.len())],
            tie: None,
        };
    }

    let boundary = &sorted[limit - 1];
    let mut first = limit - 1;
    while first > 0 && tied(&sorted[first - 1], boundary) {
        first -= 1;
    }
    let count = sorted.iter().filter(|row| tied(row, boundary)).count();

    Truncation {
        shown: &sorted[..first],
        tie: Some(Tie { count, boundary }),
    }
}

/// Standard competition ranks ("1, 1, 3") for an already sorted list.
pub fn competition_ranks<T, F>(rows: &[T], tied: F) -> Vec<usize>
where
    F: Fn(&T, &T) -> bool,
{
    let mut ranks: Vec<usize> = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let rank = match ranks.last() {
            Some(&prev) if tied(&rows[i - 1], row) => prev,
            _ => i + 1,
        };
        ranks.push(rank);
    }
    ranks
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
