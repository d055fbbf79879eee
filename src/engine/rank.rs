//! Descending holdings ranking for leaderboard views.

use crate::models::Record;

/// Number of entries a leaderboard shows
pub const LEADERBOARD_SIZE: usize = 100;

/// Rank records by holdings count, highest first, keeping the top `top_n`.
pub fn rank_records<'a, I>(records: I, top_n: usize) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    rank_records_by(records, Record::holdings, top_n)
}

/// Rank records by a numeric key, highest first, keeping the top `top_n`.
///
/// Keys are computed once per record before sorting, and the sort is
/// stable: records with equal keys keep their input order.
pub fn rank_records_by<'a, I, F>(records: I, key: F, top_n: usize) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> u64,
{
    let mut keyed: Vec<(u64, &Record)> = records.into_iter().map(|r| (key(r), r)).collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.truncate(top_n);

    tracing::debug!(ranked = keyed.len(), top_n, "Ranked records");

    keyed.into_iter().map(|(_, r)| r).collect()
}
