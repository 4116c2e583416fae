//! Top-N ranking over an [`Aggregate`].

use std::cmp::Ordering;
use std::hash::Hash;

use birth_map_analytics_models::AggregateRow;

use crate::aggregate::Aggregate;

/// Descending order that places incomparable values (`NaN`) after every
/// comparable one.
fn descending<V: PartialOrd>(a: &V, b: &V) -> Ordering {
    let a_ok = a.partial_cmp(a).is_some();
    let b_ok = b.partial_cmp(b).is_some();
    match (a_ok, b_ok) {
        (true, true) => b.partial_cmp(a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// All rows sorted by value, highest first. Equal values keep the order in
/// which their keys were first aggregated.
#[must_use]
pub fn ranked<K, V>(agg: &Aggregate<K, V>) -> Vec<AggregateRow<K, V>>
where
    K: Eq + Hash + Clone,
    V: PartialOrd + Clone,
{
    let mut rows: Vec<(&K, &V)> = agg.iter().collect();
    // `sort_by` is stable, which is what gives first-seen tie-breaking.
    rows.sort_by(|a, b| descending(a.1, b.1));
    rows.into_iter()
        .map(|(k, v)| AggregateRow {
            key: k.clone(),
            value: v.clone(),
        })
        .collect()
}

/// The `n` highest-valued rows. Returns every row when there are fewer than
/// `n`, and nothing when `n` is zero.
#[must_use]
pub fn top_n<K, V>(agg: &Aggregate<K, V>, n: usize) -> Vec<AggregateRow<K, V>>
where
    K: Eq + Hash + Clone,
    V: PartialOrd + Clone,
{
    let mut rows = ranked(agg);
    rows.truncate(n);
    rows
}
