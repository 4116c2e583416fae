//! Group-by with running sums.
//!
//! [`Aggregate`] is an insertion-ordered map from group key to accumulated
//! value. Insertion order is what makes top-N tie-breaking deterministic:
//! equal values rank in the order their keys were first seen.
//!
//! Every function here borrows its input, so the same record slice can be
//! re-grouped any number of ways.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::AddAssign;

use birth_map_analytics_models::AggregateRow;

/// Insertion-ordered mapping from group key to accumulated value.
#[derive(Debug, Clone)]
pub struct Aggregate<K, V> {
    index: HashMap<K, usize>,
    rows: Vec<(K, V)>,
}

impl<K, V> Default for Aggregate<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            rows: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> Aggregate<K, V> {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or `None` if no record produced it.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&idx| &self.rows[idx].1)
    }

    /// Whether `key` has a value.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Mutable access to the value for `key`, inserting `V::default()` at
    /// the end of the order if the key is new.
    pub fn entry_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.rows.len();
                self.index.insert(key.clone(), idx);
                self.rows.push((key, V::default()));
                idx
            }
        };
        &mut self.rows[idx].1
    }

    /// Adds `value` to the running total for `key`, inserting it as the
    /// first value if the key is new.
    pub fn accumulate(&mut self, key: K, value: V)
    where
        V: AddAssign,
    {
        if let Some(&idx) = self.index.get(&key) {
            self.rows[idx].1 += value;
        } else {
            self.index.insert(key.clone(), self.rows.len());
            self.rows.push((key, value));
        }
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no key has been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.rows.iter().map(|(k, v)| (k, v))
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.rows.iter().map(|(k, _)| k)
    }

    /// Values in first-seen order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.rows.iter().map(|(_, v)| v)
    }

    /// Transforms every value, keeping keys and order.
    #[must_use]
    pub fn map_values<W>(self, mut f: impl FnMut(V) -> W) -> Aggregate<K, W> {
        Aggregate {
            index: self.index,
            rows: self.rows.into_iter().map(|(k, v)| (k, f(v))).collect(),
        }
    }

    /// Consumes the aggregate into rows in first-seen order.
    #[must_use]
    pub fn into_rows(self) -> Vec<AggregateRow<K, V>> {
        self.rows
            .into_iter()
            .map(|(key, value)| AggregateRow { key, value })
            .collect()
    }
}

impl<K: Eq + Hash + Clone, V: AddAssign> FromIterator<(K, V)> for Aggregate<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut agg = Self::new();
        for (k, v) in iter {
            agg.accumulate(k, v);
        }
        agg
    }
}

/// Sums `measure` per key. Records whose key is `None` are skipped; the
/// number skipped is returned alongside the aggregate.
pub fn sum_by_filtered<'a, R, K, V>(
    records: impl IntoIterator<Item = &'a R>,
    key: impl Fn(&R) -> Option<K>,
    measure: impl Fn(&R) -> V,
) -> (Aggregate<K, V>, usize)
where
    R: 'a,
    K: Eq + Hash + Clone,
    V: AddAssign,
{
    let mut agg = Aggregate::new();
    let mut skipped = 0;

    for record in records {
        match key(record) {
            Some(k) => agg.accumulate(k, measure(record)),
            None => skipped += 1,
        }
    }

    (agg, skipped)
}

/// Sums `measure` per key.
pub fn sum_by<'a, R, K, V>(
    records: impl IntoIterator<Item = &'a R>,
    key: impl Fn(&R) -> K,
    measure: impl Fn(&R) -> V,
) -> Aggregate<K, V>
where
    R: 'a,
    K: Eq + Hash + Clone,
    V: AddAssign,
{
    sum_by_filtered(records, |r| Some(key(r)), measure).0
}

/// Counts records per key.
pub fn count_by<'a, R, K>(
    records: impl IntoIterator<Item = &'a R>,
    key: impl Fn(&R) -> K,
) -> Aggregate<K, u64>
where
    R: 'a,
    K: Eq + Hash + Clone,
{
    sum_by(records, key, |_| 1)
}

/// Buckets records per key without reducing them. Records whose key is
/// `None` are skipped and counted.
pub fn partition_by_filtered<'a, R, K>(
    records: impl IntoIterator<Item = &'a R>,
    key: impl Fn(&R) -> Option<K>,
) -> (Aggregate<K, Vec<&'a R>>, usize)
where
    K: Eq + Hash + Clone,
{
    let mut buckets: Aggregate<K, Vec<&'a R>> = Aggregate::new();
    let mut skipped = 0;

    for record in records {
        match key(record) {
            Some(k) => buckets.entry_or_default(k).push(record),
            None => skipped += 1,
        }
    }

    (buckets, skipped)
}

/// Buckets records per key without reducing them.
pub fn partition_by<'a, R, K>(
    records: impl IntoIterator<Item = &'a R>,
    key: impl Fn(&R) -> K,
) -> Aggregate<K, Vec<&'a R>>
where
    K: Eq + Hash + Clone,
{
    partition_by_filtered(records, |r| Some(key(r))).0
}

/// Two-level grouping: buckets by `outer`, then sums `measure` by `inner`
/// within each bucket.
pub fn nested_sum_by<'a, R, K1, K2, V>(
    records: impl IntoIterator<Item = &'a R>,
    outer: impl Fn(&R) -> K1,
    inner: impl Fn(&R) -> K2,
    measure: impl Fn(&R) -> V,
) -> Aggregate<K1, Aggregate<K2, V>>
where
    R: 'a,
    K1: Eq + Hash + Clone,
    K2: Eq + Hash + Clone,
    V: AddAssign,
{
    partition_by(records, outer)
        .map_values(|bucket| sum_by(bucket.iter().copied(), &inner, &measure))
}

#[cfg(test)]
mod tests {
    use birth_map_records_models::BirthRecord;

    use super::*;

    fn birth(state: &str, year: i32, month: u8, births: u64) -> BirthRecord {
        BirthRecord {
            state_fips: state.to_string(),
            year,
            month,
            births,
        }
    }

    #[test]
    fn sums_by_year_and_state() {
        let records = vec![birth("06", 2006, 3, 100), birth("06", 2006, 4, 50)];
        let agg = sum_by(&records, |r| (r.year, r.state_fips.clone()), |r| r.births);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.get(&(2006, "06".to_string())), Some(&150));
    }

    #[test]
    fn value_equals_sum_over_matching_records() {
        let records = vec![
            birth("06", 2006, 1, 10),
            birth("36", 2006, 1, 7),
            birth("06", 2007, 1, 5),
            birth("06", 2006, 2, 3),
        ];
        let agg = sum_by(&records, |r| (r.year, r.state_fips.clone()), |r| r.births);
        for (key, value) in agg.iter() {
            let expected: u64 = records
                .iter()
                .filter(|r| (r.year, r.state_fips.clone()) == *key)
                .map(|r| r.births)
                .sum();
            assert_eq!(*value, expected);
        }
    }

    #[test]
    fn new_key_adds_exactly_one_group() {
        let mut records = vec![birth("06", 2006, 1, 10), birth("36", 2006, 1, 7)];
        let before = sum_by(&records, |r| r.state_fips.clone(), |r| r.births).len();
        records.push(birth("48", 2006, 1, 1));
        let after = sum_by(&records, |r| r.state_fips.clone(), |r| r.births).len();
        assert_eq!(after, before + 1);
    }

    #[test]
    fn regrouping_leaves_input_untouched() {
        let records = vec![birth("06", 2006, 3, 100), birth("36", 2007, 7, 20)];
        let by_state = sum_by(&records, |r| r.state_fips.clone(), |r| r.births);
        let by_month = sum_by(&records, |r| r.month, |r| r.births);
        assert_eq!(by_state.len(), 2);
        assert_eq!(by_month.get(&7), Some(&20));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].births, 100);
    }

    #[test]
    fn preserves_first_seen_order() {
        let records = vec![
            birth("36", 2006, 1, 1),
            birth("06", 2006, 1, 1),
            birth("36", 2006, 2, 1),
        ];
        let agg = sum_by(&records, |r| r.state_fips.clone(), |r| r.births);
        let keys: Vec<_> = agg.keys().cloned().collect();
        assert_eq!(keys, ["36", "06"]);
    }

    #[test]
    fn filtered_sum_counts_skipped_records() {
        let records = vec![birth("06", 2006, 1, 4), birth("99", 2006, 1, 9)];
        let (agg, skipped) = sum_by_filtered(
            &records,
            |r| (r.state_fips != "99").then(|| r.state_fips.clone()),
            |r| r.births,
        );
        assert_eq!(skipped, 1);
        assert_eq!(agg.get("06"), Some(&4));
        assert_eq!(agg.get("99"), None);
    }

    #[test]
    fn counts_records() {
        let records = vec![birth("06", 2006, 1, 4), birth("06", 2007, 1, 9)];
        let agg = count_by(&records, |r| r.state_fips.clone());
        assert_eq!(agg.get("06"), Some(&2));
    }

    #[test]
    fn nested_matches_flat_grouping() {
        let records = vec![
            birth("06", 2006, 1, 4),
            birth("36", 2006, 1, 2),
            birth("06", 2007, 1, 9),
            birth("06", 2006, 5, 1),
        ];
        let nested = nested_sum_by(&records, |r| r.year, |r| r.state_fips.clone(), |r| r.births);
        let flat = sum_by(&records, |r| (r.year, r.state_fips.clone()), |r| r.births);

        assert_eq!(nested.len(), 2);
        for ((year, state), value) in flat.iter() {
            assert_eq!(nested.get(year).and_then(|y| y.get(state)), Some(value));
        }
    }

    #[test]
    fn partitions_keep_record_order() {
        let records = vec![birth("06", 2006, 1, 4), birth("06", 2007, 1, 9)];
        let buckets = partition_by(&records, |r| r.state_fips.clone());
        let bucket = buckets.get("06").unwrap();
        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket[1].year, 2007);
    }

    #[test]
    fn collects_from_pairs() {
        let agg: Aggregate<&str, u64> = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        let rows = agg.into_rows();
        assert_eq!(rows[0], AggregateRow { key: "a", value: 4 });
        assert_eq!(rows[1], AggregateRow { key: "b", value: 2 });
    }
}
