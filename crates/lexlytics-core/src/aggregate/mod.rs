//! Pure in-memory reducers, one module per aggregation endpoint.
//!
//! Every reducer is a pure function of the row slices it is handed; the
//! handlers fetch, the reducers fold. Grouping goes through `BTreeMap` so a
//! given input always produces the same output ordering: descending count,
//! with ties left in ascending key order (deterministic but not part of the
//! contract).

pub mod channels;
pub mod conversions;
pub mod devices;
pub mod overview;
pub mod pages;
pub mod realtime;

use std::collections::BTreeMap;

use serde::Serialize;

/// A `{name, count}` frequency bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: i64,
}

/// A `{path, count}` frequency bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathCount {
    pub path: String,
    pub count: i64,
}

/// Fold an iterator of keys into an ordered frequency map.
pub(crate) fn count_keys<I, S>(keys: I) -> BTreeMap<String, i64>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut map = BTreeMap::new();
    for key in keys {
        *map.entry(key.into()).or_insert(0) += 1;
    }
    map
}

/// Frequency map → rows sorted by descending count.
///
/// The sort is stable over the map's key order, so ties come out in
/// ascending key order every time.
pub(crate) fn into_desc_counts(map: BTreeMap<String, i64>) -> Vec<NamedCount> {
    let mut rows: Vec<NamedCount> = map
        .into_iter()
        .map(|(name, count)| NamedCount { name, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// `round(n / d × 100)` as an integer percentage. 0 when `d` is 0; rates
/// over empty windows are zero, never NaN or an error.
pub(crate) fn pct(n: i64, d: i64) -> i64 {
    if d == 0 {
        return 0;
    }
    ((n as f64 / d as f64) * 100.0).round() as i64
}

/// `n / d × 100` rounded to one decimal. 0.0 when `d` is 0.
pub(crate) fn pct1(n: i64, d: i64) -> f64 {
    if d == 0 {
        return 0.0;
    }
    round1(n as f64 / d as f64 * 100.0)
}

pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Integer mean, rounded to the nearest whole unit. 0 when `n` is 0.
pub(crate) fn avg_round(sum: i64, n: i64) -> i64 {
    if n == 0 {
        return 0;
    }
    (sum as f64 / n as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desc_counts_sort_by_count_then_key() {
        let map = count_keys(["b", "a", "b", "c", "a"]);
        let rows = into_desc_counts(map);
        // a and b tie at 2; ascending key order breaks the tie.
        assert_eq!(rows[0], NamedCount { name: "a".into(), count: 2 });
        assert_eq!(rows[1], NamedCount { name: "b".into(), count: 2 });
        assert_eq!(rows[2], NamedCount { name: "c".into(), count: 1 });
    }

    #[test]
    fn group_counts_sum_to_input_size() {
        let keys = ["x", "y", "x", "z", "x", "y"];
        let map = count_keys(keys);
        assert_eq!(map.values().sum::<i64>(), keys.len() as i64);
    }

    #[test]
    fn rates_guard_division_by_zero() {
        assert_eq!(pct(5, 0), 0);
        assert_eq!(pct1(5, 0), 0.0);
        assert_eq!(avg_round(42, 0), 0);
    }

    #[test]
    fn rates_round_to_nearest() {
        assert_eq!(pct(2, 5), 40);
        assert_eq!(pct(1, 3), 33);
        assert_eq!(pct(2, 3), 67);
        assert_eq!(pct1(3, 10), 30.0);
        assert_eq!(pct1(1, 3), 33.3);
        assert_eq!(avg_round(7, 2), 4);
    }
}
