use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub name: String,
    pub value: T,
}

impl<T> Ranked<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Groups keyed by name, iterated in first-encountered order.
#[derive(Debug)]
pub struct OrderedGroups<'a, V> {
    index: HashMap<&'a str, usize>,
    entries: Vec<(&'a str, V)>,
}

impl<V> Default for OrderedGroups<'_, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<'a, V: Default> OrderedGroups<'a, V> {
    pub fn entry(&mut self, key: &'a str) -> &mut V {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.entries.push((key, V::default()));
                let idx = self.entries.len() - 1;
                self.index.insert(key, idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }
}

impl<'a, V> OrderedGroups<'a, V> {
    pub fn into_entries(self) -> Vec<(&'a str, V)> {
        self.entries
    }
}

/// Occurrence counts per key in first-encountered order, then ranked descending.
pub fn count_values<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<Ranked<u64>> {
    let mut groups: OrderedGroups<'a, u64> = OrderedGroups::default();
    for key in keys {
        *groups.entry(key) += 1;
    }
    let mut rows = groups
        .into_entries()
        .into_iter()
        .map(|(name, n)| Ranked::new(name, n))
        .collect::<Vec<_>>();
    rank_descending(&mut rows);
    rows
}

/// Stable: equal values keep their incoming order.
pub fn rank_descending<T: PartialOrd>(rows: &mut [Ranked<T>]) {
    rows.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
}

/// Stable: equal values keep their incoming order.
pub fn rank_ascending<T: PartialOrd>(rows: &mut [Ranked<T>]) {
    rows.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
}

pub fn top_n<T>(mut rows: Vec<Ranked<T>>, n: usize) -> Vec<Ranked<T>> {
    rows.truncate(n);
    rows
}

/// Ratio as a percentage; 0 when the denominator is 0.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_values_ties_keep_first_seen_order() {
        let rows = count_values(["b", "a", "c", "a", "b", "d"]);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c", "d"]);
        assert_eq!(rows[0].value, 2);
        assert_eq!(rows[3].value, 1);
    }

    #[test]
    fn ascending_rank_is_stable() {
        let mut rows = vec![
            Ranked::new("x", 7.5),
            Ranked::new("y", 6.0),
            Ranked::new("z", 7.5),
        ];
        rank_ascending(&mut rows);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["y", "x", "z"]);
    }

    #[test]
    fn percentage_guards_zero() {
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }
}
