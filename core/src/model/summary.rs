use std::collections::BTreeMap;

use crate::time::format_hms;

/// Cumulative seconds per project name. Backed by a `BTreeMap` so rendering
/// is always sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    totals: BTreeMap<String, u64>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saturates instead of wrapping on absurd totals.
    pub fn add(&mut self, name: &str, secs: u64) {
        let total = self.totals.entry(name.to_string()).or_default();
        *total = total.saturating_add(secs);
    }

    pub fn merge(&mut self, other: &Summary) {
        for (name, secs) in &other.totals {
            self.add(name, *secs);
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.totals.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.totals.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn total(&self) -> u64 {
        self.totals.values().fold(0, |acc, secs| acc.saturating_add(*secs))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// One `name: HH:MM:SS` line per project, newline terminated.
    pub fn render(&self) -> String {
        self.totals
            .iter()
            .map(|(name, secs)| format!("{}: {}\n", name, format_hms(*secs)))
            .collect()
    }
}

impl FromIterator<(String, u64)> for Summary {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut summary = Summary::new();
        for (name, secs) in iter {
            summary.add(&name, secs);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_sorted_by_name() {
        let mut s = Summary::new();
        s.add("beta", 60);
        s.add("Alpha", 5);
        s.add("alpha", 3600);
        // byte order: uppercase before lowercase
        assert_eq!(s.render(), "Alpha: 00:00:05\nalpha: 01:00:00\nbeta: 00:01:00\n");
    }

    #[test]
    fn test_merge_adds_per_name() {
        let mut a: Summary = vec![("A".to_string(), 60), ("B".to_string(), 1)].into_iter().collect();
        let b: Summary = vec![("A".to_string(), 60)].into_iter().collect();
        a.merge(&b);
        assert_eq!(a.get("A"), Some(120));
        assert_eq!(a.get("B"), Some(1));
        assert_eq!(a.total(), 121);
    }

    #[test]
    fn test_add_saturates() {
        let mut s = Summary::new();
        s.add("A", u64::MAX - 1);
        s.add("A", 5);
        s.add("B", 10);
        assert_eq!(s.get("A"), Some(u64::MAX));
        assert_eq!(s.total(), u64::MAX);
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(Summary::new().render(), "");
    }
}
