use std::collections::HashMap;
use std::hash::Hash;

/// Success counts per progress key.
///
/// The tracker knows nothing about mastery; thresholds are supplied by the
/// caller on each [`ProgressTracker::available`] query. Counts only ever go
/// up until the next [`ProgressTracker::reset`].
#[derive(Clone, Debug)]
pub struct ProgressTracker<K> {
    counts: HashMap<K, u32>,
}

impl<K> Default for ProgressTracker<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> ProgressTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all counts and start every given key at zero.
    pub fn reset<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        self.counts.clear();
        for key in keys {
            self.counts.insert(key, 0);
        }
    }

    pub fn increment(&mut self, key: &K) -> u32 {
        let count = self.counts.entry(key.clone()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn count(&self, key: &K) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Items whose count is still below `threshold`, in their original order.
    pub fn available<'a, T>(
        &self,
        items: &'a [T],
        threshold: u32,
        key_of: impl Fn(&T) -> K,
    ) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| self.count(&key_of(item)) < threshold)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Vec<&'static str> {
        vec!["cat", "dog", "sun"]
    }

    #[test]
    fn reset_zeroes_every_key() {
        let mut tracker = ProgressTracker::new();
        tracker.increment(&"old");
        tracker.reset(words());
        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.count(&"old"), 0);
        for w in words() {
            assert_eq!(tracker.count(&w), 0);
        }
    }

    #[test]
    fn after_reset_everything_is_available() {
        let mut tracker = ProgressTracker::new();
        tracker.reset(words());
        let items = words();
        let available = tracker.available(&items, 2, |w| *w);
        assert_eq!(available, vec![&"cat", &"dog", &"sun"]);
    }

    #[test]
    fn increment_is_monotonic_and_unbounded() {
        let mut tracker = ProgressTracker::new();
        tracker.reset(words());
        let mut last = 0;
        for _ in 0..5 {
            let now = tracker.increment(&"cat");
            assert!(now > last);
            last = now;
        }
        assert_eq!(tracker.count(&"cat"), 5);
    }

    #[test]
    fn available_filters_below_threshold_preserving_order() {
        let mut tracker = ProgressTracker::new();
        tracker.reset(words());
        tracker.increment(&"dog");
        tracker.increment(&"dog");
        tracker.increment(&"cat");
        let items = words();
        assert_eq!(tracker.available(&items, 2, |w| *w), vec![&"cat", &"sun"]);
        assert_eq!(tracker.available(&items, 1, |w| *w), vec![&"sun"]);
    }

    #[test]
    fn fully_mastered_yields_nothing() {
        let mut tracker = ProgressTracker::new();
        tracker.reset(words());
        for w in words() {
            tracker.increment(&w);
        }
        let items = words();
        assert!(tracker.available(&items, 1, |w| *w).is_empty());

        tracker.reset(words());
        assert_eq!(tracker.available(&items, 1, |w| *w).len(), 3);
    }

    #[test]
    fn keys_can_be_composite() {
        let mut tracker: ProgressTracker<(&str, bool)> = ProgressTracker::new();
        tracker.reset([("cat", true), ("cat", false)]);
        tracker.increment(&("cat", true));
        assert_eq!(tracker.count(&("cat", true)), 1);
        assert_eq!(tracker.count(&("cat", false)), 0);
    }
}
