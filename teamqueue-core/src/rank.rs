//! Rank tracker - running best over an append-only set
//!
//! Lower compares as better. Ties keep the earlier item.

use std::cmp::Ordering;

/// Tracks the best item of a growing collection without re-sorting.
pub struct RankTracker<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    items: Vec<T>,
    best: usize,
    compare: F,
}

impl<T, F> RankTracker<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Start tracking from a single item
    pub fn new(first: T, compare: F) -> Self {
        Self {
            items: vec![first],
            best: 0,
            compare,
        }
    }

    /// Start tracking from a batch, scanning once for the best.
    ///
    /// Returns `None` for an empty batch.
    pub fn from_items(items: Vec<T>, compare: F) -> Option<Self> {
        if items.is_empty() {
            return None;
        }

        let mut best = 0;
        for i in 1..items.len() {
            if compare(&items[i], &items[best]) == Ordering::Less {
                best = i;
            }
        }

        Some(Self {
            items,
            best,
            compare,
        })
    }

    /// Append an item, taking over as best only if strictly better
    pub fn push(&mut self, item: T) {
        if (self.compare)(&item, &self.items[self.best]) == Ordering::Less {
            self.best = self.items.len();
        }
        self.items.push(item);
    }

    pub fn best(&self) -> &T {
        &self.items[self.best]
    }

    /// Consume the tracker, yielding the best item
    pub fn into_best(mut self) -> T {
        self.items.swap_remove(self.best)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Everything pushed so far, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_item_is_best() {
        let tracker = RankTracker::new(7i32, |a, b| a.cmp(b));
        assert_eq!(*tracker.best(), 7);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_from_items_scans_for_minimum() {
        let tracker = RankTracker::from_items(vec![5i32, 2, 9, 2], |a, b| a.cmp(b)).unwrap();
        assert_eq!(*tracker.best(), 2);

        let empty = RankTracker::from_items(Vec::<i32>::new(), |a, b| a.cmp(b));
        assert!(empty.is_none());
    }

    #[test]
    fn test_push_replaces_only_on_strictly_better() {
        // (score, label) compared by score only
        let mut tracker = RankTracker::new((3i32, "first"), |a, b| a.0.cmp(&b.0));

        tracker.push((3, "tie"));
        assert_eq!(tracker.best().1, "first");

        tracker.push((4, "worse"));
        assert_eq!(tracker.best().1, "first");

        tracker.push((1, "better"));
        assert_eq!(tracker.best().1, "better");
        assert_eq!(tracker.len(), 4);
    }

    #[test]
    fn test_ties_in_batch_keep_earliest() {
        let tracker = RankTracker::from_items(
            vec![(2i32, 'a'), (1, 'b'), (1, 'c')],
            |a, b| a.0.cmp(&b.0),
        )
        .unwrap();
        assert_eq!(tracker.best().1, 'b');
        assert_eq!(tracker.into_best(), (1, 'b'));
    }
}
