//! A keyed min-priority queue.
//!
//! `keyed_priority_queue` pops the greatest priority first.  Timers
//! want the earliest due time first, so priorities are stored
//! reversed.
use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;

use keyed_priority_queue::KeyedPriorityQueue;

#[derive(Debug)]
struct ReverseOrdered<T> {
    inner: T,
}

impl<T> From<T> for ReverseOrdered<T> {
    fn from(inner: T) -> ReverseOrdered<T> {
        ReverseOrdered { inner }
    }
}

impl<T: Ord> PartialOrd for ReverseOrdered<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Eq> Eq for ReverseOrdered<T> {}

impl<T: Eq> PartialEq for ReverseOrdered<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Ord> Ord for ReverseOrdered<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.inner.cmp(&self.inner)
    }
}

#[test]
fn test_reverse_order() {
    assert_eq!(ReverseOrdered::from(1), ReverseOrdered::from(1));
    assert_ne!(ReverseOrdered::from(1), ReverseOrdered::from(0));
    assert!(ReverseOrdered::from(1) < ReverseOrdered::from(0));
    assert!(ReverseOrdered::from((5, 1)) > ReverseOrdered::from((5, 2)));
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownKeyError {}

/// Pops the item with the *smallest* priority first.
pub struct KeyedReversePriorityQueue<K: Hash + Eq, P: Ord> {
    items: KeyedPriorityQueue<K, ReverseOrdered<P>>,
}

impl<K, P> KeyedReversePriorityQueue<K, P>
where
    K: Hash + Eq,
    P: Ord,
{
    pub fn new() -> KeyedReversePriorityQueue<K, P> {
        KeyedReversePriorityQueue {
            items: KeyedPriorityQueue::<K, ReverseOrdered<P>>::new(),
        }
    }

    pub fn peek(&self) -> Option<(&K, &P)> {
        self.items.peek().map(|(k, p)| (k, &p.inner))
    }

    pub fn pop(&mut self) -> Option<(K, P)> {
        self.items.pop().map(|(k, p)| (k, p.inner))
    }

    /// Inserts `key`, or reschedules it if already present.  Returns
    /// the previous priority of `key`, if any.
    pub fn push(&mut self, key: K, priority: P) -> Option<P> {
        self.items
            .push(key, ReverseOrdered::from(priority))
            .map(|rd| rd.inner)
    }

    /// Update the priority of an item (identified by `key`).
    ///
    /// # Errors
    ///
    /// `UnknownKeyError` is returned when the indicated key is not
    /// present.
    pub fn set_priority(&mut self, key: &K, priority: P) -> Result<P, UnknownKeyError> {
        self.items
            .set_priority(key, ReverseOrdered::from(priority))
            .map(|old| old.inner)
            .map_err(|_| UnknownKeyError {})
    }

    pub fn priority(&self, key: &K) -> Option<&P> {
        self.items.get_priority(key).map(|p| &p.inner)
    }

    pub fn remove(&mut self, key: &K) -> Option<P> {
        self.items.remove(key).map(|p| p.inner)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.items.get_priority(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K, P> Default for KeyedReversePriorityQueue<K, P>
where
    K: Hash + Eq,
    P: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> Debug for KeyedReversePriorityQueue<K, P>
where
    K: Hash + Eq + Debug,
    P: Ord + Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedReversePriorityQueue")
            .field("items", &self.items)
            .finish()
    }
}

#[test]
fn test_empty() {
    let mut q: KeyedReversePriorityQueue<usize, usize> = KeyedReversePriorityQueue::default();
    assert!(q.is_empty());
    assert_eq!(0, q.len());
    assert_eq!(q.peek(), None);
    assert_eq!(q.pop(), None);
    assert_eq!(q.remove(&3), None);
}

#[test]
fn test_repeat_push_reschedules() {
    let mut q: KeyedReversePriorityQueue<usize, u64> = KeyedReversePriorityQueue::new();
    assert_eq!(q.push(0, 200), None);
    assert_eq!(q.push(0, 400), Some(200));
    assert_eq!(q.push(0, 300), Some(400));
    assert_eq!(q.len(), 1);
    assert_eq!(q.pop(), Some((0, 300)));
    assert!(q.is_empty());
}

#[test]
fn test_earliest_first() {
    let mut q: KeyedReversePriorityQueue<&str, u64> = KeyedReversePriorityQueue::new();
    assert_eq!(q.push("late", 800), None);
    assert_eq!(q.push("early", 200), None);
    assert_eq!(q.peek(), Some((&"early", &200)));
    assert_eq!(q.pop(), Some(("early", 200)));
    assert_eq!(q.pop(), Some(("late", 800)));
    assert!(q.is_empty());
}

#[test]
fn test_remove_and_set_priority() {
    let mut q: KeyedReversePriorityQueue<u32, (u64, u32)> = KeyedReversePriorityQueue::new();
    q.push(1, (100, 1));
    q.push(2, (100, 2));
    assert!(q.contains(&2));
    assert_eq!(q.remove(&1), Some((100, 1)));
    assert!(!q.contains(&1));
    assert_eq!(q.set_priority(&1, (50, 1)), Err(UnknownKeyError {}));
    assert_eq!(q.set_priority(&2, (50, 2)), Ok((100, 2)));
    assert_eq!(q.priority(&2), Some(&(50, 2)));
    assert_eq!(q.pop(), Some((2, (50, 2))));
}
