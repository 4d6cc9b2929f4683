use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Binary min-priority queue over (key, f32 priority) pairs with lazy
/// deletion.
///
/// There is no decrease-key: relaxing a key pushes a fresh entry and
/// leaves the stale one in the heap. The invariant callers must uphold
/// is to compare every popped priority against their recorded best for
/// that key and skip the pop when it is worse (stale).
pub struct MinQueue<K> {
    heap: BinaryHeap<Entry<K>>,
}

struct Entry<K> {
    key: K,
    priority: f32,
}

impl<K> PartialEq for Entry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.priority.total_cmp(&other.priority) == Ordering::Equal
    }
}

impl<K> Eq for Entry<K> {}

impl<K> PartialOrd for Entry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Entry<K> {
    // Reversed so the std max-heap yields the smallest priority first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.total_cmp(&self.priority)
    }
}

impl<K> MinQueue<K> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, key: K, priority: f32) {
        self.heap.push(Entry { key, priority });
    }

    /// Pop the entry with the smallest priority. May return entries made
    /// stale by a later push for the same key; the caller filters those.
    pub fn pop(&mut self) -> Option<(K, f32)> {
        self.heap.pop().map(|e| (e.key, e.priority))
    }
}

impl<K> Default for MinQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
