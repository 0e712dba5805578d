//! Min-priority queue keyed on `(weight, tie_break)`.
//!
//! Wraps `BinaryHeap`, which is a max-heap, by reversing the ordering of the
//! stored entries. Weights are compared with `f64::total_cmp` so the order is
//! total even for unusual values; equal weights fall back to the tie-break
//! key, ascending, which keeps pop order deterministic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<T> {
    weight: f64,
    tie_break: u32,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (smaller weight = higher priority)
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.tie_break.cmp(&self.tie_break))
    }
}

/// Min-heap returning the lightest item first.
pub struct MinQueue<T> {
    heap: BinaryHeap<Entry<T>>,
}

impl<T> MinQueue<T> {
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

    pub fn push(&mut self, weight: f64, tie_break: u32, item: T) {
        self.heap.push(Entry {
            weight,
            tie_break,
            item,
        });
    }

    /// Remove the item with the smallest `(weight, tie_break)`.
    pub fn pop(&mut self) -> Option<(f64, T)> {
        self.heap.pop().map(|e| (e.weight, e.item))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for MinQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_weight_order() {
        let mut queue = MinQueue::new();
        queue.push(10.0, 3, 'd');
        queue.push(7.0, 2, 'c');
        queue.push(2.0, 0, 'a');
        queue.push(11.0, 5, 'f');
        queue.push(10.0, 4, 'e');
        queue.push(6.0, 1, 'b');

        let mut got = String::new();
        while let Some((_, c)) = queue.pop() {
            got.push(c);
        }
        assert_eq!(got, "abcdef");
    }

    #[test]
    fn test_ties_break_ascending() {
        let mut queue = MinQueue::new();
        queue.push(0.25, 9, 9u8);
        queue.push(0.25, 1, 1u8);
        queue.push(0.25, 4, 4u8);

        let order: Vec<u8> = std::iter::from_fn(|| queue.pop().map(|(_, s)| s)).collect();
        assert_eq!(order, vec![1, 4, 9]);
    }

    #[test]
    fn test_empty() {
        let mut queue: MinQueue<u8> = MinQueue::with_capacity(4);
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
        assert_eq!(queue.len(), 0);
    }
}
