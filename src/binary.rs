//! Array-backed binary heap implementation
//!
//! A contiguous binary heap satisfying the same [`PriorityQueue`] contract
//! as the meldable backend, with standard sift-up/sift-down maintenance:
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `push`    | O(log n)   |
//! | `pop`     | O(log n)   |
//! | `top`     | O(1)       |
//! | `rebuild` | O(n)       |
//!
//! Elements relocate inside the backing vector as the heap shifts, so this
//! backend offers no stable handles and no in-place priority update. Use
//! [`MeldableHeap`](crate::pairing::MeldableHeap) when those are needed.

use crate::traits::PriorityQueue;
use compare::{natural, Compare, Natural};

/// Array-backed binary heap
///
/// Stores elements in a `Vec` with the children of slot `i` at `2i + 1` and
/// `2i + 2`; the greatest element under the comparator is at slot 0.
///
/// # Example
///
/// ```rust
/// use meldable_pq::binary::ArrayHeap;
/// use meldable_pq::PriorityQueue;
///
/// let mut heap = ArrayHeap::from(vec![5, 1, 4, 2, 8]);
/// assert_eq!(heap.pop(), Some(8));
/// assert_eq!(heap.pop(), Some(5));
/// ```
#[derive(Clone, Debug)]
pub struct ArrayHeap<T, C: Compare<T> = Natural<T>> {
    data: Vec<T>,
    cmp: C,
}

impl<T: Ord> ArrayHeap<T> {
    /// Creates an empty heap ordered by the natural order of its elements
    pub fn new() -> Self {
        Self::with_comparator(natural())
    }
}

impl<T, C: Compare<T>> ArrayHeap<T, C> {
    /// Builds a heap from a vector in O(n), reusing its storage
    pub fn from_vec_and_comparator(vec: Vec<T>, cmp: C) -> Self {
        let mut heap = Self { data: vec, cmp };
        heap.rebuild();
        heap
    }

    /// Move the element at `i` toward the root until its parent is at least
    /// as extremal
    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.cmp.compares_lt(&self.data[parent], &self.data[i]) {
                self.data.swap(parent, i);
                i = parent;
            } else {
                break;
            }
        }
    }

    /// Move the element at `i` toward the leaves until both children are at
    /// most as extremal
    fn sift_down(&mut self, mut i: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let mut greatest = left;
            let right = left + 1;
            if right < len && self.cmp.compares_lt(&self.data[left], &self.data[right]) {
                greatest = right;
            }
            if self.cmp.compares_lt(&self.data[i], &self.data[greatest]) {
                self.data.swap(i, greatest);
                i = greatest;
            } else {
                break;
            }
        }
    }
}

impl<T, C: Compare<T>> PriorityQueue<T, C> for ArrayHeap<T, C> {
    fn with_comparator(cmp: C) -> Self {
        Self {
            data: Vec::new(),
            cmp,
        }
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    fn top(&self) -> Option<&T> {
        self.data.first()
    }

    fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let value = self.data.pop();
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        value
    }

    fn rebuild(&mut self) {
        let len = self.data.len();
        if len < 2 {
            return;
        }
        // Bottom-up heapify from the last internal node.
        for i in (0..=(len - 2) / 2).rev() {
            self.sift_down(i);
        }
    }
}

impl<T, C: Compare<T> + Default> Default for ArrayHeap<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Ord> From<Vec<T>> for ArrayHeap<T> {
    fn from(vec: Vec<T>) -> Self {
        Self::from_vec_and_comparator(vec, natural())
    }
}

impl<T: Ord> FromIterator<T> for ArrayHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_unordered(iter, natural())
    }
}
