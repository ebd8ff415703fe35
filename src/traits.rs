//! The shared priority-queue contract
//!
//! [`PriorityQueue`] is the backend-agnostic surface implemented by both
//! [`MeldableHeap`](crate::pairing::MeldableHeap) and
//! [`ArrayHeap`](crate::binary::ArrayHeap). It deliberately excludes
//! handle-based operations: those exist only on the meldable backend, whose
//! nodes never relocate.
//!
//! The ordering is a strict weak order supplied at construction as a
//! [`Compare`] instance. The queue surfaces the element no other element
//! compares greater than — the *maximum* under the comparator. A closure
//! `Fn(&T, &T) -> Ordering` works as a comparator, as does
//! [`compare::natural()`] for `T: Ord`, and `.rev()` of either for a
//! min-queue.

use compare::Compare;

/// Backend-agnostic priority-queue operations
///
/// Implementors maintain the heap invariant across every call: on return
/// from any method, `top()` is the greatest element under the comparator.
///
/// `pop` and `top` return `None` on an empty queue rather than panicking;
/// callers that have already checked [`is_empty`](PriorityQueue::is_empty)
/// may simply unwrap.
///
/// # Example
///
/// ```rust
/// use meldable_pq::PriorityQueue;
/// use meldable_pq::binary::ArrayHeap;
///
/// let mut pq = ArrayHeap::new();
/// pq.push(3);
/// pq.push(8);
/// pq.push(5);
///
/// assert_eq!(pq.top(), Some(&8));
/// assert_eq!(pq.pop(), Some(8));
/// assert_eq!(pq.len(), 2);
/// ```
pub trait PriorityQueue<T, C: Compare<T>> {
    /// Creates an empty queue ordered by `cmp`
    ///
    /// The comparator is fixed for the instance's lifetime.
    fn with_comparator(cmp: C) -> Self;

    /// Returns the number of elements in the queue
    ///
    /// # Time Complexity
    /// O(1) for all backends.
    fn len(&self) -> usize;

    /// Returns true if the queue is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an element
    ///
    /// # Time Complexity
    /// O(1) for `MeldableHeap`, O(log n) for `ArrayHeap`.
    fn push(&mut self, value: T);

    /// Returns a reference to the greatest element, or `None` if empty
    ///
    /// # Time Complexity
    /// O(1) for all backends.
    fn top(&self) -> Option<&T>;

    /// Removes and returns the greatest element, or `None` if empty
    ///
    /// # Time Complexity
    /// Amortized O(log n) for `MeldableHeap` (a single call may be O(n)),
    /// O(log n) worst case for `ArrayHeap`.
    fn pop(&mut self) -> Option<T>;

    /// Restores the heap invariant assuming every element is out of order
    ///
    /// No element storage is discarded or recreated: backends relink (or
    /// sift) what is already there. Useful after bulk loading, and a no-op
    /// on a queue whose invariant already holds.
    ///
    /// # Time Complexity
    /// O(n) for all backends.
    fn rebuild(&mut self);

    /// Builds a queue from an arbitrary-order sequence
    ///
    /// Performs n pushes followed by one invariant restoration.
    ///
    /// # Time Complexity
    /// O(n).
    fn from_unordered<I>(iter: I, cmp: C) -> Self
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        let mut queue = Self::with_comparator(cmp);
        for value in iter {
            queue.push(value);
        }
        queue.rebuild();
        queue
    }
}
