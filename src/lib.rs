//! Priority queues with interchangeable backends
//!
//! This crate provides one abstract priority-queue contract and two backends
//! that implement it:
//!
//! - **[`MeldableHeap`](pairing::MeldableHeap)**: a pointer-linked multiway
//!   (pairing) heap with stable per-element handles. O(1) push, O(1) top,
//!   amortized O(log n) pop, and amortized O(log n) in-place priority update
//!   through a handle.
//! - **[`ArrayHeap`](binary::ArrayHeap)**: a contiguous binary heap.
//!   O(log n) push/pop, O(1) top, no stable handles.
//!
//! Both backends are parameterized over the element type and a
//! strict-weak-order comparator supplied at construction (the [`compare`]
//! crate's [`Compare`](compare::Compare) trait, defaulting to the natural
//! order of `T: Ord`). The queue always surfaces the *greatest* element
//! under the comparator; use [`Compare::rev`](compare::Compare::rev) or a
//! closure comparator for a min-queue.
//!
//! # Example
//!
//! ```rust
//! use meldable_pq::pairing::MeldableHeap;
//! use meldable_pq::PriorityQueue;
//!
//! let mut heap = MeldableHeap::new();
//! for v in [10, 20, 5, 30, 1] {
//!     heap.push(v);
//! }
//! assert_eq!(heap.top(), Some(&30));
//!
//! // Handles survive unrelated pushes and pops until their node is popped.
//! let handle = heap.push_with_handle(2);
//! heap.update(&handle, 40);
//! assert_eq!(heap.pop(), Some(40));
//! assert_eq!(heap.pop(), Some(30));
//! ```

pub mod binary;
pub mod pairing;
pub mod traits;

// Re-export the shared contract for convenience
pub use traits::PriorityQueue;
