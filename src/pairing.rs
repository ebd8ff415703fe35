//! Meldable heap implementation
//!
//! A pointer-linked multiway heap (a pairing heap) with:
//! - O(1) push and meld
//! - O(log n) amortized pop
//! - O(log n) amortized in-place priority update through a stable handle
//!
//! Every element lives in exactly one heap node for its whole lifetime.
//! Nodes are never copied, relocated, or recreated by updates, melds, or
//! rebuilds, so the handle returned by
//! [`push_with_handle`](MeldableHeap::push_with_handle) identifies the same
//! node until that element is popped.
//!
//! The node graph uses one owning link and two non-owning links: `child`
//! owns the head of the node's child chain, `sibling` points at the next
//! sibling (owned by the shared parent), and `prev` is the back-link that
//! makes O(1) detachment possible without a full parent pointer. `prev`
//! points at the parent when the node heads its parent's child list and at
//! the preceding sibling otherwise; the two cases are told apart at detach
//! time by checking the parent's recorded first child.

use crate::traits::PriorityQueue;
use compare::{natural, Compare, Natural};
use std::collections::VecDeque;
use std::ptr::NonNull;

/// Handle to an element in a [`MeldableHeap`]
///
/// Returned by [`push_with_handle`](MeldableHeap::push_with_handle) and
/// consumed by [`update`](MeldableHeap::update). The handle stays valid
/// across any number of unrelated pushes, pops, updates, melds, and
/// rebuilds, until the element it names is popped.
///
/// Note: a handle is tied to a specific heap instance. Using it with a
/// different heap, or after its element has been popped, is undefined
/// behavior.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ElementHandle {
    node: *const (), // Type-erased pointer to Node<T>
}

struct Node<T> {
    elt: T,
    child: Option<NonNull<Node<T>>>,
    sibling: Option<NonNull<Node<T>>>,
    prev: Option<NonNull<Node<T>>>, // parent if head of child list, else previous sibling
}

/// Meldable (pairing) heap
///
/// The greatest element under the comparator is always at the root; ties
/// are broken arbitrarily. All restructuring is done by relinking existing
/// nodes with the O(1) meld primitive.
///
/// # Example
///
/// ```rust
/// use meldable_pq::pairing::MeldableHeap;
/// use meldable_pq::PriorityQueue;
///
/// let mut heap = MeldableHeap::new();
/// let handle = heap.push_with_handle(5);
/// heap.push(9);
/// heap.update(&handle, 12);
/// assert_eq!(heap.top(), Some(&12));
/// ```
pub struct MeldableHeap<T, C: Compare<T> = Natural<T>> {
    root: Option<NonNull<Node<T>>>,
    len: usize,
    cmp: C,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Ord> MeldableHeap<T> {
    /// Creates an empty heap ordered by the natural order of its elements
    pub fn new() -> Self {
        Self::with_comparator(natural())
    }
}

impl<T, C: Compare<T> + Default> Default for MeldableHeap<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Ord> FromIterator<T> for MeldableHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_unordered(iter, natural())
    }
}

impl<T, C: Compare<T>> PriorityQueue<T, C> for MeldableHeap<T, C> {
    fn with_comparator(cmp: C) -> Self {
        Self {
            root: None,
            len: 0,
            cmp,
            _phantom: std::marker::PhantomData,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn push(&mut self, value: T) {
        self.push_with_handle(value);
    }

    fn top(&self) -> Option<&T> {
        self.root.map(|root_ptr| unsafe { &(*root_ptr.as_ptr()).elt })
    }

    fn pop(&mut self) -> Option<T> {
        let root_ptr = self.root?;

        // The root box is reclaimed here; its child chain lives on and is
        // recombined into the new root.
        let node = unsafe { Box::from_raw(root_ptr.as_ptr()) };
        self.root = None;
        self.len -= 1;

        if let Some(first_child) = node.child {
            self.root = Some(unsafe { self.combine_siblings(first_child) });
        }
        Some(node.elt)
    }

    fn rebuild(&mut self) {
        if self.len < 2 {
            return;
        }
        let root_ptr = match self.root {
            Some(r) => r,
            None => return,
        };

        // Treat every node below the root as unordered: detach each one as
        // it is visited and meld it back into the accumulating root. Links
        // are taken before the node is enqueued again, so each node is
        // visited exactly once.
        unsafe {
            let mut work: VecDeque<NonNull<Node<T>>> = VecDeque::new();
            let mut root = root_ptr;
            if let Some(first_child) = (*root.as_ptr()).child.take() {
                work.push_back(first_child);
            }
            while let Some(node) = work.pop_front() {
                if let Some(child) = (*node.as_ptr()).child.take() {
                    work.push_back(child);
                }
                if let Some(sibling) = (*node.as_ptr()).sibling.take() {
                    work.push_back(sibling);
                }
                (*node.as_ptr()).prev = None;
                root = self.meld(node, root);
            }
            self.root = Some(root);
        }
    }
}

impl<T, C: Compare<T>> MeldableHeap<T, C> {
    /// Inserts an element, returning a handle for later updates
    ///
    /// The node backing the handle keeps its address and identity until it
    /// is popped.
    ///
    /// # Time Complexity
    /// O(1).
    pub fn push_with_handle(&mut self, value: T) -> ElementHandle {
        let node = Box::into_raw(Box::new(Node {
            elt: value,
            child: None,
            sibling: None,
            prev: None,
        }));
        let node_ptr = unsafe { NonNull::new_unchecked(node) };

        self.root = Some(match self.root {
            Some(root) => unsafe { self.meld(node_ptr, root) },
            None => node_ptr,
        });
        self.len += 1;

        ElementHandle {
            node: node_ptr.as_ptr() as *const (),
        }
    }

    /// Replaces the element behind `handle` with a more extremal value
    ///
    /// The caller must ensure `new_value` is at least as extremal as the
    /// element's current value under the heap's comparator; the element only
    /// ever moves toward the root. This is checked with a debug assertion,
    /// not validated in release builds.
    ///
    /// # Time Complexity
    /// O(log n) amortized.
    pub fn update(&mut self, handle: &ElementHandle, new_value: T) {
        let node_ptr = unsafe { NonNull::new_unchecked(handle.node as *mut Node<T>) };

        unsafe {
            let node = node_ptr.as_ptr();
            debug_assert!(
                !self.cmp.compares_lt(&new_value, &(*node).elt),
                "update may only move an element toward the extremal direction"
            );
            (*node).elt = new_value;

            // A more extremal root is still the root.
            if self.root == Some(node_ptr) {
                return;
            }

            self.detach(node_ptr);
            self.root = Some(match self.root {
                Some(root) => self.meld(node_ptr, root),
                None => node_ptr,
            });
        }
    }

    /// Melds another heap into this one, consuming it
    ///
    /// Both heaps must have been built with comparators that agree; this
    /// heap's comparator is kept.
    ///
    /// # Time Complexity
    /// O(1).
    pub fn merge(&mut self, mut other: Self) {
        let other_root = match other.root.take() {
            Some(r) => r,
            None => return,
        };
        self.len += other.len;
        other.len = 0;

        self.root = Some(match self.root {
            Some(root) => unsafe { self.meld(other_root, root) },
            None => other_root,
        });
    }

    /// Links two detached heap-ordered trees, returning the more extremal root
    ///
    /// The less extremal root becomes the new first child of the other; on a
    /// tie the existing order of arguments decides. Both arguments must have
    /// no sibling and no back-link.
    unsafe fn meld(&self, a: NonNull<Node<T>>, b: NonNull<Node<T>>) -> NonNull<Node<T>> {
        if self.cmp.compares_lt(&(*a.as_ptr()).elt, &(*b.as_ptr()).elt) {
            Self::link_first_child(b, a);
            b
        } else {
            Self::link_first_child(a, b);
            a
        }
    }

    /// Pushes `child` onto the front of `parent`'s child list
    unsafe fn link_first_child(parent: NonNull<Node<T>>, child: NonNull<Node<T>>) {
        let old_head = (*parent.as_ptr()).child;
        (*child.as_ptr()).sibling = old_head;
        if let Some(head) = old_head {
            (*head.as_ptr()).prev = Some(child);
        }
        (*child.as_ptr()).prev = Some(parent);
        (*parent.as_ptr()).child = Some(child);
    }

    /// Unlinks a non-root node from its parent's child list in O(1)
    ///
    /// The back-link is the parent only when the node heads the child list;
    /// otherwise it is the preceding sibling. The branch on the parent's
    /// recorded first child distinguishes the two.
    unsafe fn detach(&mut self, node: NonNull<Node<T>>) {
        let prev_ptr = match (*node.as_ptr()).prev {
            Some(p) => p,
            None => return,
        };
        let prev = prev_ptr.as_ptr();
        let sibling = (*node.as_ptr()).sibling;

        if (*prev).child == Some(node) {
            (*prev).child = sibling;
        } else {
            (*prev).sibling = sibling;
        }
        if let Some(sib) = sibling {
            (*sib.as_ptr()).prev = Some(prev_ptr);
        }

        (*node.as_ptr()).sibling = None;
        (*node.as_ptr()).prev = None;
    }

    /// Recombines a detached child chain into a single tree
    ///
    /// Two passes: pair adjacent trees left to right, then fold the pairs
    /// right to left. Each chain member has its sibling and back-links
    /// cleared before it is treated as an independent root.
    unsafe fn combine_siblings(&self, first: NonNull<Node<T>>) -> NonNull<Node<T>> {
        (*first.as_ptr()).prev = None;
        if (*first.as_ptr()).sibling.is_none() {
            return first;
        }

        let mut pairs = Vec::new();
        let mut current = Some(first);
        while let Some(node) = current {
            let next = (*node.as_ptr()).sibling.take();
            (*node.as_ptr()).prev = None;

            match next {
                Some(second) => {
                    let rest = (*second.as_ptr()).sibling.take();
                    (*second.as_ptr()).prev = None;
                    pairs.push(self.meld(node, second));
                    current = rest;
                }
                None => {
                    pairs.push(node);
                    current = None;
                }
            }
        }

        let mut result = pairs.pop().unwrap();
        while let Some(tree) = pairs.pop() {
            result = self.meld(tree, result);
        }
        result
    }
}

impl<T: Clone, C: Compare<T> + Clone> Clone for MeldableHeap<T, C> {
    /// Produces an independently owned heap over the same multiset of values
    ///
    /// The copy shares no node storage with the source and need not have the
    /// same shape; each value is re-pushed into a fresh heap during one
    /// worklist traversal of the source.
    fn clone(&self) -> Self {
        let mut copy = Self::with_comparator(self.cmp.clone());
        let mut work: VecDeque<NonNull<Node<T>>> = VecDeque::new();
        if let Some(root) = self.root {
            work.push_back(root);
        }
        while let Some(node) = work.pop_front() {
            unsafe {
                if let Some(sibling) = (*node.as_ptr()).sibling {
                    work.push_back(sibling);
                }
                if let Some(child) = (*node.as_ptr()).child {
                    work.push_back(child);
                }
                copy.push((*node.as_ptr()).elt.clone());
            }
        }
        copy
    }
}

impl<T, C: Compare<T>> Drop for MeldableHeap<T, C> {
    fn drop(&mut self) {
        // Explicit worklist; a recursive teardown would be bounded by tree
        // height, which a chain of updates can push to O(n).
        let mut work = Vec::new();
        if let Some(root) = self.root.take() {
            work.push(root);
        }
        while let Some(ptr) = work.pop() {
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            if let Some(child) = node.child {
                work.push(child);
            }
            if let Some(sibling) = node.sibling {
                work.push(sibling);
            }
        }
        self.len = 0;
    }
}

#[cfg(test)]
impl<T, C: Compare<T>> MeldableHeap<T, C> {
    /// Checks the heap-order invariant, back-link wiring, and node count
    fn assert_invariant(&self) {
        let mut reachable = 0usize;
        let mut work = Vec::new();
        if let Some(root) = self.root {
            unsafe {
                assert!((*root.as_ptr()).sibling.is_none());
                assert!((*root.as_ptr()).prev.is_none());
            }
            work.push(root);
        }
        while let Some(node) = work.pop() {
            reachable += 1;
            unsafe {
                let mut back = node;
                let mut child = (*node.as_ptr()).child;
                while let Some(c) = child {
                    assert!(
                        !self.cmp.compares_lt(&(*node.as_ptr()).elt, &(*c.as_ptr()).elt),
                        "parent is less extremal than one of its children"
                    );
                    assert_eq!((*c.as_ptr()).prev, Some(back));
                    work.push(c);
                    back = c;
                    child = (*c.as_ptr()).sibling;
                }
            }
        }
        assert_eq!(reachable, self.len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn basic_operations() {
        let mut heap = MeldableHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.top(), None);
        assert_eq!(heap.pop(), None);

        heap.push(5);
        heap.push(3);
        heap.push(7);
        heap.assert_invariant();

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.top(), Some(&7));
        assert_eq!(heap.pop(), Some(7));
        heap.assert_invariant();
        assert_eq!(heap.top(), Some(&5));
        assert_eq!(heap.pop(), Some(5));
        assert_eq!(heap.pop(), Some(3));
        assert_eq!(heap.pop(), None);
        assert!(heap.is_empty());
    }

    #[test]
    fn extraction_is_sorted() {
        let mut heap: MeldableHeap<i32> = [5, 1, 4, 2, 8].into_iter().collect();
        heap.assert_invariant();

        let mut popped = Vec::new();
        while let Some(v) = heap.pop() {
            heap.assert_invariant();
            popped.push(v);
        }
        assert_eq!(popped, vec![8, 5, 4, 2, 1]);
    }

    #[test]
    fn update_raises_element() {
        let mut heap = MeldableHeap::new();
        let h1 = heap.push_with_handle(10);
        heap.push(20);
        let h3 = heap.push_with_handle(30);
        heap.assert_invariant();

        assert_eq!(heap.top(), Some(&30));

        heap.update(&h1, 50);
        heap.assert_invariant();
        assert_eq!(heap.top(), Some(&50));

        // Updating the root in place keeps it the root.
        heap.update(&h3, 30);
        heap.assert_invariant();
        assert_eq!(heap.top(), Some(&50));

        assert_eq!(heap.pop(), Some(50));
        assert_eq!(heap.pop(), Some(30));
        assert_eq!(heap.pop(), Some(20));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn handle_survives_unrelated_operations() {
        let mut heap = MeldableHeap::new();
        let handle = heap.push_with_handle(50);
        for i in 0..100 {
            heap.push(i);
        }
        for _ in 0..40 {
            heap.pop();
        }
        heap.update(&handle, 1000);
        heap.assert_invariant();
        assert_eq!(heap.pop(), Some(1000));
    }

    #[test]
    fn merge_heaps() {
        let mut a = MeldableHeap::new();
        a.push(5);
        a.push(10);

        let mut b = MeldableHeap::new();
        b.push(3);
        b.push(12);

        a.merge(b);
        a.assert_invariant();
        assert_eq!(a.len(), 4);
        assert_eq!(a.pop(), Some(12));
        assert_eq!(a.pop(), Some(10));
        assert_eq!(a.pop(), Some(5));
        assert_eq!(a.pop(), Some(3));
    }

    #[test]
    fn merge_with_empty() {
        let mut a: MeldableHeap<i32> = MeldableHeap::new();
        let mut b = MeldableHeap::new();
        b.push(1);
        a.merge(b);
        assert_eq!(a.len(), 1);
        assert_eq!(a.top(), Some(&1));

        let empty = MeldableHeap::new();
        a.merge(empty);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn rebuild_restores_invariant() {
        let mut heap: MeldableHeap<i32> = MeldableHeap::from_unordered(0..64, natural());
        heap.assert_invariant();
        assert_eq!(heap.len(), 64);

        // Idempotent on a valid heap.
        heap.rebuild();
        heap.assert_invariant();

        for expected in (0..64).rev() {
            assert_eq!(heap.pop(), Some(expected));
        }
    }

    #[test]
    fn min_queue_via_reversed_comparator() {
        let mut heap = MeldableHeap::with_comparator(natural::<i32>().rev());
        for v in [10, 20, 5, 30, 1] {
            heap.push(v);
        }
        heap.assert_invariant();
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(5));
        assert_eq!(heap.pop(), Some(10));
    }

    #[test]
    fn closure_comparator() {
        // Order pairs by their second field only.
        let by_second =
            |a: &(u32, i32), b: &(u32, i32)| -> Ordering { a.1.cmp(&b.1) };
        let mut heap = MeldableHeap::with_comparator(by_second);
        heap.push((0, 3));
        heap.push((1, 9));
        heap.push((2, -4));
        heap.assert_invariant();
        assert_eq!(heap.pop(), Some((1, 9)));
        assert_eq!(heap.pop(), Some((0, 3)));
        assert_eq!(heap.pop(), Some((2, -4)));
    }

    #[test]
    fn clone_is_independent() {
        let mut original: MeldableHeap<i32> = (0..32).collect();
        let mut copy = original.clone();
        copy.assert_invariant();
        assert_eq!(copy.len(), original.len());

        assert_eq!(copy.pop(), Some(31));
        copy.push(100);
        copy.assert_invariant();
        original.assert_invariant();

        assert_eq!(original.top(), Some(&31));
        assert_eq!(original.len(), 32);
        assert_eq!(copy.top(), Some(&100));
    }

    #[test]
    fn drop_deep_heap() {
        // Ascending pushes hang every node off the fresh root, then a pop
        // chain of melds can leave a deep tree; teardown must not recurse.
        let mut heap = MeldableHeap::new();
        for i in 0..200_000 {
            heap.push(i);
        }
        heap.pop();
        drop(heap);
    }
}
