//! Addressable pairing heap with lazy additive offsets.
//!
//! One heap instance backs every cluster's set of incident edge-part
//! events, but all clusters share a single node arena owned by this type:
//! melding two clusters' heaps during a merge is then just relinking two
//! roots, never a node-by-node copy, and a [`HeapHandle`] stays valid
//! across melds for as long as the node it names hasn't been removed.
//!
//! Every node's `value` field is *relative to its parent's accumulated
//! `child_offset`*, except the root of a tree, whose `value` is absolute.
//! `add_to_heap` exploits this: raising every key in a heap by `delta`
//! touches only the root (`O(1)`), because every descendant's effective
//! value is implicitly `stored_value + sum of ancestor child_offsets`.

use crate::types::EdgePartId;

/// Opaque handle to a node living in a [`PairingHeapArena`].
///
/// Stays valid until the node is removed by `delete_min`; reusing a stale
/// handle after that is a caller bug, not a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapHandle(usize);

#[derive(Debug, Clone)]
struct HeapNode {
    sibling: Option<HeapHandle>,
    child: Option<HeapHandle>,
    left_up: Option<HeapHandle>,
    value: f64,
    child_offset: f64,
    payload: EdgePartId,
}

/// Arena owning every pairing-heap node across all clusters.
///
/// A cluster's heap is identified purely by its root handle
/// (`Option<HeapHandle>`, `None` meaning empty); the arena itself has no
/// notion of which root belongs to which cluster.
#[derive(Debug, Default)]
pub struct PairingHeapArena {
    nodes: Vec<HeapNode>,
    pairing_buffer: Vec<HeapHandle>,
}

impl PairingHeapArena {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            pairing_buffer: Vec::new(),
        }
    }

    /// Inserts `payload` at absolute key `value`, melding it into `*root`.
    pub fn insert(
        &mut self,
        root: &mut Option<HeapHandle>,
        value: f64,
        payload: EdgePartId,
    ) -> HeapHandle {
        let handle = HeapHandle(self.nodes.len());
        self.nodes.push(HeapNode {
            sibling: None,
            child: None,
            left_up: None,
            value,
            child_offset: 0.0,
            payload,
        });
        *root = self.link(*root, Some(handle));
        handle
    }

    /// The minimum `(value, payload)` pair in the heap rooted at `root`.
    #[must_use]
    pub fn peek_min(&self, root: Option<HeapHandle>) -> Option<(f64, EdgePartId)> {
        root.map(|h| {
            let node = &self.nodes[h.0];
            (node.value, node.payload)
        })
    }

    /// Adds `delta` to every key in the heap rooted at `root` in `O(1)`.
    pub fn add_to_heap(&mut self, root: Option<HeapHandle>, delta: f64) {
        if let Some(h) = root {
            let node = &mut self.nodes[h.0];
            node.value += delta;
            node.child_offset += delta;
        }
    }

    /// Removes and returns the minimum of the heap rooted at `*root`,
    /// re-pairing its orphaned children into a new root.
    pub fn delete_min(&mut self, root: &mut Option<HeapHandle>) -> Option<(f64, EdgePartId)> {
        let old_root = (*root)?;
        let removed = &self.nodes[old_root.0];
        let min_value = removed.value;
        let min_payload = removed.payload;
        let offset = removed.child_offset;
        let mut child = removed.child;

        self.pairing_buffer.clear();
        while let Some(c) = child {
            let next_sibling = self.nodes[c.0].sibling;
            let node = &mut self.nodes[c.0];
            node.value += offset;
            node.child_offset += offset;
            node.left_up = None;
            node.sibling = None;
            self.pairing_buffer.push(c);
            child = next_sibling;
        }

        *root = self.pair_up_buffer();
        Some((min_value, min_payload))
    }

    /// Left-to-right link pairs, then right-to-left combine, per the
    /// standard two-pass pairing-heap `delete_min` merge.
    fn pair_up_buffer(&mut self) -> Option<HeapHandle> {
        if self.pairing_buffer.is_empty() {
            return None;
        }
        let orphans = std::mem::take(&mut self.pairing_buffer);
        let mut paired = Vec::with_capacity(orphans.len().div_ceil(2));
        let mut iter = orphans.into_iter();
        while let Some(first) = iter.next() {
            match iter.next() {
                Some(second) => paired.push(self.link(Some(first), Some(second))),
                None => paired.push(Some(first)),
            }
        }
        self.pairing_buffer = Vec::new();

        let mut result = None;
        for root in paired.into_iter().rev() {
            result = self.link(result, root);
        }
        result
    }

    /// Lowers `handle`'s effective key from `from_value` to `to_value` and
    /// relinks it to the heap's root if it wasn't already the root.
    ///
    /// Both `from_value` and `to_value` are the node's *effective* (i.e.
    /// absolute, ancestor-offset-inclusive) key; the caller is responsible
    /// for tracking what `from_value` currently is.
    pub fn decrease_key(
        &mut self,
        root: &mut Option<HeapHandle>,
        handle: HeapHandle,
        from_value: f64,
        to_value: f64,
    ) {
        let additional_offset = from_value - self.nodes[handle.0].value;
        self.nodes[handle.0].child_offset += additional_offset;
        self.nodes[handle.0].value = to_value;

        if Some(handle) == *root {
            return;
        }

        let node = self.nodes[handle.0].clone();
        if let Some(left_up) = node.left_up {
            if self.nodes[left_up.0].child == Some(handle) {
                self.nodes[left_up.0].child = node.sibling;
            } else {
                self.nodes[left_up.0].sibling = node.sibling;
            }
        }
        if let Some(sibling) = node.sibling {
            self.nodes[sibling.0].left_up = node.left_up;
        }
        self.nodes[handle.0].sibling = None;
        self.nodes[handle.0].left_up = None;

        *root = self.link(*root, Some(handle));
    }

    /// Melds two heaps into one, absorbing both inputs (both are left
    /// empty on return).
    pub fn meld(&mut self, a: &mut Option<HeapHandle>, b: &mut Option<HeapHandle>) -> Option<HeapHandle> {
        let merged = self.link(*a, *b);
        *a = None;
        *b = None;
        merged
    }

    /// Links two heap roots, both of which must carry absolute keys. The
    /// smaller becomes the new root; the larger becomes its leftmost
    /// child, with its stored value and `child_offset` rebased relative to
    /// the new parent's `child_offset`.
    fn link(&mut self, a: Option<HeapHandle>, b: Option<HeapHandle>) -> Option<HeapHandle> {
        let (a, b) = match (a, b) {
            (None, None) => return None,
            (Some(a), None) => return Some(a),
            (None, Some(b)) => return Some(b),
            (Some(a), Some(b)) => (a, b),
        };

        let (smaller, larger) = if self.nodes[b.0].value < self.nodes[a.0].value {
            (b, a)
        } else {
            (a, b)
        };

        let smaller_child = self.nodes[smaller.0].child;
        let smaller_offset = self.nodes[smaller.0].child_offset;

        self.nodes[larger.0].sibling = smaller_child;
        if let Some(c) = smaller_child {
            self.nodes[c.0].left_up = Some(larger);
        }
        self.nodes[larger.0].left_up = Some(smaller);
        self.nodes[smaller.0].child = Some(larger);

        self.nodes[larger.0].value -= smaller_offset;
        self.nodes[larger.0].child_offset -= smaller_offset;

        Some(smaller)
    }
}
