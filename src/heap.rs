//! Fixed-capacity priority queue over `(id, distance)` pairs
//!
//! A single generic type backs both the "worst-so-far" buffer used while
//! expanding search candidates and the "frontier" queue that drives the
//! expansion itself, they differ only in which end of the ordering gets
//! evicted when the heap is full.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Which end of the distance ordering the heap keeps at its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapKind {
    /// Root holds the *largest* distance, used to track the worst accepted
    /// candidate so far, evicted first when a closer one arrives.
    Max,
    /// Root holds the *smallest* distance, used as the expansion frontier,
    /// always popping the most promising candidate next.
    Min,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    id: usize,
    distance: f32,
}

impl Entry {
    fn key(&self, kind: HeapKind) -> f32 {
        match kind {
            HeapKind::Max => self.distance,
            HeapKind::Min => -self.distance,
        }
    }
}

impl Eq for Entry {}

/// `BinaryHeap` is a max-heap; `OrderedEntry` carries the heap's mode so
/// `Ord` always puts the "evict first" element out of the way and the
/// "root" element on top, regardless of `HeapKind`.
struct OrderedEntry(Entry, HeapKind);

impl PartialEq for OrderedEntry {
    fn eq(&self, other: &Self) -> bool {
        self.0.key(self.1) == other.0.key(other.1)
    }
}
impl Eq for OrderedEntry {}
impl PartialOrd for OrderedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for OrderedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .key(self.1)
            .partial_cmp(&other.0.key(other.1))
            .unwrap_or(Ordering::Equal)
    }
}

/// A fixed-capacity binary heap over `(id, distance)` pairs.
pub struct BoundedHeap {
    kind: HeapKind,
    capacity: usize,
    heap: BinaryHeap<OrderedEntry>,
}

impl BoundedHeap {
    pub fn new(kind: HeapKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            heap: BinaryHeap::with_capacity(capacity.max(1)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn size(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Distance currently held at the root, if any.
    pub fn peek_root(&self) -> Option<f32> {
        self.heap.peek().map(|e| e.0.distance)
    }

    /// Insert `(id, distance)`, respecting the fixed capacity.
    ///
    /// Below capacity the entry is always kept. At capacity, a max-heap
    /// replaces its root (the worst-so-far) if the new distance is strictly
    /// smaller, in O(log n). A min-heap's root is its *closest* entry, which
    /// is the wrong end to compare against for eviction (what must be
    /// evicted is the farthest held entry), so at capacity it falls back to
    /// a linear scan for the farthest entry and replaces that one if the new
    /// distance is strictly smaller. Frontier callers size capacity well
    /// above what they expect to hold (see `search::search_layer`), so this
    /// path is cold in practice; it exists for `BoundedHeap` to be correct
    /// standing alone at any capacity.
    pub fn insert(&mut self, id: usize, distance: f32) {
        if self.capacity == 0 {
            return;
        }

        if self.heap.len() < self.capacity {
            self.heap.push(OrderedEntry(Entry { id, distance }, self.kind));
            return;
        }

        match self.kind {
            HeapKind::Max => {
                if let Some(root) = self.peek_root() {
                    if distance < root {
                        self.heap.pop();
                        self.heap.push(OrderedEntry(Entry { id, distance }, self.kind));
                    }
                }
            }
            HeapKind::Min => {
                let mut items: Vec<Entry> = self.heap.drain().map(|e| e.0).collect();
                if let Some((idx, worst)) = items
                    .iter()
                    .enumerate()
                    .max_by(|a, b| {
                        a.1.distance
                            .partial_cmp(&b.1.distance)
                            .unwrap_or(Ordering::Equal)
                    })
                    .map(|(i, e)| (i, e.distance))
                {
                    if distance < worst {
                        items[idx] = Entry { id, distance };
                    }
                }
                self.heap = items
                    .into_iter()
                    .map(|e| OrderedEntry(e, self.kind))
                    .collect();
            }
        }
    }

    /// Remove and return the root `(id, distance)`.
    pub fn pop(&mut self) -> Option<(usize, f32)> {
        self.heap.pop().map(|e| (e.0.id, e.0.distance))
    }

    /// Drain all entries in ascending-distance order.
    pub fn drain_sorted(mut self) -> Vec<(usize, f32)> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some((id, distance)) = self.pop() {
            out.push((id, distance));
        }
        out.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        out
    }
}
