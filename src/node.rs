//! Per-vector graph record: assigned max layer and per-layer neighbor lists

/// Initial neighbor-list capacity hint at layer 0 and above, respectively.
/// Growable, just avoids a handful of reallocations during insertion.
const LAYER0_CAPACITY_HINT_FACTOR: usize = 2;

#[derive(Debug, Clone)]
pub struct Node {
    pub vector_id: usize,
    pub max_layer: usize,
    connections: Vec<Vec<usize>>,
}

impl Node {
    pub fn create(vector_id: usize, max_layer: usize, m: usize, m0: usize) -> Self {
        let connections = (0..=max_layer)
            .map(|layer| {
                let hint = if layer == 0 {
                    LAYER0_CAPACITY_HINT_FACTOR * m0
                } else {
                    LAYER0_CAPACITY_HINT_FACTOR * m
                };
                Vec::with_capacity(hint)
            })
            .collect();

        Self {
            vector_id,
            max_layer,
            connections,
        }
    }

    /// Neighbors of this node at `layer`, or an empty slice if the node
    /// doesn't reach that layer.
    pub fn neighbors(&self, layer: usize) -> &[usize] {
        self.connections
            .get(layer)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn degree(&self, layer: usize) -> usize {
        self.neighbors(layer).len()
    }

    /// Append `other_id` to this node's neighbor list at `layer`.
    ///
    /// No-op if `layer` exceeds `max_layer`, if `other_id` is already
    /// present, or if `other_id == vector_id` (self-loops are forbidden).
    /// Does not enforce the `M`/`M0` degree cap; callers are responsible.
    pub fn add_edge(&mut self, layer: usize, other_id: usize) {
        if layer > self.max_layer || other_id == self.vector_id {
            return;
        }
        let list = &mut self.connections[layer];
        if !list.contains(&other_id) {
            list.push(other_id);
        }
    }
}
