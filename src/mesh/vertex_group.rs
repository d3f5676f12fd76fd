//! Named per-vertex weight channels.

use crate::float_types::{Real, clamp_weight};
use hashbrown::HashMap;

/// A named channel assigning a weight in `[0, 1]` to a subset of vertices.
///
/// Membership is sparse: a vertex absent from `weights` is not in the group,
/// which is different from being in it with weight `0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexGroup {
    pub name: String,
    pub weights: HashMap<u32, Real>,
}

impl VertexGroup {
    pub fn new(name: impl Into<String>) -> Self {
        VertexGroup {
            name: name.into(),
            weights: HashMap::new(),
        }
    }

    /// Build a group from `(vertex, weight)` pairs. Later pairs win.
    pub fn from_weights(name: impl Into<String>, weights: impl IntoIterator<Item = (u32, Real)>) -> Self {
        let mut group = VertexGroup::new(name);
        for (vertex, weight) in weights {
            group.set_weight(vertex, weight);
        }
        group
    }

    /// Weight of `vertex`, or `None` if it is not a member.
    pub fn weight(&self, vertex: u32) -> Option<Real> {
        self.weights.get(&vertex).copied()
    }

    /// Replace (or add) the membership of `vertex`. The weight is clamped to `[0, 1]`.
    pub fn set_weight(&mut self, vertex: u32, weight: Real) {
        self.weights.insert(vertex, clamp_weight(weight));
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Memberships sorted by vertex index.
    pub fn sorted_weights(&self) -> Vec<(u32, Real)> {
        let mut weights: Vec<(u32, Real)> = self.weights.iter().map(|(&v, &w)| (v, w)).collect();
        weights.sort_unstable_by_key(|&(vertex, _)| vertex);
        weights
    }

    /// Dense weights for `vertex_count` vertices; non-members read as 0.
    pub fn dense_weights(&self, vertex_count: usize) -> Vec<Real> {
        let mut dense = vec![0.0; vertex_count];
        for (&vertex, &weight) in &self.weights {
            if let Some(slot) = dense.get_mut(vertex as usize) {
                *slot = weight;
            }
        }
        dense
    }

    /// Drop every membership with a weight at or below `limit`; returns how many went.
    pub fn clean(&mut self, limit: Real) -> usize {
        let before = self.weights.len();
        self.weights.retain(|_, weight| *weight > limit);
        before - self.weights.len()
    }
}
