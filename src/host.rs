//! The capability interface between the mirror pipeline and its host application.
//!
//! The pipeline never touches scene data directly. It asks a [`MirrorHost`] to
//! read and write vertex-group weights, duplicate and delete objects, run the
//! closest-point weight transfer and switch interaction state. [`Scene`] is the
//! in-memory implementation this crate ships; embedding applications provide
//! their own.
//!
//! [`Scene`]: crate::scene::Scene

use crate::errors::HostError;
use crate::float_types::Real;
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Opaque handle to an object owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The host's interaction mode. Mirroring always runs in `Object` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionMode {
    #[default]
    Object,
    Edit,
    WeightPaint,
    VertexPaint,
    Sculpt,
    Pose,
}

/// The editor area the host considers current. Duplication and transfer run with
/// the 3D viewport as context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorArea {
    #[default]
    View3D,
    Properties,
    Outliner,
    Other,
}

/// Snapshot of the process-wide interaction state a mirror run disturbs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostState {
    pub mode: InteractionMode,
    pub editor: EditorArea,
    pub active_object: Option<ObjectId>,
    /// Active vertex group of the active object, by name.
    pub active_group: Option<String>,
}

/// How a destination vertex picks up data from the source surface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum VertexMapping {
    /// Closest point on the nearest source face, weights interpolated with the
    /// hit's barycentric coordinates.
    #[default]
    Barycentric,
    /// The whole weight of the closest source vertex.
    NearestVertex,
}

/// How transferred weights combine with what the destination already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixMode {
    Replace,
    Add,
}

/// One vertex-group weight transfer between two objects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub source: ObjectId,
    pub source_group: String,
    pub destination: ObjectId,
    pub destination_group: String,
    pub mapping: VertexMapping,
    pub mix_mode: MixMode,
    /// Search in world space (both world transforms applied) instead of local space.
    pub use_object_transform: bool,
    /// Create the destination group when it does not exist yet.
    pub create_if_missing: bool,
    /// Search radius; `None` always finds a hit on a non-degenerate source.
    pub max_distance: Option<Real>,
}

/// Result of a transfer that did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferOutcome {
    /// Destination vertices that received a weight.
    pub written: usize,
    /// Destination vertices without a hit; their membership is left untouched.
    pub missed: usize,
}

impl TransferOutcome {
    pub const fn is_partial(&self) -> bool {
        self.missed > 0
    }
}

/// Everything the mirror pipeline needs from its host.
pub trait MirrorHost {
    // -- interaction state --

    fn state(&self) -> HostState;
    fn set_mode(&mut self, mode: InteractionMode) -> Result<(), HostError>;
    fn set_editor(&mut self, editor: EditorArea);
    fn set_active_object(&mut self, object: Option<ObjectId>) -> Result<(), HostError>;
    fn set_active_group(&mut self, object: ObjectId, group: &str) -> Result<(), HostError>;

    // -- queries --

    fn object_name(&self, object: ObjectId) -> Result<String, HostError>;
    fn is_mesh(&self, object: ObjectId) -> Result<bool, HostError>;
    fn vertex_group_names(&self, object: ObjectId) -> Result<Vec<String>, HostError>;
    fn active_group(&self, object: ObjectId) -> Result<Option<String>, HostError>;
    fn world_transform(&self, object: ObjectId) -> Result<Matrix4<Real>, HostError>;
    /// Position of a vertex in the object's local space.
    fn vertex_position(&self, object: ObjectId, vertex: u32) -> Result<Point3<Real>, HostError>;
    /// Sparse `(vertex, weight)` membership of a group, ordered by vertex index.
    fn group_weights(&self, object: ObjectId, group: &str) -> Result<Vec<(u32, Real)>, HostError>;

    // -- mutation --

    fn set_world_transform(
        &mut self,
        object: ObjectId,
        transform: Matrix4<Real>,
    ) -> Result<(), HostError>;
    /// Replace the weight of `vertex` in `group`, adding the membership if needed.
    fn set_group_weight(
        &mut self,
        object: ObjectId,
        group: &str,
        vertex: u32,
        weight: Real,
    ) -> Result<(), HostError>;
    /// Deep copy of geometry, world transform and every vertex group.
    fn duplicate_object(&mut self, object: ObjectId) -> Result<ObjectId, HostError>;
    fn delete_object(&mut self, object: ObjectId) -> Result<(), HostError>;
    fn transfer_vertex_weights(
        &mut self,
        request: &TransferRequest,
    ) -> Result<TransferOutcome, HostError>;
    /// Drop every group membership whose weight is zero; returns how many were dropped.
    fn clean_zero_weight_entries(&mut self, object: ObjectId) -> Result<usize, HostError>;
}
