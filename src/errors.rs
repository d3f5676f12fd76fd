//! Mirror errors

use crate::float_types::Real;

/// Errors reported by a [`MirrorHost`](crate::host::MirrorHost).
///
/// These cover the host's own bookkeeping (object and group lookups) as well as
/// the closest-point transfer engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    /// (UnknownObject) The object id does not exist in the scene
    #[error("(UnknownObject) No object with id {0}")]
    UnknownObject(u64),
    /// (NotAMesh) The object carries no mesh data
    #[error("(NotAMesh) Object '{0}' is not a mesh")]
    NotAMesh(String),
    /// (MissingGroup) The object has no vertex group with this name
    #[error("(MissingGroup) Object '{object}' has no vertex group '{group}'")]
    MissingGroup { object: String, group: String },
    /// (VertexOutOfRange) A vertex index past the end of the mesh
    #[error("(VertexOutOfRange) Vertex {index} is out of range (vertex count = {count})")]
    VertexOutOfRange { index: u32, count: usize },
    /// (ModeUnavailable) The host cannot switch into the requested interaction mode
    #[error("(ModeUnavailable) {0}")]
    ModeUnavailable(String),
    /// (TransferFailed) The transfer engine could not populate the destination
    #[error("(TransferFailed) {0}")]
    TransferFailed(String),
}

/// All the ways mirroring a set of vertex groups can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MirrorError {
    /// (InvalidPatterns) The side patterns cannot tell source from target
    #[error("(InvalidPatterns) {0}")]
    InvalidPatterns(String),
    /// (AmbiguousGroupName) The name matches the side patterns in more than one way
    #[error("(AmbiguousGroupName) Cannot tell which side '{name}' belongs to: {reason}")]
    AmbiguousGroupName { name: String, reason: String },
    /// (UnclassifiedGroup) The name carries neither a side nor a center pattern
    #[error("(UnclassifiedGroup) Vertex group '{0}' has no left, right or center pattern")]
    UnclassifiedGroup(String),
    /// (InvalidBlendWidth) The center blend width is not a positive finite number
    #[error("(InvalidBlendWidth) Center blend width must be finite and > 0, got {0}")]
    InvalidBlendWidth(Real),
    /// (InvalidMaxDistance) The transfer search radius is not positive
    #[error("(InvalidMaxDistance) Search distance must be finite and > 0, got {0}")]
    InvalidMaxDistance(Real),
    /// (NotAMesh) The operator was invoked on something that is not a mesh
    #[error("(NotAMesh) Object '{0}' is not a mesh")]
    NotAMesh(String),
    /// (NoVertexGroups) The mesh has no vertex groups to mirror
    #[error("(NoVertexGroups) Mesh '{0}' has no vertex groups")]
    NoVertexGroups(String),
    /// (NoActiveGroup) Single-group mode needs an active vertex group
    #[error("(NoActiveGroup) Mesh '{0}' has no active vertex group")]
    NoActiveGroup(String),
    /// Error bubbled up from the host or its transfer engine
    #[error(transparent)]
    Host(#[from] HostError),
}

impl MirrorError {
    /// Configuration errors are raised before anything is mutated.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            MirrorError::InvalidPatterns(_)
                | MirrorError::AmbiguousGroupName { .. }
                | MirrorError::UnclassifiedGroup(_)
                | MirrorError::InvalidBlendWidth(_)
                | MirrorError::InvalidMaxDistance(_)
        )
    }

    /// Precondition errors mean the operator should not have been offered at all.
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            MirrorError::NotAMesh(_) | MirrorError::NoVertexGroups(_) | MirrorError::NoActiveGroup(_)
        )
    }
}
