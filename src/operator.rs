//! The two user-facing mirror commands.

use crate::config::MirrorSettings;
use crate::driver::{MirrorReport, MirrorScope, check_preconditions, mirror_vertex_groups};
use crate::errors::MirrorError;
use crate::host::{MirrorHost, ObjectId};

/// A menu command. Both share one pipeline and differ only in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorOperator {
    ActiveVertexGroup,
    AllVertexGroups,
}

/// Operators in the order they appear in the vertex-group menu.
pub const MENU: [MirrorOperator; 2] = [
    MirrorOperator::ActiveVertexGroup,
    MirrorOperator::AllVertexGroups,
];

impl MirrorOperator {
    pub const fn id(&self) -> &'static str {
        match self {
            MirrorOperator::ActiveVertexGroup => "object.mirror_active_vertex_group_closest_point",
            MirrorOperator::AllVertexGroups => "object.mirror_all_vertex_groups_closest_point",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            MirrorOperator::ActiveVertexGroup => "Mirror Active Vertex Group (Closest Point)",
            MirrorOperator::AllVertexGroups => "Mirror All Vertex Groups (Closest Point)",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            MirrorOperator::ActiveVertexGroup => {
                "Mirrors the active vertex group using a closest point on mesh search."
            },
            MirrorOperator::AllVertexGroups => {
                "Mirrors all vertex groups using a closest point on mesh search."
            },
        }
    }

    pub const fn scope(&self) -> MirrorScope {
        match self {
            MirrorOperator::ActiveVertexGroup => MirrorScope::ActiveGroup,
            MirrorOperator::AllVertexGroups => MirrorScope::AllGroups,
        }
    }

    /// Whether the command can run on `object`; hosts grey the menu entry out otherwise.
    pub fn poll<H: MirrorHost + ?Sized>(&self, host: &H, object: ObjectId) -> Result<(), MirrorError> {
        check_preconditions(host, object, self.scope())
    }

    /// Run the command and log its status line.
    pub fn execute<H: MirrorHost + ?Sized>(
        &self,
        host: &mut H,
        object: ObjectId,
        settings: &MirrorSettings,
    ) -> Result<MirrorReport, MirrorError> {
        self.poll(host, object)?;
        let report = mirror_vertex_groups(host, object, self.scope(), settings)?;
        tracing::info!("{report}");
        Ok(report)
    }
}
