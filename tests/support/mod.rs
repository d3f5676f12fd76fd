//! Test support library
//! Provides mesh builders and a host wrapper that can be told to fail.

#![allow(dead_code)]

use nalgebra::{Matrix4, Point3};
use weight_mirror::{
    HostError, MirrorHost, Object, ObjectId, Scene, SkinnedMesh, VertexGroup,
    float_types::Real,
    host::{EditorArea, HostState, InteractionMode, TransferOutcome, TransferRequest},
};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Columns of the test grid sit at x = -2, -1, 0, 1, 2.
pub const COLUMNS: u32 = 5;
/// Rows of the test grid sit at y = 0, 1, 2.
pub const ROWS: u32 = 3;

/// Index of the grid vertex in `row` at x = `column - 2`.
pub const fn vertex(row: u32, column: u32) -> u32 {
    row * COLUMNS + column
}

/// A flat 5×3 grid of quads in the XY plane, symmetric about the YZ plane.
pub fn grid_mesh() -> SkinnedMesh {
    let mut positions = Vec::new();
    for row in 0..ROWS {
        for column in 0..COLUMNS {
            positions.push(Point3::new(column as Real - 2.0, row as Real, 0.0));
        }
    }
    let mut faces = Vec::new();
    for row in 0..ROWS - 1 {
        for column in 0..COLUMNS - 1 {
            faces.push(vec![
                vertex(row, column),
                vertex(row, column + 1),
                vertex(row + 1, column + 1),
                vertex(row + 1, column),
            ]);
        }
    }
    SkinnedMesh::from_polygons(positions, faces).expect("grid faces are in range")
}

/// A group holding `by_column[c]` on every vertex of column `c` (`None` = not a member).
pub fn column_group(name: &str, by_column: [Option<Real>; 5]) -> VertexGroup {
    let mut group = VertexGroup::new(name);
    for row in 0..ROWS {
        for (column, weight) in by_column.iter().enumerate() {
            if let Some(weight) = weight {
                group.set_weight(vertex(row, column as u32), *weight);
            }
        }
    }
    group
}

/// The grid with `arm.l`, `arm.r` and `spine.c`:
///
/// | column (x)  | -2  | -1  |  0  |  1  |  2  |
/// |-------------|-----|-----|-----|-----|-----|
/// | `arm.l`     |     |     |     | 0.5 | 1.0 |
/// | `arm.r`     | 0.3 | 0.3 | 0.3 | 0.3 | 0.3 |
/// | `spine.c`   | 0.3 | 0.3 | 1.0 | 0.8 | 0.6 |
pub fn rigged_grid() -> SkinnedMesh {
    let mut mesh = grid_mesh();
    mesh.add_group(column_group("arm.l", [None, None, None, Some(0.5), Some(1.0)]));
    mesh.add_group(column_group("arm.r", [Some(0.3); 5]));
    mesh.add_group(column_group(
        "spine.c",
        [Some(0.3), Some(0.3), Some(1.0), Some(0.8), Some(0.6)],
    ));
    mesh
}

/// A scene holding `mesh` as the active object `Body`, with `active` as its active group.
pub fn scene_with(mesh: SkinnedMesh, active: Option<&str>) -> (Scene, ObjectId) {
    let mut scene = Scene::new();
    let body = scene.add_object(Object::mesh("Body", mesh));
    if let Some(active) = active {
        scene.set_active_group(body, active).expect("active group exists");
    }
    (scene, body)
}

/// Same as [`scene_with`] but with a world transform on `Body`.
pub fn scene_with_world(mesh: SkinnedMesh, world: Matrix4<Real>, active: Option<&str>) -> (Scene, ObjectId) {
    let mut scene = Scene::new();
    let body = scene.add_object(Object::mesh("Body", mesh).with_world(world));
    if let Some(active) = active {
        scene.set_active_group(body, active).expect("active group exists");
    }
    (scene, body)
}

/// Weight of `vertex` in `group`, `None` if not a member.
pub fn weight_of(scene: &Scene, object: ObjectId, group: &str, vertex: u32) -> Option<Real> {
    scene.mesh(object).expect("mesh").group(group).and_then(|g| g.weight(vertex))
}

/// Assert every row of `group` holds `expected[c]` in column `c`, within 1e-9.
pub fn assert_columns(scene: &Scene, object: ObjectId, group: &str, expected: [Option<Real>; 5]) {
    for row in 0..ROWS {
        for (column, expected) in expected.iter().enumerate() {
            let actual = weight_of(scene, object, group, vertex(row, column as u32));
            match (actual, expected) {
                (Some(a), Some(e)) => assert!(
                    approx_eq(a, *e, 1e-9),
                    "{group}: row {row} column {column}: expected {e}, got {a}"
                ),
                (None, None) => {},
                (a, e) => panic!("{group}: row {row} column {column}: expected {e:?}, got {a:?}"),
            }
        }
    }
}

/// A [`Scene`] that can be told to fail transfers or deletions, and counts calls.
pub struct FlakyHost {
    pub scene: Scene,
    /// Transfers writing into this group fail.
    pub fail_transfer_into: Option<String>,
    pub fail_delete: bool,
    pub transfers: Vec<TransferRequest>,
    pub deletes_attempted: usize,
}

impl FlakyHost {
    pub fn new(scene: Scene) -> Self {
        FlakyHost {
            scene,
            fail_transfer_into: None,
            fail_delete: false,
            transfers: Vec::new(),
            deletes_attempted: 0,
        }
    }
}

impl MirrorHost for FlakyHost {
    fn state(&self) -> HostState {
        self.scene.state()
    }

    fn set_mode(&mut self, mode: InteractionMode) -> Result<(), HostError> {
        self.scene.set_mode(mode)
    }

    fn set_editor(&mut self, editor: EditorArea) {
        self.scene.set_editor(editor)
    }

    fn set_active_object(&mut self, object: Option<ObjectId>) -> Result<(), HostError> {
        self.scene.set_active_object(object)
    }

    fn set_active_group(&mut self, object: ObjectId, group: &str) -> Result<(), HostError> {
        self.scene.set_active_group(object, group)
    }

    fn object_name(&self, object: ObjectId) -> Result<String, HostError> {
        self.scene.object_name(object)
    }

    fn is_mesh(&self, object: ObjectId) -> Result<bool, HostError> {
        self.scene.is_mesh(object)
    }

    fn vertex_group_names(&self, object: ObjectId) -> Result<Vec<String>, HostError> {
        self.scene.vertex_group_names(object)
    }

    fn active_group(&self, object: ObjectId) -> Result<Option<String>, HostError> {
        self.scene.active_group(object)
    }

    fn world_transform(&self, object: ObjectId) -> Result<Matrix4<Real>, HostError> {
        self.scene.world_transform(object)
    }

    fn vertex_position(&self, object: ObjectId, vertex: u32) -> Result<Point3<Real>, HostError> {
        self.scene.vertex_position(object, vertex)
    }

    fn group_weights(&self, object: ObjectId, group: &str) -> Result<Vec<(u32, Real)>, HostError> {
        self.scene.group_weights(object, group)
    }

    fn set_world_transform(&mut self, object: ObjectId, transform: Matrix4<Real>) -> Result<(), HostError> {
        self.scene.set_world_transform(object, transform)
    }

    fn set_group_weight(
        &mut self,
        object: ObjectId,
        group: &str,
        vertex: u32,
        weight: Real,
    ) -> Result<(), HostError> {
        self.scene.set_group_weight(object, group, vertex, weight)
    }

    fn duplicate_object(&mut self, object: ObjectId) -> Result<ObjectId, HostError> {
        self.scene.duplicate_object(object)
    }

    fn delete_object(&mut self, object: ObjectId) -> Result<(), HostError> {
        self.deletes_attempted += 1;
        if self.fail_delete {
            return Err(HostError::TransferFailed("deletion refused".to_string()));
        }
        self.scene.delete_object(object)
    }

    fn transfer_vertex_weights(&mut self, request: &TransferRequest) -> Result<TransferOutcome, HostError> {
        self.transfers.push(request.clone());
        if self.fail_transfer_into.as_deref() == Some(request.destination_group.as_str()) {
            return Err(HostError::TransferFailed(format!(
                "cannot create '{}'",
                request.destination_group
            )));
        }
        self.scene.transfer_vertex_weights(request)
    }

    fn clean_zero_weight_entries(&mut self, object: ObjectId) -> Result<usize, HostError> {
        self.scene.clean_zero_weight_entries(object)
    }
}
