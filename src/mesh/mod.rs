//! `SkinnedMesh` and `Object`: the scene data the in-memory host owns.

use crate::errors::HostError;
use crate::float_types::Real;
use nalgebra::{Matrix4, Point3};

mod vertex_group;
pub use vertex_group::VertexGroup;

/// Triangle mesh carrying named vertex groups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkinnedMesh {
    /// Vertex positions in the owning object's local space.
    pub positions: Vec<Point3<Real>>,
    /// Polygon faces as indices into `positions`, kept exactly as loaded.
    pub faces: Vec<Vec<u32>>,
    /// Vertex groups in creation order. Names are unique.
    pub groups: Vec<VertexGroup>,
    /// Index into `groups` of the active group.
    pub active_group: Option<usize>,
}

impl SkinnedMesh {
    /// A triangle mesh.
    pub fn new(positions: Vec<Point3<Real>>, triangles: Vec<[u32; 3]>) -> Self {
        SkinnedMesh {
            positions,
            faces: triangles.into_iter().map(|t| t.to_vec()).collect(),
            groups: Vec::new(),
            active_group: None,
        }
    }

    /// Build a mesh from polygon faces of any size.
    ///
    /// Returns an error if a face references a vertex past the end of `positions`.
    pub fn from_polygons(positions: Vec<Point3<Real>>, faces: Vec<Vec<u32>>) -> Result<Self, HostError> {
        let count = positions.len();
        if let Some(&index) = faces.iter().flatten().find(|&&i| i as usize >= count) {
            return Err(HostError::VertexOutOfRange { index, count });
        }
        Ok(SkinnedMesh {
            positions,
            faces,
            groups: Vec::new(),
            active_group: None,
        })
    }

    /// Fan triangulation of `faces` for closest-point searches.
    ///
    /// Faces with fewer than three corners contribute nothing.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        let mut triangles = Vec::with_capacity(self.faces.len());
        for face in self.faces.iter().filter(|f| f.len() >= 3) {
            for i in 1..face.len() - 1 {
                triangles.push([face[0], face[i], face[i + 1]]);
            }
        }
        triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    pub fn group(&self, name: &str) -> Option<&VertexGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut VertexGroup> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// The group called `name`, created empty at the end of the list if absent.
    pub fn ensure_group(&mut self, name: &str) -> &mut VertexGroup {
        let index = match self.group_index(name) {
            Some(index) => index,
            None => {
                self.groups.push(VertexGroup::new(name));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    /// Add a group, replacing any existing group of the same name.
    pub fn add_group(&mut self, group: VertexGroup) {
        match self.group_index(&group.name) {
            Some(index) => self.groups[index] = group,
            None => self.groups.push(group),
        }
    }

    pub fn active_group_name(&self) -> Option<&str> {
        self.active_group
            .and_then(|i| self.groups.get(i))
            .map(|g| g.name.as_str())
    }

    /// Make `name` the active group. Returns `false` if there is no such group.
    pub fn set_active_group(&mut self, name: &str) -> bool {
        match self.group_index(name) {
            Some(index) => {
                self.active_group = Some(index);
                true
            },
            None => false,
        }
    }

    /// Drop zero-weight memberships from every group.
    pub fn clean_zero_weights(&mut self) -> usize {
        self.groups.iter_mut().map(|g| g.clean(0.0)).sum()
    }

    /// Vertex positions transformed by `world`.
    pub fn world_positions(&self, world: &Matrix4<Real>) -> Vec<Point3<Real>> {
        self.positions.iter().map(|p| world.transform_point(p)).collect()
    }
}

/// What an object carries.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectData {
    Mesh(SkinnedMesh),
    /// Anything without mesh data (empties, cameras, armatures, ...).
    Empty,
}

/// A named scene object with a world transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub name: String,
    pub world: Matrix4<Real>,
    pub data: ObjectData,
}

impl Object {
    pub fn mesh(name: impl Into<String>, mesh: SkinnedMesh) -> Self {
        Object {
            name: name.into(),
            world: Matrix4::identity(),
            data: ObjectData::Mesh(mesh),
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Object {
            name: name.into(),
            world: Matrix4::identity(),
            data: ObjectData::Empty,
        }
    }

    pub fn with_world(mut self, world: Matrix4<Real>) -> Self {
        self.world = world;
        self
    }

    pub fn as_mesh(&self) -> Result<&SkinnedMesh, HostError> {
        match &self.data {
            ObjectData::Mesh(mesh) => Ok(mesh),
            ObjectData::Empty => Err(HostError::NotAMesh(self.name.clone())),
        }
    }

    pub fn as_mesh_mut(&mut self) -> Result<&mut SkinnedMesh, HostError> {
        match &mut self.data {
            ObjectData::Mesh(mesh) => Ok(mesh),
            ObjectData::Empty => Err(HostError::NotAMesh(self.name.clone())),
        }
    }
}
