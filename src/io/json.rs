//! JSON scene documents.
//!
//! ```json
//! {
//!   "active_object": "Body",
//!   "objects": [{
//!     "name": "Body",
//!     "world": [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]],
//!     "mesh": {
//!       "vertices": [[0.5, 0, 0], [-0.5, 0, 0], [0, 1, 0]],
//!       "faces": [[0, 1, 2]],
//!       "groups": [{ "name": "arm.l", "weights": { "0": 1.0 } }],
//!       "active_group": "arm.l"
//!     }
//!   }]
//! }
//! ```
//!
//! `world` is row-major and defaults to identity. Objects without `mesh` load
//! as empties. Faces may have any number of corners and are written back
//! unchanged.

use super::IoError;
use crate::float_types::Real;
use crate::host::{MirrorHost, ObjectId};
use crate::mesh::{Object, ObjectData, SkinnedMesh, VertexGroup};
use crate::scene::Scene;
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_object: Option<String>,
    #[serde(default)]
    pub objects: Vec<ObjectDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world: Option<[[Real; 4]; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshDocument>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshDocument {
    pub vertices: Vec<[Real; 3]>,
    #[serde(default)]
    pub faces: Vec<Vec<u32>>,
    #[serde(default)]
    pub groups: Vec<GroupDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupDocument {
    pub name: String,
    #[serde(default)]
    pub weights: BTreeMap<u32, Real>,
}

impl SceneDocument {
    pub fn from_scene(scene: &Scene) -> Self {
        let objects = scene
            .objects()
            .map(|(_, object)| ObjectDocument::from_object(object))
            .collect();
        let active_object = scene
            .active_object()
            .and_then(|id| scene.object(id))
            .map(|o| o.name.clone());
        SceneDocument {
            active_object,
            objects,
        }
    }

    /// Build a [`Scene`], checking names and indices along the way.
    pub fn into_scene(self) -> Result<Scene, IoError> {
        let mut scene = Scene::new();
        let mut ids: BTreeMap<String, ObjectId> = BTreeMap::new();

        for document in self.objects {
            if ids.contains_key(&document.name) {
                return Err(IoError::MalformedInput(format!(
                    "duplicate object name '{}'",
                    document.name
                )));
            }
            let name = document.name.clone();
            let id = scene.add_object(document.into_object()?);
            ids.insert(name, id);
        }

        let active = match self.active_object {
            Some(name) => Some(*ids.get(&name).ok_or_else(|| {
                IoError::MalformedInput(format!("active object '{name}' does not exist"))
            })?),
            None => ids.values().min().copied(),
        };
        scene.set_active_object(active)?;
        Ok(scene)
    }
}

impl ObjectDocument {
    fn from_object(object: &Object) -> Self {
        let world = Some(std::array::from_fn(|r| std::array::from_fn(|c| object.world[(r, c)])));
        let mesh = match &object.data {
            ObjectData::Mesh(mesh) => Some(MeshDocument::from_mesh(mesh)),
            ObjectData::Empty => None,
        };
        ObjectDocument {
            name: object.name.clone(),
            world,
            mesh,
        }
    }

    fn into_object(self) -> Result<Object, IoError> {
        let world = self
            .world
            .map(|rows| Matrix4::from_fn(|r, c| rows[r][c]))
            .unwrap_or_else(Matrix4::identity);
        if world.iter().any(|v| !v.is_finite()) {
            return Err(IoError::MalformedInput(format!(
                "object '{}' has a non-finite world matrix",
                self.name
            )));
        }

        let object = match self.mesh {
            Some(mesh) => Object::mesh(&self.name, mesh.into_mesh(&self.name)?),
            None => Object::empty(&self.name),
        };
        Ok(object.with_world(world))
    }
}

impl MeshDocument {
    fn from_mesh(mesh: &SkinnedMesh) -> Self {
        MeshDocument {
            vertices: mesh.positions.iter().map(|p| [p.x, p.y, p.z]).collect(),
            faces: mesh.faces.clone(),
            groups: mesh
                .groups
                .iter()
                .map(|g| GroupDocument {
                    name: g.name.clone(),
                    weights: g.weights.iter().map(|(&v, &w)| (v, w)).collect(),
                })
                .collect(),
            active_group: mesh.active_group_name().map(str::to_string),
        }
    }

    fn into_mesh(self, object: &str) -> Result<SkinnedMesh, IoError> {
        let positions: Vec<Point3<Real>> = self
            .vertices
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect();
        let count = positions.len();
        let mut mesh = SkinnedMesh::from_polygons(positions, self.faces)?;

        for group in self.groups {
            if mesh.group(&group.name).is_some() {
                return Err(IoError::MalformedInput(format!(
                    "object '{object}' has two vertex groups named '{}'",
                    group.name
                )));
            }
            if let Some(&vertex) = group.weights.keys().find(|&&v| v as usize >= count) {
                return Err(IoError::MalformedInput(format!(
                    "group '{}' on '{object}' weights vertex {vertex} of {count}",
                    group.name
                )));
            }
            mesh.add_group(VertexGroup::from_weights(group.name, group.weights));
        }

        if let Some(active) = self.active_group {
            if !mesh.set_active_group(&active) {
                return Err(IoError::MalformedInput(format!(
                    "active group '{active}' does not exist on '{object}'"
                )));
            }
        }
        Ok(mesh)
    }
}

impl Scene {
    pub fn from_json_str(text: &str) -> Result<Scene, IoError> {
        let document: SceneDocument = serde_json::from_str(text)?;
        document.into_scene()
    }

    pub fn to_json_string(&self) -> Result<String, IoError> {
        Ok(serde_json::to_string_pretty(&SceneDocument::from_scene(self))?)
    }
}

/// Read a scene document from `path`.
pub fn read_scene(path: impl AsRef<Path>) -> Result<Scene, IoError> {
    let text = std::fs::read_to_string(path)?;
    Scene::from_json_str(&text)
}

/// Write `scene` to `path` as a pretty-printed document.
pub fn write_scene(scene: &Scene, path: impl AsRef<Path>) -> Result<(), IoError> {
    std::fs::write(path, scene.to_json_string()?)?;
    Ok(())
}
