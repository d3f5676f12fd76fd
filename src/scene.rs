//! `Scene`: an in-memory [`MirrorHost`].

use crate::errors::HostError;
use crate::float_types::Real;
use crate::host::{
    EditorArea, HostState, InteractionMode, MirrorHost, ObjectId, TransferOutcome, TransferRequest,
};
use crate::mesh::{Object, SkinnedMesh};
use crate::transfer::{SourceSurface, apply_mix};
use hashbrown::HashMap;
use nalgebra::{Matrix4, Point3};

/// A flat collection of objects plus the interaction state a host tracks.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: HashMap<ObjectId, Object>,
    next_id: u64,
    mode: InteractionMode,
    editor: EditorArea,
    active_object: Option<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }

    /// Add an object and return its handle. The first object added becomes active.
    pub fn add_object(&mut self, object: Object) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, object);
        if self.active_object.is_none() {
            self.active_object = Some(id);
        }
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    /// Handle of the object called `name`.
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    /// Objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        let mut ids: Vec<ObjectId> = self.objects.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().filter_map(move |id| self.objects.get(&id).map(|o| (id, o)))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn active_object(&self) -> Option<ObjectId> {
        self.active_object
    }

    /// The mesh of object `id`.
    pub fn mesh(&self, id: ObjectId) -> Result<&SkinnedMesh, HostError> {
        self.get(id)?.as_mesh()
    }

    fn get(&self, id: ObjectId) -> Result<&Object, HostError> {
        self.objects.get(&id).ok_or(HostError::UnknownObject(id.0))
    }

    fn get_mut(&mut self, id: ObjectId) -> Result<&mut Object, HostError> {
        self.objects.get_mut(&id).ok_or(HostError::UnknownObject(id.0))
    }

    /// `base.001`, `base.002`, ... : the first name no object uses yet.
    fn unique_name(&self, base: &str) -> String {
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| self.objects.values().all(|o| &o.name != candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Positions of `object`'s vertices in the space a transfer searches in.
    fn search_points(object: &Object, use_object_transform: bool) -> Result<Vec<Point3<Real>>, HostError> {
        let mesh = object.as_mesh()?;
        Ok(if use_object_transform {
            mesh.world_positions(&object.world)
        } else {
            mesh.positions.clone()
        })
    }
}

impl MirrorHost for Scene {
    fn state(&self) -> HostState {
        let active_group = self
            .active_object
            .and_then(|id| self.objects.get(&id))
            .and_then(|o| o.as_mesh().ok())
            .and_then(|m| m.active_group_name())
            .map(str::to_string);
        HostState {
            mode: self.mode,
            editor: self.editor,
            active_object: self.active_object,
            active_group,
        }
    }

    fn set_mode(&mut self, mode: InteractionMode) -> Result<(), HostError> {
        if mode != InteractionMode::Object {
            let id = self
                .active_object
                .ok_or_else(|| {
                    HostError::ModeUnavailable(format!("cannot enter {mode:?} mode without an active object"))
                })?;
            // Pose mode belongs to armatures, the rest need mesh data.
            let object = self.get(id)?;
            if mode != InteractionMode::Pose {
                object.as_mesh()?;
            }
        }
        self.mode = mode;
        Ok(())
    }

    fn set_editor(&mut self, editor: EditorArea) {
        self.editor = editor;
    }

    fn set_active_object(&mut self, object: Option<ObjectId>) -> Result<(), HostError> {
        if let Some(id) = object {
            self.get(id)?;
        }
        self.active_object = object;
        Ok(())
    }

    fn set_active_group(&mut self, object: ObjectId, group: &str) -> Result<(), HostError> {
        let target = self.get_mut(object)?;
        let name = target.name.clone();
        if target.as_mesh_mut()?.set_active_group(group) {
            Ok(())
        } else {
            Err(HostError::MissingGroup {
                object: name,
                group: group.to_string(),
            })
        }
    }

    fn object_name(&self, object: ObjectId) -> Result<String, HostError> {
        Ok(self.get(object)?.name.clone())
    }

    fn is_mesh(&self, object: ObjectId) -> Result<bool, HostError> {
        Ok(self.get(object)?.as_mesh().is_ok())
    }

    fn vertex_group_names(&self, object: ObjectId) -> Result<Vec<String>, HostError> {
        let mesh = self.get(object)?.as_mesh()?;
        Ok(mesh.groups.iter().map(|g| g.name.clone()).collect())
    }

    fn active_group(&self, object: ObjectId) -> Result<Option<String>, HostError> {
        let mesh = self.get(object)?.as_mesh()?;
        Ok(mesh.active_group_name().map(str::to_string))
    }

    fn world_transform(&self, object: ObjectId) -> Result<Matrix4<Real>, HostError> {
        Ok(self.get(object)?.world)
    }

    fn vertex_position(&self, object: ObjectId, vertex: u32) -> Result<Point3<Real>, HostError> {
        let mesh = self.get(object)?.as_mesh()?;
        mesh.positions
            .get(vertex as usize)
            .copied()
            .ok_or(HostError::VertexOutOfRange {
                index: vertex,
                count: mesh.vertex_count(),
            })
    }

    fn group_weights(&self, object: ObjectId, group: &str) -> Result<Vec<(u32, Real)>, HostError> {
        let target = self.get(object)?;
        let mesh = target.as_mesh()?;
        mesh.group(group)
            .map(|g| g.sorted_weights())
            .ok_or_else(|| HostError::MissingGroup {
                object: target.name.clone(),
                group: group.to_string(),
            })
    }

    fn set_world_transform(
        &mut self,
        object: ObjectId,
        transform: Matrix4<Real>,
    ) -> Result<(), HostError> {
        self.get_mut(object)?.world = transform;
        Ok(())
    }

    fn set_group_weight(
        &mut self,
        object: ObjectId,
        group: &str,
        vertex: u32,
        weight: Real,
    ) -> Result<(), HostError> {
        let target = self.get_mut(object)?;
        let name = target.name.clone();
        let mesh = target.as_mesh_mut()?;
        let count = mesh.vertex_count();
        if vertex as usize >= count {
            return Err(HostError::VertexOutOfRange { index: vertex, count });
        }
        let vertex_group = mesh.group_mut(group).ok_or_else(|| HostError::MissingGroup {
            object: name,
            group: group.to_string(),
        })?;
        vertex_group.set_weight(vertex, weight);
        Ok(())
    }

    fn duplicate_object(&mut self, object: ObjectId) -> Result<ObjectId, HostError> {
        let mut copy = self.get(object)?.clone();
        copy.name = self.unique_name(&copy.name);
        Ok(self.add_object(copy))
    }

    fn delete_object(&mut self, object: ObjectId) -> Result<(), HostError> {
        self.objects
            .remove(&object)
            .ok_or(HostError::UnknownObject(object.0))?;
        if self.active_object == Some(object) {
            self.active_object = None;
        }
        Ok(())
    }

    fn transfer_vertex_weights(
        &mut self,
        request: &TransferRequest,
    ) -> Result<TransferOutcome, HostError> {
        let source = self.get(request.source)?;
        let source_mesh = source.as_mesh()?;
        let source_group = source_mesh
            .group(&request.source_group)
            .ok_or_else(|| HostError::MissingGroup {
                object: source.name.clone(),
                group: request.source_group.clone(),
            })?;
        let surface = SourceSurface::new(
            &source.name,
            Scene::search_points(source, request.use_object_transform)?,
            &source_mesh.triangles(),
            source_group.dense_weights(source_mesh.vertex_count()),
        )?;

        let destination = self.get(request.destination)?;
        let destination_name = destination.name.clone();
        let has_group = destination.as_mesh()?.group(&request.destination_group).is_some();
        if !has_group && !request.create_if_missing {
            return Err(HostError::MissingGroup {
                object: destination_name,
                group: request.destination_group.clone(),
            });
        }
        let points = Scene::search_points(destination, request.use_object_transform)?;
        let samples = surface.sample_all(&points, request.mapping, request.max_distance);

        let mesh = self.get_mut(request.destination)?.as_mesh_mut()?;
        let group = mesh.ensure_group(&request.destination_group);
        let mut outcome = TransferOutcome::default();
        for (vertex, sample) in samples.into_iter().enumerate() {
            let Some(incoming) = sample else {
                outcome.missed += 1;
                continue;
            };
            let vertex = vertex as u32;
            group.set_weight(vertex, apply_mix(group.weight(vertex), incoming, request.mix_mode));
            outcome.written += 1;
        }

        tracing::debug!(
            source = %request.source_group,
            destination = %request.destination_group,
            object = %destination_name,
            written = outcome.written,
            missed = outcome.missed,
            "transferred vertex weights"
        );
        Ok(outcome)
    }

    fn clean_zero_weight_entries(&mut self, object: ObjectId) -> Result<usize, HostError> {
        Ok(self.get_mut(object)?.as_mesh_mut()?.clean_zero_weights())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::VertexGroup;

    fn single_vertex_scene() -> (Scene, ObjectId) {
        let mut mesh = SkinnedMesh::new(vec![Point3::new(1.0, 0.0, 0.0)], Vec::new());
        mesh.add_group(VertexGroup::from_weights("arm.l", [(0, 0.5)]));
        let mut scene = Scene::new();
        let id = scene.add_object(Object::mesh("Body", mesh));
        (scene, id)
    }

    #[test]
    fn duplicate_gets_unique_name() {
        let (mut scene, id) = single_vertex_scene();
        let first = scene.duplicate_object(id).unwrap();
        let second = scene.duplicate_object(id).unwrap();
        assert_eq!(scene.object_name(first).unwrap(), "Body.001");
        assert_eq!(scene.object_name(second).unwrap(), "Body.002");
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn deleting_active_object_clears_it() {
        let (mut scene, id) = single_vertex_scene();
        assert_eq!(scene.active_object(), Some(id));
        scene.delete_object(id).unwrap();
        assert_eq!(scene.active_object(), None);
        assert_eq!(scene.delete_object(id), Err(HostError::UnknownObject(id.0)));
    }

    #[test]
    fn set_weight_requires_existing_group() {
        let (mut scene, id) = single_vertex_scene();
        assert!(scene.set_group_weight(id, "arm.r", 0, 1.0).is_err());
        assert!(scene.set_group_weight(id, "arm.l", 1, 1.0).is_err());
        scene.set_group_weight(id, "arm.l", 0, 0.75).unwrap();
        assert_eq!(scene.group_weights(id, "arm.l").unwrap(), vec![(0, 0.75)]);
    }

    #[test]
    fn pose_mode_needs_no_mesh() {
        let (mut scene, _) = single_vertex_scene();
        let armature = scene.add_object(Object::empty("Armature"));
        scene.set_active_object(Some(armature)).unwrap();

        scene.set_mode(InteractionMode::Pose).unwrap();
        assert!(matches!(scene.set_mode(InteractionMode::WeightPaint), Err(HostError::NotAMesh(_))));
        assert_eq!(scene.state().mode, InteractionMode::Pose);
    }
}
