//! Closest-point weight transfer.
//!
//! For every destination point, find the closest point on a source surface and
//! read the source weight there, either interpolated across the hit triangle or
//! taken whole from the nearest source vertex.

use crate::errors::HostError;
use crate::float_types::{
    Real, clamp_weight,
    parry3d::{query::PointQueryWithLocation, shape::TriMesh},
};
use crate::host::{MixMode, VertexMapping};
use nalgebra::Point3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A source mesh prepared for closest-point queries, with one weight per vertex.
pub struct SourceSurface {
    points: Vec<Point3<Real>>,
    weights: Vec<Real>,
    /// `None` for point clouds, which only support nearest-vertex lookups.
    trimesh: Option<TriMesh>,
}

impl SourceSurface {
    /// Prepare `points`/`triangles` (already in the space queries will use) for searching.
    ///
    /// `weights` is dense: one entry per point, non-members as 0.
    pub fn new(
        name: &str,
        points: Vec<Point3<Real>>,
        triangles: &[[u32; 3]],
        weights: Vec<Real>,
    ) -> Result<Self, HostError> {
        if weights.len() != points.len() {
            return Err(HostError::TransferFailed(format!(
                "'{name}' has {} weights for {} vertices",
                weights.len(),
                points.len()
            )));
        }
        if let Some(&index) = triangles.iter().flatten().find(|&&i| i as usize >= points.len()) {
            return Err(HostError::VertexOutOfRange { index, count: points.len() });
        }

        let trimesh = if triangles.is_empty() {
            None
        } else {
            let trimesh = TriMesh::new(points.clone(), triangles.to_vec())
                .map_err(|e| HostError::TransferFailed(format!("'{name}': {e:?}")))?;
            Some(trimesh)
        };

        Ok(SourceSurface {
            points,
            weights,
            trimesh,
        })
    }

    /// Source weight seen from `point`, or `None` when nothing lies within
    /// `max_distance` (always `None` for a source without vertices).
    pub fn sample(
        &self,
        point: &Point3<Real>,
        mapping: VertexMapping,
        max_distance: Option<Real>,
    ) -> Option<Real> {
        match (mapping, &self.trimesh) {
            (VertexMapping::Barycentric, Some(trimesh)) => {
                self.sample_barycentric(trimesh, point, max_distance)
            },
            (VertexMapping::NearestVertex, Some(trimesh)) => {
                self.sample_nearest_corner(trimesh, point, max_distance)
            },
            (_, None) => self.sample_nearest_point(point, max_distance),
        }
    }

    /// [`sample`](Self::sample) for every point, in order.
    #[cfg(not(feature = "parallel"))]
    pub fn sample_all(
        &self,
        points: &[Point3<Real>],
        mapping: VertexMapping,
        max_distance: Option<Real>,
    ) -> Vec<Option<Real>> {
        self.warn_on_fallback(mapping);
        points
            .iter()
            .map(|p| self.sample(p, mapping, max_distance))
            .collect()
    }

    /// Parallel [`sample`](Self::sample) for every point, in order.
    #[cfg(feature = "parallel")]
    pub fn sample_all(
        &self,
        points: &[Point3<Real>],
        mapping: VertexMapping,
        max_distance: Option<Real>,
    ) -> Vec<Option<Real>> {
        self.warn_on_fallback(mapping);
        points
            .par_iter()
            .map(|p| self.sample(p, mapping, max_distance))
            .collect()
    }

    fn warn_on_fallback(&self, mapping: VertexMapping) {
        if self.points.is_empty() {
            tracing::warn!("source has no vertices, destination weights are left unset");
        } else if mapping == VertexMapping::Barycentric && self.trimesh.is_none() {
            tracing::warn!("source has no faces, falling back to nearest-vertex mapping");
        }
    }

    fn sample_barycentric(
        &self,
        trimesh: &TriMesh,
        point: &Point3<Real>,
        max_distance: Option<Real>,
    ) -> Option<Real> {
        let (projection, (triangle, location)) =
            trimesh.project_local_point_and_get_location(point, false);

        if !within(&projection.point, point, max_distance) {
            return None;
        }

        let corners = trimesh.indices().get(triangle as usize)?;
        let bary = location.barycentric_coordinates()?;
        let weight = corners
            .iter()
            .zip(bary.iter())
            .map(|(&vertex, &b)| b * self.weights[vertex as usize])
            .sum::<Real>();
        Some(clamp_weight(weight))
    }

    /// Closest triangle through the BVH, then the corner of it closest to `point`.
    fn sample_nearest_corner(
        &self,
        trimesh: &TriMesh,
        point: &Point3<Real>,
        max_distance: Option<Real>,
    ) -> Option<Real> {
        let (_, (triangle, _)) = trimesh.project_local_point_and_get_location(point, false);
        let corners = trimesh.indices().get(triangle as usize)?;
        let vertex = corners.iter().copied().min_by(|&a, &b| {
            let da = (self.points[a as usize] - point).norm_squared();
            let db = (self.points[b as usize] - point).norm_squared();
            da.total_cmp(&db)
        })? as usize;

        if !within(&self.points[vertex], point, max_distance) {
            return None;
        }
        Some(self.weights[vertex])
    }

    /// Linear scan for sources without faces.
    fn sample_nearest_point(&self, point: &Point3<Real>, max_distance: Option<Real>) -> Option<Real> {
        let (index, _) = self
            .points
            .iter()
            .map(|candidate| (candidate - point).norm_squared())
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))?;

        if !within(&self.points[index], point, max_distance) {
            return None;
        }
        Some(self.weights[index])
    }
}

#[inline]
fn within(hit: &Point3<Real>, query: &Point3<Real>, max_distance: Option<Real>) -> bool {
    max_distance.is_none_or(|max| (hit - query).norm() <= max)
}

/// Combine a transferred weight with the destination's current one.
///
/// Non-members count as 0; the result is clamped to `[0, 1]`.
pub fn apply_mix(existing: Option<Real>, incoming: Real, mode: MixMode) -> Real {
    match mode {
        MixMode::Replace => clamp_weight(incoming),
        MixMode::Add => clamp_weight(existing.unwrap_or(0.0) + incoming),
    }
}
