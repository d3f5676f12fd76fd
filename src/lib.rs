//! Mirror **vertex-group skin weights** across a symmetry plane with a closest-point search,
//! without requiring the mesh itself to be symmetric.
//!
//! For every requested group a reflected duplicate of the mesh object is created, the group's
//! weights are transferred from the duplicate back onto the original's mirror-side group by
//! projecting onto the duplicate's surface, and the duplicate is deleted again. Center groups
//! (`spine.c`) are first ramped down across a seam band so the original and mirrored halves do
//! not double up at the plane.
//!
//! The pipeline talks to its host application only through the [`MirrorHost`] trait.
//! [`Scene`] is an in-memory host backed by parry's triangle-mesh point queries.
//!
//! ```
//! use nalgebra::Point3;
//! use weight_mirror::{MirrorHost, MirrorOperator, MirrorSettings, Object, Scene, SkinnedMesh, VertexGroup};
//!
//! let mut mesh = SkinnedMesh::new(
//!     vec![Point3::new(1.0, 0.0, 0.0), Point3::new(-1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
//!     vec![[0, 1, 2]],
//! );
//! mesh.add_group(VertexGroup::from_weights("arm.l", [(0, 1.0)]));
//! mesh.set_active_group("arm.l");
//!
//! let mut scene = Scene::new();
//! let body = scene.add_object(Object::mesh("Body", mesh));
//! let report = MirrorOperator::ActiveVertexGroup
//!     .execute(&mut scene, body, &MirrorSettings::default())
//!     .unwrap();
//! assert_eq!(report.to_string(), "Finished mirroring vertex group arm.l on Body");
//! assert_eq!(scene.group_weights(body, "arm.r").unwrap(), vec![(1, 1.0)]);
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for the per-vertex closest-point queries

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod blend;
pub mod classify;
pub mod config;
pub mod driver;
pub mod errors;
pub mod float_types;
pub mod host;
pub mod io;
pub mod mesh;
pub mod mirror;
pub mod operator;
pub mod plane;
pub mod scene;
pub mod transfer;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use classify::{GroupClassification, Side, SidePatterns, classify_group};
pub use config::{MirrorDirection, MirrorSettings};
pub use driver::{MirrorReport, MirrorScope, mirror_vertex_groups};
pub use errors::{HostError, MirrorError};
pub use host::{MirrorHost, ObjectId, VertexMapping};
pub use mesh::{Object, SkinnedMesh, VertexGroup};
pub use operator::MirrorOperator;
pub use plane::MirrorPlane;
pub use scene::Scene;
