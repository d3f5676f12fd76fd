//! The three fixed mirror planes and their reflection transforms.
//!
//! Every plane passes through the world origin and is axis aligned, so a plane
//! is fully described by the axis its normal points along.

use crate::float_types::Real;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// An axis-aligned mirror plane through the world origin.
///
/// | plane | index | normal      | reflection |
/// |-------|-------|-------------|------------|
/// | `YZ`  | 0     | `(1, 0, 0)` | `x → -x`   |
/// | `XZ`  | 1     | `(0, 1, 0)` | `y → -y`   |
/// | `XY`  | 2     | `(0, 0, 1)` | `z → -z`   |
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MirrorPlane {
    #[default]
    #[value(name = "yz")]
    YZ,
    #[value(name = "xz")]
    XZ,
    #[value(name = "xy")]
    XY,
}

impl MirrorPlane {
    /// All planes in index order.
    pub const ALL: [MirrorPlane; 3] = [MirrorPlane::YZ, MirrorPlane::XZ, MirrorPlane::XY];

    /// Look a plane up by its index (0 = YZ, 1 = XZ, 2 = XY).
    pub const fn from_index(index: usize) -> Option<MirrorPlane> {
        match index {
            0 => Some(MirrorPlane::YZ),
            1 => Some(MirrorPlane::XZ),
            2 => Some(MirrorPlane::XY),
            _ => None,
        }
    }

    /// Index of this plane, which is also the index of the axis it negates.
    pub const fn index(&self) -> usize {
        match self {
            MirrorPlane::YZ => 0,
            MirrorPlane::XZ => 1,
            MirrorPlane::XY => 2,
        }
    }

    /// Unit normal of the plane, pointing towards the positive side.
    pub fn normal(&self) -> Vector3<Real> {
        let mut n = Vector3::zeros();
        n[self.index()] = 1.0;
        n
    }

    /// Homogeneous reflection about this plane.
    ///
    /// Built as `R = I - 2 n nᵀ` on the upper 3×3 block, which for an axis-aligned
    /// unit normal negates exactly one coordinate. `R` is its own inverse.
    pub fn reflection(&self) -> Matrix4<Real> {
        let n = self.normal();
        let mut reflect_4 = Matrix4::identity();
        let reflect_3 = Matrix3::identity() - 2.0 * n * n.transpose();
        reflect_4.fixed_view_mut::<3, 3>(0, 0).copy_from(&reflect_3);
        reflect_4
    }
}

impl Display for MirrorPlane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MirrorPlane::YZ => write!(f, "YZ"),
            MirrorPlane::XZ => write!(f, "XZ"),
            MirrorPlane::XY => write!(f, "XY"),
        }
    }
}

/// Signed distance from `point` to the origin-anchored plane with unit `normal`.
///
/// Positive on the side the normal points to, negative on the opposite side.
#[inline]
pub fn signed_distance(point: &Point3<Real>, normal: &Vector3<Real>) -> Real {
    normal.dot(&point.coords)
}
