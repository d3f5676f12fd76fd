//! Linear seam blending for center groups.
//!
//! A center group mirrors onto itself with additive mixing, so near the plane
//! both the original weight and its mirrored copy would land on the same
//! vertices. Ramping the original down across a band of `2 * width` makes the
//! two halves sum back to the original weight at the plane.

use crate::errors::MirrorError;
use crate::float_types::Real;
use crate::host::{MirrorHost, ObjectId};
use crate::plane::signed_distance;
use nalgebra::Vector3;

/// `(w + d) / (2w)`: 0 at `d = -w`, 0.5 on the plane, 1 at `d = w`.
///
/// Only meaningful for `w > 0` and `-w <= d <= w`.
#[inline]
pub fn blend_multiplier(distance: Real, width: Real) -> Real {
    (width + distance) / (2.0 * width)
}

/// The weight a center-group vertex keeps before its mirror is added back.
///
/// `width` must be positive.
pub fn blend_weight(weight: Real, distance: Real, width: Real) -> Real {
    if distance < -width {
        0.0
    } else if distance < width {
        weight * blend_multiplier(distance, width)
    } else {
        weight
    }
}

/// How many vertices each branch of the blend touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlendSummary {
    pub zeroed: usize,
    pub scaled: usize,
    pub unchanged: usize,
}

/// Blend `group` on `object` in place across the plane with `normal`.
///
/// Distances are measured in world space. `normal` points towards the side
/// whose weights are kept.
pub fn blend_center_group<H: MirrorHost + ?Sized>(
    host: &mut H,
    object: ObjectId,
    group: &str,
    normal: &Vector3<Real>,
    width: Real,
) -> Result<BlendSummary, MirrorError> {
    if !width.is_finite() || width <= 0.0 {
        return Err(MirrorError::InvalidBlendWidth(width));
    }

    let world = host.world_transform(object)?;
    let mut summary = BlendSummary::default();

    for (vertex, weight) in host.group_weights(object, group)? {
        let local = host.vertex_position(object, vertex)?;
        let distance = signed_distance(&world.transform_point(&local), normal);

        if distance >= width {
            summary.unchanged += 1;
            continue;
        }
        if distance < -width {
            summary.zeroed += 1;
        } else {
            summary.scaled += 1;
        }
        host.set_group_weight(object, group, vertex, blend_weight(weight, distance, width))?;
    }

    tracing::debug!(
        group,
        zeroed = summary.zeroed,
        scaled = summary.scaled,
        unchanged = summary.unchanged,
        "blended center group"
    );
    Ok(summary)
}
