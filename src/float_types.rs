// Re-export parry for the appropriate float size
#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;

#[cfg(feature = "f32")]
pub use parry3d;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Defaults
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Width of the linear seam blend on center groups, in meters (5 cm).
pub const DEFAULT_CENTER_BLEND_WIDTH: Real = 0.05;

/// Smallest weight a vertex group can hold.
pub const MIN_WEIGHT: Real = 0.0;
/// Largest weight a vertex group can hold.
pub const MAX_WEIGHT: Real = 1.0;

/// Clamp a weight into the `[0, 1]` range every vertex group stores.
/// Non-finite input collapses to zero.
#[inline]
pub fn clamp_weight(weight: Real) -> Real {
    if weight.is_finite() {
        weight.clamp(MIN_WEIGHT, MAX_WEIGHT)
    } else {
        MIN_WEIGHT
    }
}
