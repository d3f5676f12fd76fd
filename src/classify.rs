//! Side classification of vertex groups from their names.
//!
//! A group's side is derived from literal substrings in its name (`arm.l`,
//! `arm.r`, `spine.c`). The mirror target of a side group is its name with the
//! side pattern swapped; a center group mirrors onto itself.

use crate::errors::MirrorError;
use crate::float_types::Real;
use crate::host::MixMode;
use crate::plane::MirrorPlane;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Literal substrings identifying left, right and center groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePatterns {
    pub left: String,
    pub right: String,
    /// May be empty, meaning the rig has no center groups.
    pub center: String,
}

impl Default for SidePatterns {
    fn default() -> Self {
        SidePatterns::new(".l", ".r", ".c")
    }
}

impl SidePatterns {
    /// Build a pattern set, trimming surrounding whitespace from every pattern.
    pub fn new(left: &str, right: &str, center: &str) -> Self {
        SidePatterns {
            left: left.trim().to_string(),
            right: right.trim().to_string(),
            center: center.trim().to_string(),
        }
    }

    /// Reject pattern sets that make source and target names indistinguishable.
    pub fn validate(&self) -> Result<(), MirrorError> {
        if self.left.is_empty() || self.right.is_empty() {
            return Err(MirrorError::InvalidPatterns(format!(
                "left ('{}') and right ('{}') patterns must both be non-empty",
                self.left, self.right
            )));
        }
        if self.left == self.right {
            return Err(MirrorError::InvalidPatterns(format!(
                "left and right patterns are both '{}'",
                self.left
            )));
        }
        if !self.center.is_empty() && (self.center == self.left || self.center == self.right) {
            return Err(MirrorError::InvalidPatterns(format!(
                "center pattern '{}' collides with a side pattern",
                self.center
            )));
        }
        Ok(())
    }

    /// Whether `name` carries the (non-empty) center pattern.
    pub fn is_center_name(&self, name: &str) -> bool {
        !self.center.is_empty() && name.contains(self.center.as_str())
    }
}

/// Which side of the mirror plane a group's weights live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Center,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
            Side::Center => write!(f, "center"),
        }
    }
}

/// A resolved group: where its weights come from, where they go, and how the
/// plane normal is oriented for its distance tests.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupClassification {
    pub source: String,
    pub target: String,
    pub side: Side,
    pub plane: MirrorPlane,
    /// Plane normal oriented towards the source side (inverted for right groups).
    pub normal: Vector3<Real>,
}

impl GroupClassification {
    /// Side groups overwrite their mirror; center groups add onto their blended selves.
    pub const fn mix_mode(&self) -> MixMode {
        match self.side {
            Side::Center => MixMode::Add,
            Side::Left | Side::Right => MixMode::Replace,
        }
    }

    pub const fn is_center(&self) -> bool {
        matches!(self.side, Side::Center)
    }
}

/// Classify `name` against `patterns` for a mirror across `plane`.
///
/// A name is a right group only when it ends with the right pattern; any other
/// name is read as a left group, so `thigh.r.001` is unclassified.
///
/// The normal is taken fresh from the plane registry on every call, so a batch
/// of right groups never accumulates sign flips.
pub fn classify_group(
    name: &str,
    patterns: &SidePatterns,
    plane: MirrorPlane,
) -> Result<GroupClassification, MirrorError> {
    patterns.validate()?;

    let mut normal = plane.normal();
    let (from, to, side) = if name.ends_with(patterns.right.as_str()) {
        normal = -normal;
        (patterns.right.as_str(), patterns.left.as_str(), Side::Right)
    } else {
        (patterns.left.as_str(), patterns.right.as_str(), Side::Left)
    };

    let occurrences = name.matches(from).count();
    if occurrences > 1 {
        return Err(MirrorError::AmbiguousGroupName {
            name: name.to_string(),
            reason: format!("'{from}' occurs {occurrences} times"),
        });
    }
    if occurrences == 1 && name.contains(to) {
        return Err(MirrorError::AmbiguousGroupName {
            name: name.to_string(),
            reason: format!("contains both '{from}' and '{to}'"),
        });
    }

    let target = name.replacen(from, to, 1);
    if target == name {
        if patterns.is_center_name(name) {
            return Ok(GroupClassification {
                source: name.to_string(),
                target,
                side: Side::Center,
                plane,
                normal,
            });
        }
        return Err(MirrorError::UnclassifiedGroup(name.to_string()));
    }

    Ok(GroupClassification {
        source: name.to_string(),
        target,
        side,
        plane,
        normal,
    })
}
