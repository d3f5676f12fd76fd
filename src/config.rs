//! Per-invocation mirror settings.
//!
//! Settings load from TOML; every field is optional and falls back to its default:
//!
//! ```toml
//! left_pattern = ".l"
//! right_pattern = ".r"
//! center_pattern = ".c"
//! mirror_plane = "yz"
//! mirror_direction = "positive-to-negative"
//! weight_distribution = "barycentric"
//! center_blend_width = 0.05
//! # max_distance = 1.0
//! ```

use crate::classify::SidePatterns;
use crate::errors::MirrorError;
use crate::float_types::{DEFAULT_CENTER_BLEND_WIDTH, Real};
use crate::host::VertexMapping;
use crate::plane::MirrorPlane;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which side's groups seed the worklist when mirroring every group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MirrorDirection {
    /// Left (and center) groups are copied onto the right side.
    #[default]
    PositiveToNegative,
    /// Right (and center) groups are copied onto the left side.
    NegativeToPositive,
}

/// Errors loading settings from disk.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Everything a mirror run can be configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorSettings {
    pub left_pattern: String,
    pub right_pattern: String,
    /// Empty means the rig has no center groups.
    pub center_pattern: String,
    pub mirror_plane: MirrorPlane,
    /// Only consulted when mirroring every group.
    pub mirror_direction: MirrorDirection,
    pub weight_distribution: VertexMapping,
    /// Half-width of the seam band on center groups, in meters.
    pub center_blend_width: Real,
    /// Search radius of the closest-point transfer; unlimited when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<Real>,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        MirrorSettings {
            left_pattern: ".l".to_string(),
            right_pattern: ".r".to_string(),
            center_pattern: ".c".to_string(),
            mirror_plane: MirrorPlane::default(),
            mirror_direction: MirrorDirection::default(),
            weight_distribution: VertexMapping::default(),
            center_blend_width: DEFAULT_CENTER_BLEND_WIDTH,
            max_distance: None,
        }
    }
}

impl MirrorSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        MirrorSettings::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The side patterns, trimmed of surrounding whitespace.
    pub fn patterns(&self) -> SidePatterns {
        SidePatterns::new(&self.left_pattern, &self.right_pattern, &self.center_pattern)
    }

    /// Reject settings that would make a run meaningless, before anything is touched.
    pub fn validate(&self) -> Result<(), MirrorError> {
        self.patterns().validate()?;
        if !self.center_blend_width.is_finite() || self.center_blend_width <= 0.0 {
            return Err(MirrorError::InvalidBlendWidth(self.center_blend_width));
        }
        if let Some(max) = self.max_distance {
            if !max.is_finite() || max <= 0.0 {
                return Err(MirrorError::InvalidMaxDistance(max));
            }
        }
        Ok(())
    }
}
