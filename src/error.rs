//! Error types for plexfield.
//!
//! The engine itself is best-effort and never fails mid-tick; the only
//! fallible operation is settings validation at construction or hot-swap.

use std::fmt;

/// Errors produced by [`Settings::validate`](crate::Settings::validate).
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// The allowed spawn-position list is empty.
    NoSpawnPositions,
    /// The allowed particle-shape list is empty.
    NoShapes,
    /// A min/max range has min greater than max.
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    /// Fading is enabled but a fade duration is zero or negative.
    NonPositiveFadeTime { field: &'static str, value: f32 },
    /// The repulsion radius exceeds the attraction radius.
    RadiusOrder { attraction: f32, repulsion: f32 },
    /// Population minimum exceeds population maximum.
    PopulationBounds { min: usize, max: usize },
    /// The frame-rate cap is zero or negative.
    NonPositiveMaxFps(f32),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NoSpawnPositions => {
                write!(f, "spawn-position list is empty; at least one placement is required")
            }
            SettingsError::NoShapes => {
                write!(f, "particle shape list is empty; at least one shape is required")
            }
            SettingsError::InvertedRange { field, min, max } => {
                write!(f, "range `{}` is inverted: min {} > max {}", field, min, max)
            }
            SettingsError::NonPositiveFadeTime { field, value } => {
                write!(f, "fading is enabled but `{}` is {} (must be > 0)", field, value)
            }
            SettingsError::RadiusOrder { attraction, repulsion } => {
                write!(
                    f,
                    "repulsion radius {} exceeds attraction radius {}",
                    repulsion, attraction
                )
            }
            SettingsError::PopulationBounds { min, max } => {
                write!(f, "min_particles {} exceeds max_particles {}", min, max)
            }
            SettingsError::NonPositiveMaxFps(v) => {
                write!(f, "max_fps is {} (must be > 0)", v)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
