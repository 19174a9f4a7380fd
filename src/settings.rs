//! Typed configuration for the particle system.
//!
//! Every tunable lives in one of these structs. They are plain serde-derived
//! value bags so a host can load them from JSON/TOML, tweak them in a UI and
//! hot-swap them between ticks; the engine validates once on construction or
//! swap and thereafter reads whichever settings object the current tick was
//! given, never a cached one.
//!
//! # Example
//!
//! ```ignore
//! let mut settings = Settings::default();
//! settings.particle.behaviour.movement.speed = Span::new(75.0, 150.0);
//! settings.connection.max_connections = 2;
//! settings.validate()?;
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::draw::{Color, ColorStop};
use crate::error::SettingsError;
use crate::visuals::{LineStyle, ParticleShape};

/// Inclusive numeric range used for randomized attributes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit value into this range.
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }

    fn check(&self, field: &'static str) -> Result<(), SettingsError> {
        if self.min > self.max {
            return Err(SettingsError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Candidate placements for newly spawned particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpawnPosition {
    /// Anywhere in the arena (grid-snapped per axis when a grid is set).
    Random,
    /// Arena center, jittered by the spawning offset.
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    /// Random point along the top edge.
    TopEdge,
    BottomEdge,
    LeftEdge,
    RightEdge,
    /// One of the four edges, picked uniformly.
    RandomEdge,
    /// One of the four corners, picked uniformly.
    RandomCorner,
}

/// Movement direction policy.
///
/// `Random` keeps the direction assigned at spawn (physics may perturb it);
/// every other variant is resolved fresh each tick from the particle's
/// current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Random,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    /// Toward the arena center.
    Center,
    /// Away from the arena center.
    Edge,
    /// Toward the nearest arena corner.
    Corner,
    /// Freshly randomized every tick.
    Jitter,
}

/// Which inter-particle forces are active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionMode {
    Attract,
    Repel,
    Both,
}

/// Drop shadow for particles or connection lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadowSettings {
    pub enabled: bool,
    pub color: Color,
    pub radius: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            color: Color::rgb(0.0, 1.0, 64.0 / 255.0),
            radius: 5.0,
        }
    }
}

/// Time-based fade in/out for particles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FadingSettings {
    pub enabled: bool,
    /// Seconds for life to ramp 0 -> 1 after spawn.
    pub fade_in_time: f32,
    /// Seconds for life to ramp 1 -> 0 after death begins.
    pub fade_out_time: f32,
}

impl Default for FadingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            fade_in_time: 1.0,
            fade_out_time: 1.0,
        }
    }
}

/// Particle look: size, color, shape set, shadow, fade timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    pub size: Span,
    pub color: Color,
    pub opacity: f32,
    /// Allowed shapes; each particle picks one uniformly at spawn.
    pub shapes: Vec<ParticleShape>,
    pub shadow: ShadowSettings,
    pub fading: FadingSettings,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            size: Span::new(3.0, 6.0),
            color: Color::rgb(0.0, 1.0, 64.0 / 255.0),
            opacity: 1.0,
            shapes: vec![ParticleShape::Circle],
            shadow: ShadowSettings::default(),
            fading: FadingSettings::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementSettings {
    pub enabled: bool,
    /// Speed range in surface units per second.
    pub speed: Span,
    pub direction: Direction,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: Span::new(75.0, 150.0),
            direction: Direction::Random,
        }
    }
}

/// Optional spawn grid; a positive count snaps that axis to cell centers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnGrid {
    pub columns: u32,
    pub rows: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawningSettings {
    pub spawn_positions: Vec<SpawnPosition>,
    /// Inset from the arena edges for anchored placements. Negative values
    /// push spawn points (and the out-of-bounds margin) outside the arena.
    pub offset: Vec2,
    pub grid: SpawnGrid,
    /// Re-initialize dead particles instead of destroying them.
    pub respawn: bool,
}

impl Default for SpawningSettings {
    fn default() -> Self {
        Self {
            spawn_positions: vec![SpawnPosition::Random],
            offset: Vec2::new(-100.0, -100.0),
            grid: SpawnGrid::default(),
            respawn: true,
        }
    }
}

/// Time-to-live. When enabled each particle draws a lifespan from `range`
/// at spawn and starts dying once it has lived that many seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TtlSettings {
    pub enabled: bool,
    pub range: Span,
}

impl Default for TtlSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            range: Span::new(3.0, 8.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehaviourSettings {
    pub movement: MovementSettings,
    pub spawning: SpawningSettings,
    pub ttl: TtlSettings,
    /// Reflect velocity at the arena boundary instead of dying off-screen.
    pub bounce_off_edges: bool,
    /// Resolve elastic collisions between overlapping particles.
    pub bounce_off_particles: bool,
}

impl Default for BehaviourSettings {
    fn default() -> Self {
        Self {
            movement: MovementSettings::default(),
            spawning: SpawningSettings::default(),
            ttl: TtlSettings::default(),
            bounce_off_edges: true,
            bounce_off_particles: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleSettings {
    pub appearance: AppearanceSettings,
    pub behaviour: BehaviourSettings,
}

/// Distance- and rate-based fading for connection lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionFading {
    pub enabled: bool,
    /// Fraction of the squared max distance at which distance fading starts.
    pub distance_threshold: f32,
    /// Life units per second when easing toward the target life.
    pub speed: f32,
}

impl Default for ConnectionFading {
    fn default() -> Self {
        Self {
            enabled: true,
            distance_threshold: 0.85,
            speed: 0.75,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionAppearance {
    pub color: Color,
    pub opacity: f32,
    pub line_width: f32,
    pub line_style: LineStyle,
    pub shadow: ShadowSettings,
    pub fading: ConnectionFading,
}

impl Default for ConnectionAppearance {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.0, 1.0, 64.0 / 255.0),
            opacity: 1.0,
            line_width: 3.0,
            line_style: LineStyle::Solid,
            shadow: ShadowSettings {
                enabled: true,
                color: Color::rgb(0.0, 1.0, 64.0 / 255.0),
                radius: 8.0,
            },
            fading: ConnectionFading::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    pub enabled: bool,
    /// Maximum edge length in surface units.
    pub distance: f32,
    /// Degree cap: simultaneous connections per particle.
    pub max_connections: usize,
    pub appearance: ConnectionAppearance,
}

impl ConnectionSettings {
    /// Squared max distance, the unit the proximity table works in.
    #[inline]
    pub fn distance_sq(&self) -> f32 {
        self.distance * self.distance
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            distance: 200.0,
            max_connections: 2,
            appearance: ConnectionAppearance::default(),
        }
    }
}

/// A force with its reach.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForceSettings {
    pub force: f32,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionSettings {
    pub enabled: bool,
    pub mode: InteractionMode,
    pub attraction: ForceSettings,
    pub repulsion: ForceSettings,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: InteractionMode::Both,
            attraction: ForceSettings {
                force: 75.0,
                radius: 150.0,
            },
            repulsion: ForceSettings {
                force: 125.0,
                radius: 50.0,
            },
        }
    }
}

/// Pointer-driven spawning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerSettings {
    pub enabled: bool,
    /// Particles spawned per press or drag step.
    pub amount: u32,
    /// Keep spawning while the pointer is dragged.
    pub continuous: bool,
    /// Minimum seconds between drag spawns.
    pub delay: f32,
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            amount: 5,
            continuous: true,
            delay: 0.04,
        }
    }
}

/// Automatic population top-up and cull, run on its own slower cadence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationSettings {
    pub auto_spawn: bool,
    pub auto_destroy: bool,
    pub min_particles: usize,
    pub max_particles: usize,
    /// Seconds between population adjustments.
    pub adjustment_interval: f32,
}

impl Default for PopulationSettings {
    fn default() -> Self {
        Self {
            auto_spawn: true,
            auto_destroy: true,
            min_particles: 50,
            max_particles: 200,
            adjustment_interval: 0.1,
        }
    }
}

/// Background painting: solid fill or a gradient across the arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundSettings {
    Color(Color),
    LinearGradient {
        direction: GradientDirection,
        stops: Vec<ColorStop>,
    },
    RadialGradient {
        stops: Vec<ColorStop>,
    },
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        BackgroundSettings::Color(Color::rgb(0x11 as f32 / 255.0, 0x11 as f32 / 255.0, 0x11 as f32 / 255.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    Horizontal,
    Vertical,
    Diagonal,
    DiagonalReverse,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemSettings {
    /// Particles created at construction.
    pub initial_particles: usize,
    /// Placement set used only for the initial population.
    pub initial_spawn_positions: Vec<SpawnPosition>,
    /// Repaint the background every frame.
    pub clear_frame: bool,
    /// Frame-rate cap enforced by [`crate::FrameClock`].
    pub max_fps: f32,
    pub population: PopulationSettings,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            initial_particles: 100,
            initial_spawn_positions: vec![SpawnPosition::Random],
            clear_frame: true,
            max_fps: 144.0,
            population: PopulationSettings::default(),
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub system: SystemSettings,
    pub background: BackgroundSettings,
    pub particle: ParticleSettings,
    pub connection: ConnectionSettings,
    pub interaction: InteractionSettings,
    pub pointer: PointerSettings,
}

impl Settings {
    /// Check the caller contract once; the per-tick hot path assumes it.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.particle.behaviour.spawning.spawn_positions.is_empty() {
            return Err(SettingsError::NoSpawnPositions);
        }
        if self.system.initial_spawn_positions.is_empty() {
            return Err(SettingsError::NoSpawnPositions);
        }
        if self.particle.appearance.shapes.is_empty() {
            return Err(SettingsError::NoShapes);
        }
        self.particle.appearance.size.check("appearance.size")?;
        self.particle.behaviour.movement.speed.check("movement.speed")?;
        self.particle.behaviour.ttl.range.check("ttl.range")?;
        let fading = &self.particle.appearance.fading;
        if fading.enabled {
            if fading.fade_in_time <= 0.0 {
                return Err(SettingsError::NonPositiveFadeTime {
                    field: "fading.fade_in_time",
                    value: fading.fade_in_time,
                });
            }
            if fading.fade_out_time <= 0.0 {
                return Err(SettingsError::NonPositiveFadeTime {
                    field: "fading.fade_out_time",
                    value: fading.fade_out_time,
                });
            }
        }
        if self.interaction.enabled
            && self.interaction.repulsion.radius > self.interaction.attraction.radius
        {
            return Err(SettingsError::RadiusOrder {
                attraction: self.interaction.attraction.radius,
                repulsion: self.interaction.repulsion.radius,
            });
        }
        let pop = &self.system.population;
        if pop.min_particles > pop.max_particles {
            return Err(SettingsError::PopulationBounds {
                min: pop.min_particles,
                max: pop.max_particles,
            });
        }
        if self.system.max_fps <= 0.0 {
            return Err(SettingsError::NonPositiveMaxFps(self.system.max_fps));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_empty_spawn_positions_rejected() {
        let mut settings = Settings::default();
        settings.particle.behaviour.spawning.spawn_positions.clear();
        assert_eq!(settings.validate(), Err(SettingsError::NoSpawnPositions));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut settings = Settings::default();
        settings.particle.appearance.size = Span::new(6.0, 3.0);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvertedRange { field: "appearance.size", .. })
        ));
    }

    #[test]
    fn test_radius_order_rejected() {
        let mut settings = Settings::default();
        settings.interaction.repulsion.radius = 300.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::RadiusOrder { .. })
        ));

        // Invalid radii are tolerated when interactions are off.
        settings.interaction.enabled = false;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_fade_time_rejected() {
        let mut settings = Settings::default();
        settings.particle.appearance.fading.fade_in_time = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonPositiveFadeTime { .. })
        ));

        settings.particle.appearance.fading.enabled = false;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_round_trip_json() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }

    #[test]
    fn test_enum_wire_names() {
        let json = serde_json::to_string(&SpawnPosition::RandomEdge).unwrap();
        assert_eq!(json, "\"random-edge\"");
        let json = serde_json::to_string(&Direction::UpLeft).unwrap();
        assert_eq!(json, "\"up-left\"");
    }
}
