//! # Plexfield
//!
//! An animated 2D particle field with proximity connections, for decorative
//! interactive backgrounds.
//!
//! Particles spawn, drift, fade in and out, bounce off edges and each other,
//! attract and repel across two concentric force zones, and grow glowing
//! connection lines to their nearest neighbors. The engine is pure CPU state:
//! the host supplies a drawing surface through [`DrawSink`], pumps frames
//! through [`FrameClock`] and forwards pointer events to [`PointerSpawner`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use plexfield::prelude::*;
//!
//! let mut system = ParticleSystem::new(Settings::default(), Arena::new(800.0, 600.0))?;
//! let mut clock = FrameClock::new(system.settings().system.max_fps);
//! let mut pointer = PointerSpawner::new();
//!
//! loop {
//!     // from the host event loop:
//!     // pointer.on_press(cursor, &mut system);
//!     if let Some(dt) = clock.tick() {
//!         system.tick(dt);
//!         system.draw(&mut sink);
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! Every particle runs the lifecycle `restoring -> alive -> dying -> dead`,
//! then respawns in place or disappears. `life` in [0, 1] is the fade
//! envelope; it scales both rendering alpha and interaction strength.
//!
//! ### Connections
//!
//! Particles within the configured distance link up, nearest first, under a
//! per-particle connection cap. Edges fade with distance and with their
//! endpoints, and fade out before disappearing.
//!
//! ### Settings
//!
//! All behavior is driven by the [`Settings`] tree: serde-serializable,
//! hot-swappable between ticks, validated once via [`Settings::validate`].

mod arena;
mod connection;
mod draw;
mod error;
mod graph;
mod interactions;
mod particle;
mod settings;
mod simulation;
mod spatial;
mod spawn;
pub mod input;
pub mod time;
pub mod visuals;

pub use arena::Arena;
pub use connection::{Connection, ConnectionState};
pub use draw::{Color, ColorStop, DrawSink, FillStyle, LineCap, NullSink};
pub use error::SettingsError;
pub use glam::Vec2;
pub use graph::ConnectionGraph;
pub use input::PointerSpawner;
pub use particle::{Particle, ParticleId, ParticleState};
pub use settings::{
    AppearanceSettings, BackgroundSettings, BehaviourSettings, ConnectionAppearance,
    ConnectionFading, ConnectionSettings, Direction, FadingSettings, ForceSettings,
    GradientDirection, InteractionMode, InteractionSettings, MovementSettings, ParticleSettings,
    PointerSettings, PopulationSettings, Settings, ShadowSettings, Span, SpawnGrid, SpawnPosition,
    SpawningSettings, SystemSettings, TtlSettings,
};
pub use simulation::ParticleSystem;
pub use spawn::SpawnContext;
pub use time::FrameClock;
pub use visuals::{LineStyle, ParticleShape};

/// Convenience imports for hosts embedding the engine.
pub mod prelude {
    pub use crate::draw::{Color, DrawSink, NullSink};
    pub use crate::input::PointerSpawner;
    pub use crate::settings::Settings;
    pub use crate::simulation::ParticleSystem;
    pub use crate::time::FrameClock;
    pub use crate::visuals::{LineStyle, ParticleShape};
    pub use crate::Arena;
    pub use glam::Vec2;
}
