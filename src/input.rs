//! Pointer-driven spawning.
//!
//! Translates host pointer events (press, drag, release) into spawn requests
//! on the particle system. The host forwards events in canvas-local
//! coordinates; this module handles the press/drag state and the drag rate
//! limit, and the system's bounded queue absorbs the rest.
//!
//! # Example
//!
//! ```ignore
//! let mut pointer = PointerSpawner::new();
//! // from the host event loop:
//! pointer.on_press(cursor, &mut system);
//! pointer.on_move(cursor, &mut system);
//! pointer.on_release();
//! ```

use glam::Vec2;

use crate::simulation::ParticleSystem;

#[derive(Debug, Default)]
pub struct PointerSpawner {
    pressed: bool,
    last_spawn: Option<f32>,
}

impl PointerSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed at `position`: spawn a burst and start a drag.
    pub fn on_press(&mut self, position: Vec2, system: &mut ParticleSystem) {
        let settings = system.settings().pointer;
        if !settings.enabled {
            return;
        }
        self.pressed = true;
        system.queue_spawn_at(position, settings.amount);
        self.last_spawn = Some(system.now());
    }

    /// Pointer moved while possibly dragging: spawn at most once per
    /// configured delay.
    pub fn on_move(&mut self, position: Vec2, system: &mut ParticleSystem) {
        let settings = system.settings().pointer;
        if !settings.enabled || !settings.continuous || !self.pressed {
            return;
        }
        let now = system.now();
        if let Some(last) = self.last_spawn {
            if now - last < settings.delay {
                return;
            }
        }
        system.queue_spawn_at(position, settings.amount);
        self.last_spawn = Some(now);
    }

    /// Pointer released or left the surface: end the drag.
    pub fn on_release(&mut self) {
        self.pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::Arena;

    fn empty_system() -> ParticleSystem {
        let mut settings = Settings::default();
        settings.system.initial_particles = 0;
        settings.system.population.auto_spawn = false;
        settings.system.population.min_particles = 0;
        ParticleSystem::new_seeded(settings, Arena::new(800.0, 600.0), 1).unwrap()
    }

    #[test]
    fn test_press_spawns_burst() {
        let mut system = empty_system();
        let mut pointer = PointerSpawner::new();

        pointer.on_press(Vec2::new(100.0, 100.0), &mut system);
        system.tick(0.01);
        assert_eq!(system.particle_count(), 5);
    }

    #[test]
    fn test_drag_is_rate_limited() {
        let mut system = empty_system();
        let mut pointer = PointerSpawner::new();

        pointer.on_press(Vec2::new(100.0, 100.0), &mut system);
        system.tick(0.01);

        // Too soon after the press: delay is 0.04s.
        pointer.on_move(Vec2::new(110.0, 100.0), &mut system);
        system.tick(0.05);
        assert_eq!(system.particle_count(), 5);

        // Past the delay: another burst.
        pointer.on_move(Vec2::new(120.0, 100.0), &mut system);
        system.tick(0.01);
        assert_eq!(system.particle_count(), 10);
    }

    #[test]
    fn test_release_stops_drag_spawning() {
        let mut system = empty_system();
        let mut pointer = PointerSpawner::new();

        pointer.on_press(Vec2::new(100.0, 100.0), &mut system);
        system.tick(0.01);
        pointer.on_release();

        system.tick(1.0);
        pointer.on_move(Vec2::new(200.0, 200.0), &mut system);
        system.tick(0.01);
        assert_eq!(system.particle_count(), 5);
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let mut system = empty_system();
        let mut pointer = PointerSpawner::new();

        pointer.on_move(Vec2::new(100.0, 100.0), &mut system);
        system.tick(0.01);
        assert_eq!(system.particle_count(), 0);
    }

    #[test]
    fn test_disabled_pointer_ignored() {
        let mut settings = Settings::default();
        settings.system.initial_particles = 0;
        settings.system.population.auto_spawn = false;
        settings.system.population.min_particles = 0;
        settings.pointer.enabled = false;
        let mut system =
            ParticleSystem::new_seeded(settings, Arena::new(800.0, 600.0), 1).unwrap();
        let mut pointer = PointerSpawner::new();

        pointer.on_press(Vec2::new(100.0, 100.0), &mut system);
        system.tick(0.01);
        assert_eq!(system.particle_count(), 0);
    }

    #[test]
    fn test_non_continuous_drag_spawns_once() {
        let mut settings = Settings::default();
        settings.system.initial_particles = 0;
        settings.system.population.auto_spawn = false;
        settings.system.population.min_particles = 0;
        settings.pointer.continuous = false;
        let mut system =
            ParticleSystem::new_seeded(settings, Arena::new(800.0, 600.0), 1).unwrap();
        let mut pointer = PointerSpawner::new();

        pointer.on_press(Vec2::new(100.0, 100.0), &mut system);
        system.tick(1.0);
        pointer.on_move(Vec2::new(200.0, 200.0), &mut system);
        system.tick(0.01);
        assert_eq!(system.particle_count(), 5);
    }
}
