//! The particle system orchestrator.
//!
//! Owns the particle vec, the connection graph, the proximity table and the
//! spawn machinery, and sequences one simulation step per [`ParticleSystem::tick`]:
//!
//! 1. drain queued spawn requests
//! 2. population control, on its own slower cadence
//! 3. rebuild the proximity table
//! 4. inter-particle forces
//! 5. per-particle lifecycle + movement, with collision and edge-bounce
//!    resolution for particles that moved
//! 6. prune destroyed particles, rebuild the table
//! 7. connection graph maintenance
//!
//! Rendering is a separate, read-only pass over the same state via
//! [`ParticleSystem::draw`].
//!
//! # Example
//!
//! ```ignore
//! let mut system = ParticleSystem::new(Settings::default(), Arena::new(800.0, 600.0))?;
//! loop {
//!     if let Some(dt) = clock.tick() {
//!         system.tick(dt);
//!         system.draw(&mut sink);
//!     }
//! }
//! ```

use std::collections::{HashMap, VecDeque};

use glam::Vec2;

use crate::arena::Arena;
use crate::draw::DrawSink;
use crate::error::SettingsError;
use crate::graph::ConnectionGraph;
use crate::interactions::apply_interactions;
use crate::particle::{resolve_particle_collisions, Particle, ParticleId, ParticleState};
use crate::settings::Settings;
use crate::spatial::DistanceTable;
use crate::spawn::SpawnContext;
use crate::visuals;

/// Spawn requests beyond this are dropped until the queue drains.
const MAX_QUEUED_SPAWNS: usize = 256;

/// One queued particle spawn, drained at the start of the next tick.
#[derive(Clone, Copy, Debug)]
struct SpawnRequest {
    /// Overrides the placement strategy when set.
    position: Option<Vec2>,
}

pub struct ParticleSystem {
    settings: Settings,
    arena: Arena,
    particles: Vec<Particle>,
    graph: ConnectionGraph,
    distances: DistanceTable,
    ctx: SpawnContext,
    spawn_queue: VecDeque<SpawnRequest>,
    next_id: u64,
    /// Accumulated simulation time in seconds.
    now: f32,
    adjust_timer: f32,
}

impl ParticleSystem {
    /// Validate the settings and spawn the initial population.
    pub fn new(settings: Settings, arena: Arena) -> Result<Self, SettingsError> {
        Self::with_context(settings, arena, SpawnContext::new())
    }

    /// Like [`ParticleSystem::new`] with a fixed RNG seed, for reproducible runs.
    pub fn new_seeded(settings: Settings, arena: Arena, seed: u64) -> Result<Self, SettingsError> {
        Self::with_context(settings, arena, SpawnContext::from_seed(seed))
    }

    fn with_context(
        settings: Settings,
        arena: Arena,
        ctx: SpawnContext,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let mut system = Self {
            settings,
            arena,
            particles: Vec::new(),
            graph: ConnectionGraph::new(),
            distances: DistanceTable::new(),
            ctx,
            spawn_queue: VecDeque::new(),
            next_id: 0,
            now: 0.0,
            adjust_timer: 0.0,
        };
        for _ in 0..system.settings.system.initial_particles {
            system.spawn_initial();
        }
        system.distances.rebuild(&system.particles);
        Ok(system)
    }

    /// Swap in a new configuration. The running population is kept; it
    /// converges to the new settings through the regular lifecycle.
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    /// Adopt a new surface extent, e.g. after a window resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena = Arena::new(width, height);
    }

    /// Accumulated simulation time in seconds.
    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn live_particle_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_live()).count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.len()
    }

    /// Queue `amount` spawns using the configured placement strategy.
    pub fn queue_spawn(&mut self, amount: u32) {
        self.enqueue(None, amount);
    }

    /// Queue `amount` spawns at a fixed position (pointer spawning).
    pub fn queue_spawn_at(&mut self, position: Vec2, amount: u32) {
        self.enqueue(Some(position), amount);
    }

    fn enqueue(&mut self, position: Option<Vec2>, amount: u32) {
        for _ in 0..amount {
            if self.spawn_queue.len() >= MAX_QUEUED_SPAWNS {
                return;
            }
            self.spawn_queue.push_back(SpawnRequest { position });
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.now += dt;

        while let Some(request) = self.spawn_queue.pop_front() {
            self.spawn_particle(request.position);
        }

        self.adjust_timer += dt;
        if self.adjust_timer >= self.settings.system.population.adjustment_interval {
            self.adjust_timer = 0.0;
            self.adjust_population();
        }

        self.distances.rebuild(&self.particles);
        apply_interactions(
            &mut self.particles,
            &self.distances,
            &self.settings.interaction,
            dt,
        );

        let now = self.now;
        let ParticleSystem {
            ref settings,
            ref arena,
            ref mut particles,
            ref mut ctx,
            ..
        } = *self;
        let behaviour = &settings.particle.behaviour;
        for i in 0..particles.len() {
            let moved = particles[i].update(&settings.particle, arena, ctx, now, dt);
            if moved {
                if behaviour.bounce_off_particles {
                    resolve_particle_collisions(particles, i);
                }
                if behaviour.bounce_off_edges {
                    particles[i].resolve_edge_bounce(arena);
                }
            }
        }

        self.particles
            .retain(|p| p.state != ParticleState::Destroyed);
        self.distances.rebuild(&self.particles);
        self.graph
            .update(&self.particles, &self.distances, &self.settings.connection, dt);
    }

    /// Render the current state: background, then connections, then particles.
    pub fn draw(&self, sink: &mut dyn DrawSink) {
        if self.settings.system.clear_frame {
            visuals::paint_background(sink, &self.settings.background, &self.arena);
        }

        if self.settings.connection.enabled && !self.graph.is_empty() {
            let position_of: HashMap<ParticleId, Vec2> = self
                .particles
                .iter()
                .map(|p| (p.id(), p.position))
                .collect();
            for connection in self.graph.connections() {
                if let (Some(&start), Some(&end)) = (
                    position_of.get(&connection.start),
                    position_of.get(&connection.end),
                ) {
                    visuals::draw_connection(
                        sink,
                        start,
                        end,
                        connection.life,
                        &self.settings.connection.appearance,
                    );
                }
            }
        }

        for particle in &self.particles {
            visuals::draw_particle(
                sink,
                particle.position,
                particle.size,
                particle.life,
                particle.shape,
                particle.glyph,
                &self.settings.particle.appearance,
            );
        }
    }

    fn next_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    fn spawn_initial(&mut self) {
        let id = self.next_id();
        let particle = Particle::spawn(
            id,
            &self.settings.particle,
            &self.settings.system.initial_spawn_positions,
            &self.arena,
            &mut self.ctx,
            self.now,
        );
        self.particles.push(particle);
    }

    fn spawn_particle(&mut self, position: Option<Vec2>) {
        let id = self.next_id();
        let mut particle = Particle::spawn(
            id,
            &self.settings.particle,
            &self.settings.particle.behaviour.spawning.spawn_positions,
            &self.arena,
            &mut self.ctx,
            self.now,
        );
        if let Some(position) = position {
            particle.position = position;
        }
        self.particles.push(particle);
    }

    /// Top the population up to the minimum and force excess particles onto
    /// the destroying path. Culling only applies when removed particles can
    /// come back (respawn) or would never leave on their own (no TTL and no
    /// off-screen death).
    fn adjust_population(&mut self) {
        let population = self.settings.system.population;

        if population.auto_spawn {
            let deficit = population.min_particles.saturating_sub(self.particles.len());
            for _ in 0..deficit {
                self.spawn_particle(None);
            }
        }

        let behaviour = &self.settings.particle.behaviour;
        let may_destroy = behaviour.spawning.respawn
            || (!behaviour.ttl.enabled && !behaviour.bounce_off_edges);
        if population.auto_destroy && may_destroy {
            let excess = self
                .particles
                .iter()
                .filter(|p| !p.is_terminal())
                .count()
                .saturating_sub(population.max_particles);
            let now = self.now;
            for _ in 0..excess {
                if self.particles.is_empty() {
                    break;
                }
                let i = self.ctx.index(self.particles.len());
                self.particles[i].begin_destroying(now);
            }
        }
    }
}
