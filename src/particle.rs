//! Particle entity: lifecycle state machine, kinematics, collision response.
//!
//! A particle moves through `restoring -> alive -> dying -> dead`, then either
//! respawns in place or becomes `destroyed` and is pruned by the system. A
//! forced removal goes `destroying -> destroyed` from any live state. `life`
//! in [0, 1] is the fade envelope the renderer multiplies into alpha.

use std::f32::consts::PI;

use glam::Vec2;

use crate::arena::Arena;
use crate::settings::{Direction, ParticleSettings, SpawnPosition};
use crate::spawn::SpawnContext;
use crate::visuals::ParticleShape;

/// Stable particle identity, unique for the lifetime of a system.
///
/// Connections key their endpoints by id rather than by index so that
/// pruning the particle vec never silently rebinds an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub(crate) u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleState {
    /// Fading in after spawn.
    Restoring,
    Alive,
    /// Fading out after TTL expiry or leaving the arena.
    Dying,
    /// Fully faded; respawns or becomes destroyed on the next update.
    Dead,
    /// Forced removal in progress, fading out.
    Destroying,
    /// Terminal; the system prunes these at the end of the tick.
    Destroyed,
}

#[derive(Clone, Debug)]
pub struct Particle {
    id: ParticleId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    /// Scalar speed in units per second; kept equal to `velocity.length()`.
    pub speed: f32,
    /// Stored heading in radians, used when the direction policy is `Random`.
    pub direction: f32,
    /// Lifespan in seconds drawn at spawn.
    pub ttl: f32,
    /// Fade envelope in [0, 1].
    pub life: f32,
    pub state: ParticleState,
    pub shape: ParticleShape,
    pub glyph: char,
    pub(crate) spawned_at: f32,
    pub(crate) died_at: Option<f32>,
    time_lived: f32,
}

impl Particle {
    /// Create a particle with freshly rolled attributes.
    pub(crate) fn spawn(
        id: ParticleId,
        settings: &ParticleSettings,
        positions: &[SpawnPosition],
        arena: &Arena,
        ctx: &mut SpawnContext,
        now: f32,
    ) -> Self {
        let mut particle = Self {
            id,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            size: 0.0,
            speed: 0.0,
            direction: 0.0,
            ttl: 0.0,
            life: 0.0,
            state: ParticleState::Restoring,
            shape: ParticleShape::Circle,
            glyph: 'A',
            spawned_at: now,
            died_at: None,
            time_lived: 0.0,
        };
        particle.reinit(settings, positions, arena, ctx, now);
        particle
    }

    /// Reroll all spawn attributes in place. Used both at creation and when a
    /// dead particle respawns; identity is kept.
    fn reinit(
        &mut self,
        settings: &ParticleSettings,
        positions: &[SpawnPosition],
        arena: &Arena,
        ctx: &mut SpawnContext,
        now: f32,
    ) {
        self.state = ParticleState::Restoring;
        self.spawned_at = now;
        self.died_at = None;
        self.time_lived = 0.0;
        self.life = 0.0;

        self.position = ctx.spawn_position(&settings.behaviour.spawning, positions, arena);
        self.size = ctx.range(settings.appearance.size);
        self.speed = ctx.range(settings.behaviour.movement.speed);
        self.direction = ctx.angle();
        self.ttl = ctx.range(settings.behaviour.ttl.range);
        self.shape = *ctx.pick(&settings.appearance.shapes);
        self.glyph = ctx.glyph();
        self.velocity = self.speed * Vec2::new(self.direction.cos(), self.direction.sin());
    }

    #[inline]
    pub fn id(&self) -> ParticleId {
        self.id
    }

    /// Participates in distances, forces and connections.
    #[inline]
    pub fn is_live(&self) -> bool {
        !matches!(self.state, ParticleState::Dead | ParticleState::Destroyed)
    }

    /// Not on the way out; counted against the population maximum.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            ParticleState::Destroying | ParticleState::Destroyed
        )
    }

    /// Force this particle onto the destroying path. It fades out and is
    /// pruned once fully faded; respawn does not apply.
    pub fn begin_destroying(&mut self, now: f32) {
        if self.state == ParticleState::Destroyed {
            return;
        }
        self.state = ParticleState::Destroying;
        self.died_at = Some(now);
    }

    /// Advance the lifecycle and, when moving, integrate one step.
    ///
    /// Returns whether the particle moved this tick; the caller follows up
    /// with collision and edge-bounce resolution only in that case.
    pub(crate) fn update(
        &mut self,
        settings: &ParticleSettings,
        arena: &Arena,
        ctx: &mut SpawnContext,
        now: f32,
        dt: f32,
    ) -> bool {
        if self.state == ParticleState::Destroyed {
            return false;
        }
        self.time_lived = now - self.spawned_at;

        if self.state == ParticleState::Alive {
            if settings.behaviour.ttl.enabled && self.ttl < self.time_lived {
                self.died_at = Some(now);
                self.state = ParticleState::Dying;
            }
            // Off-screen culling only applies without edge bouncing; the
            // margin mirrors the spawn offset so edge-spawned particles get
            // to enter the arena first.
            if !settings.behaviour.bounce_off_edges {
                let offset = settings.behaviour.spawning.offset;
                let margin = Vec2::splat(self.size) - offset;
                if !arena.contains_with_margin(self.position, margin) {
                    self.died_at = Some(now);
                    self.state = ParticleState::Dying;
                }
            }
        }

        let fading = settings.appearance.fading;
        if !fading.enabled {
            if self.state == ParticleState::Restoring && self.life < 1.0 {
                self.life = 1.0;
            }
            if matches!(
                self.state,
                ParticleState::Dying | ParticleState::Destroying
            ) && self.life > 0.0
            {
                self.life = 0.0;
            }
        } else {
            if self.state == ParticleState::Restoring && self.life < 1.0 {
                self.life = (self.time_lived / fading.fade_in_time).min(1.0);
            }
            if matches!(
                self.state,
                ParticleState::Dying | ParticleState::Destroying
            ) && self.life > 0.0
            {
                if let Some(died_at) = self.died_at {
                    self.life = (1.0 - (now - died_at) / fading.fade_out_time).max(0.0);
                }
            }
        }

        if self.state == ParticleState::Dying && self.life <= 0.0 {
            self.state = ParticleState::Dead;
        }
        if self.state == ParticleState::Destroying && self.life <= 0.0 {
            self.state = ParticleState::Destroyed;
            return false;
        }
        if self.state == ParticleState::Restoring && self.life >= 1.0 {
            self.state = ParticleState::Alive;
        }

        if self.state == ParticleState::Dead {
            if settings.behaviour.spawning.respawn {
                self.reinit(
                    settings,
                    &settings.behaviour.spawning.spawn_positions,
                    arena,
                    ctx,
                    now,
                );
            } else {
                self.state = ParticleState::Destroyed;
            }
            return false;
        }

        if !settings.behaviour.movement.enabled {
            return false;
        }
        let dir = self.heading(settings, arena, ctx);
        self.velocity = self.speed * Vec2::new(dir.cos(), dir.sin());
        self.position += self.velocity * dt;
        true
    }

    /// Resolve the per-tick heading from the direction policy.
    fn heading(&self, settings: &ParticleSettings, arena: &Arena, ctx: &mut SpawnContext) -> f32 {
        match settings.behaviour.movement.direction {
            Direction::Random => self.direction,
            Direction::Up => -PI / 2.0,
            Direction::Down => PI / 2.0,
            Direction::Left => PI,
            Direction::Right => 0.0,
            Direction::UpLeft => -PI * 3.0 / 4.0,
            Direction::UpRight => -PI / 4.0,
            Direction::DownLeft => PI * 3.0 / 4.0,
            Direction::DownRight => PI / 4.0,
            Direction::Center => {
                let to_center = arena.center() - self.position;
                to_center.y.atan2(to_center.x)
            }
            Direction::Edge => {
                let from_center = self.position - arena.center();
                from_center.y.atan2(from_center.x)
            }
            Direction::Corner => {
                let offset = settings.behaviour.spawning.offset;
                let reach = Vec2::splat(self.size) - offset;
                let corners = [
                    -reach,
                    Vec2::new(arena.width + reach.x, -reach.y),
                    Vec2::new(-reach.x, arena.height + reach.y),
                    Vec2::new(arena.width, arena.height) + reach,
                ];
                let mut nearest = corners[0];
                for corner in &corners[1..] {
                    if corner.distance_squared(self.position)
                        < nearest.distance_squared(self.position)
                    {
                        nearest = *corner;
                    }
                }
                let to_corner = nearest - self.position;
                to_corner.y.atan2(to_corner.x)
            }
            Direction::Jitter => ctx.angle(),
        }
    }

    /// Clamp to the arena and reflect velocity off any crossed edge.
    /// Post-bounce speed is renormalized to the pre-bounce speed.
    pub(crate) fn resolve_edge_bounce(&mut self, arena: &Arena) {
        let original_speed = self.velocity.length();
        let mut bounced = false;

        if self.position.x <= 0.0 {
            self.position.x = 0.0;
            self.velocity.x = self.velocity.x.abs();
            bounced = true;
        } else if self.position.x >= arena.width {
            self.position.x = arena.width;
            self.velocity.x = -self.velocity.x.abs();
            bounced = true;
        }
        if self.position.y <= 0.0 {
            self.position.y = 0.0;
            self.velocity.y = self.velocity.y.abs();
            bounced = true;
        } else if self.position.y >= arena.height {
            self.position.y = arena.height;
            self.velocity.y = -self.velocity.y.abs();
            bounced = true;
        }

        if bounced {
            let current = self.velocity.length();
            if current > 0.0 {
                self.velocity *= original_speed / current;
            }
            self.direction = self.velocity.y.atan2(self.velocity.x);
            self.speed = original_speed;
        }
    }

    /// Re-derive the scalar speed and heading from the velocity vector,
    /// after something other than plain integration changed it.
    pub(crate) fn refresh_kinematics(&mut self) {
        self.speed = self.velocity.length();
        self.direction = self.velocity.y.atan2(self.velocity.x);
    }
}

/// Resolve collisions between particle `i` and every other particle.
pub(crate) fn resolve_particle_collisions(particles: &mut [Particle], i: usize) {
    for j in 0..particles.len() {
        if i == j {
            continue;
        }
        let (a, b) = if i < j {
            let (head, tail) = particles.split_at_mut(j);
            (&mut head[i], &mut tail[0])
        } else {
            let (head, tail) = particles.split_at_mut(i);
            (&mut tail[0], &mut head[j])
        };
        resolve_pair_collision(a, b);
    }
}

/// Elastic collision between two overlapping particles: positional
/// separation plus an equal-mass impulse, with each particle's speed
/// renormalized to its pre-impulse value.
fn resolve_pair_collision(a: &mut Particle, b: &mut Particle) {
    if !a.is_live() || !b.is_live() {
        return;
    }
    let delta = a.position - b.position;
    let distance = delta.length();
    let min_distance = a.size + b.size;
    if distance >= min_distance || distance == 0.0 {
        return;
    }
    let normal = delta / distance;

    let separation = (min_distance - distance) / 2.0;
    a.position += normal * separation;
    b.position -= normal * separation;

    let relative = a.velocity - b.velocity;
    let along_normal = relative.dot(normal);
    // Already separating.
    if along_normal > 0.0 {
        return;
    }

    let speed_a = a.velocity.length();
    let speed_b = b.velocity.length();

    // Restitution 1, equal masses: half the closing speed each way.
    let impulse = -along_normal;
    a.velocity += impulse * normal;
    b.velocity -= impulse * normal;

    let new_a = a.velocity.length();
    if new_a > 0.0 {
        a.velocity *= speed_a / new_a;
    }
    let new_b = b.velocity.length();
    if new_b > 0.0 {
        b.velocity *= speed_b / new_b;
    }

    a.direction = a.velocity.y.atan2(a.velocity.x);
    b.direction = b.velocity.y.atan2(b.velocity.x);
    a.speed = speed_a;
    b.speed = speed_b;
}
