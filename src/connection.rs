//! A single proximity connection between two particles.
//!
//! Connections have their own small lifecycle: `alive` while both endpoints
//! are close and live, `destroying` while fading out (over-distance or a
//! lost endpoint), `destroyed` once fully faded, at which point the graph
//! drops them. Distance math stays in squared units.

use crate::particle::{Particle, ParticleId, ParticleState};
use crate::settings::ConnectionSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Alive,
    /// Fading out; removed once life reaches zero.
    Destroying,
    Destroyed,
}

#[derive(Clone, Debug)]
pub struct Connection {
    pub start: ParticleId,
    pub end: ParticleId,
    /// Squared distance between the endpoints, refreshed each tick.
    pub(crate) dist_sq: f32,
    /// Fade envelope in [0, 1], eased toward the distance/endpoint target.
    pub life: f32,
    pub state: ConnectionState,
}

impl Connection {
    pub(crate) fn new(
        start: ParticleId,
        end: ParticleId,
        dist_sq: f32,
        settings: &ConnectionSettings,
    ) -> Self {
        Self {
            start,
            end,
            dist_sq,
            life: if settings.appearance.fading.enabled {
                0.0
            } else {
                1.0
            },
            state: ConnectionState::Alive,
        }
    }

    /// Whether this connection has `id` as an endpoint.
    #[inline]
    pub fn links(&self, id: ParticleId) -> bool {
        self.start == id || self.end == id
    }

    /// The life this connection is easing toward: limited by how close the
    /// pair is to the maximum distance and by the weaker endpoint's fade.
    fn target_life(&self, settings: &ConnectionSettings, start: &Particle, end: &Particle) -> f32 {
        let fading = settings.appearance.fading;
        let max_sq = settings.distance_sq();

        let fade_distance = self.dist_sq - max_sq * fading.distance_threshold;
        let fade_band = max_sq * (1.0 - fading.distance_threshold);
        let distance_life = if fade_distance > 0.0 {
            if fade_band > 0.0 {
                (1.0 - fade_distance / fade_band).max(0.0)
            } else {
                0.0
            }
        } else {
            1.0
        };

        let life = distance_life.min(start.life.min(end.life));
        if fading.enabled {
            life
        } else {
            life.ceil()
        }
    }

    pub(crate) fn update(
        &mut self,
        settings: &ConnectionSettings,
        dist_sq: f32,
        start: &Particle,
        end: &Particle,
        dt: f32,
    ) {
        if self.state == ConnectionState::Destroyed {
            return;
        }
        self.dist_sq = dist_sq;

        if self.state != ConnectionState::Destroying {
            if self.dist_sq > settings.distance_sq() {
                self.state = ConnectionState::Destroying;
                return;
            }
            if matches!(
                start.state,
                ParticleState::Dead | ParticleState::Destroyed
            ) || matches!(end.state, ParticleState::Dead | ParticleState::Destroyed)
            {
                self.state = ConnectionState::Destroying;
                return;
            }
        }

        if self.state == ConnectionState::Destroying && self.life <= 0.0 {
            self.state = ConnectionState::Destroyed;
            return;
        }

        let target = self.target_life(settings, start, end);
        let fading = settings.appearance.fading;
        if fading.enabled {
            if self.life < target {
                self.life = (self.life + dt * fading.speed).min(target);
            } else if self.life > target {
                self.life = (self.life - dt * fading.speed).max(target);
            }
        } else {
            self.life = target;
        }
    }
}
