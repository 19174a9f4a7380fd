//! Inter-particle attraction and repulsion.
//!
//! Two concentric zones around every particle: inside the repulsion radius
//! pairs push apart, between the repulsion and attraction radii they pull
//! together, both with linear falloff. Forces are velocity deltas scaled by
//! the timestep and by both fade envelopes, applied equal and opposite, and
//! each unordered pair is touched exactly once per tick.

use crate::particle::Particle;
use crate::settings::{InteractionMode, InteractionSettings};
use crate::spatial::DistanceTable;

/// Pairs closer than this are skipped; the normal would be degenerate.
const MIN_FORCE_DISTANCE: f32 = 1.0;

pub(crate) fn apply_interactions(
    particles: &mut [Particle],
    distances: &DistanceTable,
    settings: &InteractionSettings,
    dt: f32,
) {
    if !settings.enabled {
        return;
    }
    let attract = matches!(
        settings.mode,
        InteractionMode::Attract | InteractionMode::Both
    );
    let repel = matches!(settings.mode, InteractionMode::Repel | InteractionMode::Both);

    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            if !particles[i].is_live() || !particles[j].is_live() {
                continue;
            }
            let dist_sq = distances.get(i, j);
            if dist_sq <= 0.0 {
                continue;
            }
            let distance = dist_sq.sqrt();
            if distance > settings.attraction.radius || distance < MIN_FORCE_DISTANCE {
                continue;
            }

            // Signed magnitude: positive pulls the pair together.
            let strength = if distance <= settings.repulsion.radius {
                if !repel {
                    continue;
                }
                -settings.repulsion.force * (1.0 - distance / settings.repulsion.radius)
            } else {
                if !attract {
                    continue;
                }
                let t = (distance - settings.repulsion.radius)
                    / (settings.attraction.radius - settings.repulsion.radius);
                settings.attraction.force * (1.0 - t)
            };

            let (head, tail) = particles.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);

            let normal = (b.position - a.position) / distance;
            // Fading particles push and pull proportionally less.
            let envelope = a.life * b.life;
            let delta = normal * strength * dt * envelope;

            a.velocity += delta;
            b.velocity -= delta;
            a.refresh_kinematics();
            b.refresh_kinematics();
        }
    }
}
