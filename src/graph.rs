//! Connection graph maintenance.
//!
//! Each tick runs two passes over the edge set. The prune pass drops edges
//! whose endpoints no longer exist, updates the rest and drops those that
//! finished fading out. The creation pass then walks every live particle
//! with spare degree and greedily connects it to its nearest in-range
//! neighbors, nearest first. Degree accounting covers both endpoints, so
//! the per-particle cap holds for the whole pass.

use std::collections::{HashMap, HashSet};

use crate::connection::{Connection, ConnectionState};
use crate::particle::{Particle, ParticleId};
use crate::settings::ConnectionSettings;
use crate::spatial::DistanceTable;

#[derive(Debug, Default)]
pub struct ConnectionGraph {
    connections: Vec<Connection>,
}

#[inline]
fn pair_key(a: ParticleId, b: ParticleId) -> (ParticleId, ParticleId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl ConnectionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub(crate) fn update(
        &mut self,
        particles: &[Particle],
        distances: &DistanceTable,
        settings: &ConnectionSettings,
        dt: f32,
    ) {
        if !settings.enabled {
            self.connections.clear();
            return;
        }

        let index_of: HashMap<ParticleId, usize> = particles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id(), i))
            .collect();

        self.connections.retain_mut(|connection| {
            let (i, j) = match (
                index_of.get(&connection.start),
                index_of.get(&connection.end),
            ) {
                (Some(&i), Some(&j)) => (i, j),
                _ => return false,
            };
            let dist_sq = distances.get(i, j);
            // Zero means an endpoint went dead under us.
            if dist_sq <= 0.0 {
                return false;
            }
            connection.update(settings, dist_sq, &particles[i], &particles[j], dt);
            connection.state != ConnectionState::Destroyed
        });

        let mut degree: HashMap<ParticleId, usize> = HashMap::new();
        let mut linked: HashSet<(ParticleId, ParticleId)> = HashSet::new();
        for connection in &self.connections {
            *degree.entry(connection.start).or_insert(0) += 1;
            *degree.entry(connection.end).or_insert(0) += 1;
            linked.insert(pair_key(connection.start, connection.end));
        }

        for (i, a) in particles.iter().enumerate() {
            if !a.is_live() {
                continue;
            }
            let mut missing = settings
                .max_connections
                .saturating_sub(degree.get(&a.id()).copied().unwrap_or(0));
            if missing == 0 {
                continue;
            }

            for j in distances.neighbors_within(i, settings.distance_sq()) {
                let b = &particles[j];
                if !b.is_live() {
                    continue;
                }
                if degree.get(&b.id()).copied().unwrap_or(0) >= settings.max_connections {
                    continue;
                }
                let key = pair_key(a.id(), b.id());
                if !linked.insert(key) {
                    continue;
                }

                self.connections
                    .push(Connection::new(a.id(), b.id(), distances.get(i, j), settings));
                *degree.entry(a.id()).or_insert(0) += 1;
                *degree.entry(b.id()).or_insert(0) += 1;

                missing -= 1;
                if missing == 0 {
                    break;
                }
            }
        }
    }
}
