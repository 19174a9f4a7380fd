//! Pairwise proximity table.
//!
//! Rebuilt from scratch each tick: a dense symmetric matrix of squared
//! distances between live particles. Everything downstream (forces and
//! connection maintenance) works on squared distances and only takes the
//! square root when a true length is needed. At decorative population sizes
//! the O(n^2) rebuild is cheaper than maintaining an index.

use crate::particle::Particle;

#[derive(Debug, Default)]
pub struct DistanceTable {
    dist_sq: Vec<f32>,
    len: usize,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute all pairwise squared distances. Pairs involving a non-live
    /// particle are stored as zero and never surface from queries.
    pub fn rebuild(&mut self, particles: &[Particle]) {
        self.len = particles.len();
        self.dist_sq.clear();
        self.dist_sq.resize(self.len * self.len, 0.0);

        for i in 0..self.len {
            if !particles[i].is_live() {
                continue;
            }
            for j in (i + 1)..self.len {
                if !particles[j].is_live() {
                    continue;
                }
                let d = particles[i].position.distance_squared(particles[j].position);
                self.dist_sq[i * self.len + j] = d;
                self.dist_sq[j * self.len + i] = d;
            }
        }
    }

    /// Squared distance between particles `i` and `j`; zero when either was
    /// not live at rebuild time.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.dist_sq[i * self.len + j]
    }

    /// Indices within `max_dist_sq` of particle `i`, nearest first.
    /// Excludes `i` itself and zero-distance (non-live) entries.
    pub fn neighbors_within(&self, i: usize, max_dist_sq: f32) -> Vec<usize> {
        let row = &self.dist_sq[i * self.len..(i + 1) * self.len];
        let mut hits: Vec<usize> = (0..self.len)
            .filter(|&j| j != i && row[j] > 0.0 && row[j] <= max_dist_sq)
            .collect();
        hits.sort_by(|&a, &b| row[a].total_cmp(&row[b]));
        hits
    }
}
