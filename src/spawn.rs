//! Spawn context for particle initialization.
//!
//! Bundles the RNG with helpers for the random attributes a new particle
//! draws: position (via the configured placement strategy), size, speed,
//! heading, lifespan, shape and glyph.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::arena::Arena;
use crate::settings::{Span, SpawnPosition, SpawningSettings};

const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Randomness source for spawning, owned by the particle system.
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context seeded from the current time. Different each run.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::from_seed(seed)
    }

    /// Create a context with a fixed seed, for reproducible sequences.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 in [0, 1).
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Random value within an inclusive span.
    #[inline]
    pub fn range(&mut self, span: Span) -> f32 {
        span.lerp(self.random())
    }

    /// Random heading in [0, 2π).
    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    /// Random index below `len`. `len` must be nonzero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Random alphanumeric character.
    pub fn glyph(&mut self) -> char {
        GLYPHS[self.index(GLYPHS.len())] as char
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }

    /// Resolve a spawn point from the placement strategy.
    ///
    /// `positions` is the candidate list to pick from; callers pass either
    /// the regular spawning list or the initial-population override. Settings
    /// validation guarantees it is non-empty.
    pub fn spawn_position(
        &mut self,
        spawning: &SpawningSettings,
        positions: &[SpawnPosition],
        arena: &Arena,
    ) -> Vec2 {
        let position = *self.pick(positions);
        let offset = spawning.offset;
        let (w, h) = (arena.width, arena.height);

        // A positive grid count snaps that axis of area-filling placements
        // to random cell centers.
        let grid_x = if spawning.grid.columns > 0 {
            let cell = (w - 2.0 * offset.x) / spawning.grid.columns as f32;
            let column = self.index(spawning.grid.columns as usize) as f32;
            Some(offset.x + column * cell + cell / 2.0)
        } else {
            None
        };
        let grid_y = if spawning.grid.rows > 0 {
            let cell = (h - 2.0 * offset.y) / spawning.grid.rows as f32;
            let row = self.index(spawning.grid.rows as usize) as f32;
            Some(offset.y + row * cell + cell / 2.0)
        } else {
            None
        };

        match position {
            SpawnPosition::Random => {
                let x = match grid_x {
                    Some(gx) => gx,
                    None => self.random() * w + self.signed(offset.x),
                };
                let y = match grid_y {
                    Some(gy) => gy,
                    None => self.random() * h + self.signed(offset.y),
                };
                Vec2::new(x, y)
            }
            SpawnPosition::Center => Vec2::new(
                w / 2.0 + self.random() * self.signed(offset.x),
                h / 2.0 + self.random() * self.signed(offset.y),
            ),
            SpawnPosition::TopLeft => Vec2::new(offset.x, offset.y),
            SpawnPosition::TopRight => Vec2::new(w - offset.x, offset.y),
            SpawnPosition::BottomLeft => Vec2::new(offset.x, h - offset.y),
            SpawnPosition::BottomRight => Vec2::new(w - offset.x, h - offset.y),
            SpawnPosition::Top => Vec2::new(w / 2.0, offset.y),
            SpawnPosition::Bottom => Vec2::new(w / 2.0, h - offset.y),
            SpawnPosition::Left => Vec2::new(offset.x, h / 2.0),
            SpawnPosition::Right => Vec2::new(w - offset.x, h / 2.0),
            SpawnPosition::TopEdge => {
                let x = match grid_x {
                    Some(gx) => gx,
                    None => self.random() * w,
                };
                Vec2::new(x, offset.y)
            }
            SpawnPosition::BottomEdge => {
                let x = match grid_x {
                    Some(gx) => gx,
                    None => self.random() * w,
                };
                Vec2::new(x, h - offset.y)
            }
            SpawnPosition::LeftEdge => {
                let y = match grid_y {
                    Some(gy) => gy,
                    None => self.random() * h,
                };
                Vec2::new(offset.x, y)
            }
            SpawnPosition::RightEdge => {
                let y = match grid_y {
                    Some(gy) => gy,
                    None => self.random() * h,
                };
                Vec2::new(w - offset.x, y)
            }
            SpawnPosition::RandomEdge => {
                let edge = [
                    SpawnPosition::TopEdge,
                    SpawnPosition::BottomEdge,
                    SpawnPosition::LeftEdge,
                    SpawnPosition::RightEdge,
                ][self.index(4)];
                self.spawn_position(spawning, &[edge], arena)
            }
            SpawnPosition::RandomCorner => {
                let corner = [
                    SpawnPosition::TopLeft,
                    SpawnPosition::TopRight,
                    SpawnPosition::BottomLeft,
                    SpawnPosition::BottomRight,
                ][self.index(4)];
                self.spawn_position(spawning, &[corner], arena)
            }
        }
    }

    /// The given magnitude with a random sign.
    fn signed(&mut self, value: f32) -> f32 {
        if self.random() < 0.5 {
            value
        } else {
            -value
        }
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawning() -> SpawningSettings {
        SpawningSettings {
            offset: Vec2::ZERO,
            ..SpawningSettings::default()
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let mut a = SpawnContext::from_seed(7);
        let mut b = SpawnContext::from_seed(7);
        for _ in 0..32 {
            assert_eq!(a.random(), b.random());
        }
    }

    #[test]
    fn test_range_stays_within_span() {
        let mut ctx = SpawnContext::from_seed(1);
        let span = Span::new(3.0, 6.0);
        for _ in 0..256 {
            let v = ctx.range(span);
            assert!((3.0..=6.0).contains(&v));
        }
    }

    #[test]
    fn test_glyph_is_alphanumeric() {
        let mut ctx = SpawnContext::from_seed(2);
        for _ in 0..256 {
            assert!(ctx.glyph().is_ascii_alphanumeric());
        }
    }

    #[test]
    fn test_anchored_placements() {
        let arena = Arena::new(800.0, 600.0);
        let mut ctx = SpawnContext::from_seed(3);
        let mut spawning = spawning();
        spawning.offset = Vec2::new(10.0, 20.0);

        let p = ctx.spawn_position(&spawning, &[SpawnPosition::TopLeft], &arena);
        assert_eq!(p, Vec2::new(10.0, 20.0));

        let p = ctx.spawn_position(&spawning, &[SpawnPosition::BottomRight], &arena);
        assert_eq!(p, Vec2::new(790.0, 580.0));

        let p = ctx.spawn_position(&spawning, &[SpawnPosition::Right], &arena);
        assert_eq!(p, Vec2::new(790.0, 300.0));
    }

    #[test]
    fn test_random_placement_fills_arena() {
        let arena = Arena::new(800.0, 600.0);
        let mut ctx = SpawnContext::from_seed(4);
        let spawning = spawning();
        for _ in 0..256 {
            let p = ctx.spawn_position(&spawning, &[SpawnPosition::Random], &arena);
            assert!((0.0..=800.0).contains(&p.x));
            assert!((0.0..=600.0).contains(&p.y));
        }
    }

    #[test]
    fn test_edge_placements_sit_on_edges() {
        let arena = Arena::new(800.0, 600.0);
        let mut ctx = SpawnContext::from_seed(5);
        let spawning = spawning();
        for _ in 0..64 {
            let p = ctx.spawn_position(&spawning, &[SpawnPosition::RandomEdge], &arena);
            let on_x_edge = p.x == 0.0 || p.x == 800.0;
            let on_y_edge = p.y == 0.0 || p.y == 600.0;
            assert!(on_x_edge || on_y_edge);
        }
    }

    #[test]
    fn test_grid_snaps_to_cell_centers() {
        let arena = Arena::new(800.0, 600.0);
        let mut ctx = SpawnContext::from_seed(6);
        let mut spawning = spawning();
        spawning.grid.columns = 4;
        for _ in 0..64 {
            let p = ctx.spawn_position(&spawning, &[SpawnPosition::Random], &arena);
            // 200-unit cells, so x is one of the four centers.
            assert!([100.0, 300.0, 500.0, 700.0].contains(&p.x));
            assert!((0.0..=600.0).contains(&p.y));
        }
    }
}
