use glam::Vec3;
use rand::Rng;

use crate::math::{random_in_box, random_range};
use crate::system::ParticleSystem;

/// Ranges for randomized spawning of a family of particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePreset {
    pub radius: (f32, f32),
    pub mass: (f32, f32),
    pub bounce: (f32, f32),
}

impl ParticlePreset {
    /// Large, heavy, half-elastic balls.
    pub const BALL: Self = Self {
        radius: (8.0, 10.0),
        mass: (10.0, 10.0),
        bounce: (0.4, 0.5),
    };

    /// Small light grains with little rebound.
    pub const PEBBLE: Self = Self {
        radius: (2.0, 3.0),
        mass: (1.0, 2.0),
        bounce: (0.1, 0.2),
    };

    /// Bouncy rubber balls.
    pub const RUBBER: Self = Self {
        radius: (4.0, 6.0),
        mass: (2.0, 3.0),
        bounce: (0.8, 0.9),
    };

    /// Spawn one particle at `position` with radius, mass and bounce drawn from the ranges.
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        system: &mut ParticleSystem,
        rng: &mut R,
        position: Vec3,
    ) -> Option<usize> {
        let radius = random_range(rng, self.radius.0, self.radius.1);
        let mass = random_range(rng, self.mass.0, self.mass.1);
        let bounce = random_range(rng, self.bounce.0, self.bounce.1);
        system.add(position, radius, mass, bounce)
    }

    /// Spawn up to `count` particles uniformly inside `[min, max]`.
    /// Returns how many were actually added before the pool filled.
    pub fn spawn_in_box<R: Rng + ?Sized>(
        &self,
        system: &mut ParticleSystem,
        rng: &mut R,
        count: usize,
        min: Vec3,
        max: Vec3,
    ) -> usize {
        (0..count)
            .map_while(|_| {
                let position = random_in_box(rng, min, max);
                self.spawn(system, rng, position)
            })
            .count()
    }

    /// Spawn a loose row along +X starting at `origin`: particle `k` lands in
    /// `[k * spacing, (k + 1) * spacing)` horizontally and `height` above `origin.y`.
    pub fn spawn_row<R: Rng + ?Sized>(
        &self,
        system: &mut ParticleSystem,
        rng: &mut R,
        count: usize,
        origin: Vec3,
        spacing: f32,
        height: (f32, f32),
    ) -> usize {
        (0..count)
            .map_while(|k| {
                let x = origin.x + random_range(rng, k as f32 * spacing, (k + 1) as f32 * spacing);
                let y = origin.y + random_range(rng, height.0, height.1);
                self.spawn(system, rng, Vec3::new(x, y, origin.z))
            })
            .count()
    }
}
