use glam::{Vec2, Vec3};
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::PhysicsConfig;
use crate::error::{ConfigError, ParticleError, PoolError};
use crate::grid::SpatialHashGrid;
use crate::math::random_between;
use crate::particle::VerletParticle;
use crate::plane::Plane;
use crate::pool::FixedCapacityPool;

/// Owns every particle and runs the simulation step.
///
/// A step is `update(dt)`, then `collide_pairwise()`, then `collide_plane` once per
/// bounding plane; [`step`](Self::step) runs that sequence. Collision passes resolve
/// pairs one after another in broad-phase order, in a single sweep.
pub struct ParticleSystem {
    particles: FixedCapacityPool<VerletParticle>,
    config: PhysicsConfig,
    grid: SpatialHashGrid<u32>,
    /// Reused broad-phase query buffer.
    candidates: Vec<u32>,
}

impl ParticleSystem {
    /// System with room for `capacity` particles and the default configuration.
    pub fn new(capacity: usize) -> Self {
        let config = PhysicsConfig::default();
        let grid = SpatialHashGrid::new(config.world_diameter, config.cell_size);
        Self::from_parts(capacity, config, grid)
    }

    pub fn with_config(capacity: usize, config: PhysicsConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("rejected physics config: {}", err);
            return Err(err);
        }
        let grid = SpatialHashGrid::new(config.world_diameter, config.cell_size);
        Ok(Self::from_parts(capacity, config, grid))
    }

    fn from_parts(capacity: usize, config: PhysicsConfig, grid: SpatialHashGrid<u32>) -> Self {
        log::debug!(
            "particle system: capacity {}, broad phase {} units / {} per cell",
            capacity,
            config.world_diameter,
            config.cell_size
        );
        Self {
            particles: FixedCapacityPool::new(capacity),
            config,
            grid,
            candidates: Vec::new(),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Replace the configuration, rebuilding the broad-phase grid.
    pub fn set_config(&mut self, config: PhysicsConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.grid = SpatialHashGrid::new(config.world_diameter, config.cell_size);
        self.config = config;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.particles.capacity()
    }

    /// Change capacity between runs. Live particles past the new end are dropped.
    pub fn resize(&mut self, capacity: usize) {
        self.particles.resize(capacity);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Live particles, for rendering and inspection.
    pub fn particles(&self) -> &[VerletParticle] {
        self.particles.as_slice()
    }

    pub fn particle(&self, index: usize) -> Option<&VerletParticle> {
        self.particles.get(index)
    }

    pub fn particle_mut(&mut self, index: usize) -> Option<&mut VerletParticle> {
        self.particles.get_mut(index)
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    /// Spawn a particle at rest. When the pool is full the spawn is dropped and
    /// `None` is returned; the pool never grows.
    ///
    /// Radius and mass must be positive and finite. This is only checked in debug
    /// builds; use [`try_add`](Self::try_add) for input that is not trusted.
    pub fn add(&mut self, position: Vec3, radius: f32, mass: f32, bounce: f32) -> Option<usize> {
        debug_assert!(
            radius.is_finite() && radius > 0.0 && mass.is_finite() && mass > 0.0,
            "spawn with invalid radius {} or mass {}",
            radius,
            mass
        );
        let Some(idx) = self.particles.next_index() else {
            log::trace!("particle pool full ({}), spawn dropped", self.particles.capacity());
            return None;
        };
        self.particles[idx] =
            VerletParticle::new(position, radius, mass, bounce, self.config.default_drag);
        Some(idx)
    }

    /// Validating form of [`add`](Self::add) that reports a full pool as an error.
    pub fn try_add(
        &mut self,
        position: Vec3,
        radius: f32,
        mass: f32,
        bounce: f32,
    ) -> Result<usize, ParticleError> {
        if !position.is_finite() {
            return Err(ParticleError::NonFinitePosition);
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ParticleError::InvalidRadius(radius));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(ParticleError::InvalidMass(mass));
        }
        self.add(position, radius, mass, bounce)
            .ok_or(ParticleError::PoolFull {
                capacity: self.particles.capacity(),
            })
    }

    /// Swap-remove: the last live particle takes over `index`.
    pub fn remove(&mut self, index: usize) -> Result<(), PoolError> {
        if index >= self.particles.len() {
            return Err(PoolError::OutOfBounds {
                index,
                count: self.particles.len(),
            });
        }
        self.particles.remove(index);
        Ok(())
    }

    /// Drop every particle for which `keep` returns false.
    pub fn retain<F: FnMut(&VerletParticle) -> bool>(&mut self, mut keep: F) {
        self.particles.retain_swap(|p| keep(p));
    }

    pub fn set_velocity(&mut self, index: usize, velocity: Vec3) -> Result<(), PoolError> {
        self.particles.try_get_mut(index)?.set_velocity(velocity);
        Ok(())
    }

    pub fn add_velocity(&mut self, index: usize, velocity: Vec3) -> Result<(), PoolError> {
        self.particles.try_get_mut(index)?.add_velocity(velocity);
        Ok(())
    }

    /// Nudge every particle's velocity, e.g. from held input.
    pub fn add_velocity_all(&mut self, velocity: Vec3) {
        for p in self.particles.iter_mut() {
            p.add_velocity(velocity);
        }
    }

    /// Give every particle a random velocity between `min` and `max`.
    pub fn randomize_velocities<R: Rng + ?Sized>(&mut self, rng: &mut R, min: Vec3, max: Vec3) {
        for p in self.particles.iter_mut() {
            p.set_velocity(random_between(rng, min, max));
        }
    }

    pub fn attract_all(&mut self, point: Vec3, radius_sq: f32, power: f32) {
        for p in self.particles.iter_mut() {
            p.attract_to(point, radius_sq, power);
        }
    }

    pub fn orbit_all(&mut self, point: Vec3, axis: Vec3, radius_sq: f32, angular_velocity: f32) {
        for p in self.particles.iter_mut() {
            p.orbit_around(point, axis, radius_sq, angular_velocity);
        }
    }

    /// Link consecutive particles `(0,1), (1,2), ...` with soft springs of `spring_len`.
    pub fn constrain_chain(&mut self, spring_len: f32) {
        for i in 1..self.particles.len() {
            let (a, b) = self.particles.pair_mut(i - 1, i);
            a.constrain_to(b, spring_len);
        }
    }

    /// Integrate every particle independently.
    pub fn update(&mut self, dt: f32) {
        let config = &self.config;

        #[cfg(feature = "parallel")]
        {
            self.particles
                .as_mut_slice()
                .par_iter_mut()
                .for_each(|p| p.update(dt, config));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for p in self.particles.iter_mut() {
                p.update(dt, config);
            }
        }
    }

    /// Rebuild the broad-phase grid and resolve every overlapping pair once.
    ///
    /// Each particle queries a box of `query_scale * radius` around its current
    /// position and collides with every other candidate found. Corrections apply
    /// immediately, so later pairs see earlier results.
    pub fn collide_pairwise(&mut self) {
        let count = self.particles.len();

        self.grid.clear();
        for (i, p) in self.particles.iter().enumerate() {
            self.grid.add(p.position.truncate(), i as u32);
        }

        for i in 0..count {
            let p = self.particles[i];
            let reach = Vec2::splat(p.radius * self.config.query_scale);
            let center = p.position.truncate();

            self.candidates.clear();
            self.grid
                .query_box_with(center - reach, center + reach, |j| self.candidates.push(j));

            for &j in &self.candidates {
                let j = j as usize;
                if j == i {
                    continue;
                }
                let (a, b) = self.particles.pair_mut(i, j);
                a.collide_with(b, &self.config);
            }
        }
    }

    /// Resolve penetration of every particle against `plane`.
    pub fn collide_plane(&mut self, plane: &Plane) {
        let config = &self.config;
        for p in self.particles.iter_mut() {
            p.collide_plane(plane, config);
        }
    }

    /// Planes are resolved one after another; no corner handling.
    pub fn collide_planes(&mut self, planes: &[Plane]) {
        for plane in planes {
            self.collide_plane(plane);
        }
    }

    /// One full step: integrate, resolve pairs, then resolve each plane.
    pub fn step(&mut self, dt: f32, planes: &[Plane]) {
        if self.particles.is_empty() {
            return;
        }
        self.update(dt);
        self.collide_pairwise();
        self.collide_planes(planes);
    }
}
