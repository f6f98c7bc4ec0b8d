//! Verlet particle simulation with uniform-grid broad phase.
//!
//! Particles are value types stored in a [`FixedCapacityPool`]. A
//! [`ParticleSystem`] step integrates them, resolves particle-particle overlaps found
//! through a [`SpatialHashGrid`], then pushes them out of static [`Plane`]s.
//!
//! Enable the `parallel` feature to integrate particles on rayon's thread pool.

pub mod config;
pub mod emitter;
pub mod error;
pub mod grid;
pub mod math;
pub mod particle;
pub mod plane;
pub mod pool;
pub mod preset;
pub mod system;

pub use config::PhysicsConfig;
pub use emitter::{EmissionShape, EmitterData, LookAtMode, Particle, ParticleEmitter};
pub use error::{ConfigError, ParticleError, PoolError};
pub use grid::SpatialHashGrid;
pub use particle::VerletParticle;
pub use plane::Plane;
pub use pool::FixedCapacityPool;
pub use preset::ParticlePreset;
pub use system::ParticleSystem;
