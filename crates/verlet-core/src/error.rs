use thiserror::Error;

/// Errors from checked access to a [`FixedCapacityPool`](crate::pool::FixedCapacityPool).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoolError {
    #[error("index {index} out of bounds (live count: {count})")]
    OutOfBounds { index: usize, count: usize },
    #[error("pool is full (capacity: {capacity})")]
    Full { capacity: usize },
}

/// Rejected [`PhysicsConfig`](crate::config::PhysicsConfig) values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("cell size must be positive and finite, got {0}")]
    NonPositiveCellSize(f32),
    #[error("world diameter {world_diameter} is smaller than one cell ({cell_size})")]
    WorldSmallerThanCell { world_diameter: f32, cell_size: f32 },
    #[error("broad phase needs {cells_per_side} cells per side, at most {max} allowed")]
    TooManyCells { cells_per_side: f32, max: usize },
    #[error("gravity must be finite")]
    NonFiniteGravity,
    #[error("max speed must be positive, got {0}")]
    NonPositiveMaxSpeed(f32),
    #[error("query scale must be non-negative, got {0}")]
    NegativeQueryScale(f32),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParticleError {
    #[error("particle pool is full (capacity: {capacity})")]
    PoolFull { capacity: usize },
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),
    #[error("position must be finite")]
    NonFinitePosition,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}
