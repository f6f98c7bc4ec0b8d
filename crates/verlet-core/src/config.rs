use glam::Vec3;

use crate::error::ConfigError;

/// Upper bound on `world_diameter / cell_size` accepted by [`PhysicsConfig::validate`].
pub const MAX_CELLS_PER_SIDE: usize = 4096;

/// Tuning constants for integration and collision response.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Gravity acceleration. Applied as `gravity * dt * gravity_scale` per step.
    pub gravity: Vec3,
    pub gravity_scale: f32,
    /// Implicit speed (units per step) above which velocity is rescaled.
    pub max_speed: f32,
    /// Post-bounce velocity² above which a plane contact marks the particle as collided.
    pub rest_velocity_sq: f32,
    /// Substitute correction factor for fully coincident particle pairs.
    pub coincident_force: f32,
    /// Weight of the reflected-direction term in pairwise resolution.
    pub reflect_share: f32,
    /// Side length of the square region covered by the broad-phase grid.
    pub world_diameter: f32,
    pub cell_size: f32,
    /// Pairwise query box half-extent, in multiples of the particle radius.
    pub query_scale: f32,
    /// Drag assigned to newly spawned particles.
    pub default_drag: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.7, 0.0),
            gravity_scale: 1.5,
            max_speed: 10.0,
            rest_velocity_sq: 0.01,
            coincident_force: 0.1,
            reflect_share: 0.5,
            world_diameter: 1500.0,
            cell_size: 32.0,
            query_scale: 2.0,
            default_drag: 0.2,
        }
    }
}

impl PhysicsConfig {
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Set the broad-phase world size and cell size together.
    pub fn with_broad_phase(mut self, world_diameter: f32, cell_size: f32) -> Self {
        self.world_diameter = world_diameter;
        self.cell_size = cell_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::NonPositiveCellSize(self.cell_size));
        }
        if !(self.world_diameter >= self.cell_size) {
            return Err(ConfigError::WorldSmallerThanCell {
                world_diameter: self.world_diameter,
                cell_size: self.cell_size,
            });
        }
        let cells_per_side = (self.world_diameter / self.cell_size).floor();
        if !(cells_per_side <= MAX_CELLS_PER_SIDE as f32) {
            return Err(ConfigError::TooManyCells {
                cells_per_side,
                max: MAX_CELLS_PER_SIDE,
            });
        }
        if !self.gravity.is_finite() || !self.gravity_scale.is_finite() {
            return Err(ConfigError::NonFiniteGravity);
        }
        if !(self.max_speed > 0.0) {
            return Err(ConfigError::NonPositiveMaxSpeed(self.max_speed));
        }
        if !(self.query_scale >= 0.0) {
            return Err(ConfigError::NegativeQueryScale(self.query_scale));
        }
        Ok(())
    }
}
