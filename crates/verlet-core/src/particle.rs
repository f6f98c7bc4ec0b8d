use glam::Vec3;

use crate::config::PhysicsConfig;
use crate::math::{direction_or_up, reflect, rotate_about};
use crate::plane::Plane;

/// A spherical particle with Verlet (position-based, implicit velocity) dynamics.
///
/// Velocity is never stored: it is `position - previous_position`, in world units
/// per step. Particles are plain values living in a
/// [`FixedCapacityPool`](crate::pool::FixedCapacityPool); their identity is the slot
/// index, which swap-removal may change.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VerletParticle {
    pub position: Vec3,
    pub previous_position: Vec3,
    pub mass: f32,
    /// Cached `1 / mass`; refresh with [`update_mass`](Self::update_mass) after editing `mass`.
    pub inv_mass: f32,
    /// Carried for callers; the integrator does not apply it.
    pub drag: f32,
    /// Restitution-like coefficient, roughly in `[0, 1]`.
    pub bounce: f32,
    pub radius: f32,
    /// Kinematic: never moved by integration or collisions, always at rest.
    pub pinned: bool,
    /// Set by a plane contact this step; suppresses gravity on the next `update`.
    pub collided: bool,
}

impl VerletParticle {
    /// Particle at rest at `position`.
    pub fn new(position: Vec3, radius: f32, mass: f32, bounce: f32, drag: f32) -> Self {
        let mut p = Self {
            position,
            previous_position: position,
            mass,
            inv_mass: 0.0,
            drag,
            bounce,
            radius,
            pinned: false,
            collided: false,
        };
        p.update_mass();
        p
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.position - self.previous_position
    }

    /// Unit direction of travel, `+Y` when at rest.
    #[inline]
    pub fn velocity_dir(&self) -> Vec3 {
        direction_or_up(self.velocity())
    }

    /// Replace the implicit velocity without moving the particle.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.previous_position = self.position - velocity;
    }

    /// Nudge the implicit velocity by `velocity`.
    pub fn add_velocity(&mut self, velocity: Vec3) {
        self.previous_position -= velocity;
    }

    pub fn update_mass(&mut self) {
        self.inv_mass = 1.0 / self.mass;
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
        self.update_mass();
    }

    /// Advance one step.
    ///
    /// Moves by the current implicit velocity, clamps speed to `config.max_speed`,
    /// then applies gravity unless a plane contact was registered since the last
    /// update. The contact flag is consumed either way.
    pub fn update(&mut self, dt: f32, config: &PhysicsConfig) {
        if dt == 0.0 {
            return;
        }
        if self.pinned {
            self.previous_position = self.position;
            return;
        }

        let current = self.position;
        self.move_by(self.velocity(), false);
        self.previous_position = current;

        if self.velocity().length() > config.max_speed {
            self.set_velocity(self.velocity_dir() * config.max_speed);
        }

        if !self.collided {
            self.position += config.gravity * dt * config.gravity_scale;
        }
        self.collided = false;
    }

    /// Translate by `delta`. With `retain_velocity` the previous position moves too,
    /// so the displacement is not read as a change in velocity.
    ///
    /// Pinned particles ignore moves.
    ///
    /// # Panics
    /// If the resulting position is not finite. A NaN here would poison the broad
    /// phase and every later collision, so it is treated as a fatal bug.
    pub fn move_by(&mut self, delta: Vec3, retain_velocity: bool) {
        if self.pinned {
            return;
        }
        self.position += delta;
        assert!(
            self.position.is_finite(),
            "non-finite particle position {:?} after move by {:?}",
            self.position,
            delta
        );
        if retain_velocity {
            self.previous_position += delta;
        }
    }

    /// Resolve overlap with `other`, moving both particles.
    ///
    /// Four corrections are applied: a reflected-direction term and a bounce term for
    /// each particle, with opposite signs for `other`. Coincident particles fall back
    /// to a constant correction factor and an upward separation axis.
    pub fn collide_with(&mut self, other: &mut VerletParticle, config: &PhysicsConfig) {
        let rest_len = self.radius + other.radius;
        let delta = other.position - self.position;
        let dist_sq = delta.length_squared();
        if dist_sq > rest_len * rest_len {
            return;
        }

        let dist = dist_sq.sqrt();
        let mut force = (dist - rest_len) / (dist * (self.inv_mass + other.inv_mass));
        if !force.is_finite() {
            force = config.coincident_force;
        }

        let norm_delta = direction_or_up(delta);
        let this_reflect = reflect(self.velocity_dir(), norm_delta);
        let other_reflect = reflect(other.velocity_dir(), -norm_delta);

        let share = config.reflect_share;
        self.move_by(this_reflect * force * self.inv_mass * share, false);
        other.move_by(other_reflect * force * -other.inv_mass * share, false);

        let delta_force = delta * force;
        self.move_by(delta_force * self.inv_mass * self.bounce, false);
        other.move_by(delta_force * -other.inv_mass * other.bounce, false);
    }

    /// Push the particle out of `plane` if it penetrates, reflecting its velocity.
    ///
    /// The particle is left touching the plane and its new velocity is the reflected
    /// one scaled by `bounce`. Returns whether the particle was penetrating. Pinned
    /// particles are never moved and always return false.
    ///
    /// # Panics
    /// If the position is not finite on entry.
    pub fn collide_plane(&mut self, plane: &Plane, config: &PhysicsConfig) -> bool {
        assert!(
            self.position.is_finite(),
            "non-finite particle position {:?} in plane collision",
            self.position
        );

        if self.pinned {
            return false;
        }

        let radius = self.radius;
        if plane.distance(self.position) - radius >= 0.0 {
            return false;
        }

        let reflected = reflect(self.velocity(), plane.normal);
        self.position = plane.project(self.position, -radius);
        self.previous_position = self.position + reflected * -self.bounce;
        if self.velocity().length_squared() > config.rest_velocity_sq {
            self.collided = true;
        }
        true
    }

    /// Soft distance constraint toward `spring_len`; each side takes half the error.
    /// Corrections smaller than 0.01 are skipped.
    pub fn constrain_to(&mut self, other: &mut VerletParticle, spring_len: f32) {
        let dist = self.position.distance(other.position);
        let force = (spring_len - dist) * 0.5;
        if force.abs() < 0.01 {
            return;
        }

        let correction = direction_or_up(self.position - other.position) * force;
        self.move_by(correction, false);
        other.move_by(-correction, false);
    }

    /// Pull toward `point` when within `sqrt(radius_sq)`, linearly stronger near the
    /// centre and weaker for heavy particles.
    pub fn attract_to(&mut self, point: Vec3, radius_sq: f32, power: f32) {
        let diff = self.position - point;
        let falloff = 1.0 - diff.length_squared() / radius_sq;
        if falloff > 0.0 {
            self.move_by(diff * (-falloff * power * self.inv_mass), false);
        }
    }

    /// Swirl around the axis through `point` when within `sqrt(radius_sq)`.
    pub fn orbit_around(&mut self, point: Vec3, axis: Vec3, radius_sq: f32, angular_velocity: f32) {
        let falloff = 1.0 - (self.position - point).length_squared() / radius_sq;
        if falloff > 0.0 {
            let angle = angular_velocity * falloff * self.inv_mass;
            let target = rotate_about(self.position, point, axis, angle);
            self.move_by(target - self.position, false);
        }
    }
}
