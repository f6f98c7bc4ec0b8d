use glam::{Vec2, Vec3};
use rand::Rng;

use crate::math::{random_between, random_in_box, random_range};
use crate::pool::FixedCapacityPool;

/// Billboard particle, laid out for direct upload as a point-list vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    /// xyz position, w texture index.
    pub position: [f32; 4],
    /// xyz velocity (units per second), w remaining life in seconds.
    pub velocity: [f32; 4],
    pub size: [f32; 2],
    pub color: [u8; 4],
}

impl Particle {
    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        Vec3::new(self.velocity[0], self.velocity[1], self.velocity[2])
    }

    #[inline]
    pub fn life(&self) -> f32 {
        self.velocity[3]
    }

    fn set_position(&mut self, p: Vec3) {
        self.position[..3].copy_from_slice(&p.to_array());
    }

    fn set_velocity(&mut self, v: Vec3) {
        self.velocity[..3].copy_from_slice(&v.to_array());
    }
}

/// Volume new particles are spawned from, scaled by [`EmitterData::emitter_size`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmissionShape {
    /// On the surface of the ellipsoid with semi-axes `emitter_size`.
    #[default]
    Sphere,
    /// Anywhere inside the box `[-emitter_size, emitter_size]`.
    Box,
    /// On the horizontal (xz) ellipse with semi-axes `emitter_size`.
    Ring,
    /// On the faces of the box `[-emitter_size, emitter_size]`.
    Surface,
}

/// How the renderer orients billboards. Not interpreted by the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LookAtMode {
    #[default]
    CameraXyz,
    CameraPole,
    Velocity,
}

/// Static description of an effect.
#[derive(Clone, Debug, PartialEq)]
pub struct EmitterData {
    /// Particles spawned immediately by `start`.
    pub min_count: usize,
    /// Pool capacity; the emitter never holds more live particles.
    pub max_count: usize,
    pub emit_duration_min: f32,
    pub emit_duration_max: f32,
    pub min_life: f32,
    pub max_life: f32,
    pub min_initial_velocity: Vec3,
    pub max_initial_velocity: Vec3,
    /// Acceleration applied to every particle.
    pub constant_force: Vec3,
    pub min_size: Vec2,
    pub max_size: Vec2,
    pub emitter_size: Vec3,
    pub shape: EmissionShape,
    pub look_at: LookAtMode,
    /// Linear velocity damping per second.
    pub damping_force: f32,
}

impl Default for EmitterData {
    fn default() -> Self {
        Self {
            min_count: 0,
            max_count: 64,
            emit_duration_min: 1.0,
            emit_duration_max: 1.0,
            min_life: 1.0,
            max_life: 1.0,
            min_initial_velocity: Vec3::ZERO,
            max_initial_velocity: Vec3::ZERO,
            constant_force: Vec3::ZERO,
            min_size: Vec2::ONE,
            max_size: Vec2::ONE,
            emitter_size: Vec3::ONE,
            shape: EmissionShape::Sphere,
            look_at: LookAtMode::CameraXyz,
            damping_force: 0.0,
        }
    }
}

impl EmitterData {
    /// Spawn offset relative to the emitter origin.
    pub fn emission_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let size = self.emitter_size;
        match self.shape {
            EmissionShape::Box => random_in_box(rng, -size, size),
            EmissionShape::Ring => {
                let mut v = random_in_box(rng, -size, size);
                v.y = 0.0;
                v.try_normalize().unwrap_or(Vec3::X) * size
            }
            EmissionShape::Sphere => {
                let v = random_in_box(rng, -size, size);
                v.try_normalize().unwrap_or(Vec3::Y) * size
            }
            EmissionShape::Surface => {
                let mut v = random_in_box(rng, -size, size);
                let axis = rng.gen_range(0..3);
                let side = if rng.gen::<bool>() { 1.0 } else { -1.0 };
                v[axis] = size[axis] * side;
                v
            }
        }
    }
}

/// A short-lived effect: spawns billboard particles for a random duration, moves
/// them under a constant force with damping, and expires them by lifetime.
pub struct ParticleEmitter {
    pub data: EmitterData,
    /// World-space origin of emission.
    pub position: Vec3,
    emitting: bool,
    emit_time_left: f32,
    particles: FixedCapacityPool<Particle>,
    min_bounds: Vec3,
    max_bounds: Vec3,
}

impl ParticleEmitter {
    pub fn new(data: EmitterData) -> Self {
        let capacity = data.max_count;
        Self {
            data,
            position: Vec3::ZERO,
            emitting: false,
            emit_time_left: 0.0,
            particles: FixedCapacityPool::new(capacity),
            min_bounds: Vec3::ZERO,
            max_bounds: Vec3::ZERO,
        }
    }

    /// (Re)start the effect: drops live particles, picks an emission duration and
    /// spawns the initial burst of `min_count` particles.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.particles.capacity() != self.data.max_count {
            self.particles.resize(self.data.max_count);
        }
        self.particles.clear();
        self.emit_time_left =
            random_range(rng, self.data.emit_duration_min, self.data.emit_duration_max);
        self.emitting = true;

        for _ in 0..self.data.min_count {
            if !self.spawn(rng) {
                break;
            }
        }
        self.recompute_bounds();
    }

    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    /// No longer emitting and every particle has expired.
    pub fn is_finished(&self) -> bool {
        !self.emitting && self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.as_slice()
    }

    /// Vertex data for the live particles.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.particles.as_slice())
    }

    /// Axis-aligned bounds of live particles, grown by half the largest billboard size.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.min_bounds, self.max_bounds)
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        let force = self.data.constant_force;
        let damping = self.data.damping_force;
        for p in self.particles.iter_mut() {
            let mut v = p.velocity();
            v += force * dt;
            v -= v * (damping * dt);
            p.set_velocity(v);
            p.velocity[3] -= dt;
        }

        self.particles.retain_swap(|p| p.life() > 0.0);

        for p in self.particles.iter_mut() {
            let moved = p.position() + p.velocity() * dt;
            p.set_position(moved);
        }

        self.emitting = self.emit_time_left > 0.0;
        if self.emitting {
            self.spawn(rng);
        }

        self.recompute_bounds();
        self.emit_time_left -= dt;
    }

    /// Claim a slot and initialise a particle in it. Returns false when full.
    fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let Some(idx) = self.particles.next_index() else {
            log::trace!("emitter at capacity ({})", self.particles.capacity());
            return false;
        };

        let data = &self.data;
        let velocity = random_between(rng, data.min_initial_velocity, data.max_initial_velocity);
        let position = self.position + data.emission_position(rng);
        let life = random_range(rng, data.min_life, data.max_life);
        let t: f32 = rng.gen();
        let size = data.min_size.lerp(data.max_size, t);

        let mut p = Particle {
            size: size.to_array(),
            color: [255; 4],
            ..Particle::default()
        };
        p.set_position(position);
        p.set_velocity(velocity);
        p.velocity[3] = life;
        self.particles[idx] = p;
        true
    }

    fn recompute_bounds(&mut self) {
        if self.particles.is_empty() {
            self.min_bounds = self.position;
            self.max_bounds = self.position;
            return;
        }

        let (min, max) = self.particles.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(min, max), p| (min.min(p.position()), max.max(p.position())),
        );
        let half_size = self.data.max_size.max_element() * 0.5;
        self.min_bounds = min - Vec3::splat(half_size);
        self.max_bounds = max + Vec3::splat(half_size);
    }
}
