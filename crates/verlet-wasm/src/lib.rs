use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use verlet_core::{ParticlePreset, ParticleSystem, PhysicsConfig, Plane};
use wasm_bindgen::prelude::*;

/// GPU-compatible particle struct: 32 bytes, matches the WGSL sprite instance
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuParticle {
    position: [f32; 3], // 12 bytes
    radius: f32,        //  4 bytes
    velocity: [f32; 3], // 12 bytes
    _pad: f32,          //  4 bytes
}

/// A walled 2D box of Verlet balls driven from JavaScript.
#[wasm_bindgen]
pub struct ParticleWorld {
    system: ParticleSystem,
    walls: [Plane; 4],
    rng: StdRng,
    gpu_buffer: Vec<GpuParticle>,
}

#[wasm_bindgen]
impl ParticleWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(capacity: usize, width: f32, height: f32, seed: u32) -> ParticleWorld {
        web_sys::console::log_1(
            &format!(
                "WASM ParticleWorld created: {} particles, {}x{} box",
                capacity, width, height
            )
            .into(),
        );

        let config = PhysicsConfig::default()
            .with_broad_phase(width.max(height), PhysicsConfig::default().cell_size);
        let system = match ParticleSystem::with_config(capacity, config) {
            Ok(system) => system,
            Err(err) => {
                web_sys::console::warn_1(&format!("falling back to default config: {}", err).into());
                ParticleSystem::new(capacity)
            }
        };

        let mut world = ParticleWorld {
            system,
            walls: Plane::box_walls(Vec2::ZERO, Vec2::new(width, height)),
            rng: StdRng::seed_from_u64(seed as u64),
            gpu_buffer: vec![bytemuck::Zeroable::zeroed(); capacity],
        };
        world.write_gpu_output();
        world
    }

    /// Run one step and return the elapsed wall time in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();
        self.system.step(dt, &self.walls);
        self.write_gpu_output();
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    #[wasm_bindgen]
    pub fn spawn(&mut self, x: f32, y: f32, radius: f32, mass: f32, bounce: f32) -> bool {
        let added = self
            .system
            .try_add(Vec3::new(x, y, 0.0), radius, mass, bounce)
            .is_ok();
        self.write_gpu_output();
        added
    }

    /// Drop a row of `count` balls above the floor. Returns how many fit.
    #[wasm_bindgen]
    pub fn spawn_balls(&mut self, count: usize) -> usize {
        let added = ParticlePreset::BALL.spawn_row(
            &mut self.system,
            &mut self.rng,
            count,
            Vec3::ZERO,
            5.0,
            (40.0, 60.0),
        );
        self.write_gpu_output();
        added
    }

    /// Remove every particle and reseed.
    #[wasm_bindgen]
    pub fn reset(&mut self, seed: u32) {
        self.system.clear();
        self.rng = StdRng::seed_from_u64(seed as u64);
        self.write_gpu_output();
    }

    /// Add `(dx, dy)` to every particle's velocity.
    #[wasm_bindgen]
    pub fn nudge(&mut self, dx: f32, dy: f32) {
        self.system.add_velocity_all(Vec3::new(dx, dy, 0.0));
    }

    /// Kick every particle with a random velocity in the given range.
    #[wasm_bindgen]
    pub fn scatter(&mut self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) {
        self.system.randomize_velocities(
            &mut self.rng,
            Vec3::new(min_x, min_y, 0.0),
            Vec3::new(max_x, max_y, 0.0),
        );
    }

    #[wasm_bindgen]
    pub fn set_velocity(&mut self, index: usize, vx: f32, vy: f32) -> bool {
        self.system
            .set_velocity(index, Vec3::new(vx, vy, 0.0))
            .is_ok()
    }

    #[wasm_bindgen]
    pub fn set_pinned(&mut self, index: usize, pinned: bool) -> bool {
        match self.system.particle_mut(index) {
            Some(p) => {
                p.pinned = pinned;
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen]
    pub fn set_gravity(&mut self, gx: f32, gy: f32) -> bool {
        let config = self.system.config().clone().with_gravity(Vec3::new(gx, gy, 0.0));
        self.system.set_config(config).is_ok()
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_ptr(&self) -> *const f32 {
        self.gpu_buffer.as_ptr() as *const f32
    }

    /// Byte length of the live part of the GPU buffer.
    #[wasm_bindgen]
    pub fn get_gpu_buffer_byte_length(&self) -> usize {
        self.system.len() * std::mem::size_of::<GpuParticle>()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.system.len()
    }
}

impl ParticleWorld {
    fn write_gpu_output(&mut self) {
        for (slot, p) in self.gpu_buffer.iter_mut().zip(self.system.particles()) {
            let vel = p.velocity();
            *slot = GpuParticle {
                position: p.position.to_array(),
                radius: p.radius,
                velocity: vel.to_array(),
                _pad: 0.0,
            };
        }
    }
}
