//! Fixed-size particle swarm stored as dense parallel arrays.
//! Slot index is the particle's identity; particles are never added or
//! removed after initialization, only respawned.

use corelib::{Vec3, vec3};
use rand::Rng;

use crate::params::SimParams;

/// One particle's state, used to seed or inspect a system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
}

impl Particle {
    pub fn new(position: Vec3, velocity: Vec3, mass: f32) -> Self {
        Self {
            position,
            velocity,
            mass,
        }
    }

    /// Sample a particle: position uniform in the spawn cube, mass in `(0, 1)`,
    /// falling straight down.
    pub fn random<R: Rng + ?Sized>(params: &SimParams, rng: &mut R) -> Self {
        let e = params.spawn_extent;
        let position = vec3(
            rng.gen_range(-e..=e),
            rng.gen_range(-e..=e),
            rng.gen_range(-e..=e),
        );
        let (lo, hi) = params.fall_speed;
        let velocity = vec3(0.0, -rng.gen_range(lo..=hi), 0.0);
        let mass = rng.gen_range(f32::MIN_POSITIVE..1.0);
        Self::new(position, velocity, mass)
    }
}

#[derive(Clone, Debug)]
pub struct ParticleSystem {
    params: SimParams,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    masses: Vec<f32>,
    frame: u64,
}

impl ParticleSystem {
    /// Create and populate `params.count` particles from `rng`.
    pub fn new<R: Rng + ?Sized>(params: SimParams, rng: &mut R) -> Self {
        let mut system = Self::with_params(params);
        system.initialize(rng);
        system
    }

    /// Build a system from explicit particle state. `params.count` follows the
    /// number of particles given.
    pub fn from_particles(params: SimParams, particles: impl IntoIterator<Item = Particle>) -> Self {
        let mut system = Self::with_params(params);
        for p in particles {
            system.push(p);
        }
        system.params.count = system.len();
        system
    }

    fn with_params(params: SimParams) -> Self {
        Self {
            params,
            positions: Vec::with_capacity(params.count),
            velocities: Vec::with_capacity(params.count),
            masses: Vec::with_capacity(params.count),
            frame: 0,
        }
    }

    fn push(&mut self, p: Particle) {
        let mass = if p.mass > 0.0 {
            p.mass
        } else {
            log::warn!(
                "Particle {} has non-positive mass {}, clamping",
                self.masses.len(),
                p.mass
            );
            f32::MIN_POSITIVE
        };
        self.positions.push(p.position);
        self.velocities.push(p.velocity);
        self.masses.push(mass);
    }

    /// Re-seed every slot and reset the frame counter.
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.positions.clear();
        self.velocities.clear();
        self.masses.clear();
        for _ in 0..self.params.count {
            let p = Particle::random(&self.params, rng);
            self.push(p);
        }
        self.frame = 0;
        log::debug!("Initialized {} particles", self.len());
    }

    /// Advance one step: Euler position update, gravity, then floor/obstacle
    /// respawn. Returns how many particles were respawned.
    pub fn update(&mut self) -> usize {
        let step = self.params.time_step;
        let mut respawned = 0;

        for i in 0..self.positions.len() {
            self.positions[i] += step * self.velocities[i];
            self.gravity(i);

            let p = &mut self.positions[i];
            if self.params.needs_respawn(p.x, p.y, p.z) {
                p.y = self.params.respawn_height;
                respawned += 1;
            }
        }

        self.frame += 1;
        log::trace!("Frame {}: {} respawned", self.frame, respawned);
        respawned
    }

    /// Inverse-mass pull: lighter particles speed up downward faster.
    #[inline]
    pub fn gravity(&mut self, i: usize) {
        self.velocities[i].y -= self.params.gravity / self.masses[i];
    }

    /// Soft bounce against the `[-bounds, bounds]` cube. Not part of `update`.
    pub fn collision(&mut self, i: usize) {
        let b = self.params.bounds;
        let k = self.params.restitution;
        let pos = &mut self.positions[i];
        let vel = &mut self.velocities[i];

        for axis in 0..3 {
            if pos[axis] > b {
                vel[axis] *= -k;
                pos[axis] = b - k * (pos[axis] - b);
            }
            if pos[axis] < -b {
                vel[axis] *= -k;
                pos[axis] = -b - k * (pos[axis] + b);
            }
        }
    }

    /// Run `collision` over every particle.
    pub fn collide_all(&mut self) {
        for i in 0..self.len() {
            self.collision(i);
        }
    }

    /// Blend every velocity toward the swarm centroid. Not part of `update`.
    pub fn flock(&mut self) {
        if self.positions.is_empty() {
            return;
        }
        let cm = self.centroid();
        let w = self.params.flock_weight;

        for (p, v) in self.positions.iter().zip(self.velocities.iter_mut()) {
            *v = (1.0 - w) * *v + w * (cm - *p);
        }
    }

    /// Mean position; zero for an empty swarm.
    pub fn centroid(&self) -> Vec3 {
        if self.positions.is_empty() {
            return Vec3::ZERO;
        }
        self.positions.iter().copied().sum::<Vec3>() / self.positions.len() as f32
    }

    #[inline]
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Position buffer for point rendering, one entry per slot.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    #[inline]
    pub fn masses(&self) -> &[f32] {
        &self.masses
    }

    #[inline]
    pub fn particle(&self, i: usize) -> Option<Particle> {
        Some(Particle::new(
            *self.positions.get(i)?,
            *self.velocities.get(i)?,
            *self.masses.get(i)?,
        ))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of `update` calls since the last `initialize`.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
