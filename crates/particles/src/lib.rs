//! Point-mass swarm: explicit Euler steps under inverse-mass gravity,
//! floor/obstacle respawn, unit-cube bounces and centroid flocking.

pub mod params;
pub mod system;

pub use params::{Obstacle, SimParams};
pub use system::{Particle, ParticleSystem};
