//! Cosmetic simulation: particles and camera shake
//!
//! Both are advanced with an explicit `step(dt)` before the frame is drawn, so
//! rendering never mutates them.

pub mod particles;
pub mod shake;

pub use particles::{Particle, ParticleSystem};
pub use shake::ScreenShake;
