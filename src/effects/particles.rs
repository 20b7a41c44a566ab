//! Short-lived sparks thrown out when a bait is eaten

use rand::Rng;
use std::f32::consts::TAU;
use std::time::Duration;

/// Particles spawned per burst
pub const BURST_COUNT: usize = 14;
/// Multiplier applied to alpha and scale every reference frame
pub const DECAY: f32 = 0.96;
/// Particles at or below this alpha are dropped
pub const VISIBILITY_THRESHOLD: f32 = 0.05;

const SPEED_MIN: f32 = 2.0;
const SPEED_SPREAD: f32 = 2.0;
const SIZE_MIN: f32 = 1.5;
const SIZE_SPREAD: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Velocity in pixels per reference frame
    pub dx: f32,
    pub dy: f32,
    pub alpha: f32,
    pub size: f32,
    pub scale: f32,
    pub decay: f32,
}

impl Particle {
    /// Radius to draw with, in pixels
    pub fn radius(&self) -> f32 {
        self.size * self.scale
    }
}

/// Owns every live particle and advances them over time
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    reference_hz: f32,
}

impl ParticleSystem {
    /// `reference_hz` is the rate at which one unit of velocity and decay applies
    pub fn new(reference_hz: u32) -> Self {
        Self {
            particles: Vec::new(),
            reference_hz: reference_hz.max(1) as f32,
        }
    }

    /// Throw a radial burst of sparks out of (`cx`, `cy`)
    pub fn spawn_burst<R: Rng + ?Sized>(&mut self, cx: f32, cy: f32, rng: &mut R) {
        self.particles.extend((0..BURST_COUNT).map(|_| {
            let angle = rng.gen::<f32>() * TAU;
            let speed = SPEED_MIN + rng.gen::<f32>() * SPEED_SPREAD;
            Particle {
                x: cx,
                y: cy,
                dx: angle.cos() * speed,
                dy: angle.sin() * speed,
                alpha: 1.0,
                size: SIZE_MIN + rng.gen::<f32>() * SIZE_SPREAD,
                scale: 1.0,
                decay: DECAY,
            }
        }));
    }

    /// Integrate motion and fading over `dt`, then drop invisible particles
    pub fn step(&mut self, dt: Duration) {
        let frames = dt.as_secs_f32() * self.reference_hz;
        if frames <= 0.0 {
            return;
        }

        for p in &mut self.particles {
            p.x += p.dx * frames;
            p.y += p.dy * frames;
            let fade = p.decay.powf(frames);
            p.alpha *= fade;
            p.scale *= fade;
        }

        self.particles.retain(|p| p.alpha > VISIBILITY_THRESHOLD);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn frame() -> Duration {
        Duration::from_millis(100)
    }

    #[test]
    fn test_burst_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut system = ParticleSystem::new(10);
        system.spawn_burst(137.5, 112.5, &mut rng);

        assert_eq!(system.len(), BURST_COUNT);
        for p in system.iter() {
            assert_eq!((p.x, p.y), (137.5, 112.5));
            let speed = (p.dx * p.dx + p.dy * p.dy).sqrt();
            assert!((SPEED_MIN - 1e-4..SPEED_MIN + SPEED_SPREAD + 1e-4).contains(&speed));
            assert!((SIZE_MIN..=SIZE_MIN + SIZE_SPREAD).contains(&p.size));
            assert_eq!(p.alpha, 1.0);
        }
    }

    #[test]
    fn test_step_moves_and_fades() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut system = ParticleSystem::new(10);
        system.spawn_burst(0.0, 0.0, &mut rng);
        let before: Vec<Particle> = system.iter().cloned().collect();

        system.step(frame());

        for (old, new) in before.iter().zip(system.iter()) {
            assert!((new.x - (old.x + old.dx)).abs() < 1e-4);
            assert!((new.y - (old.y + old.dy)).abs() < 1e-4);
            assert!((new.alpha - DECAY).abs() < 1e-5);
            assert!((new.radius() - old.size * DECAY).abs() < 1e-5);
        }
    }

    #[test]
    fn test_step_is_time_scaled() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut coarse = ParticleSystem::new(10);
        coarse.spawn_burst(50.0, 50.0, &mut rng);
        let mut fine = coarse.clone();

        coarse.step(Duration::from_millis(200));
        for _ in 0..4 {
            fine.step(Duration::from_millis(50));
        }

        for (a, b) in coarse.iter().zip(fine.iter()) {
            assert!((a.x - b.x).abs() < 1e-3);
            assert!((a.alpha - b.alpha).abs() < 1e-4);
        }
    }

    #[test]
    fn test_particles_fade_out() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut system = ParticleSystem::new(10);
        system.spawn_burst(0.0, 0.0, &mut rng);

        // 0.96^73 is still above 0.05, 0.96^74 is not
        for _ in 0..73 {
            system.step(frame());
        }
        assert_eq!(system.len(), BURST_COUNT);

        system.step(frame());
        assert!(system.is_empty());
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut system = ParticleSystem::new(10);
        system.spawn_burst(10.0, 10.0, &mut rng);
        let before: Vec<Particle> = system.iter().cloned().collect();

        system.step(Duration::ZERO);

        assert_eq!(before, system.iter().cloned().collect::<Vec<_>>());
    }
}
