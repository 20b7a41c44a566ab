use rand::Rng;
use std::time::Duration;

/// Reference frames a shake lasts
pub const SHAKE_FRAMES: f32 = 6.0;
/// Peak displacement span in pixels
pub const SHAKE_INTENSITY: f32 = 3.0;
/// Intensity multiplier per reference frame
pub const SHAKE_DECAY: f32 = 0.85;

/// One-shot decaying camera shake
#[derive(Debug, Clone)]
pub struct ScreenShake {
    remaining: f32,
    intensity: f32,
    offset: (f32, f32),
    reference_hz: f32,
}

impl ScreenShake {
    pub fn new(reference_hz: u32) -> Self {
        Self {
            remaining: 0.0,
            intensity: 0.0,
            offset: (0.0, 0.0),
            reference_hz: reference_hz.max(1) as f32,
        }
    }

    /// Start (or restart) a shake at full intensity
    pub fn trigger(&mut self) {
        self.remaining = SHAKE_FRAMES;
        self.intensity = SHAKE_INTENSITY;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Camera offset to draw the current frame with
    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    /// Pick a new random offset and decay over `dt`
    pub fn step<R: Rng + ?Sized>(&mut self, dt: Duration, rng: &mut R) {
        if !self.is_active() {
            self.offset = (0.0, 0.0);
            return;
        }

        self.offset = (
            (rng.gen::<f32>() - 0.5) * self.intensity,
            (rng.gen::<f32>() - 0.5) * self.intensity,
        );

        let frames = dt.as_secs_f32() * self.reference_hz;
        self.intensity *= SHAKE_DECAY.powf(frames);
        self.remaining -= frames;
    }
}
