//! Fire-and-forget sound effects
//!
//! Playback failures are logged and dropped; the game never waits on audio.

#[cfg(feature = "audio")]
mod rodio_sink;
#[cfg(feature = "audio")]
pub mod tones;

use std::io::Write;

#[cfg(feature = "audio")]
pub use rodio_sink::RodioSink;

/// The two sounds the game makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Eat,
    GameOver,
}

impl Sound {
    /// Playback volume, `0.0..=1.0`
    pub fn volume(self) -> f32 {
        match self {
            Sound::Eat => 0.3,
            Sound::GameOver => 0.4,
        }
    }
}

/// Something that can play a [`Sound`]
///
/// Playing a sound again restarts it from the beginning.
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// Plays nothing
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _sound: Sound) {}
}

/// Rings the terminal bell; the closest thing to sound a bare terminal has
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, sound: Sound) {
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            tracing::debug!(?sound, %err, "terminal bell failed");
        }
    }
}

/// Pick the best available sink for this build
pub fn default_sink(mute: bool) -> Box<dyn AudioSink> {
    if mute {
        return Box::new(Silent);
    }

    device_sink().unwrap_or_else(|| Box::new(TerminalBell::new(std::io::stderr())))
}

#[cfg(feature = "audio")]
fn device_sink() -> Option<Box<dyn AudioSink>> {
    match RodioSink::new() {
        Ok(sink) => Some(Box::new(sink)),
        Err(err) => {
            tracing::debug!(%err, "no audio device, falling back to terminal bell");
            None
        }
    }
}

#[cfg(not(feature = "audio"))]
fn device_sink() -> Option<Box<dyn AudioSink>> {
    None
}
