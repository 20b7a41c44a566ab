//! In-memory synthesis of the game's sound effects

use fundsp::prelude32 as dsp;

use super::Sound;

pub const SAMPLE_RATE: u32 = 44_100;

const EAT_DURATION: f32 = 0.09;
const GAME_OVER_DURATION: f32 = 0.5;

/// Mono samples in `-1.0..=1.0` for `sound`
pub fn synthesize(sound: Sound, sample_rate: u32) -> Vec<f32> {
    match sound {
        Sound::Eat => eat_samples(sample_rate),
        Sound::GameOver => game_over_samples(sample_rate),
    }
}

/// Short rising square blip
fn eat_samples(sample_rate: u32) -> Vec<f32> {
    let duration = EAT_DURATION;
    let mut node = (dsp::lfo(move |t: f32| dsp::xerp(660.0, 1320.0, (t / duration).min(1.0)))
        >> dsp::square())
        * dsp::lfo(move |t: f32| fade_out(0.4, t, duration));
    render_mono(&mut node, sample_rate, duration)
}

/// Falling saw buzz
fn game_over_samples(sample_rate: u32) -> Vec<f32> {
    let duration = GAME_OVER_DURATION;
    let mut node = (dsp::lfo(|t: f32| dsp::lerp(400.0, 80.0, (t / 0.4).min(1.0)))
        >> dsp::saw())
        * dsp::lfo(move |t: f32| fade_out(0.5, t, duration));
    render_mono(&mut node, sample_rate, duration)
}

/// Linear fade from `level` that reaches silence a little before `duration`
fn fade_out(level: f32, t: f32, duration: f32) -> f32 {
    dsp::lerp(level, 0.0, (t / (duration * 0.9)).min(1.0))
}

fn render_mono(node: &mut dyn dsp::AudioUnit, sample_rate: u32, duration: f32) -> Vec<f32> {
    node.set_sample_rate(sample_rate as f64);
    node.reset();

    let sample_count = (sample_rate as f32 * duration) as usize;
    (0..sample_count).map(|_| node.get_mono()).collect()
}
