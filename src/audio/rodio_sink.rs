use std::collections::HashMap;

use rodio::{OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};

use super::tones::{SAMPLE_RATE, synthesize};
use super::{AudioSink, Sound};

/// Plays synthesized tones on the default output device
pub struct RodioSink {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    playing: HashMap<Sound, Sink>,
    samples: HashMap<Sound, Vec<f32>>,
}

impl RodioSink {
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        let samples = [Sound::Eat, Sound::GameOver]
            .into_iter()
            .map(|sound| (sound, synthesize(sound, SAMPLE_RATE)))
            .collect();

        Ok(Self {
            _stream: stream,
            handle,
            playing: HashMap::new(),
            samples,
        })
    }
}

impl AudioSink for RodioSink {
    fn play(&mut self, sound: Sound) {
        // Dropping the previous sink stops it, so replays start from the top
        self.playing.remove(&sound);

        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                tracing::debug!(?sound, %err, "could not open audio sink");
                return;
            }
        };
        let samples = self.samples.get(&sound).cloned().unwrap_or_default();
        sink.set_volume(sound.volume());
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
        self.playing.insert(sound, sink);
    }
}
