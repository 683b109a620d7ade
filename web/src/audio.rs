use sapper_core::{AudioCue, Preferences, RELEASE_GAIN, Voice};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioScheduledSourceNode, GainNode};

/// Plays cues through the Web Audio API.
///
/// The audio context is only created on the first cue, browsers refuse to start one before the page
/// has seen a user gesture.
#[derive(Debug, Default)]
pub(crate) struct AudioEmitter {
    output: Option<Output>,
}

impl AudioEmitter {
    pub(crate) fn play(&mut self, cue: AudioCue, prefs: &Preferences) {
        if prefs.is_muted() {
            return;
        }
        log::debug!("playing cue: {}", cue.name());

        let result = self
            .output(prefs.volume())
            .and_then(|output| output.play(cue.voice()));
        if let Err(err) = result {
            log::error!("failed to play {}: {:?}", cue.name(), err);
        }
    }

    pub(crate) fn set_volume(&self, volume: f32) {
        let Some(output) = &self.output else {
            return;
        };
        if let Err(err) = output.set_volume(volume) {
            log::error!("failed to set volume: {:?}", err);
        }
    }

    fn output(&mut self, volume: f32) -> Result<&Output, JsValue> {
        let output = match self.output.take() {
            Some(output) => output,
            None => Output::new(volume)?,
        };
        Ok(self.output.insert(output))
    }
}

#[derive(Debug)]
struct Output {
    context: AudioContext,
    master: GainNode,
}

impl Output {
    fn new(volume: f32) -> Result<Self, JsValue> {
        let context = AudioContext::new()?;
        let master = context.create_gain()?;
        master.connect_with_audio_node(&context.destination())?;
        let output = Self { context, master };
        output.set_volume(volume)?;
        Ok(output)
    }

    fn set_volume(&self, volume: f32) -> Result<(), JsValue> {
        self.master
            .gain()
            .set_value_at_time(volume, self.context.current_time())?;
        Ok(())
    }

    fn play(&self, voice: Voice) -> Result<(), JsValue> {
        let now = self.context.current_time();
        match voice {
            Voice::Sweep {
                from_hz,
                to_hz,
                duration,
                gain,
            } => self.tone(now, duration, gain, from_hz, to_hz),
            Voice::Noise { duration, gain } => self.noise(now, duration, gain),
            Voice::Arpeggio { notes, step, gain } => {
                for (i, &freq) in notes.iter().enumerate() {
                    self.tone(now + step * i as f64, step, gain, freq, freq)?;
                }
                Ok(())
            }
        }
    }

    /// Gain stage that decays from `gain` to [`RELEASE_GAIN`] over `duration`.
    fn envelope(&self, start: f64, duration: f64, gain: f32) -> Result<GainNode, JsValue> {
        let node = self.context.create_gain()?;
        node.connect_with_audio_node(&self.master)?;
        let param = node.gain();
        param.set_value_at_time(gain, start)?;
        param.exponential_ramp_to_value_at_time(RELEASE_GAIN, start + duration)?;
        Ok(node)
    }

    fn tone(&self, start: f64, duration: f64, gain: f32, from_hz: f32, to_hz: f32) -> Result<(), JsValue> {
        let envelope = self.envelope(start, duration, gain)?;
        let oscillator = self.context.create_oscillator()?;
        oscillator.connect_with_audio_node(&envelope)?;

        let frequency = oscillator.frequency();
        frequency.set_value_at_time(from_hz, start)?;
        if from_hz != to_hz {
            frequency.exponential_ramp_to_value_at_time(to_hz, start + duration)?;
        }

        schedule(&oscillator, start, duration)
    }

    fn noise(&self, start: f64, duration: f64, gain: f32) -> Result<(), JsValue> {
        let envelope = self.envelope(start, duration, gain)?;
        let sample_rate = self.context.sample_rate();
        let length = sample_count(sample_rate, duration);

        let buffer = self.context.create_buffer(1, length, sample_rate)?;
        let samples: Vec<f32> = (0..length)
            .map(|_| (js_sys::Math::random() * 2.0 - 1.0) as f32)
            .collect();
        buffer.copy_to_channel(&samples, 0)?;

        let source = self.context.create_buffer_source()?;
        source.set_buffer(Some(&buffer));
        source.connect_with_audio_node(&envelope)?;
        schedule(&source, start, duration)
    }
}

fn schedule(node: &AudioScheduledSourceNode, start: f64, duration: f64) -> Result<(), JsValue> {
    node.start_with_when(start)?;
    node.stop_with_when(start + duration)?;
    Ok(())
}

/// Number of frames needed to hold `duration` seconds, never zero.
fn sample_count(sample_rate: f32, duration: f64) -> u32 {
    ((f64::from(sample_rate) * duration) as u32).max(1)
}
