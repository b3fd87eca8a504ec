/// Audio output using cpal
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

use super::{AudioDestination, ScheduledTone};
use crate::error::AudioError;

/// Master level applied to the mix so stacked voices stay in range.
const MASTER_VOLUME: f32 = 0.2;

struct ActiveTone {
    tone: ScheduledTone,
    phase: f32,
}

/// Software mixer that renders scheduled tones against a frame clock.
///
/// The clock advances only as frames are rendered, so `current_time` is the
/// audio device's notion of now. Tones are dropped as soon as a rendered
/// buffer passes their stop time.
pub struct Mixer {
    sample_rate: f32,
    frames: u64,
    tones: Vec<ActiveTone>,
}

impl Mixer {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            frames: 0,
            tones: Vec::new(),
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn current_time(&self) -> f64 {
        self.frames as f64 / self.sample_rate as f64
    }

    pub fn push(&mut self, tone: ScheduledTone) {
        self.tones.push(ActiveTone { tone, phase: 0.0 });
    }

    /// Tones scheduled and not yet released.
    pub fn pending(&self) -> usize {
        self.tones.len()
    }

    /// Fill an interleaved buffer, writing the same sample to every channel.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        for frame in out.chunks_mut(channels) {
            let time = self.current_time();
            let mut sum = 0.0;
            for active in &mut self.tones {
                if !active.tone.is_sounding(time) {
                    continue;
                }
                sum += active.tone.waveform.sample(active.phase) * active.tone.gain_at(time);
                active.phase += active.tone.frequency / self.sample_rate;
                if active.phase >= 1.0 {
                    active.phase -= 1.0;
                }
            }
            frame.fill((sum * MASTER_VOLUME).clamp(-1.0, 1.0));
            self.frames += 1;
        }
        self.reap();
    }

    fn reap(&mut self) {
        let now = self.current_time();
        self.tones.retain(|active| active.tone.stop > now);
    }
}

impl AudioDestination for Mixer {
    fn current_time(&self) -> f64 {
        Mixer::current_time(self)
    }

    fn schedule(&mut self, tone: ScheduledTone) {
        self.push(tone);
    }
}

pub struct AudioOutput {
    stream: Option<cpal::Stream>,
    mixer: Arc<Mutex<Mixer>>,
}

impl AudioOutput {
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioError::Device(e.to_string()))?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        let mixer = Arc::new(Mutex::new(Mixer::new(sample_rate)));

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                let mixer = Arc::clone(&mixer);
                device.build_output_stream(
                    &config.into(),
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| match mixer.lock() {
                        Ok(mut mixer) => mixer.render(data, channels),
                        Err(_) => data.fill(0.0),
                    },
                    |err| log::error!("audio stream error: {}", err),
                    None,
                )
            }
            other => {
                return Err(AudioError::Device(format!(
                    "unsupported sample format {:?}",
                    other
                )))
            }
        }
        .map_err(|e| AudioError::Device(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::Device(e.to_string()))?;

        log::info!(
            "audio output started: {} Hz, {} channel(s)",
            sample_rate,
            channels
        );

        Ok(Self {
            stream: Some(stream),
            mixer,
        })
    }

    /// An output with no device behind it. Scheduled tones are discarded.
    pub fn silent() -> Self {
        Self {
            stream: None,
            mixer: Arc::new(Mutex::new(Mixer::new(44_100.0))),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.stream.is_none()
    }

    pub fn pending(&self) -> usize {
        self.mixer.lock().map(|m| m.pending()).unwrap_or(0)
    }
}

impl AudioDestination for AudioOutput {
    fn current_time(&self) -> f64 {
        self.mixer.lock().map(|m| m.current_time()).unwrap_or(0.0)
    }

    fn schedule(&mut self, tone: ScheduledTone) {
        if self.is_silent() {
            return;
        }
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.push(tone);
        }
    }
}

impl Default for AudioOutput {
    fn default() -> Self {
        Self::new().unwrap_or_else(|err| {
            log::warn!("{}; continuing without sound", err);
            Self::silent()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{ToneVoice, Waveform};

    const RATE: f32 = 1000.0;

    fn render_seconds(mixer: &mut Mixer, seconds: f32) -> Vec<f32> {
        let mut buf = vec![0.0; (seconds * RATE).round() as usize];
        mixer.render(&mut buf, 1);
        buf
    }

    #[test]
    fn test_silence_without_tones() {
        let mut mixer = Mixer::new(RATE);
        let buf = render_seconds(&mut mixer, 0.1);
        assert!(buf.iter().all(|&s| s == 0.0));
        assert!((mixer.current_time() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_tone_sounds_only_inside_its_window() {
        let mut mixer = Mixer::new(RATE);
        ToneVoice::new(50.0).play(&mut mixer, 0.1, 0.2, Waveform::Square);

        let before = render_seconds(&mut mixer, 0.1);
        assert!(before.iter().all(|&s| s == 0.0));

        let during = render_seconds(&mut mixer, 0.2);
        assert!(during.iter().any(|&s| s.abs() > 0.1));
        assert_eq!(mixer.pending(), 1);
    }

    #[test]
    fn test_finished_tones_are_reaped() {
        let mut mixer = Mixer::new(RATE);
        ToneVoice::new(50.0).play(&mut mixer, 0.0, 0.1, Waveform::Sine);
        ToneVoice::new(50.0).play(&mut mixer, 0.5, 0.1, Waveform::Sine);
        assert_eq!(mixer.pending(), 2);

        // first tone stops at 0.1 + 0.5
        render_seconds(&mut mixer, 0.7);
        assert_eq!(mixer.pending(), 1);

        render_seconds(&mut mixer, 0.5);
        assert_eq!(mixer.pending(), 0);
    }

    #[test]
    fn test_output_stays_in_range() {
        let mut mixer = Mixer::new(RATE);
        for _ in 0..30 {
            ToneVoice::new(50.0).play(&mut mixer, 0.0, 0.5, Waveform::Square);
        }
        let mut buf = vec![0.0; 200];
        mixer.render(&mut buf, 2);
        assert!(buf.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert!((mixer.current_time() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_silent_output_discards_tones() {
        let mut output = AudioOutput::silent();
        ToneVoice::new(440.0).play(&mut output, 0.0, 0.5, Waveform::Sine);
        assert!(output.is_silent());
        assert_eq!(output.pending(), 0);
    }
}
