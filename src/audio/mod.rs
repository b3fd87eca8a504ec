/// Audio scheduling: tones are described up front as an oscillator plus a
/// timed gain envelope and handed to an `AudioDestination`, which owns the
/// clock and renders them.
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::AudioError;

pub mod output;
pub mod voice;

pub use output::{AudioOutput, Mixer};
pub use voice::ToneVoice;

/// Lowest value an exponential ramp may target.
pub const RAMP_FLOOR: f32 = 0.001;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    #[default]
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Triangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }

    /// Sample at `phase` in [0, 1), peak amplitude 1.
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * 2.0 * PI).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Waveform::ALL
            .into_iter()
            .find(|w| w.name() == s)
            .ok_or_else(|| AudioError::UnsupportedWaveform(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GainEvent {
    /// Jump to `value` at `time`.
    Set { value: f32, time: f64 },
    /// Exponential curve from the value at `from` to `target` at `to`.
    ExponentialRamp { target: f32, from: f64, to: f64 },
}

/// One oscillator and its gain stage, with everything scheduled in absolute
/// destination time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTone {
    pub frequency: f32,
    pub waveform: Waveform,
    pub start: f64,
    pub stop: f64,
    gain: Vec<GainEvent>,
}

impl ScheduledTone {
    /// A tone that has not been started yet. Gain starts at zero.
    pub fn new(frequency: f32, waveform: Waveform) -> Self {
        Self {
            frequency,
            waveform,
            start: f64::INFINITY,
            stop: f64::INFINITY,
            gain: Vec::new(),
        }
    }

    pub fn set_gain_at(&mut self, value: f32, time: f64) {
        self.gain.push(GainEvent::Set { value, time });
    }

    /// Exponential ramps cannot reach zero, so `target` is clamped to
    /// `RAMP_FLOOR`.
    pub fn exponential_ramp_at(&mut self, target: f32, from: f64, to: f64) {
        let target = if target < RAMP_FLOOR {
            log::warn!("ramp target {target} clamped to {RAMP_FLOOR}");
            RAMP_FLOOR
        } else {
            target
        };
        self.gain.push(GainEvent::ExponentialRamp { target, from, to });
    }

    pub fn start_at(&mut self, time: f64) {
        self.start = time;
    }

    pub fn stop_at(&mut self, time: f64) {
        self.stop = time;
    }

    pub fn gain_events(&self) -> &[GainEvent] {
        &self.gain
    }

    pub fn is_sounding(&self, time: f64) -> bool {
        time >= self.start && time < self.stop
    }

    /// Gain stage value at `time`. Events apply in the order they were added.
    pub fn gain_at(&self, time: f64) -> f32 {
        let mut value = 0.0;
        for event in &self.gain {
            match *event {
                GainEvent::Set { value: v, time: at } => {
                    if time >= at {
                        value = v;
                    }
                }
                GainEvent::ExponentialRamp { target, from, to } => {
                    if time >= to {
                        value = target;
                    } else if time > from && value > 0.0 {
                        let progress = ((time - from) / (to - from)) as f32;
                        value *= (target / value).powf(progress);
                    }
                }
            }
        }
        value
    }
}

/// The audio output collaborator: a monotonically increasing clock and a
/// sink for scheduled tones.
pub trait AudioDestination {
    /// Seconds since the destination started.
    fn current_time(&self) -> f64;

    /// Take ownership of a tone. The destination releases it once its stop
    /// time has passed.
    fn schedule(&mut self, tone: ScheduledTone);
}
