/// STEPGRID - a grid step sequencer
///
/// This library provides the pieces behind the sequencer app:
/// - A flat, bounds-checked grid of steps (columns) and pitches (rows)
/// - Note and frequency lookup with chromatic ranges
/// - Tone voices that schedule oscillator envelopes against an audio clock
/// - Playback that turns the grid into one batch of scheduled tones
/// - A cpal output that mixes scheduled tones and releases finished ones

pub mod audio;
pub mod config;
pub mod error;
pub mod layout;
pub mod pitch;
pub mod sequencer;

// Re-export commonly used types
pub use audio::{AudioDestination, AudioOutput, Mixer, ScheduledTone, ToneVoice, Waveform};
pub use config::{Color, ColorScheme, SessionConfig};
pub use error::{AudioError, ConfigError, Error, GridError, PitchError, PlaybackError, Result};
pub use layout::GridLayout;
pub use sequencer::playback::Playback;
pub use sequencer::{Grid, Sequencer};
