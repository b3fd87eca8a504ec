/// Error types for every layer of the sequencer
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PitchError {
    #[error("unknown note name: {0}")]
    UnknownNote(String),

    #[error("octave {0} is outside the table (0..=8)")]
    OctaveOutOfRange(u8),

    #[error("frequency {0} Hz is not in the pitch table")]
    FrequencyNotInTable(f32),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudioError {
    #[error("unsupported waveform: {0}")]
    UnsupportedWaveform(String),

    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("audio device error: {0}")]
    Device(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    #[error("grid has {rows} rows but {voices} voices were supplied")]
    VoiceCountMismatch { rows: usize, voices: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("{0}")]
    Invalid(String),
}

/// Crate-level error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Pitch(#[from] PitchError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
