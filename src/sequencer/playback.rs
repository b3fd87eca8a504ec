/// Playback - turns the grid into a batch of scheduled tones
use crate::audio::{AudioDestination, ToneVoice, Waveform};
use crate::error::PlaybackError;

use super::Grid;

/// Seconds each tone holds at full volume before its release.
pub const SUSTAIN: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    pub step_duration: f64,
    pub sustain: f64,
    pub waveform: Waveform,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            step_duration: 0.2,
            sustain: SUSTAIN,
            waveform: Waveform::Triangle,
        }
    }
}

impl Playback {
    /// Schedule one tone per active cell, column `x` starting
    /// `x * step_duration` seconds after a single clock reading.
    ///
    /// Earlier schedules are never cancelled; a second call while tones are
    /// pending layers new tones on top of them.
    pub fn play(
        &self,
        grid: &Grid,
        voices: &[ToneVoice],
        destination: &mut dyn AudioDestination,
    ) -> Result<usize, PlaybackError> {
        if voices.len() != grid.height() {
            return Err(PlaybackError::VoiceCountMismatch {
                rows: grid.height(),
                voices: voices.len(),
            });
        }

        let now = destination.current_time();
        let mut scheduled = 0;
        for (x, y) in grid.active_cells() {
            let voice = &voices[voices.len() - 1 - y];
            voice.play_from(
                destination,
                now,
                x as f64 * self.step_duration,
                self.sustain,
                self.waveform,
            );
            scheduled += 1;
        }

        log::debug!("scheduled {} tone(s) at t={:.3}", scheduled, now);
        Ok(scheduled)
    }
}

/// Play `grid` with the default sustain and waveform.
pub fn play(
    grid: &Grid,
    voices: &[ToneVoice],
    step_duration: f64,
    destination: &mut dyn AudioDestination,
) -> Result<usize, PlaybackError> {
    Playback {
        step_duration,
        ..Default::default()
    }
    .play(grid, voices, destination)
}

/// Index into the voice list for grid row `y`; rows count down from the
/// highest voice.
pub fn voice_index(voices: usize, y: usize) -> Option<usize> {
    (y < voices).then(|| voices - 1 - y)
}
