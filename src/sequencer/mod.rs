/// Core sequencer logic - grid state and the session that owns it
pub mod playback;

use crate::audio::{AudioDestination, ToneVoice};
use crate::config::SessionConfig;
use crate::error::{Error, GridError, PlaybackError};
use crate::pitch;

use playback::Playback;

/// Columns are time steps, rows are pitch lanes. Cells are stored flat,
/// row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        Ok(Self {
            cells: vec![false; width * height],
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<bool, GridError> {
        Ok(self.cells[self.index(x, y)?])
    }

    pub fn set(&mut self, x: usize, y: usize, value: bool) -> Result<(), GridError> {
        let i = self.index(x, y)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Flip a cell and return its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool, GridError> {
        let i = self.index(x, y)?;
        self.cells[i] = !self.cells[i];
        Ok(self.cells[i])
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Active cells as `(x, y)`, column by column.
    pub fn active_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height)
                .filter(move |&y| self.cells[y * self.width + x])
                .map(move |y| (x, y))
        })
    }

    /// Replace with an empty grid of the same size.
    pub fn reset(&mut self) {
        *self = Self {
            cells: vec![false; self.width * self.height],
            width: self.width,
            height: self.height,
        };
    }
}

/// Session state: the grid, one voice per row and the configuration they
/// were built from.
pub struct Sequencer {
    grid: Grid,
    voices: Vec<ToneVoice>,
    config: SessionConfig,
}

impl Sequencer {
    pub fn new(config: SessionConfig) -> Result<Self, Error> {
        config.validate()?;

        let grid = Grid::new(config.grid_width, config.grid_height)?;
        let (letter, octave) = &config.start_note;
        let range = pitch::chromatic_range(pitch::note(letter, *octave)?, grid.height())?;
        let voices = (0..grid.height())
            .map(|i| ToneVoice::new(range[i % range.len()]))
            .collect();

        log::debug!(
            "session: {}x{} grid, lowest row {}{}, {} per step",
            grid.width(),
            grid.height(),
            letter,
            octave,
            config.step_duration
        );

        Ok(Self {
            grid,
            voices,
            config,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn voices(&self) -> &[ToneVoice] {
        &self.voices
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Voice that sounds for grid row `y`. Row 0 is the top of the grid and
    /// the highest pitch.
    pub fn voice_for_row(&self, y: usize) -> Option<&ToneVoice> {
        playback::voice_index(self.voices.len(), y).map(|i| &self.voices[i])
    }

    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool, GridError> {
        self.grid.toggle(x, y)
    }

    pub fn reset(&mut self) {
        self.grid.reset();
    }

    /// Schedule every active cell on `destination`. Returns the number of
    /// tones scheduled.
    pub fn play(&self, destination: &mut dyn AudioDestination) -> Result<usize, PlaybackError> {
        Playback {
            step_duration: self.config.step_duration,
            sustain: self.config.sustain,
            waveform: self.config.waveform,
        }
        .play(&self.grid, &self.voices, destination)
    }
}
