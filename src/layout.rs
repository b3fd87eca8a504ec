/// Screen geometry for the grid and the piano roll beside it.
///
/// Everything here is plain arithmetic on window coordinates so the GUI
/// only has to paint the rectangles and lines it is handed.
use crate::pitch::SEMITONES;
use crate::sequencer::Grid;

/// Space kept free around the grid: left for the piano roll, top and bottom
/// for controls.
pub const GRID_LEFT: f32 = 50.0;
pub const GRID_TOP: f32 = 100.0;
pub const GRID_MARGIN: f32 = 200.0;

/// Black keys within an octave, starting at C.
const BLACK_KEYS: [bool; SEMITONES] = [
    false, true, false, true, false, false, true, false, true, false, true, false,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: (f32, f32),
    pub to: (f32, f32),
}

/// Where the grid sits on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GridLayout {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Layout for a window of the given size.
    pub fn for_window(width: f32, height: f32) -> Self {
        Self::new(
            GRID_LEFT,
            GRID_TOP,
            (width - GRID_MARGIN).max(0.0),
            (height - GRID_MARGIN).max(0.0),
        )
    }

    pub fn cell_size(&self, grid: &Grid) -> (f32, f32) {
        (
            self.width / grid.width() as f32,
            self.height / grid.height() as f32,
        )
    }

    /// Grid cell under a pointer position, or `None` when the pointer is
    /// outside the grid.
    pub fn pointer_to_cell(&self, px: f32, py: f32, grid: &Grid) -> Option<(usize, usize)> {
        let (cw, ch) = self.cell_size(grid);
        if cw <= 0.0 || ch <= 0.0 {
            return None;
        }
        let gx = ((px - self.x) / cw).floor();
        let gy = ((py - self.y) / ch).floor();
        if gx < 0.0 || gy < 0.0 {
            return None;
        }
        let (gx, gy) = (gx as usize, gy as usize);
        (gx < grid.width() && gy < grid.height()).then_some((gx, gy))
    }

    /// Background stripes, each `stripe` columns wide. The flag is true for
    /// the primary background color.
    pub fn stripes(&self, grid: &Grid, stripe: usize) -> Vec<(Rect, bool)> {
        let stripe = stripe.max(1);
        let (cw, _) = self.cell_size(grid);
        let count = grid.width().div_ceil(stripe);
        (0..count)
            .map(|i| {
                let x = self.x + (i * stripe) as f32 * cw;
                let w = (stripe as f32 * cw).min(self.x + self.width - x);
                (Rect::new(x, self.y, w, self.height), i % 2 == 0)
            })
            .collect()
    }

    /// One vertical line per column boundary and one horizontal line per
    /// row boundary, excluding the far edges.
    pub fn gridlines(&self, grid: &Grid) -> Vec<Line> {
        let (cw, ch) = self.cell_size(grid);
        let columns = (0..grid.width()).map(|x| {
            let lx = self.x + x as f32 * cw;
            Line {
                from: (lx, self.y),
                to: (lx, self.y + self.height),
            }
        });
        let rows = (0..grid.height()).map(|y| {
            let ly = self.y + y as f32 * ch;
            Line {
                from: (self.x, ly),
                to: (self.x + self.width, ly),
            }
        });
        columns.chain(rows).collect()
    }

    /// Filled rectangles for active cells, inset one pixel from the lines.
    pub fn active_cells(&self, grid: &Grid) -> Vec<Rect> {
        let (cw, ch) = self.cell_size(grid);
        grid.active_cells()
            .map(|(x, y)| {
                Rect::new(
                    self.x + x as f32 * cw + 1.0,
                    self.y + y as f32 * ch + 1.0,
                    cw - 2.0,
                    ch - 2.0,
                )
            })
            .collect()
    }

    /// Key strip to the left of the grid, one key per row.
    pub fn piano_roll(&self) -> Rect {
        Rect::new(0.0, self.y, self.x, self.height)
    }
}

pub fn is_black_key(chromatic_position: usize) -> bool {
    BLACK_KEYS[chromatic_position % SEMITONES]
}

/// Chromatic position sounded by grid row `row` when the bottom row plays
/// `lowest`.
pub fn row_position(row: usize, rows: usize, lowest: usize) -> usize {
    lowest + rows.saturating_sub(row + 1)
}
