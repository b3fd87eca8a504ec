/// Pitch lookup: note names, the equal-tempered frequency table and
/// chromatic ranges over it.
///
/// The table is laid out semitone-major: the nine octaves of C come first,
/// then the nine octaves of C#, and so on, so a note lives at
/// `semitone * OCTAVES + octave`.
use crate::error::PitchError;

pub const SEMITONES: usize = 12;
pub const OCTAVES: usize = 9;

const NOTE_NAMES: [&str; SEMITONES] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

#[rustfmt::skip]
pub const FREQUENCIES: [f32; SEMITONES * OCTAVES] = [
    16.35, 32.70, 65.41, 130.81, 261.63, 523.25, 1046.50, 2093.00, 4186.01, // C
    17.32, 34.65, 69.30, 138.59, 277.18, 554.37, 1108.73, 2217.46, 4434.92, // C#
    18.35, 36.71, 73.42, 146.83, 293.66, 587.33, 1174.66, 2349.32, 4698.63, // D
    19.45, 38.89, 77.78, 155.56, 311.13, 622.25, 1244.51, 2489.02, 4978.03, // D#
    20.60, 41.20, 82.41, 164.81, 329.63, 659.25, 1318.51, 2637.02, 5274.04, // E
    21.83, 43.65, 87.31, 174.61, 349.23, 698.46, 1396.91, 2793.83, 5587.65, // F
    23.12, 46.25, 92.50, 185.00, 369.99, 739.99, 1479.98, 2959.96, 5919.91, // F#
    24.50, 49.00, 98.00, 196.00, 392.00, 783.99, 1567.98, 3135.96, 6271.93, // G
    25.96, 51.91, 103.83, 207.65, 415.30, 830.61, 1661.22, 3322.44, 6644.88, // G#
    27.50, 55.00, 110.00, 220.00, 440.00, 880.00, 1760.00, 3520.00, 7040.00, // A
    29.14, 58.27, 116.54, 233.08, 466.16, 932.33, 1864.66, 3729.31, 7458.62, // A#
    30.87, 61.74, 123.47, 246.94, 493.88, 987.77, 1975.53, 3951.07, 7902.13, // B
];

/// Semitone offset (0-11) of a note letter. Sharps and flats are both accepted.
pub fn semitone(letter: &str) -> Result<usize, PitchError> {
    let offset = match letter {
        "C" => 0,
        "C#" | "Db" => 1,
        "D" => 2,
        "D#" | "Eb" => 3,
        "E" => 4,
        "F" => 5,
        "F#" | "Gb" => 6,
        "G" => 7,
        "G#" | "Ab" => 8,
        "A" => 9,
        "A#" | "Bb" => 10,
        "B" => 11,
        _ => return Err(PitchError::UnknownNote(letter.to_string())),
    };
    Ok(offset)
}

/// Frequency of `letter` in `octave`, e.g. `note("A", 4)` is 440 Hz.
pub fn note(letter: &str, octave: u8) -> Result<f32, PitchError> {
    Ok(FREQUENCIES[table_index(position(letter, octave)?)])
}

/// Position of a note on the chromatic scale, C0 = 0.
pub fn position(letter: &str, octave: u8) -> Result<usize, PitchError> {
    if octave as usize >= OCTAVES {
        return Err(PitchError::OctaveOutOfRange(octave));
    }
    Ok(octave as usize * SEMITONES + semitone(letter)?)
}

/// `length` consecutive chromatic frequencies starting at `start`.
///
/// After B the range continues at C of the next octave, and after B8 it
/// starts over at C0.
pub fn chromatic_range(start: f32, length: usize) -> Result<Vec<f32>, PitchError> {
    let index = FREQUENCIES
        .iter()
        .position(|&f| f == start)
        .ok_or(PitchError::FrequencyNotInTable(start))?;

    let first = chromatic_position(index);
    let total = FREQUENCIES.len();
    Ok((0..length)
        .map(|i| FREQUENCIES[table_index((first + i) % total)])
        .collect())
}

/// Position of a table index on the chromatic scale, C0 = 0.
fn chromatic_position(index: usize) -> usize {
    let (semitone, octave) = (index / OCTAVES, index % OCTAVES);
    octave * SEMITONES + semitone
}

fn table_index(position: usize) -> usize {
    let (octave, semitone) = (position / SEMITONES, position % SEMITONES);
    semitone * OCTAVES + octave
}

/// Display name of a chromatic position, C0 = 0.
pub fn note_name(position: usize) -> String {
    let octave = position / SEMITONES;
    format!("{}{}", NOTE_NAMES[position % SEMITONES], octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_lookup() {
        assert_eq!(note("A", 4).unwrap(), 440.0);
        assert_eq!(note("C", 0).unwrap(), 16.35);
        assert_eq!(note("Bb", 3).unwrap(), note("A#", 3).unwrap());
        assert_eq!(note("F", 3).unwrap(), 174.61);
    }

    #[test]
    fn test_note_rejects_bad_input() {
        assert_eq!(note("H", 3), Err(PitchError::UnknownNote("H".into())));
        assert_eq!(note("C", 9), Err(PitchError::OctaveOutOfRange(9)));
    }

    #[test]
    fn test_chromatic_range_basics() {
        let start = note("F", 3).unwrap();
        let range = chromatic_range(start, 25).unwrap();
        assert_eq!(range.len(), 25);
        assert_eq!(range[0], start);
        assert_eq!(range[1], note("F#", 3).unwrap());
        assert_eq!(range[7], note("C", 4).unwrap());
        assert_eq!(range[24], note("F", 5).unwrap());
        assert!(range.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_chromatic_range_wraps_past_top_of_table() {
        let start = note("A#", 8).unwrap();
        let range = chromatic_range(start, 4).unwrap();
        assert_eq!(
            range,
            vec![
                note("A#", 8).unwrap(),
                note("B", 8).unwrap(),
                note("C", 0).unwrap(),
                note("C#", 0).unwrap(),
            ]
        );
        assert!(range[..2].windows(2).all(|w| w[0] < w[1]));
        assert!(range[2..].windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_chromatic_range_unknown_start() {
        assert_eq!(
            chromatic_range(441.0, 3),
            Err(PitchError::FrequencyNotInTable(441.0))
        );
        assert!(chromatic_range(440.0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_position_matches_range() {
        let f3 = position("F", 3).unwrap();
        assert_eq!(f3, 41);
        assert_eq!(note_name(f3), "F3");
        assert_eq!(position("Db", 0), Ok(1));
        assert!(position("C", 12).is_err());
    }

    #[test]
    fn test_note_name() {
        assert_eq!(note_name(0), "C0");
        assert_eq!(note_name(4 * SEMITONES + 9), "A4");
        assert_eq!(note_name(3 * SEMITONES + 5), "F3");
    }
}
