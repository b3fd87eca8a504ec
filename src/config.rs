/// Session configuration: grid size, starting note, timing and colors
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::audio::Waveform;
use crate::error::{ConfigError, Error};
use crate::pitch;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// Primary background
    pub bg1: Color,
    /// Secondary background
    pub bg2: Color,
    /// Gridlines
    pub grid: Color,
    /// Active cells
    pub fg: Color,
    /// Columns per background stripe
    pub stripe: usize,
}

impl ColorScheme {
    pub const fn gruvbox_dark() -> Self {
        Self {
            bg1: Color::rgb(0x28, 0x28, 0x28),
            bg2: Color::rgb(0x32, 0x30, 0x2f),
            grid: Color::rgb(0x3c, 0x38, 0x36),
            fg: Color::rgb(0xfb, 0xf1, 0xc7),
            stripe: 8,
        }
    }

    pub const fn gruvbox_light() -> Self {
        Self {
            bg1: Color::rgb(0xfb, 0xf1, 0xc7),
            bg2: Color::rgb(0xf2, 0xe5, 0xbc),
            grid: Color::rgb(0xd5, 0xc4, 0xa1),
            fg: Color::rgb(0x3c, 0x38, 0x36),
            stripe: 4,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Note letter and octave of the lowest row
    pub start_note: (String, u8),
    /// Seconds between columns
    pub step_duration: f64,
    /// Seconds a tone holds before its release
    pub sustain: f64,
    pub waveform: Waveform,
    pub colors: ColorScheme,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_width: 48,
            grid_height: 25,
            start_note: ("F".to_string(), 3),
            step_duration: 0.2,
            sustain: 0.5,
            waveform: Waveform::Triangle,
            colors: ColorScheme::default(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            ))
            .into());
        }
        if self.step_duration.is_nan() || self.step_duration <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "step duration must be positive, got {}",
                self.step_duration
            ))
            .into());
        }
        if self.sustain.is_nan() || self.sustain < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sustain must not be negative, got {}",
                self.sustain
            ))
            .into());
        }
        if self.colors.stripe == 0 {
            return Err(ConfigError::Invalid("stripe period must be positive".into()).into());
        }
        let (letter, octave) = &self.start_note;
        pitch::note(letter, *octave)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PitchError;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#282828"), Ok(Color::rgb(0x28, 0x28, 0x28)));
        assert_eq!(Color::from_hex("#FbF1c7"), Ok(Color::rgb(0xfb, 0xf1, 0xc7)));
        assert!(Color::from_hex("282828").is_err());
        assert!(Color::from_hex("#2828").is_err());
        assert!(Color::from_hex("#zz2828").is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.colors, ColorScheme::gruvbox_dark());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SessionConfig {
            grid_width: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = SessionConfig {
            step_duration: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = SessionConfig {
            sustain: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = SessionConfig {
            start_note: ("X".into(), 3),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(Error::Pitch(PitchError::UnknownNote("X".into())))
        );
    }
}
