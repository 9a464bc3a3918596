//! Toolkit configuration.
//!
//! Every field has a default, so an empty YAML document is a valid configuration.
//!
//! ```yaml
//! colors:
//!   button: { r: 124, g: 135, b: 142 }
//! relief:
//!   button_delta: 50
//! close_shortcut:
//!   key: { char: w }
//!   modifiers: { ctrl: true }
//! ```

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::event::{Key, Modifiers, Shortcut};
use crate::geometry::Size;
use crate::render::Font;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default colors per widget class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Root window background.
    pub background: Rgba,
    /// Frame fill.
    pub frame: Rgba,
    /// Button fill.
    pub button: Rgba,
    /// Toplevel content and decoration fill.
    pub toplevel: Rgba,
    /// Text.
    pub text: Rgba,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: Rgba::rgb(0xA0, 0xA0, 0xA0),
            frame: Rgba::rgb(0x89, 0xAB, 0xE3),
            button: Rgba::rgb(0x7C, 0x87, 0x8E),
            toplevel: Rgba::rgb(0xD0, 0xD3, 0xD4),
            text: Rgba::BLACK,
        }
    }
}

/// Requested sizes given to freshly created widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeConfig {
    /// Frame requested size.
    pub frame: Size,
    /// Button requested size.
    pub button: Size,
    /// Toplevel requested content size.
    pub toplevel: Size,
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            frame: Size::new(400, 400),
            button: Size::new(50, 30),
            toplevel: Size::new(320, 240),
        }
    }
}

/// Decoration metrics of toplevel windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToplevelMetrics {
    /// Border width around the content.
    pub border_width: i32,
    /// Height of the title bar.
    pub title_height: i32,
    /// Side of the square close control.
    pub close_size: i32,
    /// Side of the square resize grip in the bottom-right corner.
    pub grip_size: i32,
    /// Smallest content size reachable by interactive resizing.
    pub min_size: Size,
}

impl Default for ToplevelMetrics {
    fn default() -> Self {
        Self {
            border_width: 4,
            title_height: 24,
            close_size: 14,
            grip_size: 10,
            min_size: Size::new(160, 120),
        }
    }
}

/// Button appearance defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonMetrics {
    /// Border width.
    pub border_width: i32,
    /// Corner radius.
    pub corner_radius: i32,
}

impl Default for ButtonMetrics {
    fn default() -> Self {
        Self {
            border_width: 4,
            corner_radius: 10,
        }
    }
}

/// How far relief borders are lightened and darkened from the fill color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliefConfig {
    /// Delta used by buttons.
    pub button_delta: u8,
    /// Delta used by frames.
    pub frame_delta: u8,
}

impl Default for ReliefConfig {
    fn default() -> Self {
        Self {
            button_delta: 50,
            frame_delta: 30,
        }
    }
}

fn default_close_shortcut() -> Shortcut {
    Shortcut::new(Key::Char('w'), Modifiers::CTRL)
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Class colors.
    #[serde(default)]
    pub colors: ColorConfig,

    /// Class requested sizes.
    #[serde(default)]
    pub sizes: SizeConfig,

    /// Toplevel decoration metrics.
    #[serde(default)]
    pub toplevel: ToplevelMetrics,

    /// Button metrics.
    #[serde(default)]
    pub button: ButtonMetrics,

    /// Relief deltas.
    #[serde(default)]
    pub relief: ReliefConfig,

    /// Font for titles and widget text.
    #[serde(default)]
    pub font: Font,

    /// Shortcut that closes the most recently created toplevel.
    #[serde(default = "default_close_shortcut")]
    pub close_shortcut: Shortcut,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            colors: ColorConfig::default(),
            sizes: SizeConfig::default(),
            toplevel: ToplevelMetrics::default(),
            button: ButtonMetrics::default(),
            relief: ReliefConfig::default(),
            font: Font::default(),
            close_shortcut: default_close_shortcut(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration from file, falling back to defaults on any error.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default configuration: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::new();
        assert_eq!(config.relief.button_delta, 50);
        assert_eq!(config.relief.frame_delta, 30);
        assert_eq!(config.toplevel.grip_size, 10);
        assert_eq!(config.toplevel.min_size, Size::new(160, 120));
        assert_eq!(config.sizes.button, Size::new(50, 30));
        assert!(config
            .close_shortcut
            .matches(Key::Char('w'), Modifiers::CTRL));
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_partial() {
        let yaml = r"
relief:
  button_delta: 20
colors:
  button: { r: 1, g: 2, b: 3 }
";
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.relief.button_delta, 20);
        assert_eq!(config.relief.frame_delta, 30);
        assert_eq!(config.colors.button, Rgba::rgb(1, 2, 3));
        assert_eq!(config.colors.frame, ColorConfig::default().frame);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let yaml = "relief:\n  button_delta: lots\n";
        match Config::parse(yaml) {
            Err(Error::ConfigParse { line, message }) => {
                assert!(line >= 1);
                assert!(message.contains("lots") || message.contains("invalid"));
            }
            other => panic!("expected ConfigParse, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "toplevel:\n  title_height: 30").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.toplevel.title_height, 30);
        assert_eq!(config.toplevel.border_width, 4);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/pickframe.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
        assert_eq!(Config::load_or_default("/nonexistent/pickframe.yaml"), Config::default());
    }
}
