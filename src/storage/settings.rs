use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::controllers::export::ExportOptions;

/// File read when `--config` is not given.
pub const DEFAULT_SETTINGS_PATH: &str = "fractal_explorer.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings {path:?}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// User settings. Every field has a default, so any subset may be given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Significant digits shown on the status line.
    pub status_digits: u32,
    /// Significant digits used in exported file names.
    pub file_digits: u32,
    pub images_dir: PathBuf,
    pub anim_dir: PathBuf,
    pub bookmarks_path: PathBuf,
    pub zoom_fps: u32,
    pub sweep_fps: u32,
    pub pan_fps: u32,
    /// Frames rendered in parallel per ordered batch; the rayon thread count
    /// when unset.
    pub frame_batch_size: Option<usize>,
    pub ffmpeg_path: PathBuf,
    /// Log destination while the interactive session owns the terminal.
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let export = ExportOptions::default();

        Self {
            status_digits: 5,
            file_digits: export.file_digits,
            images_dir: export.images_dir,
            anim_dir: export.anim_dir,
            bookmarks_path: PathBuf::from("Bookmarks.json"),
            zoom_fps: export.zoom_fps,
            sweep_fps: export.sweep_fps,
            pan_fps: export.pan_fps,
            frame_batch_size: None,
            ffmpeg_path: PathBuf::from("ffmpeg"),
            log_file: PathBuf::from("fractal_explorer.log"),
        }
    }
}

impl Settings {
    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::parse(&text).map_err(|source| SettingsError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        let defaults = ExportOptions::default();

        ExportOptions {
            images_dir: self.images_dir.clone(),
            anim_dir: self.anim_dir.clone(),
            file_digits: self.file_digits,
            zoom_fps: self.zoom_fps,
            sweep_fps: self.sweep_fps,
            pan_fps: self.pan_fps,
            frame_batch_size: self
                .frame_batch_size
                .unwrap_or(defaults.frame_batch_size)
                .max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.status_digits, 5);
        assert_eq!(settings.file_digits, 3);
        assert_eq!(settings.bookmarks_path, PathBuf::from("Bookmarks.json"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = Settings::parse("status_digits = 8\nanim_dir = \"videos\"\nframe_batch_size = 4\n").unwrap();

        assert_eq!(settings.status_digits, 8);
        assert_eq!(settings.anim_dir, PathBuf::from("videos"));
        assert_eq!(settings.zoom_fps, 60);
        assert_eq!(settings.export_options().frame_batch_size, 4);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "status_digits = \"many\"").unwrap();

        let err = Settings::load(&path).unwrap_err();

        assert!(matches!(err, SettingsError::Toml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::parse("status_digit = 4").is_err());
    }

    #[test]
    fn zero_batch_size_is_raised_to_one() {
        let settings = Settings::parse("frame_batch_size = 0").unwrap();

        assert_eq!(settings.export_options().frame_batch_size, 1);
    }

    #[test]
    fn export_options_carry_fps_and_dirs() {
        let settings = Settings::parse("sweep_fps = 24\nimages_dir = \"stills\"").unwrap();
        let options = settings.export_options();

        assert_eq!(options.sweep_fps, 24);
        assert_eq!(options.images_dir, PathBuf::from("stills"));
    }
}
