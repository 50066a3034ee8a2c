//! Runtime settings.
//!
//! Everything has a built-in default; a `basic-quad.json` file in the working directory
//! may override any subset of the fields.

use std::path::{Path, PathBuf};

use glam::Vec4;

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "basic-quad.json";

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub shader_path: PathBuf,
    pub clear_color: [f32; 4],
    pub quad_color: [f32; 4],
    pub vsync: bool,
    pub log_level: log::LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Hello World".to_string(),
            width: 640,
            height: 480,
            shader_path: PathBuf::from("res/shaders/Basic.shader"),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            quad_color: [0.2, 0.3, 0.8, 1.0],
            vsync: true,
            log_level: log::LevelFilter::Info,
        }
    }
}

impl Config {
    /// Parses a configuration from JSON text.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(s)?;
        if config.width == 0 || config.height == 0 {
            return Err(ConfigError::ZeroSize {
                width: config.width,
                height: config.height,
            });
        }
        Ok(config)
    }

    /// Loads the configuration at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_json(&s).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    pub fn clear_color(&self) -> Vec4 {
        Vec4::from_array(self.clear_color)
    }

    pub fn quad_color(&self) -> Vec4 {
        Vec4::from_array(self.quad_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.title, "Hello World");
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.shader_path, PathBuf::from("res/shaders/Basic.shader"));
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_json(r#"{ "width": 800, "log_level": "debug" }"#).unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 480);
        assert_eq!(config.log_level, log::LevelFilter::Debug);
        assert_eq!(config.title, "Hello World");
    }

    #[test]
    fn test_colors() {
        let config = Config::from_json(r#"{ "quad_color": [1.0, 0.0, 0.0, 1.0] }"#).unwrap();
        assert_eq!(config.quad_color(), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(config.clear_color(), Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            Config::from_json(r#"{ "width": 0 }"#),
            Err(ConfigError::ZeroSize { width: 0, height: 480 })
        ));
        assert!(matches!(
            Config::from_json(r#"{ "fullscreen": true }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(Config::from_json("not json"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path().join(CONFIG_FILE)).unwrap(), None);
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(Config::load(dir.path()), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "title": "Quad" }"#).unwrap();
        let config = Config::load(&path).unwrap().unwrap();
        assert_eq!(config.title, "Quad");
    }
}
