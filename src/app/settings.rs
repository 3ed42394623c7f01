use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub(super) enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("grid_size must be positive, got {0}")]
    InvalidGridSize(f32),
    #[error("zoom range {min}..{max} is empty")]
    InvalidZoomRange { min: f32, max: f32 },
    #[error("zoom_step must be greater than 1, got {0}")]
    InvalidZoomStep(f32),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(super) struct AppSettings {
    pub grid_size: f32,
    pub door_counter_clockwise: bool,
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            grid_size: 50.0,
            door_counter_clockwise: true,
            zoom_step: 1.25,
            min_zoom: 0.1,
            max_zoom: 8.0,
        }
    }
}

impl AppSettings {
    fn validate(self) -> Result<Self, SettingsError> {
        if !(self.grid_size > 0.0) {
            return Err(SettingsError::InvalidGridSize(self.grid_size));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom < self.max_zoom) {
            return Err(SettingsError::InvalidZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if !(self.zoom_step > 1.0) {
            return Err(SettingsError::InvalidZoomStep(self.zoom_step));
        }
        Ok(self)
    }
}

pub(super) fn config_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config").join("planify.toml");
        if path.exists() {
            return path;
        }
    }
    PathBuf::from("settings.toml")
}

pub(super) fn parse_settings(text: &str, toml_first: bool) -> Result<AppSettings, SettingsError> {
    let parsed = if toml_first {
        match toml::from_str::<AppSettings>(text) {
            Ok(s) => s,
            Err(e) => serde_json::from_str::<AppSettings>(text).map_err(|_| SettingsError::Toml(e))?,
        }
    } else {
        match serde_json::from_str::<AppSettings>(text) {
            Ok(s) => s,
            Err(e) => toml::from_str::<AppSettings>(text).map_err(|_| SettingsError::Json(e))?,
        }
    };
    parsed.validate()
}

pub(super) fn load_settings(path: &Path) -> Result<AppSettings, SettingsError> {
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let toml_first = path.extension().is_none_or(|ext| ext != "json");
    parse_settings(&text, toml_first)
}

/// Missing files are silent; malformed ones are logged and replaced by defaults.
pub(super) fn load_or_default(path: &Path) -> AppSettings {
    match load_settings(path) {
        Ok(settings) => {
            tracing::info!(path = %path.display(), "loaded settings");
            settings
        }
        Err(SettingsError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            AppSettings::default()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring settings");
            AppSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let s = parse_settings("grid_size = 25.0\n", true).unwrap();
        assert_eq!(s.grid_size, 25.0);
        assert!(s.door_counter_clockwise);
        assert_eq!(s.max_zoom, 8.0);
    }

    #[test]
    fn test_json_fallback_from_toml_path() {
        let s = parse_settings(r#"{"door_counter_clockwise": false}"#, true).unwrap();
        assert!(!s.door_counter_clockwise);
        assert_eq!(s.grid_size, 50.0);
    }

    #[test]
    fn test_toml_fallback_from_json_path() {
        let s = parse_settings("zoom_step = 1.5", false).unwrap();
        assert_eq!(s.zoom_step, 1.5);
    }

    #[test]
    fn test_rejects_bad_grid() {
        let err = parse_settings("grid_size = 0.0", true).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidGridSize(_)));
        assert!(err.to_string().contains("grid_size"));
    }

    #[test]
    fn test_rejects_inverted_zoom_range() {
        let err = parse_settings("min_zoom = 4.0\nmax_zoom = 2.0", true).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidZoomRange { .. }));
    }

    #[test]
    fn test_rejects_zoom_step_not_above_one() {
        let err = parse_settings("zoom_step = 1.0", true).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidZoomStep(step) if step == 1.0));
        assert!(err.to_string().contains("zoom_step"));
    }

    #[test]
    fn test_garbage_reports_toml_error() {
        let err = parse_settings("grid_size = [", true).unwrap_err();
        assert!(matches!(err, SettingsError::Toml(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_settings(Path::new("/nonexistent/planify/settings.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert_eq!(
            load_or_default(Path::new("/nonexistent/planify/settings.toml")),
            AppSettings::default()
        );
    }
}
