use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::geometry::Metrics;
use crate::persistence::{PersistenceError, PersistenceResult};
use crate::viewport::DEFAULT_ZOOM_FACTOR;

/// Environment variable the binary reads a config file path from.
pub const CONFIG_ENV_VAR: &str = "PAINT_IT_CONFIG";

/// Canvas and tool settings.
///
/// Missing fields fall back to their defaults so older config files keep
/// loading after new settings are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub zoom_factor: f32,
    pub stroke_width: f32,
    pub default_color: String,
    pub font_size: f32,
    pub hit_tolerance: f32,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            canvas_width: 700.0,
            canvas_height: 550.0,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            stroke_width: 4.0,
            default_color: "#000".to_owned(),
            font_size: 16.0,
            hit_tolerance: 4.0,
        }
    }
}

impl PaintConfig {
    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> PersistenceResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PersistenceError::ReadError(e.to_string()))?;
        Self::from_json(&json)
    }

    /// Reads the file named by `PAINT_IT_CONFIG`, or the defaults when unset.
    pub fn from_env() -> PersistenceResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("Loading config from {}", Path::new(&path).display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> PersistenceResult<()> {
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 1.0 {
            return Err(PersistenceError::InvalidState(format!(
                "zoom_factor must be greater than 1, got {}",
                self.zoom_factor
            )));
        }
        let canvas_ok = |side: f32| side.is_finite() && side > 0.0;
        if !canvas_ok(self.canvas_width) || !canvas_ok(self.canvas_height) {
            return Err(PersistenceError::InvalidState(
                "canvas dimensions must be positive".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            stroke_width: self.stroke_width,
            font_size: self.font_size,
            tolerance: self.hit_tolerance,
        }
    }

    /// Imported images are placed as a square half the canvas wide.
    pub fn default_image_size(&self) -> egui::Vec2 {
        egui::Vec2::splat(self.canvas_width / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = PaintConfig::from_json(r#"{ "stroke_width": 8.0 }"#).unwrap();
        assert_eq!(config.stroke_width, 8.0);
        assert_eq!(config.canvas_width, 700.0);
        assert_eq!(config.default_color, "#000");
    }

    #[test]
    fn zoom_factor_must_grow() {
        let err = PaintConfig::from_json(r#"{ "zoom_factor": 0.5 }"#).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidState(_)));
    }

    #[test]
    fn non_finite_zoom_factor_is_rejected() {
        for zoom_factor in [f32::NAN, f32::INFINITY] {
            let config = PaintConfig {
                zoom_factor,
                ..PaintConfig::default()
            };
            assert!(config.validate().is_err(), "accepted {zoom_factor}");
        }
    }

    #[test]
    fn overflowing_canvas_size_is_rejected() {
        let config = PaintConfig {
            canvas_width: f32::INFINITY,
            ..PaintConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn image_default_is_half_canvas_square() {
        let config = PaintConfig::default();
        assert_eq!(config.default_image_size(), egui::Vec2::splat(350.0));
    }
}
