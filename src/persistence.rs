use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::filters::ImageFilters;
use crate::layer::Layers;
use crate::shape::{Arrow, Circle, Image, Rectangle, Shape, Stroke, Text};
use crate::util::time;

/// Errors that can occur during snapshot and config persistence
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize state: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to write state: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to read state file: {0}")]
    ReadError(String),

    #[error("Invalid state data: {0}")]
    InvalidState(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Flat, serializable copy of every shape collection.
///
/// Image shapes carry only their source reference; the host resolves them
/// into textures again after loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub version: String,
    pub timestamp: u64,
    pub images: Vec<Image>,
    pub rectangles: Vec<Rectangle>,
    pub circles: Vec<Circle>,
    pub strokes: Vec<Stroke>,
    pub arrows: Vec<Arrow>,
    pub texts: Vec<Text>,
    pub filters: ImageFilters,
}

impl Snapshot {
    pub(crate) fn capture(layers: &Layers, filters: ImageFilters) -> Self {
        let mut snapshot = Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: time::timestamp_secs(),
            filters,
            ..Self::default()
        };

        for shape in layers.iter() {
            match shape.clone() {
                Shape::Image(s) => snapshot.images.push(s),
                Shape::Rectangle(s) => snapshot.rectangles.push(s),
                Shape::Circle(s) => snapshot.circles.push(s),
                Shape::Stroke(s) => snapshot.strokes.push(s),
                Shape::Arrow(s) => snapshot.arrows.push(s),
                Shape::Text(s) => snapshot.texts.push(s),
            }
        }
        snapshot
    }

    /// Rebuilds the per-kind collections, rejecting duplicate ids.
    pub(crate) fn into_layers(self) -> PersistenceResult<(Layers, ImageFilters)> {
        if self.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Snapshot version {} differs from current version {}",
                self.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        let shapes: Vec<Shape> = std::iter::empty()
            .chain(self.images.into_iter().map(Shape::from))
            .chain(self.rectangles.into_iter().map(Shape::from))
            .chain(self.circles.into_iter().map(Shape::from))
            .chain(self.strokes.into_iter().map(Shape::from))
            .chain(self.arrows.into_iter().map(Shape::from))
            .chain(self.texts.into_iter().map(Shape::from))
            .collect();

        let mut seen = HashSet::new();
        let mut layers = Layers::new();
        for shape in shapes {
            if !seen.insert((shape.kind(), shape.id())) {
                return Err(PersistenceError::InvalidState(format!(
                    "duplicate {} id {}",
                    shape.kind(),
                    shape.id()
                )));
            }
            layers.push(shape);
        }
        Ok((layers, self.filters))
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn shape_count(&self) -> usize {
        self.images.len()
            + self.rectangles.len()
            + self.circles.len()
            + self.strokes.len()
            + self.arrows.len()
            + self.texts.len()
    }
}

pub fn save_snapshot(snapshot: &Snapshot, path: impl AsRef<Path>) -> PersistenceResult<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    fs::write(path, snapshot.to_json()?)?;
    log::info!("Saved {} shapes to {}", snapshot.shape_count(), path.display());
    Ok(())
}

pub fn load_snapshot(path: impl AsRef<Path>) -> PersistenceResult<Snapshot> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| PersistenceError::ReadError(e.to_string()))?;
    let snapshot = Snapshot::from_json(&json)?;
    log::info!("Loaded {} shapes from {}", snapshot.shape_count(), path.display());
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::generate_id;
    use egui::Pos2;

    #[test]
    fn duplicate_ids_are_rejected() {
        let id = generate_id();
        let snapshot = Snapshot {
            circles: vec![
                Circle::new(id, "#000", Pos2::ZERO),
                Circle::new(id, "#fff", Pos2::ZERO),
            ],
            ..Snapshot::default()
        };
        let err = snapshot.into_layers().unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidState(_)));
    }

    #[test]
    fn capture_groups_shapes_by_kind() {
        let mut layers = Layers::new();
        layers.push(Circle::new(generate_id(), "#000", Pos2::ZERO).into());
        layers.push(Text::new(generate_id(), "#000", Pos2::ZERO, "a").into());
        let snapshot = Snapshot::capture(&layers, ImageFilters::default());
        assert_eq!(snapshot.circles.len(), 1);
        assert_eq!(snapshot.texts.len(), 1);
        assert_eq!(snapshot.shape_count(), 2);
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let err = load_snapshot("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, PersistenceError::ReadError(_)));
    }
}
