#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod file_handler;
pub mod filters;
pub mod geometry;
pub mod history;
pub mod id_generator;
pub mod input;
pub mod layer;
pub mod panels;
pub mod persistence;
pub mod renderer;
pub mod selection;
pub mod shape;
pub mod texture_manager;
pub mod tools;
pub mod util;
pub mod viewport;
pub mod widgets;

pub use app::PaintApp;
pub use config::PaintConfig;
pub use document::Document;
pub use error::{PaintError, PaintResult};
pub use filters::ImageFilters;
pub use history::{History, HistoryEntry, Operation, UndoOutcome};
pub use id_generator::ShapeId;
pub use input::{Action, PointerEvent, PointerEventKind};
pub use persistence::{PersistenceError, Snapshot};
pub use renderer::Renderer;
pub use shape::{Shape, ShapeKind};
pub use tools::Tool;
pub use viewport::{Viewport, ZoomDirection};
