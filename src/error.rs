use thiserror::Error;

use crate::id_generator::ShapeId;
use crate::persistence::PersistenceError;
use crate::shape::ShapeKind;
use crate::texture_manager::ImageLoadError;
use crate::tools::Tool;

/// Errors surfaced by the paint core and its host-side helpers
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("No {kind} with id {id}")]
    ShapeNotFound { kind: ShapeKind, id: ShapeId },

    #[error("Shapes cannot be transformed with the {tool} tool")]
    TransformDisabled { tool: Tool },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    ImageLoad(#[from] ImageLoadError),
}

pub type PaintResult<T> = Result<T, PaintError>;
