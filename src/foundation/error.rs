use std::path::{Path, PathBuf};

/// Convenience result type used across paintreel.
pub type PaintreelResult<T> = Result<T, PaintreelError>;

/// Top-level error taxonomy used by the export engine and its collaborators.
#[derive(thiserror::Error, Debug)]
pub enum PaintreelError {
    /// A layer is misconfigured (non-numeric origin, no point source attached).
    ///
    /// Sessions resolve this locally by treating the layer as empty.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No layer yields any in-bounds point, so there is nothing to export.
    #[error("nothing to export: {0}")]
    EmptyInput(String),

    /// Invalid parameters supplied by the caller.
    #[error("validation error: {0}")]
    Validation(String),

    /// Filesystem failure on a specific path.
    #[error("io error on '{}': {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Raster decode/encode failure on a specific file.
    #[error("image error on '{}': {source}", .path.display())]
    Image {
        /// Image file being decoded or encoded.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// Errors when serializing or deserializing job files and exports.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PaintreelError {
    /// Build a [`PaintreelError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`PaintreelError::EmptyInput`] value.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`PaintreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PaintreelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`PaintreelError::Io`] value for `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Build a [`PaintreelError::Image`] value for `path`.
    pub fn image(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Return `true` for errors that a session resolves by marking a layer empty.
    pub fn is_layer_local(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
