//! Error types for Inkleaf operations.
//!
//! This module provides the main error type [`InkleafError`] which wraps
//! the error conditions that can occur while loading, rendering and
//! exporting annotations.

use std::io;

use thiserror::Error;

use inkleaf_core::record::RecordError;

/// The main error type for Inkleaf operations.
#[derive(Debug, Error)]
pub enum InkleafError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Annotation record error: {0}")]
    Record(#[from] RecordError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Image error: {0}")]
    Image(#[from] crate::image::ImageError),
}
