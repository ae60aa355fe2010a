//! Inkleaf Core Types and Definitions
//!
//! This crate provides the foundational types for page annotations drawn
//! over rendered PDF pages. It includes:
//!
//! - **Geometry**: Points, sizes and bounds in surface pixels ([`geometry`] module)
//! - **Colors**: CSS color parsing for stroke and fill colors ([`color::Color`])
//! - **Tools**: The closed annotation tool set and toolbar constants ([`tool`] module)
//! - **Strokes**: The committed annotation unit ([`stroke::Stroke`])
//! - **Records**: The persisted record codec ([`record::AnnotationRecord`])
//! - **Page store**: Strokes indexed by page ([`page_store::PageStore`])
//! - **Draw**: Per-tool rendering math producing paint primitives ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod page_store;
pub mod record;
pub mod stroke;
pub mod tool;
