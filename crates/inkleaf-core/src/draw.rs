//! Drawing vocabulary for annotation rendering
//!
//! This module turns strokes into surface-independent paint operations.
//! [`stroke_primitives`] maps a [`Stroke`](crate::stroke::Stroke) to a list of
//! [`Primitive`]s styled with [`LineStyle`] and [`FillStyle`]; any surface
//! that can paint those primitives can render annotations.
mod annotation;
mod line_style;
mod primitive;

pub use annotation::{
    ARROWHEAD_LENGTH_FACTOR, ARROWHEAD_MIN_LENGTH, ARROWHEAD_SPREAD, BACKGROUND_HIGHLIGHT_ALPHA,
    ERASER_WIDTH_FACTOR, HIGHLIGHT_ALPHA, HIGHLIGHT_WIDTH_FACTOR, IMAGE_MAX_EXTENT, ImageLookup,
    NoImages, TEXT_FONT_FAMILY, arrowhead, dot_primitive, ellipse_geometry, fit_image,
    shape_bounds, stroke_primitives, text_font_size, triangle_vertices,
};
pub use line_style::{Composite, FillStyle, LineCap, LineJoin, LineStyle};
pub use primitive::{Font, PathCommand, PathData, Primitive};
