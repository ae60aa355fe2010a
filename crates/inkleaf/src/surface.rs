//! Drawing surfaces.
//!
//! A [`Surface`] is the raster (or vector) target annotations are painted
//! on. The engine never inspects surface contents; it only clears the
//! surface and paints [`Primitive`]s in z-order.
//!
//! Two implementations ship with the crate:
//! - [`SvgSurface`] builds an SVG document.
//! - [`RecordingSurface`] keeps the painted display list.

mod recording;
mod svg;

pub use recording::RecordingSurface;
pub use svg::SvgSurface;

use inkleaf_core::{draw::Primitive, geometry::Size};

/// A paintable page surface.
pub trait Surface {
    /// Returns the surface dimensions in raster pixels.
    fn size(&self) -> Size;

    /// Erases everything painted so far.
    fn clear(&mut self);

    /// Paints one primitive on top of the current content.
    fn draw(&mut self, primitive: &Primitive);
}
