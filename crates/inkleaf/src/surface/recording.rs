//! A surface that records its display list.

use inkleaf_core::{draw::Primitive, geometry::Size};

use super::Surface;

/// Keeps every primitive painted since the last clear.
///
/// # Examples
///
/// ```
/// # use inkleaf::surface::{RecordingSurface, Surface};
/// # use inkleaf_core::geometry::Size;
/// let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
/// surface.clear();
/// assert!(surface.primitives().is_empty());
/// assert_eq!(surface.clear_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    primitives: Vec<Primitive>,
    clear_count: usize,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Returns the primitives painted since the last clear, in paint order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Returns how many times the surface has been cleared.
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    /// Takes the recorded primitives, leaving the display list empty.
    pub fn take_primitives(&mut self) -> Vec<Primitive> {
        std::mem::take(&mut self.primitives)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.primitives.clear();
        self.clear_count += 1;
    }

    fn draw(&mut self, primitive: &Primitive) {
        self.primitives.push(primitive.clone());
    }
}
