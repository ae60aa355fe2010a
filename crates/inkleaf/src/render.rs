//! Painting strokes onto a surface.

use log::trace;

use inkleaf_core::{
    draw::{Primitive, stroke_primitives},
    stroke::Stroke,
    tool::Tool,
};

use crate::{image::ImageCache, surface::Surface};

/// Paints one stroke on top of the surface's current content.
///
/// An image stroke whose picture has not been decoded yet schedules a
/// decode in `images` and paints nothing; it appears once the decode is
/// resolved and the page is rendered again.
pub fn render_stroke<S: Surface + ?Sized>(
    surface: &mut S,
    stroke: &Stroke,
    images: &mut ImageCache,
) {
    if stroke.tool() == Tool::Image {
        if let Some(data) = stroke.image_data() {
            images.request(stroke.page(), data);
        }
    }

    for primitive in stroke_primitives(stroke, &*images) {
        surface.draw(&primitive);
    }
}

/// Clears the surface and paints `strokes` in order, later strokes on top.
pub fn render_page<S: Surface + ?Sized>(
    surface: &mut S,
    strokes: &[Stroke],
    images: &mut ImageCache,
) {
    surface.clear();
    for stroke in strokes {
        render_stroke(surface, stroke, images);
    }
    trace!(strokes = strokes.len(); "Rendered page");
}

/// Paints primitives produced outside of a committed stroke, such as
/// pointer-down dots and incremental freehand segments.
pub fn paint<S: Surface + ?Sized>(
    surface: &mut S,
    primitives: impl IntoIterator<Item = Primitive>,
) {
    for primitive in primitives {
        surface.draw(&primitive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use inkleaf_core::geometry::{Point, Size};

    fn draw_stroke(x: f32) -> Stroke {
        Stroke::new(Tool::Draw, 1, "#1a2744", 3)
            .with_points(vec![Point::new(x, x), Point::new(x + 1.0, x + 1.0)])
    }

    #[test]
    fn test_render_page_clears_then_draws_in_order() {
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        let mut images = ImageCache::new();
        render_page(&mut surface, &[draw_stroke(1.0)], &mut images);
        render_page(&mut surface, &[draw_stroke(1.0), draw_stroke(5.0)], &mut images);

        assert_eq!(surface.clear_count(), 2);
        assert_eq!(surface.primitives().len(), 2);
        assert_eq!(
            surface.primitives()[1],
            stroke_primitives(&draw_stroke(5.0), &images)[0]
        );
    }

    #[test]
    fn test_image_stroke_schedules_decode() {
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        let mut images = ImageCache::new();
        let stroke = Stroke::new(Tool::Image, 4, "red", 3)
            .with_points(vec![Point::new(0.0, 0.0)])
            .with_image_data(Some("data:image/png;base64,AAAA".to_string()));

        render_stroke(&mut surface, &stroke, &mut images);

        assert!(surface.primitives().is_empty());
        let requests = images.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].page(), 4);
    }
}
