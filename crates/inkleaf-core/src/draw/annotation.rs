//! Per-tool translation of strokes into primitives.
//!
//! [`stroke_primitives`] is the single place that knows how each annotation
//! tool looks on the page. Everything here is pure: surfaces only ever see
//! the resulting [`Primitive`] list.

use std::f32::consts::PI;

use log::trace;

use crate::{
    color::Color,
    draw::{Composite, FillStyle, Font, LineCap, LineJoin, LineStyle, PathData, Primitive},
    geometry::{Bounds, Point, Size},
    stroke::Stroke,
    tool::{DEFAULT_FILL_COLOR, Tool},
};

/// Global alpha of highlighter strokes.
pub const HIGHLIGHT_ALPHA: f32 = 0.35;

/// Global alpha of background-highlight fills.
pub const BACKGROUND_HIGHLIGHT_ALPHA: f32 = 0.45;

/// Highlighter line width as a multiple of the stroke size.
pub const HIGHLIGHT_WIDTH_FACTOR: f32 = 4.0;

/// Eraser line width as a multiple of the stroke size.
pub const ERASER_WIDTH_FACTOR: f32 = 6.0;

/// Shortest arrowhead leg, in pixels.
pub const ARROWHEAD_MIN_LENGTH: f32 = 12.0;

/// Arrowhead leg length as a multiple of the stroke size.
pub const ARROWHEAD_LENGTH_FACTOR: f32 = 4.0;

/// Angle between the arrow shaft and each arrowhead leg.
pub const ARROWHEAD_SPREAD: f32 = PI / 6.0;

/// Largest width or height a placed image is drawn at.
pub const IMAGE_MAX_EXTENT: f32 = 300.0;

/// Font family used for text notes.
pub const TEXT_FONT_FAMILY: &str = "Inter, sans-serif";

/// Source of natural image dimensions for image strokes.
///
/// Image strokes carry an encoded data URI; decoding it is not this crate's
/// concern. Renderers ask the lookup for the decoded size and skip the image
/// while it is not available.
pub trait ImageLookup {
    /// Returns the natural pixel size of the decoded image, if ready.
    fn natural_size(&self, data: &str) -> Option<Size>;
}

/// An [`ImageLookup`] that never has an image ready.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageLookup for NoImages {
    fn natural_size(&self, _data: &str) -> Option<Size> {
        None
    }
}

/// Returns the text font size in pixels for a stroke size.
pub fn text_font_size(size: u32) -> f32 {
    size as f32 * 4.0 + 12.0
}

/// Returns the axis-aligned box spanned by a drag.
pub fn shape_bounds(start: Point, end: Point) -> Bounds {
    Bounds::from_corners(start, end)
}

/// Returns the center and radii of the ellipse inscribed in a drag box.
pub fn ellipse_geometry(start: Point, end: Point) -> (Point, Size) {
    let bounds = shape_bounds(start, end);
    (bounds.center(), bounds.to_size().scale(0.5))
}

/// Returns the triangle vertices for a drag, in drawing order.
///
/// The apex sits horizontally centered on the anchor's row; the base runs
/// along the end row from the end point back to the anchor's column.
pub fn triangle_vertices(start: Point, end: Point) -> [Point; 3] {
    let mid_x = (start.x() + end.x()) / 2.0;
    [
        Point::new(mid_x, start.y()),
        end,
        Point::new(start.x(), end.y()),
    ]
}

/// Returns the two arrowhead leg endpoints for an arrow ending at `to`.
///
/// Legs are `max(12, size * 4)` long and spread 30° to either side of the
/// shaft, pointing back toward `from`.
pub fn arrowhead(from: Point, to: Point, size: u32) -> [Point; 2] {
    let delta = to.sub_point(from);
    let angle = delta.y().atan2(delta.x());
    let length = ARROWHEAD_MIN_LENGTH.max(size as f32 * ARROWHEAD_LENGTH_FACTOR);

    let leg = |theta: f32| to.add_point(Point::new(theta.cos(), theta.sin()).scale(-length));
    [leg(angle - ARROWHEAD_SPREAD), leg(angle + ARROWHEAD_SPREAD)]
}

/// Scales a natural image size to fit within 300×300, never upscaling.
///
/// An image with no extent stays empty.
pub fn fit_image(natural: Size) -> Size {
    if natural.is_zero() {
        return natural;
    }
    let scale = (IMAGE_MAX_EXTENT / natural.width())
        .min(IMAGE_MAX_EXTENT / natural.height())
        .min(1.0);
    natural.scale(scale)
}

/// Translates a stroke into the primitives that draw it.
///
/// Returns an empty list for strokes without points, text strokes without
/// text and image strokes whose image is not decoded yet.
pub fn stroke_primitives(stroke: &Stroke, images: &impl ImageLookup) -> Vec<Primitive> {
    let (Some(start), Some(end)) = (stroke.start(), stroke.resolved_end()) else {
        return Vec::new();
    };
    let color = Color::parse_or_default(stroke.color());
    let width = stroke.size() as f32;
    let outline = LineStyle::new(color, width);

    let primitives = match stroke.tool() {
        Tool::Highlight => vec![Primitive::Path {
            path: PathData::polyline(stroke.points()),
            style: LineStyle::new(color, width * HIGHLIGHT_WIDTH_FACTOR)
                .with_alpha(HIGHLIGHT_ALPHA)
                .with_cap(LineCap::Square)
                .with_join(LineJoin::Round),
        }],
        Tool::Draw => vec![Primitive::Path {
            path: PathData::polyline(stroke.points()),
            style: outline.with_cap(LineCap::Round).with_join(LineJoin::Round),
        }],
        Tool::Eraser => vec![Primitive::Path {
            path: PathData::polyline(stroke.points()),
            style: LineStyle::new(Color::default(), width * ERASER_WIDTH_FACTOR)
                .with_cap(LineCap::Round)
                .with_join(LineJoin::Round)
                .with_composite(Composite::DestinationOut),
        }],
        Tool::Text => match stroke.text() {
            Some(text) if !text.is_empty() => vec![Primitive::Text {
                content: text.to_string(),
                origin: start,
                font: Font::new(text_font_size(stroke.size()), TEXT_FONT_FAMILY),
                fill: FillStyle::new(color, 1.0),
            }],
            _ => Vec::new(),
        },
        Tool::Rectangle => vec![Primitive::StrokeRect {
            bounds: shape_bounds(start, end),
            style: outline.with_cap(LineCap::Round),
        }],
        Tool::Circle => {
            let (center, radii) = ellipse_geometry(start, end);
            vec![Primitive::StrokeEllipse {
                center,
                radii,
                style: outline,
            }]
        }
        Tool::Triangle => {
            let [apex, right, left] = triangle_vertices(start, end);
            vec![Primitive::Path {
                path: PathData::new()
                    .move_to(apex)
                    .line_to(right)
                    .line_to(left)
                    .close(),
                style: outline.with_cap(LineCap::Round).with_join(LineJoin::Round),
            }]
        }
        Tool::Arrow => {
            let style = outline.with_cap(LineCap::Round);
            let [left, right] = arrowhead(start, end, stroke.size());
            vec![
                Primitive::Path {
                    path: PathData::new().move_to(start).line_to(end),
                    style: style.clone(),
                },
                Primitive::Path {
                    path: PathData::new()
                        .move_to(end)
                        .line_to(left)
                        .move_to(end)
                        .line_to(right),
                    style,
                },
            ]
        }
        Tool::Line => vec![Primitive::Path {
            path: PathData::new().move_to(start).line_to(end),
            style: outline.with_cap(LineCap::Round),
        }],
        Tool::BackgroundHighlight => {
            let fill = Color::parse_or_default(stroke.fill_color().unwrap_or(DEFAULT_FILL_COLOR));
            vec![Primitive::FillRect {
                bounds: shape_bounds(start, end),
                fill: FillStyle::new(fill, BACKGROUND_HIGHLIGHT_ALPHA),
            }]
        }
        Tool::Image => stroke
            .image_data()
            .and_then(|data| {
                let size = fit_image(images.natural_size(data)?);
                Some(vec![Primitive::Image {
                    href: data.to_string(),
                    bounds: Bounds::new_from_top_left(start, size),
                }])
            })
            .unwrap_or_default(),
    };

    trace!(tool:% = stroke.tool(), primitives = primitives.len(); "Translated stroke");
    primitives
}

/// Returns the immediate feedback mark painted at pointer-down.
///
/// Draw strokes get a dot of the stroke color; highlight strokes get a
/// translucent dot as wide as the highlighter. Other tools paint nothing.
pub fn dot_primitive(stroke: &Stroke) -> Option<Primitive> {
    let center = stroke.start()?;
    let color = Color::parse_or_default(stroke.color());
    let size = stroke.size() as f32;

    match stroke.tool() {
        Tool::Draw => Some(Primitive::Disc {
            center,
            radius: size / 2.0,
            fill: FillStyle::new(color, 1.0),
        }),
        Tool::Highlight => Some(Primitive::Disc {
            center,
            radius: size * HIGHLIGHT_WIDTH_FACTOR / 2.0,
            fill: FillStyle::new(color, HIGHLIGHT_ALPHA),
        }),
        _ => None,
    }
}
