//! The canonical drawn-annotation unit.
//!
//! A [`Stroke`] is one committed annotation action: a traced path, a placed
//! shape, a text note or an image. Which optional fields are meaningful
//! depends on the stroke's [`Tool`]:
//!
//! | Tool family | `points`               | extra fields            |
//! |-------------|------------------------|-------------------------|
//! | freehand    | full traced path (≥ 1) |                         |
//! | shape       | drag anchor only       | `end_x`, `end_y`, fill  |
//! | text        | anchor only            | `text`                  |
//! | image       | placement point only   | `image_data`            |

use crate::{geometry::Point, tool::Tool};

/// One committed annotation on one page.
///
/// # Examples
///
/// ```
/// # use inkleaf_core::{geometry::Point, stroke::Stroke, tool::Tool};
/// let arrow = Stroke::new(Tool::Arrow, 1, "#dc2626", 3)
///     .with_points(vec![Point::new(0.0, 0.0)])
///     .with_end(Point::new(100.0, 0.0));
///
/// assert_eq!(arrow.resolved_end(), Some(Point::new(100.0, 0.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    tool: Tool,
    points: Vec<Point>,
    color: String,
    size: u32,
    text: Option<String>,
    page: u32,
    end_x: Option<f32>,
    end_y: Option<f32>,
    image_data: Option<String>,
    fill_color: Option<String>,
}

impl Stroke {
    /// Creates an empty stroke for `page` drawn with `tool`.
    ///
    /// The size is stored as given; clamping to the toolbar range is the
    /// producer's job.
    pub fn new(tool: Tool, page: u32, color: impl Into<String>, size: u32) -> Self {
        Self {
            tool,
            points: Vec::new(),
            color: color.into(),
            size,
            text: None,
            page,
            end_x: None,
            end_y: None,
            image_data: None,
            fill_color: None,
        }
    }

    /// Replaces the point list.
    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }

    /// Sets both drag-end coordinates.
    pub fn with_end(mut self, end: Point) -> Self {
        self.end_x = Some(end.x());
        self.end_y = Some(end.y());
        self
    }

    /// Sets the drag-end coordinates independently.
    pub fn with_end_coords(mut self, end_x: Option<f32>, end_y: Option<f32>) -> Self {
        self.end_x = end_x;
        self.end_y = end_y;
        self
    }

    /// Sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets or clears the text content.
    pub fn with_optional_text(mut self, text: Option<String>) -> Self {
        self.text = text;
        self
    }

    /// Sets or clears the image data URI.
    pub fn with_image_data(mut self, image_data: Option<String>) -> Self {
        self.image_data = image_data;
        self
    }

    /// Sets or clears the fill color.
    pub fn with_fill_color(mut self, fill_color: Option<String>) -> Self {
        self.fill_color = fill_color;
        self
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the CSS color string as recorded.
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the 1-based page this stroke belongs to.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn end_x(&self) -> Option<f32> {
        self.end_x
    }

    pub fn end_y(&self) -> Option<f32> {
        self.end_y
    }

    pub fn image_data(&self) -> Option<&str> {
        self.image_data.as_deref()
    }

    pub fn fill_color(&self) -> Option<&str> {
        self.fill_color.as_deref()
    }

    /// Returns the first point, the anchor of shape, text and image strokes.
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Returns true if the stroke has no points and therefore draws nothing.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Resolves the end point used by shape rendering.
    ///
    /// Each recorded end coordinate wins; a missing one falls back to the
    /// last traced point, which for single-point strokes is the start.
    /// Returns `None` only for an empty stroke.
    pub fn resolved_end(&self) -> Option<Point> {
        let last = self.points.last().copied()?;
        Some(Point::new(
            self.end_x.unwrap_or(last.x()),
            self.end_y.unwrap_or(last.y()),
        ))
    }
}
