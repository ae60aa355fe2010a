//! Display-list primitives.
//!
//! Strokes are translated into a short list of [`Primitive`]s, each of which
//! a drawing surface can paint without knowing anything about annotation
//! tools. Keeping this list explicit makes the rendering math testable
//! without a rasterizer.

use crate::{
    draw::{Composite, FillStyle, LineStyle},
    geometry::{Bounds, Point, Size},
};

/// One step of a path outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// An outline built from straight segments, possibly with several subpaths.
///
/// # Examples
///
/// ```
/// # use inkleaf_core::{draw::PathData, geometry::Point};
/// let path = PathData::new()
///     .move_to(Point::new(0.0, 0.0))
///     .line_to(Point::new(10.0, 0.0))
///     .line_to(Point::new(5.0, 8.0))
///     .close();
/// assert_eq!(path.commands().len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an open path through `points` in order.
    ///
    /// A single point yields a zero-length segment so round or square caps
    /// still leave a visible mark.
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Self::new();
        let Some((first, rest)) = points.split_first() else {
            return path;
        };

        path = path.move_to(*first);
        if rest.is_empty() {
            return path.line_to(*first);
        }
        rest.iter().fold(path, |path, point| path.line_to(*point))
    }

    pub fn move_to(mut self, point: Point) -> Self {
        self.commands.push(PathCommand::MoveTo(point));
        self
    }

    pub fn line_to(mut self, point: Point) -> Self {
        self.commands.push(PathCommand::LineTo(point));
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Font selection for text primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    size: f32,
    family: String,
}

impl Font {
    pub fn new(size: f32, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }

    /// Returns the font size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn family(&self) -> &str {
        &self.family
    }
}

/// A single paint operation on a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Strokes a path outline.
    Path { path: PathData, style: LineStyle },
    /// Strokes an axis-aligned rectangle outline.
    StrokeRect { bounds: Bounds, style: LineStyle },
    /// Fills an axis-aligned rectangle.
    FillRect { bounds: Bounds, fill: FillStyle },
    /// Strokes an axis-aligned ellipse outline.
    StrokeEllipse {
        center: Point,
        radii: Size,
        style: LineStyle,
    },
    /// Fills a circle.
    Disc {
        center: Point,
        radius: f32,
        fill: FillStyle,
    },
    /// Fills text with its baseline starting at `origin`.
    Text {
        content: String,
        origin: Point,
        font: Font,
        fill: FillStyle,
    },
    /// Draws a decoded image into `bounds`.
    Image { href: String, bounds: Bounds },
}

impl Primitive {
    /// Returns how this primitive combines with existing surface content.
    pub fn composite(&self) -> Composite {
        match self {
            Self::Path { style, .. }
            | Self::StrokeRect { style, .. }
            | Self::StrokeEllipse { style, .. } => style.composite(),
            Self::FillRect { .. } | Self::Disc { .. } | Self::Text { .. } | Self::Image { .. } => {
                Composite::SourceOver
            }
        }
    }
}
