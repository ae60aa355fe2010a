//! Line and fill paint definitions.
//!
//! # Overview
//!
//! Exported types:
//! - [`LineStyle`]: color, width, global alpha, cap, join and compositing of a stroked outline
//! - [`FillStyle`]: color and global alpha of a filled area
//! - [`LineCap`]: how line endpoints are rendered (butt, round, square)
//! - [`LineJoin`]: how line corners are rendered (miter, round, bevel)
//! - [`Composite`]: how painted pixels combine with what is already on the surface
//! - [`apply_line_style!`](crate::apply_line_style!): macro applying a line style to SVG elements
//!
//! The vocabulary follows the 2D canvas / SVG model that browser-drawn
//! annotations use.
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `1` |
//! | `alpha` | `opacity` | `0.35` |
//! | `width` | `stroke-width` | `12.0` |
//! | `cap` | `stroke-linecap` | `"butt"`, `"round"`, `"square"` |
//! | `join` | `stroke-linejoin` | `"miter"`, `"round"`, `"bevel"` |

use crate::color::Color;

/// Defines how line endpoints are rendered.
///
/// Maps directly to SVG `stroke-linecap` attribute values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    /// Flat cap at the exact endpoint (SVG default)
    #[default]
    Butt,
    /// Rounded cap extending beyond the endpoint by half the stroke width
    Round,
    /// Square cap extending beyond the endpoint by half the stroke width
    Square,
}

impl LineCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Defines how line corners (joins) are rendered.
///
/// Maps directly to SVG `stroke-linejoin` attribute values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    /// Sharp corner with mitered point (SVG default)
    #[default]
    Miter,
    /// Rounded corner
    Round,
    /// Beveled (cut-off) corner
    Bevel,
}

impl LineJoin {
    /// Returns the SVG stroke-linejoin value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// How newly painted pixels combine with the surface.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Paint over existing content.
    #[default]
    SourceOver,
    /// Cut out: destination pixels under the painted area become transparent.
    DestinationOut,
}

/// A stroked-outline paint.
///
/// # Examples
///
/// ```
/// use inkleaf_core::color::Color;
/// use inkleaf_core::draw::{LineCap, LineJoin, LineStyle};
///
/// let pen = LineStyle::new(Color::new("#1a2744").unwrap(), 3.0)
///     .with_cap(LineCap::Round)
///     .with_join(LineJoin::Round);
/// assert_eq!(pen.width(), 3.0);
/// assert_eq!(pen.alpha(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    color: Color,
    width: f32,
    alpha: f32,
    cap: LineCap,
    join: LineJoin,
    composite: Composite,
}

impl LineStyle {
    /// Creates an opaque line with butt caps and miter joins.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            alpha: 1.0,
            cap: LineCap::default(),
            join: LineJoin::default(),
            composite: Composite::default(),
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    pub fn with_composite(mut self, composite: Composite) -> Self {
        self.composite = composite;
        self
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the global alpha applied on top of the color's own alpha.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Returns the line cap style.
    pub fn cap(&self) -> LineCap {
        self.cap
    }

    /// Returns the line join style.
    pub fn join(&self) -> LineJoin {
        self.join
    }

    /// Returns the compositing mode.
    pub fn composite(&self) -> Composite {
        self.composite
    }
}

/// A filled-area paint.
#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    color: Color,
    alpha: f32,
}

impl FillStyle {
    /// Creates a fill with the given color and global alpha.
    pub fn new(color: Color, alpha: f32) -> Self {
        Self { color, alpha }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

/// Apply all line-style attributes to an SVG element.
///
/// Sets stroke color, color opacity, width, cap and join, disables filling,
/// and sets the element `opacity` to the style's global alpha.
///
/// # Examples
///
/// ```
/// use inkleaf_core::color::Color;
/// use inkleaf_core::draw::LineStyle;
/// use svg::node::element as svg_element;
///
/// let style = LineStyle::new(Color::new("black").unwrap(), 2.0).with_alpha(0.35);
/// let rect = svg_element::Rectangle::new()
///     .set("x", 0)
///     .set("y", 0)
///     .set("width", 100)
///     .set("height", 50);
///
/// let rect = inkleaf_core::apply_line_style!(rect, &style);
/// ```
#[macro_export]
macro_rules! apply_line_style {
    ($element:expr, $style:expr) => {{
        $element
            .set("fill", "none")
            .set("stroke", $style.color().to_string())
            .set("stroke-opacity", $style.color().alpha())
            .set("stroke-width", $style.width())
            .set("stroke-linecap", $style.cap().to_svg_value())
            .set("stroke-linejoin", $style.join().to_svg_value())
            .set("opacity", $style.alpha())
    }};
}
