//! Annotation tools and their toolbar defaults.
//!
//! A [`Tool`] is the drawing mode active when a gesture starts. It decides how
//! the gesture is interpreted (traced path, anchor-and-drag, text placement,
//! image placement) and how the resulting stroke is rendered.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Stroke color selected when a session starts.
pub const DEFAULT_STROKE_COLOR: &str = "#1a2744";

/// Fill color used by the background highlighter when none is recorded.
pub const DEFAULT_FILL_COLOR: &str = "#fef08a";

/// Base stroke size selected when a session starts.
pub const DEFAULT_SIZE: u32 = 3;

/// Smallest stroke size the toolbar produces.
pub const MIN_SIZE: u32 = 1;

/// Largest stroke size the toolbar produces.
pub const MAX_SIZE: u32 = 40;

/// Increment applied by the toolbar's size buttons.
pub const SIZE_STEP: u32 = 2;

/// Foreground colors offered by the toolbar.
pub const STROKE_PALETTE: [&str; 9] = [
    "#1a2744", "#dc2626", "#2563eb", "#16a34a", "#d97706", "#7c3aed", "#db2777", "#000000",
    "#ffffff",
];

/// Fill colors offered for the background highlighter.
pub const FILL_PALETTE: [&str; 7] = [
    "#fef08a", "#bbf7d0", "#bfdbfe", "#fecaca", "#e9d5ff", "#fed7aa", "#f0fdf4",
];

/// Clamps a stroke size into the range the toolbar produces.
pub fn clamp_size(size: u32) -> u32 {
    size.clamp(MIN_SIZE, MAX_SIZE)
}

/// How a tool turns pointer input into a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolFamily {
    /// Traced path: every pointer sample becomes a point.
    Freehand,
    /// Anchor plus drag-to-end.
    Shape,
    /// Anchor plus typed content.
    Text,
    /// Single click placing a pending image.
    Image,
}

/// The closed set of annotation tools.
///
/// Wire names match the `annotationType` values found in persisted records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    #[default]
    Draw,
    Highlight,
    Text,
    Eraser,
    Rectangle,
    Circle,
    Triangle,
    Arrow,
    Line,
    Image,
    BackgroundHighlight,
}

impl Tool {
    /// All tools, in toolbar order.
    pub const ALL: [Tool; 11] = [
        Tool::Draw,
        Tool::Highlight,
        Tool::Text,
        Tool::Eraser,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Triangle,
        Tool::Arrow,
        Tool::Line,
        Tool::BackgroundHighlight,
        Tool::Image,
    ];

    /// Returns the wire name of this tool.
    pub fn name(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Highlight => "highlight",
            Self::Text => "text",
            Self::Eraser => "eraser",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Arrow => "arrow",
            Self::Line => "line",
            Self::Image => "image",
            Self::BackgroundHighlight => "backgroundHighlight",
        }
    }

    /// Returns how this tool interprets a gesture.
    pub fn family(self) -> ToolFamily {
        match self {
            Self::Draw | Self::Highlight | Self::Eraser => ToolFamily::Freehand,
            Self::Rectangle
            | Self::Circle
            | Self::Triangle
            | Self::Arrow
            | Self::Line
            | Self::BackgroundHighlight => ToolFamily::Shape,
            Self::Text => ToolFamily::Text,
            Self::Image => ToolFamily::Image,
        }
    }

    /// Returns true for anchor-and-drag tools.
    pub fn is_shape(self) -> bool {
        self.family() == ToolFamily::Shape
    }

    /// Returns true for traced-path tools.
    pub fn is_freehand(self) -> bool {
        self.family() == ToolFamily::Freehand
    }

    /// Minimum number of traced points a freehand gesture needs to commit.
    ///
    /// The eraser paints nothing for a single point, so a tap with it leaves
    /// no stroke behind.
    pub fn min_points(self) -> usize {
        match self {
            Self::Eraser => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| format!("unknown annotation tool `{s}`"))
    }
}
