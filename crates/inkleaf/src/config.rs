//! Configuration types for Inkleaf annotation sessions.
//!
//! This module provides configuration structures that control the drawing
//! surface, the initial tool settings and output styling. All types
//! implement [`serde::Deserialize`] for loading from external sources;
//! every field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`CanvasConfig`] - Surface dimensions and gesture policy.
//! - [`ToolConfig`] - Tool, color, size and fill selected at session start.
//! - [`StyleConfig`] - Visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use inkleaf::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.tools().size(), 3);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use inkleaf_core::{
    color::Color,
    tool::{self, DEFAULT_FILL_COLOR, DEFAULT_SIZE, DEFAULT_STROKE_COLOR, Tool},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Initial tool settings section.
    #[serde(default)]
    tools: ToolConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(canvas: CanvasConfig, tools: ToolConfig, style: StyleConfig) -> Self {
        Self {
            canvas,
            tools,
            style,
        }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the initial tool settings.
    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Drawing surface dimensions and gesture policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Surface width in raster pixels.
    width: f32,

    /// Surface height in raster pixels.
    height: f32,

    /// Drop shape gestures whose end equals their anchor instead of
    /// committing a zero-extent shape.
    discard_degenerate_shapes: bool,
}

impl Default for CanvasConfig {
    /// A US Letter page rendered at 96 DPI.
    fn default() -> Self {
        Self {
            width: 816.0,
            height: 1056.0,
            discard_degenerate_shapes: false,
        }
    }
}

impl CanvasConfig {
    /// Creates a new [`CanvasConfig`] with the given surface dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_discard_degenerate_shapes(mut self, discard: bool) -> Self {
        self.discard_degenerate_shapes = discard;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns true if zero-extent shape gestures are dropped.
    pub fn discard_degenerate_shapes(&self) -> bool {
        self.discard_degenerate_shapes
    }
}

/// Tool settings selected when a session starts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    tool: Tool,
    color: String,
    size: u32,
    fill_color: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            color: DEFAULT_STROKE_COLOR.to_string(),
            size: DEFAULT_SIZE,
            fill_color: DEFAULT_FILL_COLOR.to_string(),
        }
    }
}

impl ToolConfig {
    /// Returns the initially active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Returns the initial stroke color as a CSS string.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the initial stroke size, clamped to the toolbar range.
    pub fn size(&self) -> u32 {
        tool::clamp_size(self.size)
    }

    /// Returns the initial background-highlight fill color.
    pub fn fill_color(&self) -> &str {
        &self.fill_color
    }
}

/// Visual styling configuration for exported pages.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] painted under annotations, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`] with the given background color string.
    pub fn new(background_color: Option<String>) -> Self {
        Self { background_color }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}
