//! Color handling for Inkleaf annotations
//!
//! Strokes keep their color as the CSS string the producing UI handed us, so
//! records round-trip byte for byte. [`Color`] is the parsed form used at
//! render time; it wraps the `DynamicColor` type from the color crate.

use std::str::FromStr;

use color::DynamicColor;
use log::warn;

/// A parsed CSS color with its alpha channel.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses any CSS color: hex, functional notation or a named color.
    ///
    /// # Examples
    ///
    /// ```
    /// use inkleaf_core::color::Color;
    ///
    /// assert!(Color::new("#1a2744").is_ok());
    /// assert!(Color::new("rgb(220, 38, 38)").is_ok());
    /// assert!(Color::new("ink").is_err());
    /// ```
    pub fn new(css: &str) -> Result<Self, String> {
        DynamicColor::from_str(css)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{css}`: {err}"))
    }

    /// Parses a stored CSS color, falling back to the default color.
    ///
    /// A 2D canvas silently ignores an unparseable style assignment and keeps
    /// drawing in black; annotations rendered here behave the same way.
    ///
    /// ```
    /// use inkleaf_core::color::Color;
    ///
    /// assert_eq!(Color::parse_or_default("not-a-color"), Color::default());
    /// ```
    pub fn parse_or_default(css: &str) -> Self {
        Self::new(css).unwrap_or_else(|err| {
            warn!(err:%; "Falling back to default color");
            Self::default()
        })
    }

    /// Replaces the alpha channel, e.g. for translucent highlighter ink.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
