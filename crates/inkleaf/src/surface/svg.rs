//! SVG rendering surface.
//!
//! Painting on an SVG document is append-only, so cut-out compositing is
//! emulated: every [`Composite::DestinationOut`] primitive becomes a
//! `<mask>` (white everywhere except the erased outline) applied to a group
//! wrapping everything painted before it. Content painted afterwards sits
//! outside that group and is unaffected, matching raster behavior.

use log::{debug, trace};
use svg::{
    Document, Node,
    node::element::{self as svg_element, path::Data},
};

use inkleaf_core::{
    apply_line_style,
    color::Color,
    draw::{Composite, LineStyle, PathCommand, PathData, Primitive},
    geometry::Size,
};

use super::Surface;

/// Builds an SVG document from painted primitives.
///
/// # Examples
///
/// ```
/// # use inkleaf::surface::{Surface, SvgSurface};
/// # use inkleaf_core::{color::Color, draw::{FillStyle, Primitive}, geometry::{Point, Size}};
/// let mut surface = SvgSurface::new(Size::new(200.0, 100.0));
/// surface.draw(&Primitive::Disc {
///     center: Point::new(10.0, 10.0),
///     radius: 2.0,
///     fill: FillStyle::new(Color::default(), 1.0),
/// });
///
/// let svg = surface.to_svg_string();
/// assert!(svg.contains("<circle"));
/// ```
#[derive(Debug)]
pub struct SvgSurface {
    size: Size,
    background: Option<Color>,
    content: Vec<Box<dyn Node>>,
    masks: Vec<svg_element::Mask>,
}

impl SvgSurface {
    /// Creates an empty, transparent surface.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            background: None,
            content: Vec::new(),
            masks: Vec::new(),
        }
    }

    /// Paints `color` under all annotations when exporting.
    ///
    /// The background is not part of the erasable content, mirroring an
    /// annotation layer stacked over a rendered page.
    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    /// Returns the number of top-level nodes painted since the last clear.
    pub fn node_count(&self) -> usize {
        self.content.len()
    }

    /// Builds the SVG document for the current content.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", self.size.width(), self.size.height()),
            )
            .set("width", self.size.width())
            .set("height", self.size.height());

        if let Some(color) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", self.size.width())
                    .set("height", self.size.height())
                    .set("fill", color),
            );
        }

        if !self.masks.is_empty() {
            let defs = self
                .masks
                .iter()
                .cloned()
                .fold(svg_element::Definitions::new(), |defs, mask| defs.add(mask));
            doc = doc.add(defs);
        }

        self.content
            .iter()
            .cloned()
            .fold(doc, |doc, node| doc.add(node))
    }

    /// Serializes the current content as an SVG string.
    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }

    fn erase(&mut self, path: &PathData, style: &LineStyle) {
        if self.content.is_empty() {
            trace!("Nothing to erase");
            return;
        }

        let mask_id = format!("erase-{}", self.masks.len() + 1);
        let cutout = apply_line_style!(
            svg_element::Path::new().set("d", path_data(path)),
            style
        )
        .set("stroke", "black");

        let mask = svg_element::Mask::new()
            .set("id", mask_id.as_str())
            .set("maskUnits", "userSpaceOnUse")
            .set("x", 0)
            .set("y", 0)
            .set("width", self.size.width())
            .set("height", self.size.height())
            .add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", self.size.width())
                    .set("height", self.size.height())
                    .set("fill", "white"),
            )
            .add(cutout);
        self.masks.push(mask);

        let erased = self.content.drain(..).fold(
            svg_element::Group::new().set("mask", format!("url(#{mask_id})")),
            |group, node| group.add(node),
        );
        self.content.push(Box::new(erased));
        debug!(mask_id:%; "Applied eraser mask");
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.content.clear();
        self.masks.clear();
    }

    fn draw(&mut self, primitive: &Primitive) {
        trace!(primitive:?; "Painting primitive");

        match primitive {
            Primitive::Path { path, style } if style.composite() == Composite::DestinationOut => {
                self.erase(path, style);
            }
            _ => self.content.push(primitive_node(primitive)),
        }
    }
}

fn path_data(path: &PathData) -> Data {
    path.commands()
        .iter()
        .fold(Data::new(), |data, command| match command {
            PathCommand::MoveTo(point) => data.move_to((point.x(), point.y())),
            PathCommand::LineTo(point) => data.line_to((point.x(), point.y())),
            PathCommand::Close => data.close(),
        })
}

fn primitive_node(primitive: &Primitive) -> Box<dyn Node> {
    match primitive {
        Primitive::Path { path, style } => Box::new(apply_line_style!(
            svg_element::Path::new().set("d", path_data(path)),
            style
        )),
        Primitive::StrokeRect { bounds, style } => Box::new(apply_line_style!(
            svg_element::Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height()),
            style
        )),
        Primitive::FillRect { bounds, fill } => Box::new(
            svg_element::Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("fill", &fill.color())
                .set("fill-opacity", fill.color().alpha())
                .set("opacity", fill.alpha()),
        ),
        Primitive::StrokeEllipse {
            center,
            radii,
            style,
        } => Box::new(apply_line_style!(
            svg_element::Ellipse::new()
                .set("cx", center.x())
                .set("cy", center.y())
                .set("rx", radii.width())
                .set("ry", radii.height()),
            style
        )),
        Primitive::Disc {
            center,
            radius,
            fill,
        } => Box::new(
            svg_element::Circle::new()
                .set("cx", center.x())
                .set("cy", center.y())
                .set("r", *radius)
                .set("fill", &fill.color())
                .set("fill-opacity", fill.color().alpha())
                .set("opacity", fill.alpha()),
        ),
        Primitive::Text {
            content,
            origin,
            font,
            fill,
        } => Box::new(
            svg_element::Text::new(content.as_str())
                .set("x", origin.x())
                .set("y", origin.y())
                .set("font-size", font.size())
                .set("font-family", font.family())
                .set("fill", &fill.color())
                .set("fill-opacity", fill.color().alpha())
                .set("opacity", fill.alpha()),
        ),
        Primitive::Image { href, bounds } => Box::new(
            svg_element::Image::new()
                .set("href", href.as_str())
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("preserveAspectRatio", "none"),
        ),
    }
}
