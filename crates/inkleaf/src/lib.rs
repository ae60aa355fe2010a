//! Inkleaf - freehand and shape annotations over paged documents.
//!
//! Pointer input interpretation, per-page stroke storage and rendering for
//! an annotation layer drawn over PDF pages. Strokes are exchanged with a
//! persistence collaborator as [`record::AnnotationRecord`]s; rendering
//! targets any [`surface::Surface`], with an SVG surface included.

pub mod canvas;
pub mod config;
pub mod image;
pub mod input;
pub mod persist;
pub mod render;
pub mod surface;

mod error;

pub use inkleaf_core::{color, draw, geometry, page_store, record, stroke, tool};

pub use error::InkleafError;

use log::{debug, info};

use canvas::AnnotationCanvas;
use config::AppConfig;
use geometry::Size;
use record::AnnotationRecord;
use surface::SvgSurface;

/// Builder for rendering persisted annotations to SVG.
///
/// # Examples
///
/// ```
/// use inkleaf::{PageRenderer, config::AppConfig};
///
/// let renderer = PageRenderer::new(AppConfig::default());
/// let svg = renderer.render_svg(&[], 1).expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct PageRenderer {
    config: AppConfig,
}

impl PageRenderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Creates an interactive canvas drawing onto an SVG surface sized and
    /// styled from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InkleafError::Config`] if the configured background color
    /// cannot be parsed.
    pub fn canvas(&self) -> Result<AnnotationCanvas<SvgSurface>, InkleafError> {
        let background = self
            .config
            .style()
            .background_color()
            .map_err(InkleafError::Config)?;
        let size = Size::new(self.config.canvas().width(), self.config.canvas().height());
        debug!(width = size.width(), height = size.height(); "Creating SVG canvas");

        let surface = SvgSurface::new(size).with_background(background);
        Ok(AnnotationCanvas::new(surface, &self.config))
    }

    /// Render one page of persisted annotations to an SVG string.
    ///
    /// Undecodable records are skipped. Placed images are decoded before
    /// export, so they appear in the output when their data is valid.
    ///
    /// # Errors
    ///
    /// Returns [`InkleafError`] for an invalid configuration or page 0.
    pub fn render_svg(
        &self,
        records: &[AnnotationRecord],
        page: u32,
    ) -> Result<String, InkleafError> {
        if page == 0 {
            return Err(InkleafError::Export("page numbers start at 1".to_string()));
        }

        let mut canvas = self.canvas()?;
        canvas.load(records);
        canvas.set_page(page);
        canvas.decode_pending_images();

        let svg = canvas.surface().to_svg_string();
        info!(page, strokes = canvas.store().page(page).len(); "Page rendered to SVG");
        Ok(svg)
    }
}
