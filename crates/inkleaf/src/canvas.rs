//! The annotation canvas.
//!
//! [`AnnotationCanvas`] ties the pieces together: it owns a [`Surface`], the
//! [`PageStore`], the [`InputMachine`], the toolbar [`ToolState`] and the
//! [`ImageCache`]. Pointer samples go in; paint operations land on the
//! surface and [`CanvasEvent`]s are published to every subscriber.
//!
//! The canvas never persists anything. Callers subscribe, receive one
//! [`CanvasEvent::StrokeCommitted`] per finished gesture and apply whatever
//! save, batching and retry policy they want.

use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, info, trace, warn};

use inkleaf_core::{
    draw::dot_primitive,
    geometry::{Bounds, Point},
    page_store::{LoadSummary, PageStore},
    record::AnnotationRecord,
    stroke::Stroke,
    tool::{self, SIZE_STEP, Tool},
};

use crate::{
    config::AppConfig,
    image::{DecodeRequest, DecodedImage, ImageCache, ImageError},
    input::{GestureSettings, InputEffect, InputMachine},
    render::{paint, render_page, render_stroke},
    surface::Surface,
};

/// Notifications published by the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// A gesture produced a final stroke. Fired exactly once per commit.
    StrokeCommitted(Stroke),
    /// The pending image was placed and cleared from the tool state.
    ImageConsumed,
    /// A text placement opened at this point; the caller should collect text.
    TextPlacementOpened(Point),
    /// The text placement closed, whether or not a stroke was produced.
    TextPlacementClosed,
}

/// Toolbar selections applied to the next gesture.
///
/// # Examples
///
/// ```
/// # use inkleaf::canvas::ToolState;
/// let mut tools = ToolState::default();
/// tools.increase_size();
/// assert_eq!(tools.size(), 5);
///
/// tools.set_size(1);
/// tools.decrease_size();
/// assert_eq!(tools.size(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    tool: Tool,
    color: String,
    size: u32,
    fill_color: String,
    pending_image: Option<String>,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            color: tool::DEFAULT_STROKE_COLOR.to_string(),
            size: tool::DEFAULT_SIZE,
            fill_color: tool::DEFAULT_FILL_COLOR.to_string(),
            pending_image: None,
        }
    }
}

impl ToolState {
    /// Creates the tool state a session starts with.
    pub fn from_config(config: &AppConfig) -> Self {
        let tools = config.tools();
        Self {
            tool: tools.tool(),
            color: tools.color().to_string(),
            size: tools.size(),
            fill_color: tools.fill_color().to_string(),
            pending_image: None,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Sets the stroke size, clamped to `[1, 40]`.
    pub fn set_size(&mut self, size: u32) {
        self.size = tool::clamp_size(size);
    }

    /// Steps the stroke size up by 2, stopping at 40.
    pub fn increase_size(&mut self) {
        self.set_size(self.size.saturating_add(SIZE_STEP));
    }

    /// Steps the stroke size down by 2, stopping at 1.
    pub fn decrease_size(&mut self) {
        self.set_size(self.size.saturating_sub(SIZE_STEP));
    }

    pub fn fill_color(&self) -> &str {
        &self.fill_color
    }

    pub fn set_fill_color(&mut self, fill_color: impl Into<String>) {
        self.fill_color = fill_color.into();
    }

    /// Returns the image payload waiting to be placed by the image tool.
    pub fn pending_image(&self) -> Option<&str> {
        self.pending_image.as_deref()
    }

    /// Hands over an image payload from a file picker.
    pub fn set_pending_image(&mut self, data: Option<String>) {
        self.pending_image = data;
    }

    fn gesture(&self, page: u32) -> GestureSettings {
        GestureSettings::new(
            self.tool,
            self.color.as_str(),
            self.size,
            self.fill_color.as_str(),
            page,
        )
    }
}

/// Interactive annotation layer for one document.
///
/// # Examples
///
/// ```
/// # use inkleaf::{canvas::{AnnotationCanvas, CanvasEvent}, config::AppConfig};
/// # use inkleaf::surface::RecordingSurface;
/// # use inkleaf_core::geometry::{Point, Size};
/// let surface = RecordingSurface::new(Size::new(800.0, 600.0));
/// let mut canvas = AnnotationCanvas::new(surface, &AppConfig::default());
/// let events = canvas.subscribe();
///
/// canvas.pointer_down(Point::new(10.0, 10.0));
/// canvas.pointer_move(Point::new(20.0, 20.0));
/// canvas.pointer_up(Point::new(20.0, 20.0));
///
/// assert!(matches!(events.try_recv(), Ok(CanvasEvent::StrokeCommitted(_))));
/// assert_eq!(canvas.store().page(1).len(), 1);
/// ```
#[derive(Debug)]
pub struct AnnotationCanvas<S: Surface> {
    surface: S,
    store: PageStore,
    input: InputMachine,
    tools: ToolState,
    images: ImageCache,
    page: u32,
    subscribers: Vec<Sender<CanvasEvent>>,
}

impl<S: Surface> AnnotationCanvas<S> {
    /// Creates a canvas showing page 1 with no annotations.
    pub fn new(surface: S, config: &AppConfig) -> Self {
        Self {
            surface,
            store: PageStore::new(),
            input: InputMachine::new()
                .with_discard_degenerate_shapes(config.canvas().discard_degenerate_shapes()),
            tools: ToolState::from_config(config),
            images: ImageCache::new(),
            page: 1,
            subscribers: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    pub fn input(&self) -> &InputMachine {
        &self.input
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    /// Returns the toolbar state; changes apply from the next pointer-down.
    pub fn tools_mut(&mut self) -> &mut ToolState {
        &mut self.tools
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    /// Returns the 1-based page currently shown.
    pub fn current_page(&self) -> u32 {
        self.page
    }

    /// Opens a caller-owned event channel.
    ///
    /// Every event is delivered to every live receiver. Dropping the
    /// receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<CanvasEvent> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Replaces all strokes with those decoded from `records` and redraws.
    pub fn load(&mut self, records: &[AnnotationRecord]) -> LoadSummary {
        let summary = self.store.load(records);
        info!(
            loaded = summary.loaded, skipped = summary.skipped, page = self.page;
            "Canvas loaded annotations"
        );
        self.redraw();
        summary
    }

    /// Switches to `page` and redraws.
    ///
    /// Pages are 1-based; page 0 is ignored and the current page stays shown.
    pub fn set_page(&mut self, page: u32) {
        if page == 0 {
            warn!(current = self.page; "Page numbers start at 1; page change ignored");
            return;
        }
        debug!(from = self.page, to = page; "Page changed");
        self.page = page;
        self.redraw();
    }

    /// Removes every stroke on the current page.
    pub fn clear_page(&mut self) {
        self.store.clear_page(self.page);
        self.redraw();
    }

    /// Clears the surface and paints the current page's strokes.
    pub fn redraw(&mut self) {
        render_page(
            &mut self.surface,
            self.store.page(self.page),
            &mut self.images,
        );
    }

    pub fn pointer_down(&mut self, point: Point) {
        if !Bounds::new_from_top_left(Point::default(), self.surface.size()).contains(point) {
            trace!(x = point.x(), y = point.y(); "Pointer down outside the surface");
        }
        let settings = self.tools.gesture(self.page);
        let effect = self
            .input
            .pointer_down(point, settings, self.tools.pending_image());
        self.apply(effect);
    }

    pub fn pointer_move(&mut self, point: Point) {
        let effect = self.input.pointer_move(point);
        self.apply(effect);
    }

    pub fn pointer_up(&mut self, point: Point) {
        let effect = self.input.pointer_up(point);
        self.apply(effect);
    }

    pub fn pointer_leave(&mut self, point: Point) {
        let effect = self.input.pointer_leave(point);
        self.apply(effect);
    }

    /// Submits the typed content of the open text placement.
    pub fn submit_text(&mut self, text: &str) {
        let was_open = self.input.pending_text().is_some();
        let effect = self.input.submit_text(text);
        let committed = matches!(effect, InputEffect::Commit(_));
        self.apply(effect);
        if was_open && committed {
            self.publish(CanvasEvent::TextPlacementClosed);
        }
    }

    /// Closes the open text placement without a stroke.
    pub fn cancel_text(&mut self) {
        let effect = self.input.cancel_text();
        self.apply(effect);
    }

    /// Takes the image decodes scheduled by rendering.
    pub fn take_decode_requests(&mut self) -> Vec<DecodeRequest> {
        self.images.take_requests()
    }

    /// Records a finished decode and repaints if it is still relevant.
    ///
    /// The page is re-rendered only when the image decoded successfully and
    /// a stroke on the current page shows it. Decodes are shared by payload,
    /// so the page that scheduled the decode may differ from the page that
    /// is waiting for it. Returns true if a repaint happened.
    pub fn image_ready(
        &mut self,
        request: &DecodeRequest,
        result: Result<DecodedImage, ImageError>,
    ) -> bool {
        if !self.images.resolve(request, result) {
            return false;
        }
        let shown = self
            .store
            .page(self.page)
            .iter()
            .any(|stroke| stroke.image_data() == Some(request.data()));
        if !shown {
            debug!(
                decoded_for = request.page(), current = self.page;
                "Decoded image not on the current page; paint discarded"
            );
            return false;
        }
        self.redraw();
        true
    }

    /// Decodes every scheduled image synchronously.
    ///
    /// Returns the number of decodes resolved.
    pub fn decode_pending_images(&mut self) -> usize {
        let mut resolved = 0;
        loop {
            let requests = self.take_decode_requests();
            if requests.is_empty() {
                return resolved;
            }
            for request in requests {
                let result = request.decode();
                self.image_ready(&request, result);
                resolved += 1;
            }
        }
    }

    fn apply(&mut self, effect: InputEffect) {
        match effect {
            InputEffect::None => {}
            InputEffect::Dot(stroke) => paint(&mut self.surface, dot_primitive(&stroke)),
            InputEffect::Segment(stroke) => {
                render_stroke(&mut self.surface, &stroke, &mut self.images);
            }
            InputEffect::Preview(stroke) => {
                self.redraw();
                render_stroke(&mut self.surface, &stroke, &mut self.images);
            }
            InputEffect::Commit(stroke) => self.commit(stroke),
            InputEffect::TextOpened(point) => {
                self.publish(CanvasEvent::TextPlacementOpened(point));
            }
            InputEffect::TextClosed => self.publish(CanvasEvent::TextPlacementClosed),
            InputEffect::ImagePlaced(stroke) => {
                self.commit(stroke);
                self.tools.set_pending_image(None);
                self.publish(CanvasEvent::ImageConsumed);
            }
        }
    }

    fn commit(&mut self, stroke: Stroke) {
        debug!(
            tool:% = stroke.tool(), page = stroke.page(), points = stroke.points().len();
            "Stroke committed"
        );
        let page = stroke.page();
        self.store.append(stroke.clone());
        if page == self.page {
            self.redraw();
        }
        self.publish(CanvasEvent::StrokeCommitted(stroke));
    }

    fn publish(&mut self, event: CanvasEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use inkleaf_core::{draw::Primitive, geometry::Size};

    fn canvas() -> AnnotationCanvas<RecordingSurface> {
        AnnotationCanvas::new(
            RecordingSurface::new(Size::new(400.0, 400.0)),
            &AppConfig::default(),
        )
    }

    #[test]
    fn test_tool_state_size_steps() {
        let mut tools = ToolState::default();
        assert_eq!(tools.size(), 3);

        for _ in 0..30 {
            tools.increase_size();
        }
        assert_eq!(tools.size(), 40);

        for _ in 0..30 {
            tools.decrease_size();
        }
        assert_eq!(tools.size(), 1);
    }

    #[test]
    fn test_pointer_down_paints_dot() {
        let mut canvas = canvas();
        canvas.pointer_down(Point::new(5.0, 5.0));

        assert!(matches!(
            canvas.surface().primitives(),
            [Primitive::Disc { .. }]
        ));
    }

    #[test]
    fn test_shape_preview_redraws_page() {
        let mut canvas = canvas();
        canvas.tools_mut().set_tool(Tool::Rectangle);
        let clears = canvas.surface().clear_count();

        canvas.pointer_down(Point::new(0.0, 0.0));
        canvas.pointer_move(Point::new(10.0, 10.0));
        canvas.pointer_move(Point::new(20.0, 20.0));

        assert_eq!(canvas.surface().clear_count(), clears + 2);
        assert_eq!(canvas.surface().primitives().len(), 1);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut canvas = canvas();
        let kept = canvas.subscribe();
        drop(canvas.subscribe());

        canvas.pointer_down(Point::new(1.0, 1.0));
        canvas.pointer_up(Point::new(1.0, 1.0));

        assert_eq!(canvas.subscribers.len(), 1);
        assert!(matches!(kept.try_recv(), Ok(CanvasEvent::StrokeCommitted(_))));
    }

    #[test]
    fn test_page_zero_is_ignored() {
        let mut canvas = canvas();
        canvas.set_page(3);
        canvas.set_page(0);
        assert_eq!(canvas.current_page(), 3);

        canvas.pointer_down(Point::new(1.0, 1.0));
        canvas.pointer_up(Point::new(1.0, 1.0));
        assert_eq!(canvas.store().page(3).len(), 1);
        assert!(canvas.store().page(0).is_empty());
    }
}
