//! Pointer gesture interpretation.
//!
//! [`InputMachine`] turns abstract pointer samples into strokes. It knows
//! nothing about surfaces or storage: every call returns an [`InputEffect`]
//! telling the caller what to paint or commit.
//!
//! # States
//!
//! ```text
//!            down (freehand)          move: append + Segment
//!   Idle ───────────────────► Freehand ──┐
//!    ▲  ───────────────────► Shape ──────┤ move: Preview
//!    │       down (shape)                │
//!    └───────────── up / leave: Commit ◄─┘
//! ```
//!
//! Text placement runs in parallel: a pointer-down with the text tool opens
//! a pending placement that only [`InputMachine::submit_text`] or
//! [`InputMachine::cancel_text`] closes. Image placement commits on
//! pointer-down and never enters a drag.
//!
//! Pointer samples are device independent; mouse and touch bindings both
//! feed the same calls with raster-pixel coordinates.

use log::{debug, warn};

use inkleaf_core::{
    geometry::Point,
    stroke::Stroke,
    tool::{Tool, ToolFamily},
};

/// Tool settings captured when a gesture starts.
///
/// Changing the toolbar mid-gesture does not affect the stroke being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSettings {
    tool: Tool,
    color: String,
    size: u32,
    fill_color: String,
    page: u32,
}

impl GestureSettings {
    pub fn new(
        tool: Tool,
        color: impl Into<String>,
        size: u32,
        fill_color: impl Into<String>,
        page: u32,
    ) -> Self {
        Self {
            tool,
            color: color.into(),
            size,
            fill_color: fill_color.into(),
            page,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn fill_color(&self) -> &str {
        &self.fill_color
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    fn stroke(&self, points: Vec<Point>) -> Stroke {
        Stroke::new(self.tool, self.page, self.color.as_str(), self.size).with_points(points)
    }

    fn shape(&self, anchor: Point, end: Point) -> Stroke {
        self.stroke(vec![anchor])
            .with_end(end)
            .with_fill_color(Some(self.fill_color.clone()))
    }
}

/// Progress of a drag-based gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// Tracing a path; every sample is kept.
    Freehand {
        settings: GestureSettings,
        points: Vec<Point>,
    },
    /// Dragging a shape out from its anchor.
    Shape {
        settings: GestureSettings,
        anchor: Point,
    },
}

/// An open text placement awaiting its content.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    anchor: Point,
    settings: GestureSettings,
}

impl TextPlacement {
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }
}

/// What the caller should do after feeding a pointer sample.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEffect {
    /// Nothing to paint or commit.
    None,
    /// Paint the pointer-down feedback mark for this one-point stroke.
    Dot(Stroke),
    /// Paint this two-point stroke on top of the current surface.
    Segment(Stroke),
    /// Re-render the page, then paint this in-progress shape on top.
    Preview(Stroke),
    /// A gesture finished; the stroke is final.
    Commit(Stroke),
    /// A text placement opened at this point.
    TextOpened(Point),
    /// The text placement closed without producing a stroke.
    TextClosed,
    /// The pending image was placed; the stroke is final and the image is consumed.
    ImagePlaced(Stroke),
}

/// The pointer gesture state machine.
///
/// # Examples
///
/// ```
/// # use inkleaf::input::{GestureSettings, InputEffect, InputMachine};
/// # use inkleaf_core::{geometry::Point, tool::Tool};
/// let mut input = InputMachine::new();
/// let pen = GestureSettings::new(Tool::Draw, "#1a2744", 3, "#fef08a", 1);
///
/// input.pointer_down(Point::new(0.0, 0.0), pen, None);
/// input.pointer_move(Point::new(5.0, 5.0));
/// let InputEffect::Commit(stroke) = input.pointer_up(Point::new(5.0, 5.0)) else {
///     panic!("expected a commit");
/// };
/// assert_eq!(stroke.points().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputMachine {
    drag: DragState,
    pending_text: Option<TextPlacement>,
    discard_degenerate_shapes: bool,
}

impl InputMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops shape gestures released exactly on their anchor instead of
    /// committing a zero-extent shape.
    pub fn with_discard_degenerate_shapes(mut self, discard: bool) -> Self {
        self.discard_degenerate_shapes = discard;
        self
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != DragState::Idle
    }

    pub fn pending_text(&self) -> Option<&TextPlacement> {
        self.pending_text.as_ref()
    }

    /// Starts a gesture at `point`.
    ///
    /// `pending_image` is the image payload waiting to be placed, if any; it
    /// is only consulted by the image tool.
    pub fn pointer_down(
        &mut self,
        point: Point,
        settings: GestureSettings,
        pending_image: Option<&str>,
    ) -> InputEffect {
        if self.is_dragging() {
            warn!(
                tool:% = settings.tool();
                "Pointer down during an active drag; abandoning previous gesture"
            );
            self.drag = DragState::Idle;
        }

        match settings.tool().family() {
            ToolFamily::Text => {
                debug!(x = point.x(), y = point.y(); "Text placement opened");
                self.pending_text = Some(TextPlacement {
                    anchor: point,
                    settings,
                });
                InputEffect::TextOpened(point)
            }
            ToolFamily::Image => match pending_image {
                Some(data) => {
                    let stroke = settings
                        .stroke(vec![point])
                        .with_image_data(Some(data.to_string()));
                    debug!(page = settings.page(); "Image placed");
                    InputEffect::ImagePlaced(stroke)
                }
                None => InputEffect::None,
            },
            ToolFamily::Freehand => {
                let dot = settings.stroke(vec![point]);
                debug!(tool:% = settings.tool(); "Freehand gesture started");
                self.drag = DragState::Freehand {
                    settings,
                    points: vec![point],
                };
                if dot.tool() == Tool::Eraser {
                    InputEffect::None
                } else {
                    InputEffect::Dot(dot)
                }
            }
            ToolFamily::Shape => {
                debug!(tool:% = settings.tool(); "Shape gesture started");
                self.drag = DragState::Shape {
                    settings,
                    anchor: point,
                };
                InputEffect::None
            }
        }
    }

    /// Continues the active drag, if any.
    pub fn pointer_move(&mut self, point: Point) -> InputEffect {
        match &mut self.drag {
            DragState::Idle => InputEffect::None,
            DragState::Freehand { settings, points } => {
                points.push(point);
                match points.as_slice() {
                    [.., previous, last] => {
                        InputEffect::Segment(settings.stroke(vec![*previous, *last]))
                    }
                    _ => InputEffect::None,
                }
            }
            DragState::Shape { settings, anchor } => {
                InputEffect::Preview(settings.shape(*anchor, point))
            }
        }
    }

    /// Finishes the active drag at `point`.
    ///
    /// Freehand gestures commit their traced points (the release point is
    /// not added); shape gestures commit the anchor with `point` as the end.
    pub fn pointer_up(&mut self, point: Point) -> InputEffect {
        match std::mem::take(&mut self.drag) {
            DragState::Idle => InputEffect::None,
            DragState::Freehand { settings, points } => {
                if points.len() < settings.tool().min_points() {
                    debug!(
                        tool:% = settings.tool(), points = points.len();
                        "Freehand gesture too short; nothing committed"
                    );
                    return InputEffect::None;
                }
                InputEffect::Commit(settings.stroke(points))
            }
            DragState::Shape { settings, anchor } => {
                if self.discard_degenerate_shapes && anchor == point {
                    debug!(tool:% = settings.tool(); "Shape released on its anchor; discarded");
                    return InputEffect::None;
                }
                InputEffect::Commit(settings.shape(anchor, point))
            }
        }
    }

    /// Pointer left the surface; behaves exactly like [`pointer_up`](Self::pointer_up).
    pub fn pointer_leave(&mut self, point: Point) -> InputEffect {
        self.pointer_up(point)
    }

    /// Submits the typed content for the open text placement.
    ///
    /// The content is trimmed; blank content closes the placement without a
    /// stroke.
    pub fn submit_text(&mut self, text: &str) -> InputEffect {
        let Some(placement) = self.pending_text.take() else {
            return InputEffect::None;
        };

        let text = text.trim();
        if text.is_empty() {
            debug!("Empty text submitted; placement closed");
            return InputEffect::TextClosed;
        }

        InputEffect::Commit(placement.settings.stroke(vec![placement.anchor]).with_text(text))
    }

    /// Closes the open text placement without producing a stroke.
    pub fn cancel_text(&mut self) -> InputEffect {
        match self.pending_text.take() {
            Some(_) => InputEffect::TextClosed,
            None => InputEffect::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(tool: Tool) -> GestureSettings {
        GestureSettings::new(tool, "#dc2626", 3, "#bbf7d0", 1)
    }

    fn committed(effect: InputEffect) -> Stroke {
        match effect {
            InputEffect::Commit(stroke) => stroke,
            other => panic!("expected a commit, got {other:?}"),
        }
    }

    #[test]
    fn test_tap_commits_single_point_for_draw_and_highlight() {
        for tool in [Tool::Draw, Tool::Highlight] {
            let mut input = InputMachine::new();
            let down = input.pointer_down(Point::new(3.0, 3.0), settings(tool), None);
            assert!(matches!(down, InputEffect::Dot(_)));

            let stroke = committed(input.pointer_up(Point::new(3.0, 3.0)));
            assert_eq!(stroke.points(), &[Point::new(3.0, 3.0)]);
            assert_eq!(stroke.tool(), tool);
        }
    }

    #[test]
    fn test_eraser_tap_commits_nothing() {
        let mut input = InputMachine::new();
        let down = input.pointer_down(Point::new(3.0, 3.0), settings(Tool::Eraser), None);
        assert_eq!(down, InputEffect::None);
        assert_eq!(input.pointer_up(Point::new(3.0, 3.0)), InputEffect::None);
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_eraser_drag_commits() {
        let mut input = InputMachine::new();
        input.pointer_down(Point::new(0.0, 0.0), settings(Tool::Eraser), None);
        input.pointer_move(Point::new(4.0, 0.0));
        let stroke = committed(input.pointer_up(Point::new(4.0, 0.0)));
        assert_eq!(stroke.points().len(), 2);
    }

    #[test]
    fn test_freehand_move_emits_last_segment() {
        let mut input = InputMachine::new();
        input.pointer_down(Point::new(0.0, 0.0), settings(Tool::Draw), None);
        input.pointer_move(Point::new(1.0, 1.0));
        let effect = input.pointer_move(Point::new(2.0, 2.0));

        let InputEffect::Segment(segment) = effect else {
            panic!("expected a segment");
        };
        assert_eq!(segment.points(), &[Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
    }

    #[test]
    fn test_shape_preview_and_commit() {
        let mut input = InputMachine::new();
        assert_eq!(
            input.pointer_down(Point::new(50.0, 50.0), settings(Tool::Rectangle), None),
            InputEffect::None
        );

        let InputEffect::Preview(preview) = input.pointer_move(Point::new(30.0, 30.0)) else {
            panic!("expected a preview");
        };
        assert_eq!(preview.resolved_end(), Some(Point::new(30.0, 30.0)));

        let stroke = committed(input.pointer_up(Point::new(10.0, 10.0)));
        assert_eq!(stroke.points(), &[Point::new(50.0, 50.0)]);
        assert_eq!(stroke.end_x(), Some(10.0));
        assert_eq!(stroke.end_y(), Some(10.0));
        assert_eq!(stroke.fill_color(), Some("#bbf7d0"));
    }

    #[test]
    fn test_degenerate_shape_policy() {
        let mut input = InputMachine::new();
        input.pointer_down(Point::new(5.0, 5.0), settings(Tool::Circle), None);
        assert!(matches!(input.pointer_up(Point::new(5.0, 5.0)), InputEffect::Commit(_)));

        let mut strict = InputMachine::new().with_discard_degenerate_shapes(true);
        strict.pointer_down(Point::new(5.0, 5.0), settings(Tool::Circle), None);
        assert_eq!(strict.pointer_up(Point::new(5.0, 5.0)), InputEffect::None);
    }

    #[test]
    fn test_leave_commits_like_up() {
        let mut input = InputMachine::new();
        input.pointer_down(Point::new(0.0, 0.0), settings(Tool::Arrow), None);
        let stroke = committed(input.pointer_leave(Point::new(100.0, 0.0)));
        assert_eq!(stroke.resolved_end(), Some(Point::new(100.0, 0.0)));
        assert_eq!(input.pointer_leave(Point::new(0.0, 0.0)), InputEffect::None);
    }

    #[test]
    fn test_settings_are_captured_at_pointer_down() {
        let mut input = InputMachine::new();
        input.pointer_down(
            Point::new(0.0, 0.0),
            GestureSettings::new(Tool::Draw, "#16a34a", 9, "#fef08a", 7),
            None,
        );
        let stroke = committed(input.pointer_up(Point::new(0.0, 0.0)));
        assert_eq!(stroke.color(), "#16a34a");
        assert_eq!(stroke.size(), 9);
        assert_eq!(stroke.page(), 7);
    }

    #[test]
    fn test_text_submit_trims() {
        let mut input = InputMachine::new();
        assert_eq!(
            input.pointer_down(Point::new(10.0, 20.0), settings(Tool::Text), None),
            InputEffect::TextOpened(Point::new(10.0, 20.0))
        );
        assert!(input.pending_text().is_some());

        let stroke = committed(input.submit_text("  Krebs cycle \n"));
        assert_eq!(stroke.text(), Some("Krebs cycle"));
        assert_eq!(stroke.points(), &[Point::new(10.0, 20.0)]);
        assert!(input.pending_text().is_none());
    }

    #[test]
    fn test_text_blank_submit_and_cancel_produce_nothing() {
        let mut input = InputMachine::new();
        input.pointer_down(Point::new(10.0, 20.0), settings(Tool::Text), None);
        assert_eq!(input.submit_text("   "), InputEffect::TextClosed);

        input.pointer_down(Point::new(10.0, 20.0), settings(Tool::Text), None);
        assert_eq!(input.cancel_text(), InputEffect::TextClosed);
        assert_eq!(input.cancel_text(), InputEffect::None);
        assert_eq!(input.submit_text("late"), InputEffect::None);
    }

    #[test]
    fn test_image_placement() {
        let mut input = InputMachine::new();
        assert_eq!(
            input.pointer_down(Point::new(1.0, 1.0), settings(Tool::Image), None),
            InputEffect::None
        );

        let effect = input.pointer_down(
            Point::new(1.0, 1.0),
            settings(Tool::Image),
            Some("data:image/png;base64,AAAA"),
        );
        let InputEffect::ImagePlaced(stroke) = effect else {
            panic!("expected an image placement");
        };
        assert_eq!(stroke.image_data(), Some("data:image/png;base64,AAAA"));
        assert!(!input.is_dragging());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn settings(tool: Tool) -> GestureSettings {
        GestureSettings::new(tool, "#1a2744", 3, "#fef08a", 1)
    }

    // ===================
    // Property Test Functions
    // ===================

    /// A committed freehand stroke holds the down sample and every move sample, in order.
    fn check_freehand_keeps_every_sample(
        tool: Tool,
        down: Point,
        moves: Vec<Point>,
    ) -> Result<(), TestCaseError> {
        let mut input = InputMachine::new();
        input.pointer_down(down, settings(tool), None);
        for point in &moves {
            input.pointer_move(*point);
        }

        let effect = input.pointer_up(Point::new(0.0, 0.0));
        let mut expected = vec![down];
        expected.extend(moves);

        if expected.len() < tool.min_points() {
            prop_assert_eq!(effect, InputEffect::None);
        } else {
            let InputEffect::Commit(stroke) = effect else {
                return Err(TestCaseError::fail("expected a commit"));
            };
            prop_assert_eq!(stroke.points(), expected.as_slice());
        }
        prop_assert!(!input.is_dragging());
        Ok(())
    }

    /// A shape commit holds only the anchor, with the release point as its end.
    fn check_shape_commit_carries_anchor_and_end(
        down: Point,
        moves: Vec<Point>,
        up: Point,
    ) -> Result<(), TestCaseError> {
        let mut input = InputMachine::new();
        input.pointer_down(down, settings(Tool::Triangle), None);
        for point in moves {
            input.pointer_move(point);
        }

        let InputEffect::Commit(stroke) = input.pointer_up(up) else {
            return Err(TestCaseError::fail("expected a commit"));
        };
        prop_assert_eq!(stroke.points(), &[down]);
        prop_assert_eq!(stroke.resolved_end(), Some(up));
        Ok(())
    }

    // ===================
    // Test Registration
    // ===================

    proptest! {
        #[test]
        fn freehand_keeps_every_sample(
            tool in prop::sample::select(vec![Tool::Draw, Tool::Highlight, Tool::Eraser]),
            down in point_strategy(),
            moves in prop::collection::vec(point_strategy(), 0..20),
        ) {
            check_freehand_keeps_every_sample(tool, down, moves)?;
        }

        #[test]
        fn shape_commit_carries_anchor_and_end(
            down in point_strategy(),
            moves in prop::collection::vec(point_strategy(), 0..10),
            up in point_strategy(),
        ) {
            check_shape_commit_carries_anchor_and_end(down, moves, up)?;
        }
    }
}
