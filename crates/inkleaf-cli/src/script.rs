//! Gesture scripts.
//!
//! A script is a JSON list of events replayed against an
//! [`AnnotationCanvas`]: tool changes, pointer gestures, text entry and page
//! navigation, in the order a user would perform them.
//!
//! ```json
//! [
//!   { "event": "tool", "tool": "rectangle" },
//!   { "event": "down", "x": 10, "y": 10 },
//!   { "event": "up", "x": 60, "y": 40 }
//! ]
//! ```

use std::{
    fs, io,
    num::NonZeroU32,
    path::{Path, PathBuf},
    sync::mpsc::Receiver,
};

use base64::{Engine, engine::general_purpose::STANDARD};
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use inkleaf::{
    InkleafError,
    canvas::{AnnotationCanvas, CanvasEvent},
    geometry::Point,
    image::{DecodedImage, ImageError},
    stroke::Stroke,
    surface::Surface,
    tool::Tool,
};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Malformed script {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unsupported image {0}")]
    Image(PathBuf, #[source] ImageError),
}

impl From<ScriptError> for InkleafError {
    fn from(err: ScriptError) -> Self {
        match err {
            ScriptError::Io { source, .. } => InkleafError::Io(source),
            ScriptError::Image(_, err) => InkleafError::Image(err),
            err @ ScriptError::Json { .. } => InkleafError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                err.to_string(),
            )),
        }
    }
}

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ScriptEvent {
    Tool { tool: Tool },
    Color { color: String },
    Size { size: u32 },
    IncreaseSize,
    DecreaseSize,
    Fill { color: String },
    /// Loads a picture file (relative to the script) as the pending image.
    Image { path: PathBuf },
    /// Pages are 1-based; `0` is rejected when the script is parsed.
    Page { page: NonZeroU32 },
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Leave { x: f32, y: f32 },
    Text { text: String },
    Cancel,
    Clear,
}

/// A parsed script and the directory its relative paths resolve against.
#[derive(Debug, Clone)]
pub struct Script {
    events: Vec<ScriptEvent>,
    base_dir: PathBuf,
}

impl Script {
    pub fn new(events: Vec<ScriptEvent>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            events,
            base_dir: base_dir.into(),
        }
    }

    /// Reads a script file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let events: Vec<ScriptEvent> =
            serde_json::from_str(&content).map_err(|source| ScriptError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!(events = events.len(), path = path.display().to_string(); "Script loaded");
        Ok(Self::new(events, base_dir))
    }

    pub fn events(&self) -> &[ScriptEvent] {
        &self.events
    }

    /// Replays every event and returns the strokes committed, in order.
    pub fn replay<S: Surface>(
        &self,
        canvas: &mut AnnotationCanvas<S>,
    ) -> Result<Vec<Stroke>, ScriptError> {
        let events = canvas.subscribe();
        let mut committed = Vec::new();

        for event in &self.events {
            self.apply(canvas, event)?;
            collect_commits(&events, &mut committed);
        }

        info!(events = self.events.len(), committed = committed.len(); "Script replayed");
        Ok(committed)
    }

    fn apply<S: Surface>(
        &self,
        canvas: &mut AnnotationCanvas<S>,
        event: &ScriptEvent,
    ) -> Result<(), ScriptError> {
        match event {
            ScriptEvent::Tool { tool } => canvas.tools_mut().set_tool(*tool),
            ScriptEvent::Color { color } => canvas.tools_mut().set_color(color.as_str()),
            ScriptEvent::Size { size } => canvas.tools_mut().set_size(*size),
            ScriptEvent::IncreaseSize => canvas.tools_mut().increase_size(),
            ScriptEvent::DecreaseSize => canvas.tools_mut().decrease_size(),
            ScriptEvent::Fill { color } => canvas.tools_mut().set_fill_color(color.as_str()),
            ScriptEvent::Image { path } => {
                let data = image_data_uri(&self.base_dir.join(path))?;
                canvas.tools_mut().set_pending_image(Some(data));
            }
            ScriptEvent::Page { page } => canvas.set_page(page.get()),
            ScriptEvent::Down { x, y } => canvas.pointer_down(Point::new(*x, *y)),
            ScriptEvent::Move { x, y } => canvas.pointer_move(Point::new(*x, *y)),
            ScriptEvent::Up { x, y } => canvas.pointer_up(Point::new(*x, *y)),
            ScriptEvent::Leave { x, y } => canvas.pointer_leave(Point::new(*x, *y)),
            ScriptEvent::Text { text } => canvas.submit_text(text),
            ScriptEvent::Cancel => canvas.cancel_text(),
            ScriptEvent::Clear => canvas.clear_page(),
        }
        Ok(())
    }
}

fn collect_commits(events: &Receiver<CanvasEvent>, committed: &mut Vec<Stroke>) {
    for event in events.try_iter() {
        if let CanvasEvent::StrokeCommitted(stroke) = event {
            committed.push(stroke);
        }
    }
}

/// Reads a picture file into a base64 data URI, checking that it decodes.
fn image_data_uri(path: &Path) -> Result<String, ScriptError> {
    let bytes = fs::read(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mime = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "image/png",
    };

    let uri = format!("data:{mime};base64,{}", STANDARD.encode(&bytes));
    let image = DecodedImage::from_data_uri(&uri)
        .map_err(|err| ScriptError::Image(path.to_path_buf(), err))?;
    debug!(
        path = path.display().to_string(),
        width = image.size().width(),
        height = image.size().height();
        "Image loaded for placement"
    );
    Ok(uri)
}
