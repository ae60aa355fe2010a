//! Persisted annotation records and the stroke codec.
//!
//! An [`AnnotationRecord`] is what the persistence collaborator stores and
//! hands back. The stroke's points, color, size and text are packed into a
//! JSON string (`coordinates`); the tool-specific optionals (`endX`, `endY`,
//! `imageData`, `fillColor`) travel as top-level fields so they survive even
//! if the payload encoding changes.
//!
//! # Wire format
//!
//! ```json
//! {
//!   "id": 7,
//!   "pdfId": 3,
//!   "pageNumber": 1,
//!   "annotationType": "rectangle",
//!   "coordinates": "{\"points\":[{\"x\":50.0,\"y\":50.0}],\"color\":\"#1a2744\",\"size\":3}",
//!   "endX": 10.0,
//!   "endY": 10.0,
//!   "shapeType": "rectangle",
//!   "fillColor": "#fef08a",
//!   "timestamp": 1760000000000
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    geometry::Point,
    stroke::Stroke,
    tool::{DEFAULT_SIZE, DEFAULT_STROKE_COLOR, Tool},
};

/// Reasons a record cannot be turned back into a stroke.
///
/// None of these are fatal to a page load: the page store skips the record
/// and keeps going.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed annotation payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("{0}")]
    UnknownTool(String),

    #[error("annotation page number must be 1 or greater")]
    InvalidPage,
}

/// The serialized annotation exchanged with the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRecord {
    /// Identifier assigned by the store; absent until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub pdf_id: u64,
    pub page_number: u32,
    /// Tool wire name.
    pub annotation_type: String,
    /// JSON-encoded points, color, size and text.
    pub coordinates: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    /// Mirrors `annotation_type`; kept for older readers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: u64,
}

/// The string-encoded part of a record.
///
/// Older writers embedded the optional fields here as well; they are read
/// but never written.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Payload {
    #[serde(default)]
    points: Vec<Point>,
    #[serde(default = "default_color")]
    color: String,
    #[serde(default = "default_size")]
    size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing)]
    end_x: Option<f32>,
    #[serde(default, skip_serializing)]
    end_y: Option<f32>,
    #[serde(default, skip_serializing)]
    image_data: Option<String>,
    #[serde(default, skip_serializing)]
    fill_color: Option<String>,
}

fn default_color() -> String {
    DEFAULT_STROKE_COLOR.to_string()
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

impl AnnotationRecord {
    /// Serializes a stroke into a record for `pdf_id`.
    ///
    /// The record carries no `id`; the store assigns one when it persists it.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Payload`] if the payload cannot be encoded.
    pub fn from_stroke(pdf_id: u64, stroke: &Stroke, timestamp: u64) -> Result<Self, RecordError> {
        let payload = Payload {
            points: stroke.points().to_vec(),
            color: stroke.color().to_string(),
            size: stroke.size(),
            text: stroke.text().map(str::to_string),
            end_x: None,
            end_y: None,
            image_data: None,
            fill_color: None,
        };

        Ok(Self {
            id: None,
            pdf_id,
            page_number: stroke.page(),
            annotation_type: stroke.tool().name().to_string(),
            coordinates: serde_json::to_string(&payload)?,
            end_x: stroke.end_x(),
            end_y: stroke.end_y(),
            image_data: stroke.image_data().map(str::to_string),
            shape_type: Some(stroke.tool().name().to_string()),
            fill_color: stroke.fill_color().map(str::to_string),
            timestamp,
        })
    }

    /// Deserializes the record back into a stroke.
    ///
    /// Missing payload fields fall back to no points, the default stroke
    /// color and the default size. Top-level optional fields win over the
    /// same fields embedded in the payload.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] when the payload is not valid JSON, the
    /// annotation type is not a known tool, or the page number is zero.
    /// Callers treat any error as "skip this record".
    pub fn decode(&self) -> Result<Stroke, RecordError> {
        let tool: Tool = self
            .annotation_type
            .parse()
            .map_err(RecordError::UnknownTool)?;

        if self.page_number == 0 {
            return Err(RecordError::InvalidPage);
        }

        let payload: Payload = serde_json::from_str(&self.coordinates)?;

        Ok(Stroke::new(tool, self.page_number, payload.color, payload.size)
            .with_points(payload.points)
            .with_optional_text(payload.text)
            .with_end_coords(
                self.end_x.or(payload.end_x),
                self.end_y.or(payload.end_y),
            )
            .with_image_data(self.image_data.clone().or(payload.image_data))
            .with_fill_color(self.fill_color.clone().or(payload.fill_color)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(annotation_type: &str, coordinates: &str) -> AnnotationRecord {
        AnnotationRecord {
            id: Some(1),
            pdf_id: 9,
            page_number: 1,
            annotation_type: annotation_type.to_string(),
            coordinates: coordinates.to_string(),
            end_x: None,
            end_y: None,
            image_data: None,
            shape_type: None,
            fill_color: None,
            timestamp: 0,
        }
    }

    #[test]
    fn test_from_stroke_packs_payload() {
        let stroke = Stroke::new(Tool::Rectangle, 2, "#dc2626", 5)
            .with_points(vec![Point::new(50.0, 50.0)])
            .with_end(Point::new(10.0, 10.0))
            .with_fill_color(Some("#bbf7d0".to_string()));

        let record = AnnotationRecord::from_stroke(4, &stroke, 1234).unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.pdf_id, 4);
        assert_eq!(record.page_number, 2);
        assert_eq!(record.annotation_type, "rectangle");
        assert_eq!(record.shape_type.as_deref(), Some("rectangle"));
        assert_eq!(record.end_x, Some(10.0));
        assert_eq!(record.end_y, Some(10.0));
        assert_eq!(record.fill_color.as_deref(), Some("#bbf7d0"));
        assert_eq!(record.timestamp, 1234);

        // Optional fields stay out of the encoded payload.
        assert!(!record.coordinates.contains("endX"));
        assert!(!record.coordinates.contains("fillColor"));
        assert!(!record.coordinates.contains("text"));
        assert!(record.coordinates.contains(r##""color":"#dc2626""##));
    }

    #[test]
    fn test_decode_applies_payload_defaults() {
        let stroke = record("draw", "{}").decode().unwrap();
        assert!(stroke.is_empty());
        assert_eq!(stroke.color(), DEFAULT_STROKE_COLOR);
        assert_eq!(stroke.size(), DEFAULT_SIZE);
        assert_eq!(stroke.text(), None);
    }

    #[test]
    fn test_decode_top_level_fields_win() {
        let mut rec = record(
            "backgroundHighlight",
            r##"{"points":[{"x":1,"y":2}],"color":"red","size":4,"endX":5,"endY":6,"fillColor":"#000000"}"##,
        );
        rec.end_x = Some(70.0);
        rec.fill_color = Some("#fef08a".to_string());

        let stroke = rec.decode().unwrap();
        assert_eq!(stroke.end_x(), Some(70.0));
        // Only embedded value available for y.
        assert_eq!(stroke.end_y(), Some(6.0));
        assert_eq!(stroke.fill_color(), Some("#fef08a"));
    }

    #[test]
    fn test_decode_embedded_image_data() {
        let stroke = record(
            "image",
            r#"{"points":[{"x":1,"y":2}],"color":"red","size":4,"imageData":"data:image/png;base64,AA=="}"#,
        )
        .decode()
        .unwrap();
        assert_eq!(stroke.image_data(), Some("data:image/png;base64,AA=="));
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            record("draw", "{not json").decode(),
            Err(RecordError::Payload(_))
        ));
        assert!(matches!(
            record("draw", "null").decode(),
            Err(RecordError::Payload(_))
        ));
        assert!(matches!(
            record("lasso", "{}").decode(),
            Err(RecordError::UnknownTool(_))
        ));

        let mut page_zero = record("draw", "{}");
        page_zero.page_number = 0;
        assert!(matches!(page_zero.decode(), Err(RecordError::InvalidPage)));
    }

    #[test]
    fn test_record_wire_names() {
        let rec = record("arrow", "{}");
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains(r#""pdfId":9"#));
        assert!(json.contains(r#""pageNumber":1"#));
        assert!(json.contains(r#""annotationType":"arrow""#));
        assert!(!json.contains("endX"));

        let parsed: AnnotationRecord = serde_json::from_str(
            r#"{"pdfId":1,"pageNumber":3,"annotationType":"line","coordinates":"{}","endX":null,"timestamp":5}"#,
        )
        .unwrap();
        assert_eq!(parsed.page_number, 3);
        assert_eq!(parsed.end_x, None);
        assert_eq!(parsed.id, None);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::{option, prelude::*};

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-2000.0f32..2000.0, -2000.0f32..2000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn color_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("#1a2744".to_string()),
            Just("red".to_string()),
            "#[0-9a-f]{6}",
        ]
    }

    /// Strokes shaped the way the input machine produces them for each tool.
    fn stroke_strategy() -> impl Strategy<Value = Stroke> {
        (
            proptest::sample::select(Tool::ALL.to_vec()),
            1u32..50,
            color_strategy(),
            1u32..=40,
            proptest::collection::vec(point_strategy(), 1..20),
            point_strategy(),
            option::of("[a-zA-Z0-9 ]{1,24}"),
            option::of("#[0-9a-f]{6}"),
        )
            .prop_map(|(tool, page, color, size, points, end, text, fill)| {
                let base = Stroke::new(tool, page, color, size);
                match tool {
                    Tool::Draw | Tool::Highlight | Tool::Eraser => base.with_points(points),
                    Tool::Text => base
                        .with_points(vec![points[0]])
                        .with_text(text.unwrap_or_else(|| "note".to_string())),
                    Tool::Image => base
                        .with_points(vec![points[0]])
                        .with_image_data(Some("data:image/png;base64,iVBORw0KGgo=".to_string())),
                    _ => base
                        .with_points(vec![points[0]])
                        .with_end(end)
                        .with_fill_color(fill),
                }
            })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Decoding a freshly encoded stroke reproduces it exactly.
    fn check_record_round_trip(stroke: Stroke, pdf_id: u64) -> Result<(), TestCaseError> {
        let record = AnnotationRecord::from_stroke(pdf_id, &stroke, 42)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let decoded = record
            .decode()
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(decoded, stroke);
        Ok(())
    }

    /// The record survives a trip through its own JSON wire form.
    fn check_record_json_round_trip(stroke: Stroke) -> Result<(), TestCaseError> {
        let record = AnnotationRecord::from_stroke(1, &stroke, 7)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let json = serde_json::to_string(&record)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let parsed: AnnotationRecord =
            serde_json::from_str(&json).map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(parsed, record);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn record_round_trip(stroke in stroke_strategy(), pdf_id in 1u64..10_000) {
            check_record_round_trip(stroke, pdf_id)?;
        }

        #[test]
        fn record_json_round_trip(stroke in stroke_strategy()) {
            check_record_json_round_trip(stroke)?;
        }
    }
}
