//! Two-phase image decoding for image strokes.
//!
//! Image strokes carry their picture as a `data:` URI. Rendering never
//! decodes inline: the first render of an unknown URI marks it
//! [`ImageSlot::Pending`] and queues a [`DecodeRequest`] stamped with the
//! page that was on screen. The caller decodes whenever it likes and hands
//! the result back, after which the page is re-rendered only if it is still
//! the current one.

use std::{collections::HashMap, io::Cursor};

use base64::{Engine, engine::general_purpose::STANDARD};
use image::ImageReader;
use log::{debug, warn};
use thiserror::Error;

use inkleaf_core::{draw::ImageLookup, geometry::Size};

/// Errors produced while decoding an image data URI.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("not a base64 data URI")]
    NotDataUri,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("could not read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported or corrupt image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Natural dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedImage {
    size: Size,
}

impl DecodedImage {
    pub fn new(size: Size) -> Self {
        Self { size }
    }

    /// Decodes a `data:<mime>;base64,<payload>` URI far enough to learn the
    /// image's natural pixel size.
    ///
    /// The image format is sniffed from the payload bytes; the declared MIME
    /// type is not trusted.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError`] if the URI is not base64 encoded, the payload
    /// is not valid base64, or the bytes are not a supported image.
    pub fn from_data_uri(uri: &str) -> Result<Self, ImageError> {
        let (header, payload) = uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or(ImageError::NotDataUri)?;
        if !header.ends_with(";base64") {
            return Err(ImageError::NotDataUri);
        }

        let bytes = STANDARD.decode(payload.trim())?;
        let (width, height) = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .into_dimensions()?;

        Ok(Self::new(Size::new(width as f32, height as f32)))
    }

    /// Returns the natural pixel size.
    pub fn size(&self) -> Size {
        self.size
    }
}

/// A queued decode, stamped with the page visible when it was scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRequest {
    page: u32,
    data: String,
}

impl DecodeRequest {
    pub fn new(page: u32, data: impl Into<String>) -> Self {
        Self {
            page,
            data: data.into(),
        }
    }

    /// Returns the page that was current when the decode was scheduled.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the data URI to decode.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Performs the decode synchronously.
    pub fn decode(&self) -> Result<DecodedImage, ImageError> {
        DecodedImage::from_data_uri(&self.data)
    }
}

/// Decode state of one data URI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageSlot {
    /// A decode has been scheduled but not resolved.
    Pending,
    /// Decoded; holds the natural size.
    Ready(Size),
    /// Decoding failed; the image never paints.
    Failed,
}

/// Decode results keyed by data URI, plus the queue of scheduled decodes.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    slots: HashMap<String, ImageSlot>,
    queue: Vec<DecodeRequest>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the decode state of `data`, if it has ever been requested.
    pub fn slot(&self, data: &str) -> Option<ImageSlot> {
        self.slots.get(data).copied()
    }

    /// Schedules a decode of `data` for `page` unless one is already known.
    ///
    /// Returns true if a new request was queued.
    pub fn request(&mut self, page: u32, data: &str) -> bool {
        if self.slots.contains_key(data) {
            return false;
        }
        self.slots.insert(data.to_string(), ImageSlot::Pending);
        self.queue.push(DecodeRequest::new(page, data));
        debug!(page; "Scheduled image decode");
        true
    }

    /// Takes every queued decode request, oldest first.
    pub fn take_requests(&mut self) -> Vec<DecodeRequest> {
        std::mem::take(&mut self.queue)
    }

    /// Records the outcome of a decode.
    ///
    /// Returns true if the image is now ready to paint.
    pub fn resolve(
        &mut self,
        request: &DecodeRequest,
        result: Result<DecodedImage, ImageError>,
    ) -> bool {
        let slot = match result {
            Ok(image) => ImageSlot::Ready(image.size()),
            Err(err) => {
                warn!(
                    page = request.page(), err:%;
                    "Image decode failed; placement will not paint"
                );
                ImageSlot::Failed
            }
        };
        self.slots.insert(request.data().to_string(), slot);
        matches!(slot, ImageSlot::Ready(_))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl ImageLookup for ImageCache {
    fn natural_size(&self, data: &str) -> Option<Size> {
        match self.slots.get(data) {
            Some(ImageSlot::Ready(size)) => Some(*size),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG.
    const PIXEL_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_decode_png_dimensions() {
        let image = DecodedImage::from_data_uri(PIXEL_PNG).unwrap();
        assert_eq!(image.size(), Size::new(1.0, 1.0));
    }

    #[test]
    fn test_decode_rejects_non_data_uri() {
        assert!(matches!(
            DecodedImage::from_data_uri("https://example.com/a.png"),
            Err(ImageError::NotDataUri)
        ));
        assert!(matches!(
            DecodedImage::from_data_uri("data:text/plain,hello"),
            Err(ImageError::NotDataUri)
        ));
    }

    #[test]
    fn test_decode_rejects_bad_payload() {
        assert!(matches!(
            DecodedImage::from_data_uri("data:image/png;base64,***"),
            Err(ImageError::Base64(_))
        ));
        assert!(DecodedImage::from_data_uri("data:image/png;base64,AAAA").is_err());
    }

    #[test]
    fn test_request_is_scheduled_once() {
        let mut cache = ImageCache::new();
        assert!(cache.request(2, PIXEL_PNG));
        assert!(!cache.request(3, PIXEL_PNG));

        let requests = cache.take_requests();
        assert_eq!(requests, vec![DecodeRequest::new(2, PIXEL_PNG)]);
        assert!(cache.take_requests().is_empty());
        assert_eq!(cache.slot(PIXEL_PNG), Some(ImageSlot::Pending));
        assert_eq!(cache.natural_size(PIXEL_PNG), None);
    }

    #[test]
    fn test_resolve_ready_and_failed() {
        let mut cache = ImageCache::new();
        cache.request(1, PIXEL_PNG);
        cache.request(1, "data:image/png;base64,AAAA");

        for request in cache.take_requests() {
            let result = request.decode();
            cache.resolve(&request, result);
        }

        assert_eq!(cache.natural_size(PIXEL_PNG), Some(Size::new(1.0, 1.0)));
        assert_eq!(
            cache.slot("data:image/png;base64,AAAA"),
            Some(ImageSlot::Failed)
        );
        // A failed image is not retried.
        assert!(!cache.request(1, "data:image/png;base64,AAAA"));
    }
}
