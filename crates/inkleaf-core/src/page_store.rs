//! In-memory index from page number to that page's strokes.
//!
//! Insertion order is z-order: later strokes draw on top. The store is
//! rebuilt wholesale whenever the persisted record list changes, and a single
//! page can be cleared without touching the others.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::{record::AnnotationRecord, stroke::Stroke};

/// Outcome of [`PageStore::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Strokes placed into the store.
    pub loaded: usize,
    /// Records that could not be decoded or carried no points.
    pub skipped: usize,
}

/// Strokes grouped by 1-based page number.
///
/// # Examples
///
/// ```
/// # use inkleaf_core::{geometry::Point, page_store::PageStore, stroke::Stroke, tool::Tool};
/// let mut store = PageStore::new();
/// let stroke = Stroke::new(Tool::Draw, 2, "red", 3).with_points(vec![Point::new(1.0, 1.0)]);
///
/// store.append(stroke.clone());
/// assert!(store.page(1).is_empty());
/// assert_eq!(store.page(2), &[stroke]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageStore {
    pages: BTreeMap<u32, Vec<Stroke>>,
}

impl PageStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the store from persisted records.
    ///
    /// All existing pages are dropped first, so loading the same records
    /// twice yields the same state. Records that fail to decode, and decoded
    /// strokes without points, are skipped rather than failing the load.
    pub fn load(&mut self, records: &[AnnotationRecord]) -> LoadSummary {
        self.pages.clear();
        let mut summary = LoadSummary::default();

        for record in records {
            match record.decode() {
                Ok(stroke) if stroke.is_empty() => {
                    debug!(
                        id:? = record.id, page = record.page_number;
                        "Skipping annotation without points"
                    );
                    summary.skipped += 1;
                }
                Ok(stroke) => {
                    self.pages.entry(stroke.page()).or_default().push(stroke);
                    summary.loaded += 1;
                }
                Err(err) => {
                    warn!(id:? = record.id, err:%; "Skipping undecodable annotation record");
                    summary.skipped += 1;
                }
            }
        }

        info!(
            loaded = summary.loaded,
            skipped = summary.skipped,
            pages = self.pages.len();
            "Page store loaded"
        );
        summary
    }

    /// Appends a stroke to the end of its page's list.
    pub fn append(&mut self, stroke: Stroke) {
        self.pages.entry(stroke.page()).or_default().push(stroke);
    }

    /// Removes every stroke on `page`; other pages are untouched.
    pub fn clear_page(&mut self, page: u32) {
        if let Some(strokes) = self.pages.remove(&page) {
            debug!(page, removed = strokes.len(); "Cleared page");
        }
    }

    /// Returns the strokes of `page` in draw order, empty when it has none.
    pub fn page(&self, page: u32) -> &[Stroke] {
        self.pages.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over pages that hold at least one stroke, in page order.
    pub fn pages(&self) -> impl Iterator<Item = (u32, &[Stroke])> {
        self.pages
            .iter()
            .filter(|(_, strokes)| !strokes.is_empty())
            .map(|(page, strokes)| (*page, strokes.as_slice()))
    }

    /// Returns the total number of strokes across all pages.
    pub fn len(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Returns true if no page holds a stroke.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry::Point, tool::Tool};

    fn stroke(page: u32, x: f32) -> Stroke {
        Stroke::new(Tool::Draw, page, "#1a2744", 3).with_points(vec![Point::new(x, x)])
    }

    fn record_for(stroke: &Stroke, id: u64) -> AnnotationRecord {
        let mut record = AnnotationRecord::from_stroke(1, stroke, id).unwrap();
        record.id = Some(id);
        record
    }

    fn corrupt_record() -> AnnotationRecord {
        let mut record = record_for(&stroke(1, 0.0), 99);
        record.coordinates = "{\"points\": [".to_string();
        record
    }

    #[test]
    fn test_page_isolation() {
        let mut store = PageStore::new();
        let a = stroke(2, 1.0);
        store.append(a.clone());

        assert!(store.page(1).is_empty());
        assert_eq!(store.page(2), &[a]);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = PageStore::new();
        let first = stroke(1, 1.0);
        let second = stroke(1, 2.0);
        store.append(first.clone());
        store.append(second.clone());

        assert_eq!(store.page(1), &[first, second]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_is_idempotent() {
        let records = vec![
            record_for(&stroke(1, 1.0), 1),
            record_for(&stroke(3, 2.0), 2),
            record_for(&stroke(1, 3.0), 3),
        ];
        let mut store = PageStore::new();

        store.load(&records);
        let once = store.clone();
        store.load(&records);

        assert_eq!(store, once);
        assert_eq!(store.page(1).len(), 2);
        assert_eq!(store.page(3).len(), 1);
    }

    #[test]
    fn test_load_replaces_previous_state() {
        let mut store = PageStore::new();
        store.append(stroke(5, 1.0));

        store.load(&[record_for(&stroke(1, 1.0), 1)]);

        assert!(store.page(5).is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_skips_malformed_records() {
        let good = stroke(1, 1.0);
        let good2 = stroke(2, 2.0);
        let records = vec![record_for(&good, 1), corrupt_record(), record_for(&good2, 2)];

        let mut store = PageStore::new();
        let summary = store.load(&records);

        assert_eq!(summary, LoadSummary { loaded: 2, skipped: 1 });
        assert_eq!(store.page(1), &[good]);
        assert_eq!(store.page(2), &[good2]);
    }

    #[test]
    fn test_load_skips_strokes_without_points() {
        let empty = Stroke::new(Tool::Draw, 1, "red", 3);
        let mut store = PageStore::new();
        let summary = store.load(&[record_for(&empty, 1)]);

        assert_eq!(summary.skipped, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_page() {
        let mut store = PageStore::new();
        store.append(stroke(1, 1.0));
        store.append(stroke(2, 1.0));

        store.clear_page(1);

        assert!(store.page(1).is_empty());
        assert_eq!(store.page(2).len(), 1);
        assert_eq!(store.pages().map(|(page, _)| page).collect::<Vec<_>>(), vec![2]);

        // Clearing an unknown page is a no-op.
        store.clear_page(42);
        assert_eq!(store.len(), 1);
    }
}
