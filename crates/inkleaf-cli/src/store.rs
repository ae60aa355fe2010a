//! File-backed annotation record store.
//!
//! Records are kept in one JSON file as a map from document id to that
//! document's list of [`AnnotationRecord`]s, in insertion order. A missing
//! file is an empty store.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use log::{debug, info};
use thiserror::Error;

use inkleaf::{
    InkleafError,
    record::{AnnotationRecord, RecordError},
    stroke::Stroke,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access record store {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Malformed record store {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl From<StoreError> for InkleafError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io { source, .. } => InkleafError::Io(source),
            StoreError::Record(err) => InkleafError::Record(err),
            err @ StoreError::Json { .. } => InkleafError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                err.to_string(),
            )),
        }
    }
}

/// Annotation records of every document, backed by a JSON file.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    documents: BTreeMap<u64, Vec<AnnotationRecord>>,
}

impl RecordStore {
    /// Opens the store at `path`, reading it if the file exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let documents = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = path.display().to_string(); "Record store not found, starting empty");
                BTreeMap::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(Self { path, documents })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records of one document, oldest first.
    pub fn records_for(&self, pdf_id: u64) -> &[AnnotationRecord] {
        self.documents.get(&pdf_id).map_or(&[], Vec::as_slice)
    }

    /// Encodes `stroke` and appends it to the document, assigning the next
    /// id (one past the largest present, 1 for an empty document) and the
    /// current time.
    pub fn append(
        &mut self,
        pdf_id: u64,
        stroke: &Stroke,
    ) -> Result<&AnnotationRecord, StoreError> {
        let mut record = AnnotationRecord::from_stroke(pdf_id, stroke, now_millis())?;
        let records = self.documents.entry(pdf_id).or_default();

        let id = records.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1;
        record.id = Some(id);
        records.push(record);

        debug!(pdf_id, id, tool:% = stroke.tool(); "Record appended");
        Ok(&records[records.len() - 1])
    }

    /// Writes the whole store back to its file.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.documents).map_err(|source| {
            StoreError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!(path = self.path.display().to_string(); "Record store saved");
        Ok(())
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}
