//! In-memory image record store.
//!
//! Records live in ordinal order: the position of a record in the store is
//! its position in the batch that produced it, whatever order the metadata
//! for that batch arrived in.

use fieldmap_core::config::DEFAULT_COMMENT_LIMIT;
use fieldmap_core::error::{FieldmapError, Result};
use fieldmap_core::exif::{supports_gps, validate_upload};
use fieldmap_core::models::{
    ImageId, ImageRecord, IngestStats, Point, RawMetadata, ReportEntry, WorkStatus,
};
use fieldmap_geo::{GeometryIndex, LocationClassifier};

/// Error marker for files whose type carries no GPS metadata.
pub const UNSUPPORTED_FORMAT: &str = "Unsupported file format for GPS extraction";

const INCOMPLETE_EXTRACTION: &str = "Metadata extraction did not complete";

#[derive(Debug, Clone)]
enum Slot {
    Pending { filename: String },
    Ready(Box<RawMetadata>),
    Failed { filename: String, error: String },
}

/// A batch of files whose metadata is being extracted.
///
/// Slots are fixed by the file-selection order when the batch is created;
/// extraction results can be delivered to them in any order.
#[derive(Debug, Clone)]
pub struct IngestBatch {
    slots: Vec<Slot>,
}

impl IngestBatch {
    pub fn new<S: Into<String>>(filenames: impl IntoIterator<Item = S>) -> Self {
        let slots = filenames
            .into_iter()
            .map(|filename| Slot::Pending { filename: filename.into() })
            .collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn ready(batch: Vec<RawMetadata>) -> Self {
        let slots = batch.into_iter().map(|raw| Slot::Ready(Box::new(raw))).collect();
        Self { slots }
    }

    /// Slots still waiting for a result
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|slot| matches!(slot, Slot::Pending { .. })).count()
    }

    /// Deliver the extraction outcome for `slot`. A later delivery to the
    /// same slot replaces the earlier one.
    pub fn complete(&mut self, slot: usize, outcome: Result<RawMetadata>) -> Result<()> {
        let entry = self.slots.get_mut(slot).ok_or(FieldmapError::RecordNotFound { id: slot })?;

        let filename = match entry {
            Slot::Pending { filename } | Slot::Failed { filename, .. } => filename.clone(),
            Slot::Ready(raw) => raw.filename.clone(),
        };

        *entry = match outcome {
            Ok(raw) => Slot::Ready(Box::new(raw)),
            Err(e) => Slot::Failed { filename, error: e.to_string() },
        };
        Ok(())
    }
}

/// The session's image records.
#[derive(Debug, Clone)]
pub struct ImageStore {
    records: Vec<ImageRecord>,
    comment_limit: usize,
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStore {
    pub fn new() -> Self {
        Self::with_comment_limit(DEFAULT_COMMENT_LIMIT)
    }

    pub fn with_comment_limit(comment_limit: usize) -> Self {
        Self { records: Vec::new(), comment_limit }
    }

    pub fn comment_limit(&self) -> usize {
        self.comment_limit
    }

    /// Replace the session with records built from `batch`, in input order.
    pub fn ingest(&mut self, batch: Vec<RawMetadata>, index: &GeometryIndex) -> &[ImageRecord] {
        self.finish_batch(IngestBatch::ready(batch), index)
    }

    /// Turn a completed batch into the session's records.
    ///
    /// Slots that never received a result become failed records; no single
    /// failure prevents the rest of the batch from being classified.
    pub fn finish_batch(&mut self, batch: IngestBatch, index: &GeometryIndex) -> &[ImageRecord] {
        let classifier = LocationClassifier::new(index);

        self.records = batch
            .slots
            .into_iter()
            .enumerate()
            .map(|(ordinal, slot)| match slot {
                Slot::Ready(raw) => build_record(ordinal, &raw, &classifier),
                Slot::Failed { filename, error } => {
                    tracing::warn!(filename = %filename, error = %error, "Metadata extraction failed");
                    ImageRecord::failed(ordinal, filename, error)
                }
                Slot::Pending { filename } => {
                    tracing::warn!(filename = %filename, "Metadata extraction never completed");
                    ImageRecord::failed(ordinal, filename, INCOMPLETE_EXTRACTION)
                }
            })
            .collect();

        let stats = self.stats();
        tracing::info!(
            total = stats.total,
            with_gps = stats.with_gps,
            errors = stats.errors,
            "Ingested image batch"
        );

        &self.records
    }

    /// Move an image to `point` and classify it there.
    ///
    /// The new classification replaces the old one in the same step and any
    /// ingest error is cleared, since the record now has a usable position.
    /// On error the record is left untouched.
    pub fn relocate(&mut self, id: ImageId, point: Point, index: &GeometryIndex) -> Result<&ImageRecord> {
        let point = point.validated()?;
        let classification = LocationClassifier::new(index).classify(point)?;

        let record = self.get_mut(id)?;
        record.relocate(point, Some(classification));
        record.error = None;
        tracing::debug!(image = %id, "Relocated image");
        Ok(record)
    }

    pub fn set_work_status(&mut self, id: ImageId, status: WorkStatus) -> Result<()> {
        self.get_mut(id)?.work_status = status;
        Ok(())
    }

    /// Flip between done and not done; returns the new status
    pub fn toggle_work_status(&mut self, id: ImageId) -> Result<WorkStatus> {
        let record = self.get_mut(id)?;
        record.work_status = record.work_status.toggled();
        Ok(record.work_status)
    }

    pub fn set_selected(&mut self, id: ImageId, selected: bool) -> Result<()> {
        self.get_mut(id)?.selected = selected;
        Ok(())
    }

    /// Select or deselect every record for the report.
    pub fn set_all_selected(&mut self, selected: bool) {
        for record in &mut self.records {
            record.selected = selected;
        }
    }

    /// Store a comment. The length limit is advisory: longer text is kept
    /// and `Ok(false)` is returned.
    pub fn set_comment(&mut self, id: ImageId, text: impl Into<String>) -> Result<bool> {
        let limit = self.comment_limit;
        let record = self.get_mut(id)?;
        record.comments = text.into();

        let length = record.comments.chars().count();
        if length > limit {
            tracing::warn!(image = %id, length, limit, "Comment exceeds length limit");
            return Ok(false);
        }
        Ok(true)
    }

    /// Classify every positioned record again, e.g. after a new region set
    /// was loaded.
    pub fn reclassify_all(&mut self, index: &GeometryIndex) {
        let classifier = LocationClassifier::new(index);
        for record in &mut self.records {
            let Some(point) = record.position() else {
                continue;
            };
            match classifier.classify(point) {
                Ok(classification) => record.set_classification(Some(classification)),
                Err(e) => {
                    tracing::warn!(image = %record.id(), error = %e, "Reclassification failed");
                    record.set_classification(None);
                    record.error = Some(e.to_string());
                }
            }
        }
    }

    pub fn get(&self, id: ImageId) -> Option<&ImageRecord> {
        self.records.get(id.0)
    }

    fn get_mut(&mut self, id: ImageId) -> Result<&mut ImageRecord> {
        self.records.get_mut(id.0).ok_or(FieldmapError::RecordNotFound { id: id.0 })
    }

    /// Records in ordinal order
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> IngestStats {
        IngestStats::from_records(&self.records)
    }

    /// Entries for the images selected for the report, in ordinal order
    pub fn report_entries(&self) -> Vec<ReportEntry> {
        self.records
            .iter()
            .filter(|record| record.selected)
            .map(ImageRecord::report_entry)
            .collect()
    }
}

/// Build one record, isolating any failure to that record.
fn build_record(ordinal: usize, raw: &RawMetadata, classifier: &LocationClassifier<'_>) -> ImageRecord {
    if let Err(e) = validate_upload(&raw.filename, &raw.mime_type, raw.size) {
        tracing::warn!(filename = %raw.filename, error = %e, "Rejected upload");
        let mut record = ImageRecord::from_metadata(ordinal, raw, None);
        record.error = Some(e.to_string());
        return record;
    }

    if !supports_gps(&raw.mime_type) {
        tracing::warn!(filename = %raw.filename, mime_type = %raw.mime_type, "Unsupported file format");
        let mut record = ImageRecord::from_metadata(ordinal, raw, None);
        record.error = Some(UNSUPPORTED_FORMAT.to_string());
        return record;
    }

    let position = match raw.gps_point() {
        Ok(position) => position,
        Err(e) => {
            tracing::warn!(filename = %raw.filename, error = %e, "Unreadable GPS metadata");
            let mut record = ImageRecord::from_metadata(ordinal, raw, None);
            record.error = Some(e.to_string());
            return record;
        }
    };

    let mut record = ImageRecord::from_metadata(ordinal, raw, position);
    if let Some(point) = position {
        match classifier.classify(point) {
            Ok(classification) => record.set_classification(Some(classification)),
            Err(e) => {
                tracing::warn!(filename = %raw.filename, error = %e, "Classification failed");
                record.error = Some(e.to_string());
            }
        }
    }
    record
}
