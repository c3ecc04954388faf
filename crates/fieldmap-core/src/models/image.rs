//! Processed photo records.

use super::classification::ClassificationResult;
use super::metadata::RawMetadata;
use super::point::Point;
use super::status::WorkStatus;
use crate::exif::parse_exif_datetime;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

const UNKNOWN_CAMERA: &str = "Unknown";

/// Identifier of an image within its session: its position in the batch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ImageId(pub usize);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One processed photo.
///
/// Ingestion fields are fixed at construction. The GPS position and its
/// classification change together through [`ImageRecord::relocate`] and
/// [`ImageRecord::set_classification`]; annotations are plain fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    ordinal_index: usize,
    filename: String,
    size_bytes: u64,
    mime_type: String,
    camera: String,
    model: String,
    datetime: Option<String>,
    captured_at: Option<NaiveDateTime>,
    altitude: Option<f64>,
    position: Option<Point>,
    classification: Option<ClassificationResult>,

    pub selected: bool,
    pub work_status: WorkStatus,
    pub comments: String,

    /// Per-record failure recorded during ingestion or classification.
    pub error: Option<String>,
}

impl ImageRecord {
    /// Build a record from extracted metadata.
    ///
    /// `position` is the already-validated GPS point; annotation fields start
    /// at their defaults regardless of what `raw` carries.
    pub fn from_metadata(ordinal_index: usize, raw: &RawMetadata, position: Option<Point>) -> Self {
        let datetime = raw.datetime.clone();
        let captured_at = datetime.as_deref().and_then(parse_exif_datetime);

        Self {
            ordinal_index,
            filename: raw.filename.clone(),
            size_bytes: raw.size,
            mime_type: raw.mime_type.clone(),
            camera: raw.make.clone().unwrap_or_else(|| UNKNOWN_CAMERA.to_string()),
            model: raw.model.clone().unwrap_or_else(|| UNKNOWN_CAMERA.to_string()),
            datetime,
            captured_at,
            altitude: position.and(raw.gps_altitude),
            position,
            classification: None,
            selected: true,
            work_status: WorkStatus::default(),
            comments: String::new(),
            error: None,
        }
    }

    /// Record for a file whose metadata could not be read at all.
    pub fn failed(ordinal_index: usize, filename: impl Into<String>, error: impl Into<String>) -> Self {
        let mut record = Self::from_metadata(
            ordinal_index,
            &RawMetadata { filename: filename.into(), ..Default::default() },
            None,
        );
        record.error = Some(error.into());
        record
    }

    pub fn id(&self) -> ImageId {
        ImageId(self.ordinal_index)
    }

    pub fn ordinal_index(&self) -> usize {
        self.ordinal_index
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn camera(&self) -> &str {
        &self.camera
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Raw EXIF `DateTime` as reported.
    pub fn datetime(&self) -> Option<&str> {
        self.datetime.as_deref()
    }

    pub fn captured_at(&self) -> Option<NaiveDateTime> {
        self.captured_at
    }

    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    pub fn has_gps(&self) -> bool {
        self.position.is_some()
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn latitude(&self) -> Option<f64> {
        self.position.map(|p| p.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.position.map(|p| p.longitude)
    }

    pub fn classification(&self) -> Option<&ClassificationResult> {
        self.classification.as_ref()
    }

    /// Move the record to a new point. The previous classification is
    /// replaced wholesale by `classification`.
    pub fn relocate(&mut self, position: Point, classification: Option<ClassificationResult>) {
        self.position = Some(position);
        self.classification = classification;
    }

    pub fn set_classification(&mut self, classification: Option<ClassificationResult>) {
        self.classification = classification;
    }

    /// File extension including the dot, e.g. `.JPG`; empty when absent.
    pub fn extension(&self) -> &str {
        match self.filename.rfind('.') {
            Some(dot) if dot > 0 => &self.filename[dot..],
            _ => "",
        }
    }

    /// Name used for renamed exports: `{ordinal+1:03} - {label}{ext}` for a
    /// classified record, the original filename otherwise.
    pub fn display_name(&self) -> String {
        match self.classification.as_ref().and_then(ClassificationResult::label) {
            Some(label) if self.has_gps() => {
                format!("{:03} - {}{}", self.ordinal_index + 1, label, self.extension())
            }
            _ => self.filename.clone(),
        }
    }

    /// Snapshot of what a report renderer needs for this image.
    pub fn report_entry(&self) -> ReportEntry {
        ReportEntry {
            id: self.id(),
            display_name: self.display_name(),
            filename: self.filename.clone(),
            position: self.position,
            classification: self.classification.clone(),
            work_status: self.work_status,
            comments: self.comments.clone(),
            selected: self.selected,
        }
    }
}

/// Per-image data handed to an external renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub id: ImageId,
    pub display_name: String,
    pub filename: String,
    pub position: Option<Point>,
    pub classification: Option<ClassificationResult>,
    pub work_status: WorkStatus,
    pub comments: String,
    pub selected: bool,
}

/// Counts over one ingested batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct IngestStats {
    pub total: usize,
    pub with_gps: usize,
    pub without_gps: usize,
    pub errors: usize,
    /// Percentage of records with GPS, 0 for an empty batch.
    pub success_rate: f64,
}

impl IngestStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ImageRecord>) -> Self {
        let mut stats = IngestStats::default();
        for record in records {
            stats.total += 1;
            if record.has_gps() {
                stats.with_gps += 1;
            } else {
                stats.without_gps += 1;
            }
            if record.error.is_some() {
                stats.errors += 1;
            }
        }
        if stats.total > 0 {
            stats.success_rate = stats.with_gps as f64 / stats.total as f64 * 100.0;
        }
        stats
    }
}
