//! Concurrent reading of per-photo metadata sidecars.

use fieldmap_core::error::{FieldmapError, Result};
use fieldmap_core::models::{RawMetadata, WorkStatus};
use fieldmap_report::IngestBatch;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};

/// Annotations a sidecar may carry from an earlier session.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    pub work_status: Option<WorkStatus>,
    pub comments: Option<String>,
    pub selected: Option<bool>,
}

impl Annotations {
    fn from_raw(raw: &RawMetadata) -> Self {
        Self {
            work_status: raw.work_status,
            comments: raw.comments.clone(),
            selected: raw.selected,
        }
    }
}

/// Sidecars read into an ingest batch, with their annotations by slot.
pub struct LoadedBatch {
    pub batch: IngestBatch,
    pub annotations: Vec<Annotations>,
}

/// Read every sidecar, at most `concurrency` at a time.
///
/// Reads complete in any order; each result lands in the slot of its
/// position in `paths`.
pub async fn read_batch(paths: &[PathBuf], concurrency: usize) -> LoadedBatch {
    let mut batch = IngestBatch::new(paths.iter().map(|path| photo_name(path)));
    let mut annotations = vec![Annotations::default(); paths.len()];

    let mut reads = stream::iter(paths.iter().enumerate())
        .map(|(slot, path)| async move { (slot, read_sidecar(path).await) })
        .buffer_unordered(concurrency.max(1));

    while let Some((slot, outcome)) = reads.next().await {
        if let Ok(raw) = &outcome {
            annotations[slot] = Annotations::from_raw(raw);
        }
        if let Err(e) = batch.complete(slot, outcome) {
            tracing::error!(slot, error = %e, "Sidecar result for unknown slot");
        }
    }

    LoadedBatch { batch, annotations }
}

/// Read and normalize one sidecar.
pub async fn read_sidecar(path: &Path) -> Result<RawMetadata> {
    let content = tokio::fs::read_to_string(path).await?;
    let mut raw: RawMetadata =
        serde_json::from_str(&content).map_err(|e| FieldmapError::Metadata {
            filename: photo_name(path),
            reason: format!("Invalid metadata sidecar: {}", e),
        })?;

    if raw.filename.is_empty() {
        raw.filename = photo_name(path);
    }
    if raw.mime_type.is_empty() {
        raw.mime_type = guess_mime_type(&raw.filename).to_string();
    }

    tracing::debug!(path = %path.display(), filename = %raw.filename, "Read sidecar");
    Ok(raw)
}

/// Photo name for a sidecar: `IMG_0001.JPG.json` -> `IMG_0001.JPG`
fn photo_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("unnamed")
        .to_string()
}

fn guess_mime_type(filename: &str) -> &'static str {
    let extension = filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("png") => "image/png",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}
