//! Block and plot summary tables.

use std::collections::HashMap;

use fieldmap_core::models::{GroupDimension, ImageRecord, Summary, SummaryRow};
use fieldmap_core::ordering::natural_cmp;
use fieldmap_geo::GeometryIndex;

/// Builds summary tables from image records.
///
/// Group values come from the matched region's attributes, looked up in the
/// index the records were classified against.
#[derive(Debug, Clone, Copy)]
pub struct ReportAggregator<'a> {
    index: &'a GeometryIndex,
}

impl<'a> ReportAggregator<'a> {
    pub fn new(index: &'a GeometryIndex) -> Self {
        Self { index }
    }

    /// Snapshot both tables for `records`.
    pub fn summarize(&self, records: &[ImageRecord]) -> Summary {
        let summary = Summary {
            block_rows: self.rows(records, GroupDimension::Block),
            plot_rows: self.rows(records, GroupDimension::Plot),
        };
        tracing::debug!(
            blocks = summary.block_rows.len(),
            plots = summary.plot_rows.len(),
            "Summarized records"
        );
        summary
    }

    /// Rows for one dimension, sorted by group value then label.
    pub fn rows(&self, records: &[ImageRecord], dimension: GroupDimension) -> Vec<SummaryRow> {
        let mut rows: Vec<SummaryRow> = Vec::new();
        let mut positions: HashMap<(String, String), usize> = HashMap::new();

        for record in records {
            let Some((group, label)) = self.group_key(record, dimension) else {
                continue;
            };

            let key = (group.to_string(), label.to_string());
            let position = *positions.entry(key).or_insert_with(|| {
                rows.push(SummaryRow::new(group, label, record.work_status));
                rows.len() - 1
            });
            rows[position].absorb(record.id(), record.work_status);
        }

        rows.sort_by(|a, b| {
            natural_cmp(&a.group_key, &b.group_key).then_with(|| a.label.cmp(&b.label))
        });
        rows
    }

    /// `(group value, label)` for a record, or `None` when it does not
    /// belong in the table.
    fn group_key<'r>(
        &self,
        record: &'r ImageRecord,
        dimension: GroupDimension,
    ) -> Option<(&'a str, &'r str)> {
        if !record.has_gps() {
            return None;
        }
        let classification = record.classification()?;
        let label = classification.label()?;
        let region = self.index.region(classification.region()?)?;
        let group = region.group_value(dimension).filter(|value| !value.is_empty())?;
        Some((group, label))
    }
}
