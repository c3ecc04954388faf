//! Summary tables built from classified images.

use super::image::ImageId;
use super::status::WorkStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Region attribute a summary table is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupDimension {
    /// "Quadra"
    Block,
    /// "Canteiro"
    Plot,
}

impl GroupDimension {
    pub const ALL: [GroupDimension; 2] = [GroupDimension::Block, GroupDimension::Plot];
}

impl fmt::Display for GroupDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupDimension::Block => f.write_str("Block"),
            GroupDimension::Plot => f.write_str("Plot"),
        }
    }
}

/// One `(group value, label)` row of a summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub group_key: String,
    pub label: String,
    pub merged_status: WorkStatus,
    /// Contributing images in encounter order.
    pub members: Vec<ImageId>,
}

impl SummaryRow {
    pub fn new(group_key: impl Into<String>, label: impl Into<String>, status: WorkStatus) -> Self {
        Self {
            group_key: group_key.into(),
            label: label.into(),
            merged_status: status,
            members: Vec::new(),
        }
    }

    /// Add a contributing image, raising the merged status if needed.
    pub fn absorb(&mut self, image: ImageId, status: WorkStatus) {
        self.merged_status = self.merged_status.merge(status);
        self.members.push(image);
    }
}

/// Both summary tables.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub block_rows: Vec<SummaryRow>,
    pub plot_rows: Vec<SummaryRow>,
}

impl Summary {
    pub fn rows(&self, dimension: GroupDimension) -> &[SummaryRow] {
        match dimension {
            GroupDimension::Block => &self.block_rows,
            GroupDimension::Plot => &self.plot_rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.block_rows.is_empty() && self.plot_rows.is_empty()
    }
}
