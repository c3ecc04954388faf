use fieldmap_core::models::{
    ClassificationResult, ImageRecord, IngestStats, Region, ReportEntry, Summary, SummaryRow,
};
use serde::Serialize;
use tabled::Tabled;

/// Output for regions command
#[derive(Debug, Serialize)]
pub struct RegionsOutput {
    pub map_path: String,
    pub regions: Vec<RegionInfo>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct RegionInfo {
    #[tabled(rename = "ID")]
    pub id: usize,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Code")]
    #[tabled(display_with = "display_option")]
    pub code: Option<String>,
    #[tabled(rename = "Name")]
    #[tabled(display_with = "display_option")]
    pub name: Option<String>,
    #[tabled(rename = "Block")]
    #[tabled(display_with = "display_option")]
    pub block: Option<String>,
    #[tabled(rename = "Plot")]
    #[tabled(display_with = "display_option")]
    pub plot: Option<String>,
    #[tabled(rename = "Rings")]
    pub rings: usize,
}

impl From<&Region> for RegionInfo {
    fn from(region: &Region) -> Self {
        Self {
            id: region.id.0,
            label: region.label().to_string(),
            code: region.properties.code.clone(),
            name: region.properties.name.clone(),
            block: region.properties.block_number.clone(),
            plot: region.properties.plot_number.clone(),
            rings: region.ring_count(),
        }
    }
}

/// Output for locate command
#[derive(Debug, Serialize)]
pub struct LocateOutput {
    pub latitude: f64,
    pub longitude: f64,
    pub classification: ClassificationResult,
    pub description: String,
}

/// Output for classify command
#[derive(Debug, Serialize)]
pub struct ClassifyOutput {
    pub images: Vec<ImageRecord>,
    pub stats: IngestStats,
}

/// Output for summarize command
#[derive(Debug, Serialize)]
pub struct SummarizeOutput {
    pub summary: Summary,
    pub report: Vec<ReportEntry>,
    pub stats: IngestStats,
}

/// One line of the classify table
#[derive(Debug, Tabled)]
pub struct ImageRow {
    #[tabled(rename = "#")]
    pub ordinal: String,
    #[tabled(rename = "File")]
    pub filename: String,
    #[tabled(rename = "Latitude")]
    pub latitude: String,
    #[tabled(rename = "Longitude")]
    pub longitude: String,
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "Renamed")]
    pub display_name: String,
}

impl From<&ImageRecord> for ImageRow {
    fn from(record: &ImageRecord) -> Self {
        let location = match (record.classification(), &record.error) {
            (_, Some(error)) => format!("Error: {}", error),
            (Some(classification), None) => classification.describe(),
            (None, None) => "No GPS data".to_string(),
        };

        Self {
            ordinal: format!("{:03}", record.ordinal_index() + 1),
            filename: record.filename().to_string(),
            latitude: format_coordinate(record.latitude()),
            longitude: format_coordinate(record.longitude()),
            location,
            display_name: record.display_name(),
        }
    }
}

/// One line of a block or plot table
#[derive(Debug, Tabled)]
pub struct SummaryLine {
    #[tabled(rename = "Group")]
    pub group: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Photos")]
    pub photos: usize,
}

impl From<&SummaryRow> for SummaryLine {
    fn from(row: &SummaryRow) -> Self {
        Self {
            group: row.group_key.clone(),
            label: row.label.clone(),
            status: row.merged_status.to_string(),
            photos: row.members.len(),
        }
    }
}

/// One line of the config table
#[derive(Debug, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| format!("{:.6}", v)).unwrap_or_else(|| "-".to_string())
}

fn display_option(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}
