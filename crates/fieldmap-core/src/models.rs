pub mod classification;
pub mod image;
pub mod metadata;
pub mod point;
pub mod region;
pub mod status;
pub mod summary;

pub use classification::{ClassificationResult, LocationStatus};
pub use image::{ImageId, ImageRecord, IngestStats, ReportEntry};
pub use metadata::RawMetadata;
pub use point::Point;
pub use region::{Region, RegionId, RegionProperties, Ring, UNKNOWN_LABEL};
pub use status::WorkStatus;
pub use summary::{GroupDimension, Summary, SummaryRow};
