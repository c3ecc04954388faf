//! Regions command implementation

use crate::config_loader::load_map;
use crate::output::Printer;
use crate::output_types::{RegionInfo, RegionsOutput};
use anyhow::Result;
use fieldmap_core::config::LayeredConfig;

pub fn execute(config: &LayeredConfig, printer: &mut Printer) -> Result<()> {
    let (map_path, index) = load_map(config)?;
    let regions: Vec<RegionInfo> = index.regions().map(RegionInfo::from).collect();

    if printer.is_json() {
        return printer.emit(RegionsOutput {
            map_path: map_path.display().to_string(),
            regions,
        });
    }

    printer.heading("Regions");
    printer.field("Map", map_path.display());
    printer.field("Count", regions.len());
    printer.rows(regions);
    Ok(())
}
