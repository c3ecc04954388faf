//! Locate command implementation

use crate::cli::LocateArgs;
use crate::config_loader::load_map;
use crate::output::Printer;
use crate::output_types::LocateOutput;
use anyhow::Result;
use fieldmap_core::config::LayeredConfig;
use fieldmap_core::models::Point;
use fieldmap_geo::LocationClassifier;

pub fn execute(args: LocateArgs, config: &LayeredConfig, printer: &mut Printer) -> Result<()> {
    let (_, index) = load_map(config)?;
    let classification = LocationClassifier::new(&index).classify(Point::from_lat_lon(args.lat, args.lon))?;

    if printer.is_json() {
        let description = classification.describe();
        return printer.emit(LocateOutput {
            latitude: args.lat,
            longitude: args.lon,
            classification,
            description,
        });
    }

    printer.heading("Location");
    printer.field("Point", format!("{:.6}, {:.6}", args.lat, args.lon));
    printer.field("Label", classification.label().unwrap_or("-"));
    printer.field("Status", classification.describe());
    if let Some(region) = classification.region().and_then(|id| index.region(id)) {
        if let Some(block) = region.properties.block_number.as_deref() {
            printer.field("Block", block);
        }
        if let Some(plot) = region.properties.plot_number.as_deref() {
            printer.field("Plot", plot);
        }
    }
    Ok(())
}
