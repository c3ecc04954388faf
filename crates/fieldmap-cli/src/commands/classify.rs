//! Classify command implementation

use crate::cli::IngestArgs;
use crate::config_loader::load_map;
use crate::output::{Notice, Printer};
use crate::output_types::{ClassifyOutput, ImageRow};
use crate::sidecar::read_batch;
use anyhow::Result;
use fieldmap_core::config::LayeredConfig;
use fieldmap_core::models::IngestStats;
use fieldmap_report::ImageStore;

pub async fn execute(args: IngestArgs, config: &LayeredConfig, printer: &mut Printer) -> Result<()> {
    let (_, index) = load_map(config)?;

    let loaded = read_batch(&args.sidecars, args.concurrency).await;
    let mut store = ImageStore::with_comment_limit(config.comment_limit.value);
    store.finish_batch(loaded.batch, &index);
    let stats = store.stats();

    if printer.is_json() {
        return printer.emit(ClassifyOutput { images: store.records().to_vec(), stats });
    }

    printer.heading("Images");
    printer.rows(store.records().iter().map(ImageRow::from).collect());
    print_stats(&stats, printer);
    Ok(())
}

pub(super) fn print_stats(stats: &IngestStats, printer: &mut Printer) {
    printer.heading("Ingestion");
    printer.field("Total", stats.total);
    printer.field("With GPS", stats.with_gps);
    printer.field("Without GPS", stats.without_gps);
    printer.field("Success rate", format!("{:.1}%", stats.success_rate));
    if stats.errors > 0 {
        printer.notice(Notice::Warning, format!("{} image(s) could not be processed", stats.errors));
    } else {
        printer.notice(Notice::Done, "All images processed");
    }
}
