//! Summarize command implementation

use crate::cli::IngestArgs;
use crate::config_loader::load_map;
use crate::output::{Notice, Printer};
use crate::output_types::{SummarizeOutput, SummaryLine};
use crate::sidecar::{read_batch, Annotations};
use anyhow::Result;
use fieldmap_core::config::LayeredConfig;
use fieldmap_core::models::{GroupDimension, ImageId};
use fieldmap_report::{ImageStore, ReportAggregator};

use super::classify::print_stats;

pub async fn execute(args: IngestArgs, config: &LayeredConfig, printer: &mut Printer) -> Result<()> {
    let (_, index) = load_map(config)?;

    let loaded = read_batch(&args.sidecars, args.concurrency).await;
    let mut store = ImageStore::with_comment_limit(config.comment_limit.value);
    store.finish_batch(loaded.batch, &index);
    apply_annotations(&mut store, &loaded.annotations, printer)?;

    let summary = ReportAggregator::new(&index).summarize(store.records());

    if printer.is_json() {
        return printer.emit(SummarizeOutput {
            summary,
            report: store.report_entries(),
            stats: store.stats(),
        });
    }

    for dimension in GroupDimension::ALL {
        printer.heading(format!("{} summary", dimension));
        printer.rows(summary.rows(dimension).iter().map(SummaryLine::from).collect());
    }
    print_stats(&store.stats(), printer);
    printer.notice(
        Notice::Info,
        format!("{} image(s) selected for the report", store.report_entries().len()),
    );
    Ok(())
}

fn apply_annotations(
    store: &mut ImageStore,
    annotations: &[Annotations],
    printer: &mut Printer,
) -> Result<()> {
    for (ordinal, annotation) in annotations.iter().enumerate() {
        let id = ImageId(ordinal);
        if let Some(status) = annotation.work_status {
            store.set_work_status(id, status)?;
        }
        if let Some(selected) = annotation.selected {
            store.set_selected(id, selected)?;
        }
        if let Some(comments) = &annotation.comments {
            if !store.set_comment(id, comments.as_str())? {
                let message = format!(
                    "Comment on image {} exceeds {} characters",
                    ordinal + 1,
                    store.comment_limit()
                );
                printer.notice(Notice::Warning, message);
            }
        }
    }
    Ok(())
}
