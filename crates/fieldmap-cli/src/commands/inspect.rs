//! Inspect-config command implementation

use crate::output::{Notice, Printer};
use crate::output_types::ConfigRow;
use anyhow::Result;
use fieldmap_core::config::LayeredConfig;
use std::collections::BTreeMap;

pub fn execute(config: &LayeredConfig, printer: &mut Printer) -> Result<()> {
    let inspection: BTreeMap<_, _> = config.to_inspection_map().into_iter().collect();

    if printer.is_json() {
        let entries: BTreeMap<String, serde_json::Value> = inspection
            .into_iter()
            .map(|(key, (value, source))| {
                (key, serde_json::json!({ "value": value, "source": source }))
            })
            .collect();
        return printer.emit(entries);
    }

    printer.heading("Configuration Values");
    let rows: Vec<ConfigRow> = inspection
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
        .collect();
    printer.rows(rows);

    printer.heading("Configuration Precedence");
    printer.notice(
        Notice::Info,
        "CLI arguments > Environment variables > Config file > Defaults",
    );
    Ok(())
}
