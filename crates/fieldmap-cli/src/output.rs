//! Terminal and JSON rendering of command results.

use console::style;
use serde::Serialize;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Done,
    Info,
    Warning,
}

/// Renders one command's output.
///
/// `Text` prints as it goes. `Json` prints nothing until [`Printer::emit`],
/// which writes a single envelope on stdout; warnings raised before that are
/// carried inside it.
#[derive(Debug)]
pub enum Printer {
    Text,
    Json { warnings: Vec<String> },
}

#[derive(Debug, Serialize)]
struct Envelope<T> {
    status: &'static str,
    data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        if json {
            Printer::Json { warnings: Vec::new() }
        } else {
            Printer::Text
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Printer::Json { .. })
    }

    pub fn heading(&self, title: impl Display) {
        if let Printer::Text = self {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn field(&self, key: impl Display, value: impl Display) {
        if let Printer::Text = self {
            println!("{}: {}", style(key).bold(), value);
        }
    }

    pub fn rows<T: Tabled>(&self, rows: Vec<T>) {
        if !matches!(self, Printer::Text) {
            return;
        }
        if rows.is_empty() {
            println!("{}", style("(no data)").dim());
            return;
        }
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }

    /// Status line. Warnings go to stderr as text and into the envelope as
    /// JSON; other notices are text only.
    pub fn notice(&mut self, kind: Notice, message: impl Display) {
        match (self, kind) {
            (Printer::Text, Notice::Done) => println!("{} {}", style("✓").green().bold(), message),
            (Printer::Text, Notice::Info) => println!("{} {}", style("ℹ").blue().bold(), message),
            (Printer::Text, Notice::Warning) => {
                eprintln!("{} {}", style("⚠").yellow().bold(), message)
            }
            (Printer::Json { warnings }, Notice::Warning) => warnings.push(message.to_string()),
            (Printer::Json { .. }, _) => {}
        }
    }

    /// Write the JSON envelope for `data`. Text mode has already printed.
    pub fn emit<T: Serialize>(&mut self, data: T) -> anyhow::Result<()> {
        if let Some(envelope) = self.envelope(data) {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Ok(())
    }

    fn envelope<T: Serialize>(&mut self, data: T) -> Option<Envelope<T>> {
        match self {
            Printer::Text => None,
            Printer::Json { warnings } => Some(Envelope {
                status: "success",
                data,
                warnings: std::mem::take(warnings),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_envelope_carries_warnings() {
        let mut printer = Printer::new(true);
        printer.notice(Notice::Info, "ignored");
        printer.notice(Notice::Warning, "comment too long");

        let envelope = printer.envelope(json!({ "count": 2 })).unwrap();
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["count"], 2);
        assert_eq!(value["warnings"], json!(["comment too long"]));

        let again = serde_json::to_value(printer.envelope(1).unwrap()).unwrap();
        assert!(again.get("warnings").is_none());
    }

    #[test]
    fn test_text_mode_has_no_envelope() {
        let mut printer = Printer::new(false);
        assert!(!printer.is_json());
        assert!(printer.envelope("data").is_none());
    }
}
