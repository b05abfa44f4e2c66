//! Output formatting and writing utilities
//!
//! Results are written to stdout in the selected format (JSON, YAML,
//! human-readable). Status lines only appear in human mode.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, trace};
use unicode_width::UnicodeWidthStr;

/// Trait for formatting serializable output
pub trait OutputFormatter {
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => {
                Ok(serde_json::to_string_pretty(value)?)
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: progress && !quiet && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            writer,
        }
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let mut logged = serde_json::to_value(value)?;
        redaction::redact_json_value(&mut logged);
        trace!(data = %logged, "Outputting data");

        let formatted = self.format.format(value)?;
        self.writeln(formatted.trim_end())
    }

    /// Write a list of records.
    ///
    /// Human output renders the given fields as a table; other formats write
    /// the value unchanged.
    pub fn records(&mut self, value: &Value, columns: &[&str]) -> Result<()> {
        let items = match (self.format, value.as_array()) {
            (OutputFormat::Human, Some(items)) => items,
            _ => return self.data(value),
        };

        if items.is_empty() {
            return self.info("No entries");
        }

        let rows = items
            .iter()
            .map(|item| {
                columns
                    .iter()
                    .map(|column| item.get(*column).map(format_cell).unwrap_or_default())
                    .collect()
            })
            .collect();
        self.table(columns, rows)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(display_width(cell));
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| pad(h, widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");
        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(&header_row)?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(width) => pad(cell, *width),
                    None => cell.clone(),
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// Spinner style used for network calls
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Width in terminal columns; wide CJK characters take two
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

/// Render a JSON value as one table cell
fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            if arr.len() <= 3 {
                arr.iter().map(format_cell).collect::<Vec<_>>().join(", ")
            } else {
                format!("[{} items]", arr.len())
            }
        }
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn writer(format: OutputFormat) -> (OutputWriter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let writer = OutputWriter::with_writer(format, false, false, Box::new(buffer.clone()));
        (writer, buffer)
    }

    #[test]
    fn test_records_as_table() {
        let (mut output, buffer) = writer(OutputFormat::Human);
        let banks = json!([
            {"id": "b1", "name": "Rust", "question_count": 12},
            {"id": "b2", "name": "数学", "question_count": 3, "subject": "math"}
        ]);

        output.records(&banks, &["id", "name", "question_count"]).unwrap();

        let text = buffer.contents();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id │ name │ question_count"));
        assert!(lines[2].starts_with("b1 │ Rust │ 12"));
        assert!(lines[3].starts_with("b2 │ 数学 │ 3"));
    }

    #[test]
    fn test_records_in_json_mode_are_unchanged() {
        let (mut output, buffer) = writer(OutputFormat::Json);
        let banks = json!([{"id": "b1", "name": "Rust"}]);

        output.records(&banks, &["id"]).unwrap();
        output.info("ignored in json mode").unwrap();

        let parsed: Value = serde_json::from_str(buffer.contents().trim()).unwrap();
        assert_eq!(parsed, banks);
    }

    #[test]
    fn test_yaml_output() {
        let (mut output, buffer) = writer(OutputFormat::Yaml);
        output.data(&json!({"status": "ok"})).unwrap();
        assert_eq!(buffer.contents().trim(), "status: ok");
    }

    #[test]
    fn test_quiet_suppresses_status_lines() {
        let buffer = SharedBuffer::default();
        let mut output =
            OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));

        output.info("hello").unwrap();
        output.success("done").unwrap();
        output.data(&json!({"ok": true})).unwrap();

        assert!(!buffer.contents().contains("hello"));
        assert!(!buffer.contents().contains("done"));
        assert!(buffer.contents().contains("\"ok\": true"));
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("Rust"), 4);
        assert_eq!(display_width("数学"), 4);
        assert_eq!(display_width("│✓✗—"), 4);
    }

    #[test]
    fn test_table_aligns_symbols_and_cjk() {
        let (mut output, buffer) = writer(OutputFormat::Human);
        let rows = vec![
            vec!["✓ done".to_string(), "a".to_string()],
            vec!["题库".to_string(), "b".to_string()],
        ];

        output.table(&["status", "id"], rows).unwrap();

        let text = buffer.contents();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "✓ done │ a");
        assert_eq!(lines[3], "题库   │ b");
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(&json!("A")), "A");
        assert_eq!(format_cell(&json!(null)), "");
        assert_eq!(format_cell(&json!(["a", "b"])), "a, b");
        assert_eq!(format_cell(&json!([1, 2, 3, 4])), "[4 items]");
        assert_eq!(format_cell(&json!({"a": 1})), "{1 fields}");
    }
}
