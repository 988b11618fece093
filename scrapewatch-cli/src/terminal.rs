//! Terminal render surface
//!
//! Draws a session as an append-only log on stdout: one status line
//! whenever the status text or a progress figure changes, and result rows
//! as they first appear. Redrawing happens on flush, so one batch of render
//! commands produces at most one status line.

use chrono::Local;
use colored::*;
use scrapewatch_core::{ControlId, ElementId, ResultRecord};
use scrapewatch_session::RenderSurface;
use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use tracing::warn;

/// Printed width of each results table column
const COLUMN_WIDTHS: [usize; 5] = [28, 36, 28, 28, 20];

/// Results table header, aligned with [`row_line`]
pub fn header_line() -> String {
    columns(ResultRecord::COLUMNS)
}

/// One results table row
pub fn row_line(record: &ResultRecord) -> String {
    columns(record.cells())
}

fn columns(cells: [&str; 5]) -> String {
    cells
        .iter()
        .zip(COLUMN_WIDTHS)
        .map(|(cell, width)| fit(cell, width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Pads or truncates to exactly `width` characters
fn fit(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        format!("{cell:<width$}")
    } else {
        let cut: String = cell.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

pub struct TerminalSurface<W: Write = Stdout> {
    out: W,
    texts: HashMap<ElementId, String>,
    progress: HashMap<ElementId, String>,
    enabled: HashMap<ControlId, bool>,
    rows: Vec<ResultRecord>,
    /// Rows already printed, in order
    shown_rows: Vec<ResultRecord>,
    status_changed: bool,
    download_ready: bool,
}

impl TerminalSurface<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            texts: HashMap::new(),
            progress: HashMap::new(),
            enabled: HashMap::new(),
            rows: Vec::new(),
            shown_rows: Vec::new(),
            status_changed: false,
            download_ready: false,
        }
    }

    /// Whether a control is currently enabled; untouched controls are not
    pub fn is_enabled(&self, control: ControlId) -> bool {
        self.enabled.get(&control).copied().unwrap_or(false)
    }

    fn text(&self, element: ElementId) -> &str {
        self.texts.get(&element).map(String::as_str).unwrap_or("")
    }

    fn percent(&self, element: ElementId) -> &str {
        self.progress
            .get(&element)
            .map(String::as_str)
            .unwrap_or("0.0%")
    }

    fn status_line(&self) -> String {
        let figures = format!(
            "links {} ({}) | details {} ({})",
            self.percent(ElementId::LinkProgress),
            self.text(ElementId::LinkCount),
            self.percent(ElementId::DetailProgress),
            self.text(ElementId::ScrapedCount),
        );
        format!(
            "{} {}  {}",
            Local::now().format("%H:%M:%S").to_string().dimmed(),
            self.text(ElementId::StatusMessage),
            figures.dimmed()
        )
    }

    fn row_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        // only rows past the printed prefix are new
        let fresh = if !self.shown_rows.is_empty() && self.rows.starts_with(&self.shown_rows) {
            self.shown_rows.len()
        } else {
            0
        };

        if fresh == 0 && !self.rows.is_empty() {
            lines.push(format!("Results ({} rows):", self.rows.len()).bold().to_string());
            lines.push(header_line().bold().to_string());
        }
        lines.extend(self.rows[fresh..].iter().map(row_line));
        lines
    }
}

impl<W: Write + Send> RenderSurface for TerminalSurface<W> {
    fn set_text(&mut self, element: ElementId, text: &str) {
        if self.texts.get(&element).map(String::as_str) != Some(text) {
            self.texts.insert(element, text.to_string());
            self.status_changed = true;
        }
    }

    fn set_progress(&mut self, element: ElementId, percent: &str) {
        if self.progress.get(&element).map(String::as_str) != Some(percent) {
            self.progress.insert(element, percent.to_string());
            self.status_changed = true;
        }
    }

    fn set_enabled(&mut self, control: ControlId, enabled: bool) {
        let was_enabled = self.enabled.insert(control, enabled).unwrap_or(false);
        if control == ControlId::Download && enabled && !was_enabled {
            self.download_ready = true;
        }
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn append_row(&mut self, record: &ResultRecord) {
        self.rows.push(record.clone());
    }

    fn flush(&mut self) {
        let mut lines = Vec::new();

        if self.status_changed {
            lines.push(self.status_line());
            self.status_changed = false;
        }

        if self.rows != self.shown_rows {
            lines.extend(self.row_lines());
            self.shown_rows = self.rows.clone();
        }

        if self.download_ready {
            lines.push(format!("{} Results ready for download", "✓".green()));
            self.download_ready = false;
        }

        if lines.is_empty() {
            return;
        }

        let mut block = lines.join("\n");
        block.push('\n');
        if let Err(e) = self
            .out
            .write_all(block.as_bytes())
            .and_then(|()| self.out.flush())
        {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrapewatch_core::RenderCommand;
    use scrapewatch_session::render;

    fn record(name: &str) -> ResultRecord {
        ResultRecord {
            name: Some(name.to_string()),
            address: Some("1 Main St".to_string()),
            ..Default::default()
        }
    }

    fn output(surface: &TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.out.clone()).unwrap()
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("", 2), "  ");
    }

    #[test]
    fn test_row_line_aligns_with_header() {
        let line = row_line(&record("Joe's Pipes"));
        assert!(line.starts_with("Joe's Pipes"));
        assert_eq!(line.find("1 Main St"), header_line().find("Address"));
    }

    #[test]
    fn test_status_line_only_on_change() {
        let mut surface = TerminalSurface::new(Vec::new());
        let batch = [
            RenderCommand::text(ElementId::StatusMessage, "Collecting links..."),
            RenderCommand::SetProgress {
                element: ElementId::LinkProgress,
                percent: "50.0%".to_string(),
            },
        ];

        render::apply(&mut surface, &batch);
        let first = output(&surface);
        assert!(first.contains("Collecting links..."));
        assert!(first.contains("50.0%"));
        assert_eq!(first.lines().count(), 1);

        render::apply(&mut surface, &batch);
        assert_eq!(output(&surface), first);
    }

    #[test]
    fn test_rows_printed_once() {
        let mut surface = TerminalSurface::new(Vec::new());

        render::apply(
            &mut surface,
            &[
                RenderCommand::ClearRows,
                RenderCommand::AppendRow(record("a")),
                RenderCommand::AppendRow(record("b")),
            ],
        );
        render::apply(
            &mut surface,
            &[
                RenderCommand::ClearRows,
                RenderCommand::AppendRow(record("a")),
                RenderCommand::AppendRow(record("b")),
                RenderCommand::AppendRow(record("c")),
            ],
        );

        let out = output(&surface);
        assert_eq!(out.matches("Address").count(), 1);
        assert_eq!(out.matches("1 Main St").count(), 3);
    }

    #[test]
    fn test_replaced_rows_reprint_table() {
        let mut surface = TerminalSurface::new(Vec::new());

        render::apply(
            &mut surface,
            &[RenderCommand::AppendRow(record("a"))],
        );
        render::apply(
            &mut surface,
            &[RenderCommand::ClearRows, RenderCommand::AppendRow(record("z"))],
        );

        let out = output(&surface);
        assert_eq!(out.matches("Address").count(), 2);
    }

    #[test]
    fn test_download_announced_once() {
        let mut surface = TerminalSurface::new(Vec::new());
        assert!(!surface.is_enabled(ControlId::Download));

        render::apply(
            &mut surface,
            &[RenderCommand::enable(ControlId::Download, true)],
        );
        render::apply(
            &mut surface,
            &[RenderCommand::enable(ControlId::Download, true)],
        );

        assert!(surface.is_enabled(ControlId::Download));
        assert_eq!(output(&surface).matches("ready for download").count(), 1);
    }
}
