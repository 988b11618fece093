//! Render surface
//!
//! The visual side of a session (status line, progress bars, result table
//! and the three controls) reached only through [`RenderSurface`]. The
//! controller never knows what draws it.

use std::collections::HashMap;

use scrapewatch_core::{ControlId, ElementId, RenderCommand, ResultRecord};

/// Capabilities the controller needs from whatever displays the session
pub trait RenderSurface: Send {
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Sets a progress bar's width and label from the same percent string
    fn set_progress(&mut self, element: ElementId, percent: &str);

    fn set_enabled(&mut self, control: ControlId, enabled: bool);

    fn clear_rows(&mut self);

    fn append_row(&mut self, record: &ResultRecord);

    /// Called once after each batch of commands
    fn flush(&mut self) {}
}

/// Applies a batch of commands in order, then flushes
pub fn apply<S: RenderSurface + ?Sized>(surface: &mut S, commands: &[RenderCommand]) {
    for command in commands {
        match command {
            RenderCommand::SetText { element, text } => surface.set_text(*element, text),
            RenderCommand::SetProgress { element, percent } => {
                surface.set_progress(*element, percent)
            }
            RenderCommand::SetEnabled { control, enabled } => {
                surface.set_enabled(*control, *enabled)
            }
            RenderCommand::ClearRows => surface.clear_rows(),
            RenderCommand::AppendRow(record) => surface.append_row(record),
        }
    }
    surface.flush();
}

/// In-memory surface that records every call and the resulting picture
#[derive(Debug, Default)]
pub struct RecordingSurface {
    log: Vec<RenderCommand>,
    texts: HashMap<ElementId, String>,
    progress: HashMap<ElementId, String>,
    enabled: HashMap<ControlId, bool>,
    rows: Vec<ResultRecord>,
    flushes: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command received, in order
    pub fn log(&self) -> &[RenderCommand] {
        &self.log
    }

    /// Drains the command log, keeping the current picture
    pub fn take_log(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.log)
    }

    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.texts.get(&element).map(String::as_str)
    }

    pub fn progress(&self, element: ElementId) -> Option<&str> {
        self.progress.get(&element).map(String::as_str)
    }

    /// Current enablement, `None` if the control was never touched
    pub fn enabled(&self, control: ControlId) -> Option<bool> {
        self.enabled.get(&control).copied()
    }

    pub fn rows(&self) -> &[ResultRecord] {
        &self.rows
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl RenderSurface for RecordingSurface {
    fn set_text(&mut self, element: ElementId, text: &str) {
        self.log.push(RenderCommand::text(element, text));
        self.texts.insert(element, text.to_string());
    }

    fn set_progress(&mut self, element: ElementId, percent: &str) {
        self.log.push(RenderCommand::SetProgress {
            element,
            percent: percent.to_string(),
        });
        self.progress.insert(element, percent.to_string());
    }

    fn set_enabled(&mut self, control: ControlId, enabled: bool) {
        self.log.push(RenderCommand::enable(control, enabled));
        self.enabled.insert(control, enabled);
    }

    fn clear_rows(&mut self) {
        self.log.push(RenderCommand::ClearRows);
        self.rows.clear();
    }

    fn append_row(&mut self, record: &ResultRecord) {
        self.log.push(RenderCommand::AppendRow(record.clone()));
        self.rows.push(record.clone());
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_updates_picture() {
        let mut surface = RecordingSurface::new();
        let row = ResultRecord {
            name: Some("Joe's Pipes".to_string()),
            ..Default::default()
        };
        let commands = vec![
            RenderCommand::text(ElementId::StatusMessage, "Scraping..."),
            RenderCommand::SetProgress {
                element: ElementId::LinkProgress,
                percent: "50.0%".to_string(),
            },
            RenderCommand::enable(ControlId::Stop, true),
            RenderCommand::AppendRow(row.clone()),
        ];

        apply(&mut surface, &commands);

        assert_eq!(surface.log(), commands.as_slice());
        assert_eq!(surface.text(ElementId::StatusMessage), Some("Scraping..."));
        assert_eq!(surface.progress(ElementId::LinkProgress), Some("50.0%"));
        assert_eq!(surface.enabled(ControlId::Stop), Some(true));
        assert_eq!(surface.enabled(ControlId::Start), None);
        assert_eq!(surface.rows(), &[row]);
        assert_eq!(surface.flushes(), 1);
    }

    #[test]
    fn test_clear_rows_replaces_table() {
        let mut surface = RecordingSurface::new();
        apply(
            &mut surface,
            &[
                RenderCommand::AppendRow(ResultRecord::default()),
                RenderCommand::AppendRow(ResultRecord::default()),
            ],
        );
        apply(&mut surface, &[RenderCommand::ClearRows]);

        assert!(surface.rows().is_empty());
        assert_eq!(surface.take_log().len(), 3);
        assert!(surface.log().is_empty());
    }
}
