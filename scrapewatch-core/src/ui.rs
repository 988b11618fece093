//! Render vocabulary shared by the reconciler and every render surface

use crate::domain::record::ResultRecord;

/// Operator controls whose enablement tracks the job lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Start,
    Stop,
    Download,
}

/// Text and progress elements updated from status snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    StatusMessage,
    LinkProgress,
    DetailProgress,
    LinkCount,
    ScrapedCount,
}

/// One idempotent mutation of the render surface
///
/// Every command replaces state rather than accumulating it, so replaying
/// or reordering batches converges on the same picture.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    SetText { element: ElementId, text: String },
    /// Width and label of a progress bar, e.g. `"42.0%"`
    SetProgress { element: ElementId, percent: String },
    SetEnabled { control: ControlId, enabled: bool },
    ClearRows,
    AppendRow(ResultRecord),
}

impl RenderCommand {
    pub fn text(element: ElementId, text: impl Into<String>) -> Self {
        Self::SetText {
            element,
            text: text.into(),
        }
    }

    pub fn enable(control: ControlId, enabled: bool) -> Self {
        Self::SetEnabled { control, enabled }
    }
}

/// Enablement of the three operator controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiControlState {
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub download_enabled: bool,
}

impl UiControlState {
    /// Control state implied by the lock and result availability
    pub fn derive(locked: bool, has_results: bool) -> Self {
        Self {
            start_enabled: !locked,
            stop_enabled: locked,
            download_enabled: !locked && has_results,
        }
    }

    /// Commands that put every control into this state
    pub fn commands(&self) -> Vec<RenderCommand> {
        vec![
            RenderCommand::enable(ControlId::Start, self.start_enabled),
            RenderCommand::enable(ControlId::Stop, self.stop_enabled),
            RenderCommand::enable(ControlId::Download, self.download_enabled),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_locked() {
        let state = UiControlState::derive(true, true);
        assert!(!state.start_enabled);
        assert!(state.stop_enabled);
        assert!(!state.download_enabled);
    }

    #[test]
    fn test_derive_idle() {
        assert!(UiControlState::derive(false, true).download_enabled);
        assert!(!UiControlState::derive(false, false).download_enabled);
        assert!(UiControlState::derive(false, false).start_enabled);
    }
}
