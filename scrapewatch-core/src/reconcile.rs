//! Job state reconciliation
//!
//! Pure functions that turn server observations into render commands. The
//! caller owns the lock state and feeds it back in on every snapshot, which
//! keeps the decision a function of `(previous lock, latest snapshot)`.

use crate::domain::record::ResultRecord;
use crate::domain::status::StatusSnapshot;
use crate::ui::{ControlId, ElementId, RenderCommand, UiControlState};

/// Outcome of reconciling one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Lock state after this snapshot
    pub locked: bool,
    /// True only on the snapshot that ends a locked run; the poller must stop
    pub job_ended: bool,
    /// Control state decided on the job-ended edge, `None` otherwise
    pub controls: Option<UiControlState>,
    pub commands: Vec<RenderCommand>,
}

/// Reconciles a status snapshot against the previous lock state
///
/// Progress indicators are always rendered. Controls change only on the
/// locked-to-inactive edge, so later inactive snapshots are no-ops for them.
pub fn reconcile(previously_locked: bool, snapshot: &StatusSnapshot) -> Reconciliation {
    let mut commands = vec![
        RenderCommand::text(ElementId::StatusMessage, snapshot.status_message.as_str()),
        RenderCommand::SetProgress {
            element: ElementId::LinkProgress,
            percent: format_percent(snapshot.link_collection_progress),
        },
        RenderCommand::SetProgress {
            element: ElementId::DetailProgress,
            percent: format_percent(snapshot.detail_scraping_progress),
        },
        RenderCommand::text(ElementId::LinkCount, snapshot.link_count.to_string()),
        RenderCommand::text(
            ElementId::ScrapedCount,
            format!("{}/{}", snapshot.scraped_count, snapshot.total_to_scrape),
        ),
    ];

    if !(previously_locked && !snapshot.active) {
        return Reconciliation {
            locked: previously_locked,
            job_ended: false,
            controls: None,
            commands,
        };
    }

    let controls = UiControlState::derive(false, snapshot.has_results());
    commands.push(RenderCommand::enable(ControlId::Start, true));
    commands.push(RenderCommand::enable(ControlId::Stop, false));
    // never disable here: the result fetcher may already have enabled it
    if controls.download_enabled {
        commands.push(RenderCommand::enable(ControlId::Download, true));
    }

    Reconciliation {
        locked: false,
        job_ended: true,
        controls: Some(controls),
        commands,
    }
}

/// Replaces the rendered result rows with a freshly fetched set
///
/// Enables the download control whenever the set is non-empty and leaves it
/// untouched otherwise.
pub fn render_results(records: &[ResultRecord]) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(records.len() + 2);
    commands.push(RenderCommand::ClearRows);
    commands.extend(records.iter().cloned().map(RenderCommand::AppendRow));
    if !records.is_empty() {
        commands.push(RenderCommand::enable(ControlId::Download, true));
    }
    commands
}

/// Formats a progress fraction as a one-decimal percentage
///
/// Out-of-range fractions are clamped to `[0, 1]`; NaN renders as `0.0%`.
pub fn format_percent(fraction: f64) -> String {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    format!("{:.1}%", fraction * 100.0)
}
