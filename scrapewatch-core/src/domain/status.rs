//! Status snapshot domain types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Point-in-time view of the remote job, as reported by `/status`
///
/// Every snapshot replaces the previous one wholesale. Progress fractions
/// are nominally in `[0, 1]` but nothing here relies on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSnapshot {
    pub status_message: String,
    pub link_collection_progress: f64,
    pub detail_scraping_progress: f64,
    pub link_count: u64,
    pub scraped_count: u64,
    pub total_to_scrape: u64,
    #[serde(rename = "scraping_active")]
    pub active: bool,
    /// Length of the server-side result table, when the server exposes it
    #[serde(
        rename = "results_df",
        deserialize_with = "length_hint",
        skip_serializing_if = "Option::is_none"
    )]
    pub result_count_hint: Option<u64>,
}

impl StatusSnapshot {
    /// Whether the job has produced at least one result
    ///
    /// Prefers the explicit result-count hint and falls back to the scraped
    /// counter when the server omits it.
    pub fn has_results(&self) -> bool {
        match self.result_count_hint {
            Some(count) => count > 0,
            None => self.scraped_count > 0,
        }
    }
}

/// Accepts a bare count or the table itself (counted by length)
fn length_hint<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::Array(rows) => Some(rows.len() as u64),
        // column-oriented frame: {"Name": {"0": .., "1": ..}, ..}
        JsonValue::Object(columns) => Some(
            columns
                .values()
                .find_map(|column| column.as_object().map(|cells| cells.len() as u64))
                .unwrap_or(0),
        ),
        _ => None,
    })
}
