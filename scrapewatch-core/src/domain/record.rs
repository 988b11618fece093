//! Result record domain types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// One scraped business, as returned by `/get-results`
///
/// Every field is optional. The server builds rows from a data frame, so
/// a cell may arrive as a string, a number, a boolean or null; non-string
/// scalars are kept as their text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultRecord {
    #[serde(rename = "Name", deserialize_with = "cell")]
    pub name: Option<String>,
    #[serde(rename = "Address", deserialize_with = "cell")]
    pub address: Option<String>,
    #[serde(rename = "Website", deserialize_with = "cell")]
    pub website: Option<String>,
    #[serde(rename = "Final Email", deserialize_with = "cell")]
    pub final_email: Option<String>,
    #[serde(rename = "Category", deserialize_with = "cell")]
    pub category: Option<String>,
    #[serde(rename = "Phone", deserialize_with = "cell")]
    pub phone: Option<String>,
    #[serde(rename = "City", deserialize_with = "cell")]
    pub city: Option<String>,
    #[serde(rename = "State", deserialize_with = "cell")]
    pub state: Option<String>,
    #[serde(rename = "Rating", deserialize_with = "cell")]
    pub rating: Option<String>,
    #[serde(rename = "Maps URL", deserialize_with = "cell")]
    pub maps_url: Option<String>,
}

impl ResultRecord {
    /// Column headers of the results table
    pub const COLUMNS: [&'static str; 5] = ["Name", "Address", "Website", "Email", "Category"];

    /// Cells of the results table row, empty where a field is missing
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.name,
            &self.address,
            &self.website,
            &self.final_email,
            &self.category,
        ]
        .map(|field| field.as_deref().unwrap_or(""))
    }
}

fn cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::String(s) if s.is_empty() => None,
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_row() {
        let body = r#"{
            "Category": "Plumber", "City": "New York", "State": "NY",
            "Name": "Joe's Pipes", "Address": "1 Main St", "Phone": "",
            "Website": "https://joespipes.example", "Final Email": "joe@joespipes.example",
            "Email Count": 1, "Rating": 4.5, "Review Count": "120", "Status": "SCRAPED"
        }"#;
        let record: ResultRecord = serde_json::from_str(body).unwrap();

        assert_eq!(record.name.as_deref(), Some("Joe's Pipes"));
        assert_eq!(record.final_email.as_deref(), Some("joe@joespipes.example"));
        assert_eq!(record.rating.as_deref(), Some("4.5"));
        assert_eq!(record.phone, None);
        assert_eq!(record.maps_url, None);
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let record: ResultRecord = serde_json::from_str(r#"{"Name": "Solo", "Website": null}"#).unwrap();
        assert_eq!(record.cells(), ["Solo", "", "", "", ""]);
    }

    #[test]
    fn test_parse_result_set() {
        let records: Vec<ResultRecord> =
            serde_json::from_str(r#"[{"Name": "a"}, {}, {"Category": "Cafe"}]"#).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], ResultRecord::default());
        assert_eq!(records[2].cells()[4], "Cafe");
    }
}
