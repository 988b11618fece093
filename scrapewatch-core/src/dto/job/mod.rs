//! Job control DTOs

use serde::{Deserialize, Serialize};

/// Server reply to start and stop requests
///
/// The server answers with `{"status": "success" | "error", "message": ..}`,
/// including on HTTP 400 rejections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ApiReply {
    /// Whether the server reported `"status": "success"`
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_status() {
        let ok: ApiReply =
            serde_json::from_str(r#"{"status":"success","message":"Scraping process started."}"#)
                .unwrap();
        let rejected: ApiReply = serde_json::from_str(
            r#"{"status":"error","message":"Scraping is already in progress."}"#,
        )
        .unwrap();
        let bare: ApiReply = serde_json::from_str(r#"{"message":"Stop signal sent."}"#).unwrap();

        assert!(ok.is_success());
        assert!(!rejected.is_success());
        assert!(!bare.is_success());
        assert_eq!(bare.message, "Stop signal sent.");
    }
}
