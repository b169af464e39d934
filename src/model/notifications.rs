use serde::{Deserialize, Serialize};

/// Body of a notification request, derived from a stored booking.
/// Has no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Formatted as "Month DD, YYYY"
    pub meeting_date: String,
    /// Slot catalog label
    pub meeting_time: String,
}
