use uuid::Uuid;

use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use crate::domain::{EmailAddress, MeetingDate, PersonName, TimeSlot};
use crate::model::NotificationPayload;

/// Booking record as submitted by the booking form.
/// Name and email are checked by the store, not by the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub meeting_date: DateTime<Utc>,
    pub meeting_time: TimeSlot,
}

impl BookingRequest {
    /// Project the booking into the body sent to the notification function
    pub fn notification_payload(&self) -> NotificationPayload {
        NotificationPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            meeting_date: MeetingDate::from(self.meeting_date).to_display(),
            meeting_time: self.meeting_time.to_string(),
        }
    }
}

/// Validated meeting request, ready to be stored
#[derive(Debug, Clone)]
pub struct NewMeeting {
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    /// Stored exactly as submitted
    pub meeting_date: DateTime<Utc>,
    pub meeting_time: TimeSlot,
}

/// Stored meeting record
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Meeting {
    pub id: Uuid,
    /// User supplied data
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub meeting_date: DateTime<Utc>,
    pub meeting_time: String,
    /// NOTE: Set by the database on insert
    pub created_at: DateTime<Utc>,
}

/// Acknowledgement returned by the store for a successful write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ack {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}
