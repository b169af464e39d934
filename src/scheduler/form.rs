use chrono::NaiveDate;

use thiserror::Error;

use crate::domain::{optional_text, MeetingDate, TimeSlot};
use crate::model::BookingRequest;

/// Fields collected by the booking form.
/// Name and email are left to the store to check, only date and time are required here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please select both date and time for the meeting.")]
    MissingInformation,

    #[error("Please select today or a later date for the meeting.")]
    DateInPast,
}

impl ValidationError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingInformation => "Missing information",
            Self::DateInPast => "Invalid date",
        }
    }
}

impl BookingForm {
    /// Assemble the booking record, or reject the submission without any network call
    pub fn validate(&self, today: NaiveDate) -> Result<BookingRequest, ValidationError> {
        let (date, time) = match (self.date, self.time) {
            (Some(date), Some(time)) => (MeetingDate::new(date), time),
            _ => return Err(ValidationError::MissingInformation),
        };
        if date.is_before(today) {
            return Err(ValidationError::DateInPast);
        }

        Ok(BookingRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: optional_text(Some(self.phone.as_str())),
            subject: optional_text(Some(self.subject.as_str())),
            message: optional_text(Some(self.message.as_str())),
            meeting_date: date.to_instant(),
            meeting_time: time,
        })
    }
}
