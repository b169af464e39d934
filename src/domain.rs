mod email_address;
mod meeting_date;
mod optional_text;
mod person_name;
mod time_slot;

pub use email_address::EmailAddress;
pub use meeting_date::MeetingDate;
pub use optional_text::optional_text;
pub use person_name::PersonName;
pub use time_slot::{TimeSlot, SLOT_CATALOG};
