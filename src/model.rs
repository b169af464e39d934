mod meetings;
mod notifications;

pub use meetings::{Ack, BookingRequest, Meeting, NewMeeting};
pub use notifications::NotificationPayload;
