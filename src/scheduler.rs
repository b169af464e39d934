mod form;
mod orchestrator;
mod remote;

pub use form::{BookingForm, ValidationError};
pub use orchestrator::{
    BookingStore, BookingView, DispatchResult, MeetingNotifier, Notice, Scheduler, Settlement,
    StoreError, StoreResult, SubmissionState, SubmitOutcome,
};
pub use remote::{HttpBookingStore, HttpNotifier};
