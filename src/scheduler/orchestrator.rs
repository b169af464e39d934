use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::NaiveDate;

use thiserror::Error;

use crate::model::{Ack, BookingRequest, NotificationPayload};
use crate::notification::{DispatchError, DispatchReport};
use crate::scheduler::{BookingForm, ValidationError};

const STORE_FALLBACK_MESSAGE: &str = "Failed to schedule meeting. Please try again.";

/// Booking persistence failed; the only failure shown to the user
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type StoreResult = Result<Ack, StoreError>;
pub type DispatchResult = Result<DispatchReport, DispatchError>;

/// Durable record store for bookings
#[async_trait::async_trait]
pub trait BookingStore: Send + Sync {
    async fn write(&self, booking: &BookingRequest) -> StoreResult;
}

/// Remote notification function
#[async_trait::async_trait]
pub trait MeetingNotifier: Send + Sync {
    async fn notify(&self, payload: &NotificationPayload) -> DispatchResult;
}

/// Message shown to the user once a submission is rejected or settled
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

impl Notice {
    fn scheduled() -> Self {
        Self {
            title: "Meeting scheduled!".into(),
            description: "You'll receive a confirmation email shortly.".into(),
            destructive: false,
        }
    }

    fn invalid(error: &ValidationError) -> Self {
        Self {
            title: error.title().into(),
            description: error.to_string(),
            destructive: true,
        }
    }

    fn store_failed(error: &StoreError) -> Self {
        let description = match error.message().trim() {
            "" => STORE_FALLBACK_MESSAGE.to_string(),
            message => message.to_string(),
        };
        Self {
            title: "Error".into(),
            description,
            destructive: true,
        }
    }
}

/// The container the booking form lives in
pub trait BookingView {
    fn show_notice(&mut self, notice: Notice);
    /// Close the booking form
    fn close(&mut self);
}

/// Terminal result of a submission
#[derive(Debug, Clone)]
pub enum Settlement {
    /// Stored and both notifications sent
    Ok,
    /// Stored, notifications failed. Reported to the user as scheduled.
    PartialOk(DispatchError),
    /// Not stored, carries the message shown to the user
    Failed(String),
}

impl Settlement {
    /// Whether the booking exists in the store
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Ok | Self::PartialOk(_))
    }
}

#[derive(Debug, Clone)]
pub enum SubmissionState {
    Idle,
    Validating,
    Persisting,
    Notifying,
    Settled(Settlement),
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Another submission from this form is still in flight
    Busy,
    Rejected(ValidationError),
    Settled(Settlement),
}

/// Drives one booking submission at a time: validate, persist, notify, report
pub struct Scheduler<S, N> {
    store: S,
    notifier: N,
    request_timeout: Duration,
    form: Mutex<BookingForm>,
    state: Mutex<SubmissionState>,
}

impl<S, N> Scheduler<S, N>
where
    S: BookingStore,
    N: MeetingNotifier,
{
    pub fn new(store: S, notifier: N, request_timeout: Duration) -> Self {
        Self {
            store,
            notifier,
            request_timeout,
            form: Mutex::new(BookingForm::default()),
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn with_form(self, form: BookingForm) -> Self {
        *lock(&self.form) = form;
        self
    }

    /// Snapshot of the current form fields
    pub fn form(&self) -> BookingForm {
        lock(&self.form).clone()
    }

    pub fn edit_form(&self, edit: impl FnOnce(&mut BookingForm)) {
        edit(&mut lock(&self.form));
    }

    pub fn state(&self) -> SubmissionState {
        lock(&self.state).clone()
    }

    /// True while a store write or notification call is outstanding
    pub fn is_busy(&self) -> bool {
        is_busy(&lock(&self.state))
    }

    #[tracing::instrument(name = "Submit booking form", skip(self, view))]
    pub async fn submit(&self, today: NaiveDate, view: &mut impl BookingView) -> SubmitOutcome {
        let Some(mut submission) = Submission::begin(&self.state) else {
            tracing::debug!("Submission ignored, another one is in flight");
            return SubmitOutcome::Busy;
        };

        let booking = match self.form().validate(today) {
            Ok(booking) => booking,
            Err(error) => {
                view.show_notice(Notice::invalid(&error));
                submission.reset();
                return SubmitOutcome::Rejected(error);
            }
        };

        submission.transition(SubmissionState::Persisting);
        let stored = self.write(&booking).await;

        let settlement = match stored {
            Err(error) => {
                tracing::error!(error.message = %error, "Failed to store meeting request");
                let notice = Notice::store_failed(&error);
                let settlement = Settlement::Failed(notice.description.clone());
                view.show_notice(notice);
                settlement
            }
            Ok(ack) => {
                tracing::info!(meeting.id = %ack.id, "Meeting request stored");

                submission.transition(SubmissionState::Notifying);
                let dispatched = self.dispatch(&booking.notification_payload()).await;

                // The stored booking is the record of intent; notification is best-effort
                let settlement = match dispatched {
                    Ok(_) => Settlement::Ok,
                    Err(error) => {
                        tracing::error!(error.cause_chain = ?error, "Email notification error");
                        Settlement::PartialOk(error)
                    }
                };
                *lock(&self.form) = BookingForm::default();
                view.show_notice(Notice::scheduled());
                view.close();
                settlement
            }
        };

        submission.settle(settlement.clone());
        SubmitOutcome::Settled(settlement)
    }

    async fn write(&self, booking: &BookingRequest) -> StoreResult {
        tokio::time::timeout(self.request_timeout, self.store.write(booking))
            .await
            .unwrap_or_else(|_| Err(StoreError::new("The booking request timed out. Please try again.")))
    }

    async fn dispatch(&self, payload: &NotificationPayload) -> DispatchResult {
        tokio::time::timeout(self.request_timeout, self.notifier.notify(payload))
            .await
            .unwrap_or_else(|_| Err(DispatchError::Remote("request timed out".into())))
    }
}

fn is_busy(state: &SubmissionState) -> bool {
    matches!(
        state,
        SubmissionState::Validating | SubmissionState::Persisting | SubmissionState::Notifying
    )
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Holds the busy flag for one submission.
/// Dropping it before it settles (e.g. a cancelled future) returns the form to `Idle`.
struct Submission<'a> {
    state: &'a Mutex<SubmissionState>,
    done: bool,
}

impl<'a> Submission<'a> {
    fn begin(state: &'a Mutex<SubmissionState>) -> Option<Self> {
        let mut current = lock(state);
        if is_busy(&current) {
            return None;
        }
        *current = SubmissionState::Validating;
        Some(Self { state, done: false })
    }

    fn transition(&mut self, next: SubmissionState) {
        *lock(self.state) = next;
    }

    fn reset(&mut self) {
        self.transition(SubmissionState::Idle);
        self.done = true;
    }

    fn settle(&mut self, settlement: Settlement) {
        self.transition(SubmissionState::Settled(settlement));
        self.done = true;
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        if !self.done {
            *lock(self.state) = SubmissionState::Idle;
        }
    }
}
