use serde::{Deserialize, Serialize};

use thiserror::Error;

use crate::client::{EmailClient, SentEmail};
use crate::domain::EmailAddress;
use crate::model::NotificationPayload;
use crate::notification::{operator_notification, requester_confirmation, NotificationContacts};

/// Provider reports for both notification emails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub admin_email: SentEmail,
    pub confirmation_email: SentEmail,
}

#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// One or both emails could not be delivered
    #[error("Failed to send {}", .failed.join("; "))]
    Delivery { failed: Vec<String> },

    /// The notification function itself could not be reached or refused the call
    #[error("Notification request failed: {0}")]
    Remote(String),
}

/// Sends the operator notification and the requester confirmation for a booking
#[derive(Debug)]
pub struct NotificationDispatcher {
    email_client: EmailClient,
    contacts: NotificationContacts,
}

impl NotificationDispatcher {
    pub fn new(email_client: EmailClient, contacts: NotificationContacts) -> Self {
        Self {
            email_client,
            contacts,
        }
    }

    /// Both sends are always attempted, a failure of one does not cancel the other
    #[tracing::instrument(
        name = "Dispatch meeting notifications",
        skip(self, payload),
        fields(meeting_date = %payload.meeting_date, meeting_time = %payload.meeting_time)
    )]
    pub async fn notify(
        &self,
        payload: &NotificationPayload,
    ) -> Result<DispatchReport, DispatchError> {
        let operator_email = operator_notification(&self.contacts, payload);
        let confirmation = async {
            match payload.email.parse::<EmailAddress>() {
                Ok(recipient) => {
                    let email = requester_confirmation(&self.contacts, recipient, payload);
                    self.email_client.send(&email).await.map_err(|e| e.to_string())
                }
                Err(e) => Err(e.to_string()),
            }
        };

        let (operator_result, confirmation_result) = tokio::join!(
            self.email_client.send(&operator_email),
            confirmation,
        );

        match (operator_result, confirmation_result) {
            (Ok(admin_email), Ok(confirmation_email)) => {
                tracing::info!(
                    admin_email.id = %admin_email.id,
                    confirmation_email.id = %confirmation_email.id,
                    "Meeting notifications sent"
                );
                Ok(DispatchReport {
                    admin_email,
                    confirmation_email,
                })
            }
            (operator_result, confirmation_result) => {
                let mut failed = Vec::new();
                if let Err(e) = operator_result {
                    tracing::error!(error.cause_chain = ?e, "Failed to send operator notification");
                    failed.push(format!("operator notification ({})", e));
                }
                if let Err(e) = confirmation_result {
                    tracing::error!(error.message = %e, "Failed to send requester confirmation");
                    failed.push(format!("requester confirmation ({})", e));
                }
                Err(DispatchError::Delivery { failed })
            }
        }
    }
}
