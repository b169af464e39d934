use anyhow::Context;

use reqwest::{Client, Response};

use url::Url;

use crate::error::ErrorBody;
use crate::model::{Ack, BookingRequest, NotificationPayload};
use crate::notification::{DispatchError, DispatchReport};
use crate::scheduler::{
    BookingStore, DispatchResult, MeetingNotifier, StoreError, StoreResult,
};

/// Booking store reached over the meeting service's `POST /meetings`
#[derive(Debug, Clone)]
pub struct HttpBookingStore {
    client: Client,
    meetings_url: Url,
}

impl HttpBookingStore {
    pub fn new(client: Client, api_base_url: &Url) -> anyhow::Result<Self> {
        let meetings_url = api_base_url
            .join("meetings")
            .context("Failed to create meetings endpoint URL")?;

        Ok(Self {
            client,
            meetings_url,
        })
    }
}

#[async_trait::async_trait]
impl BookingStore for HttpBookingStore {
    #[tracing::instrument(name = "Write booking to store", skip(self, booking))]
    async fn write(&self, booking: &BookingRequest) -> StoreResult {
        let res = self
            .client
            .post(self.meetings_url.clone())
            .json(booking)
            .send()
            .await
            .map_err(|e| StoreError::new(e.to_string()))?;

        if !res.status().is_success() {
            return Err(StoreError::new(error_message(res).await));
        }

        res.json::<Ack>()
            .await
            .map_err(|e| StoreError::new(e.to_string()))
    }
}

/// Notification function reached over `POST /send-meeting-notification`
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: Client,
    notification_url: Url,
}

impl HttpNotifier {
    pub fn new(client: Client, api_base_url: &Url) -> anyhow::Result<Self> {
        let notification_url = api_base_url
            .join("send-meeting-notification")
            .context("Failed to create notification endpoint URL")?;

        Ok(Self {
            client,
            notification_url,
        })
    }
}

#[async_trait::async_trait]
impl MeetingNotifier for HttpNotifier {
    #[tracing::instrument(name = "Invoke meeting notification", skip(self, payload))]
    async fn notify(&self, payload: &NotificationPayload) -> DispatchResult {
        let res = self
            .client
            .post(self.notification_url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| DispatchError::Remote(e.to_string()))?;

        if !res.status().is_success() {
            return Err(DispatchError::Remote(error_message(res).await));
        }

        res.json::<DispatchReport>()
            .await
            .map_err(|e| DispatchError::Remote(e.to_string()))
    }
}

/// Message from an `{ "error": .. }` body, or the status when the body has none
async fn error_message(res: Response) -> String {
    let status = res.status();
    match res.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("Request failed with status {}", status),
    }
}
