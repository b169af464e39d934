use actix_web::dev::HttpServiceFactory;
use actix_web::http::Method;
use actix_web::{web, HttpResponse};

use serde::Serialize;

use crate::controller::preflight;
use crate::error::RestResult;
use crate::model::NotificationPayload;
use crate::notification::{DispatchReport, NotificationDispatcher};

#[derive(Debug, Serialize)]
struct NotificationResponse {
    success: bool,
    #[serde(flatten)]
    report: DispatchReport,
}

/// Send the operator notification and the requester confirmation for a stored booking
#[tracing::instrument(
    name = "Send meeting notification",
    skip(dispatcher, payload),
    fields(meeting_date = %payload.meeting_date, meeting_time = %payload.meeting_time)
)]
async fn send(
    dispatcher: web::Data<NotificationDispatcher>,
    payload: web::Json<NotificationPayload>,
) -> RestResult<HttpResponse> {
    let report = dispatcher.notify(&payload).await.map_err(|error| {
        tracing::error!(error.cause_chain = ?error, "Failed to send meeting notification");
        error
    })?;

    Ok(HttpResponse::Ok().json(NotificationResponse {
        success: true,
        report,
    }))
}

/// Notification function endpoint
pub fn scope() -> impl HttpServiceFactory {
    web::resource("/send-meeting-notification")
        .route(web::post().to(send))
        .route(web::method(Method::OPTIONS).to(preflight))
}
