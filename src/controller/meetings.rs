use actix_web::dev::HttpServiceFactory;
use actix_web::http::Method;
use actix_web::{web, HttpResponse};

use chrono::{DateTime, Utc};

use serde::Deserialize;

use sqlx::PgPool;

use crate::controller::preflight;
use crate::domain::optional_text;
use crate::error::{Error, RestResult};
use crate::model::NewMeeting;
use crate::repo::MeetingRepo;

/// JSON body of the booking write interface
#[derive(Debug, Deserialize)]
pub struct NewMeetingBody {
    name: String,
    email: String,
    phone: Option<String>,
    subject: Option<String>,
    message: Option<String>,
    meeting_date: DateTime<Utc>,
    meeting_time: String,
}

impl TryFrom<NewMeetingBody> for NewMeeting {
    type Error = Error;

    fn try_from(body: NewMeetingBody) -> Result<Self, Self::Error> {
        Ok(NewMeeting {
            name: body.name.parse()?,
            email: body.email.parse()?,
            phone: optional_text(body.phone.as_deref()),
            subject: optional_text(body.subject.as_deref()),
            message: optional_text(body.message.as_deref()),
            meeting_date: body.meeting_date,
            meeting_time: body.meeting_time.parse()?,
        })
    }
}

/// Store a meeting request.
/// Neither past dates nor already-booked slots are rejected here.
#[tracing::instrument(
    name = "Create a meeting request",
    skip(pool, body),
    fields(meeting_date = %body.meeting_date, meeting_time = %body.meeting_time)
)]
async fn create(pool: web::Data<PgPool>, body: web::Json<NewMeetingBody>) -> RestResult<HttpResponse> {
    let new_meeting: NewMeeting = body.into_inner().try_into()?;

    let ack = MeetingRepo::insert(pool.get_ref(), &new_meeting).await?;

    tracing::info!(meeting.id = %ack.id, "Meeting request stored");

    Ok(HttpResponse::Created().json(ack))
}

/// Meetings API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::resource("/meetings")
        .route(web::post().to(create))
        .route(web::method(Method::OPTIONS).to(preflight))
}
