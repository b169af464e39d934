use uuid::Uuid;

use sqlx::PgExecutor;

use crate::model::{Ack, Meeting, NewMeeting};

/// Repository for interfacing with the meetings table.
/// Append-only: there is no uniqueness constraint on date/time, double booking is allowed.
pub struct MeetingRepo;

impl MeetingRepo {
    /// Insert a meeting request as a single row
    #[tracing::instrument(
        name = "Insert meeting request",
        skip(executor, new_meeting),
        fields(meeting_date = %new_meeting.meeting_date, meeting_time = %new_meeting.meeting_time)
    )]
    pub async fn insert<'con>(
        executor: impl PgExecutor<'con>,
        new_meeting: &NewMeeting,
    ) -> sqlx::Result<Ack> {
        sqlx::query_as::<_, Ack>(
            "insert into meetings(name, email, phone, subject, message, meeting_date, meeting_time) \
             values ($1, $2, $3, $4, $5, $6, $7) returning id, created_at",
        )
        .bind(new_meeting.name.as_ref())
        .bind(new_meeting.email.as_ref())
        .bind(new_meeting.phone.as_deref())
        .bind(new_meeting.subject.as_deref())
        .bind(new_meeting.message.as_deref())
        .bind(new_meeting.meeting_date)
        .bind(new_meeting.meeting_time.as_ref())
        .fetch_one(executor)
        .await
    }

    #[tracing::instrument(name = "Fetch meeting by id", skip(executor))]
    pub async fn fetch_by_id<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
    ) -> sqlx::Result<Option<Meeting>> {
        sqlx::query_as::<_, Meeting>("select * from meetings where id=$1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
