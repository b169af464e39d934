use chrono::{DateTime, Utc};

use reqwest::StatusCode;

use serde_json::json;

use sqlx::PgPool;

use crate::helpers::TestApp;

fn jane() -> serde_json::Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@x.com",
        "meeting_date": "2025-03-10T00:00:00Z",
        "meeting_time": "10:00 AM",
    })
}

#[sqlx::test]
async fn create_returns_created_for_valid_request(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .meeting_create(&jane())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());
    let ack: serde_json::Value = res.json().await.expect("Failed to read ack");
    assert!(ack.get("id").is_some());
    assert!(ack.get("created_at").is_some());

    let (name, email, phone, meeting_time): (String, String, Option<String>, String) =
        sqlx::query_as("select name, email, phone, meeting_time from meetings")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch inserted row");

    assert_eq!("Jane Doe", name);
    assert_eq!("jane@x.com", email);
    assert_eq!(None, phone);
    assert_eq!("10:00 AM", meeting_time);

    Ok(())
}

#[sqlx::test]
async fn create_stores_optional_fields(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let mut body = jane();
    body["phone"] = json!("+91 1234567890");
    body["subject"] = json!("Rust consulting");
    body["message"] = json!("Looking forward to it");

    let res = app.meeting_create(&body).await.expect("Failed to execute request");
    assert!(res.status().is_success());

    let (phone, subject, message): (Option<String>, Option<String>, Option<String>) =
        sqlx::query_as("select phone, subject, message from meetings")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch inserted row");

    assert_eq!(Some("+91 1234567890".to_string()), phone);
    assert_eq!(Some("Rust consulting".to_string()), subject);
    assert_eq!(Some("Looking forward to it".to_string()), message);

    Ok(())
}

#[sqlx::test]
async fn create_stores_submitted_instant_unchanged(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let mut body = jane();
    body["meeting_date"] = json!("2025-03-09T18:30:00Z");

    let res = app.meeting_create(&body).await.expect("Failed to execute request");
    assert_eq!(StatusCode::CREATED, res.status());

    let (meeting_date,): (DateTime<Utc>,) = sqlx::query_as("select meeting_date from meetings")
        .fetch_one(&pool)
        .await?;
    assert_eq!("2025-03-09T18:30:00+00:00", meeting_date.to_rfc3339());

    Ok(())
}

#[sqlx::test]
async fn create_returns_bad_request_for_invalid_data(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let mut missing_time = jane();
    missing_time.as_object_mut().unwrap().remove("meeting_time");
    let mut blank_name = jane();
    blank_name["name"] = json!("   ");
    let mut malformed_email = jane();
    malformed_email["email"] = json!("bad email address");
    let mut unknown_slot = jane();
    unknown_slot["meeting_time"] = json!("07:15 PM");
    let mut malformed_date = jane();
    malformed_date["meeting_date"] = json!("next tuesday");

    let test_cases = vec![
        ("missing time", missing_time),
        ("blank name", blank_name),
        ("malformed email", malformed_email),
        ("unknown slot", unknown_slot),
        ("malformed date", malformed_date),
    ];

    for (desc, body) in test_cases {
        let res = app
            .meeting_create(&body)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not fail when payload had {}",
            desc
        );
        let body: serde_json::Value = res.json().await.expect("Failed to read error body");
        assert!(body["error"].is_string(), "No error message for {}", desc);
    }

    let (count,): (i64,) = sqlx::query_as("select count(*) from meetings")
        .fetch_one(&pool)
        .await?;
    assert_eq!(0, count);

    Ok(())
}

#[sqlx::test]
async fn same_slot_can_be_booked_twice(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    for _ in 0..2 {
        let res = app
            .meeting_create(&jane())
            .await
            .expect("Failed to execute request");
        assert_eq!(StatusCode::CREATED, res.status());
    }

    let (count,): (i64,) = sqlx::query_as("select count(*) from meetings")
        .fetch_one(&pool)
        .await?;
    assert_eq!(2, count);

    Ok(())
}

#[sqlx::test]
async fn preflight_returns_empty_body_with_cors_headers(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .preflight("meetings")
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
    assert_eq!("*", res.headers()["access-control-allow-origin"]);
    assert!(res.text().await.unwrap().is_empty());

    Ok(())
}
