use reqwest::StatusCode;

use serde_json::json;

use sqlx::PgPool;

use meeting_scheduler::app::CORS_ALLOW_HEADERS;

use crate::helpers::{TestApp, OPERATOR_EMAIL};

fn jane() -> serde_json::Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@x.com",
        "meetingDate": "March 10, 2025",
        "meetingTime": "10:00 AM",
    })
}

#[sqlx::test]
async fn send_emails_operator_and_requester(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    app.mock_email_success().await;

    let res = app
        .notification_send(&jane())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(true, body["success"]);
    assert_eq!("msg", body["adminEmail"]["id"]);
    assert_eq!("msg", body["confirmationEmail"]["id"]);

    assert_eq!(
        vec!["jane@x.com".to_string(), OPERATOR_EMAIL.to_string()],
        app.email_recipients().await
    );

    Ok(())
}

#[sqlx::test]
async fn operator_email_names_requester(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    app.mock_email_success().await;

    app.notification_send(&jane())
        .await
        .expect("Failed to execute request");

    let requests = app.email_server.received_requests().await.unwrap();
    let subjects: Vec<String> = requests
        .iter()
        .map(|req| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            body["subject"].as_str().unwrap().to_string()
        })
        .collect();

    assert!(subjects.contains(&"New Meeting Request from Jane Doe".to_string()));
    assert!(subjects.contains(&"Meeting Request Received - Sam Owner".to_string()));

    Ok(())
}

#[sqlx::test]
async fn send_returns_error_object_when_delivery_fails(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    app.mock_email_failure().await;

    let res = app
        .notification_send(&jane())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());
    assert_eq!("*", res.headers()["access-control-allow-origin"]);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Failed to send"));

    // Both sends were attempted
    assert_eq!(2, app.email_server.received_requests().await.unwrap().len());

    Ok(())
}

#[sqlx::test]
async fn malformed_requester_address_still_notifies_operator(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    app.mock_email_success().await;

    let mut body = jane();
    body["email"] = json!("not an email");

    let res = app
        .notification_send(&body)
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("requester confirmation"));
    assert_eq!(vec![OPERATOR_EMAIL.to_string()], app.email_recipients().await);

    Ok(())
}

#[sqlx::test]
async fn send_rejects_unreadable_body(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    app.mock_email_success().await;

    let res = app
        .notification_send(&json!({ "name": "Jane Doe" }))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["error"].is_string());
    assert!(app.email_server.received_requests().await.unwrap().is_empty());

    Ok(())
}

#[sqlx::test]
async fn preflight_returns_empty_body_with_cors_headers(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .preflight("send-meeting-notification")
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
    assert_eq!("*", res.headers()["access-control-allow-origin"]);
    assert_eq!(
        CORS_ALLOW_HEADERS,
        res.headers()["access-control-allow-headers"]
    );
    assert!(res.text().await.unwrap().is_empty());
    assert!(app.email_server.received_requests().await.unwrap().is_empty());

    Ok(())
}
