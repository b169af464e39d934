use std::net::TcpListener;
use std::time::Duration;

use reqwest::{Client, Method, Response};

use sqlx::PgPool;

use url::Url;

use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

use meeting_scheduler::app;
use meeting_scheduler::client::EmailClient;
use meeting_scheduler::notification::{NotificationContacts, NotificationDispatcher};
use meeting_scheduler::scheduler::{BookingForm, HttpBookingStore, HttpNotifier, Scheduler};

pub const OPERATOR_EMAIL: &str = "owner@portfolio.dev";

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub email_server: MockServer,
}

impl TestApp {
    pub async fn spawn(pool: &PgPool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let email_server = MockServer::start().await;

        let email_client = {
            let sender = "onboarding@resend.dev"
                .parse()
                .expect("Failed to parse sender email address");
            let api_base_url =
                Url::parse(&email_server.uri()).expect("Failed to parse mock server uri");
            let api_auth_token = "TestAuthorization".parse().unwrap();
            let api_timeout = Duration::from_secs(2);

            EmailClient::new(sender, api_timeout, api_base_url, api_auth_token)
                .expect("Failed to create email client")
        };
        let contacts = NotificationContacts {
            operator_email: OPERATOR_EMAIL.parse().unwrap(),
            operator_sender_name: "Portfolio Meetings".into(),
            owner_name: "Sam Owner".into(),
        };
        let dispatcher = NotificationDispatcher::new(email_client, contacts);

        let server = app::run(listener, pool.clone(), dispatcher)
            .expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            client,
            email_server,
        }
    }

    /// Email provider accepts every message
    pub async fn mock_email_success(&self) {
        Mock::given(path("/emails"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "msg" })))
            .mount(&self.email_server)
            .await;
    }

    /// Email provider rejects every message
    pub async fn mock_email_failure(&self) {
        Mock::given(path("/emails"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.email_server)
            .await;
    }

    /// Recipients of every email sent to the provider, sorted
    pub async fn email_recipients(&self) -> Vec<String> {
        let mut recipients: Vec<String> = self
            .email_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|req| {
                let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
                body["to"][0].as_str().unwrap().to_string()
            })
            .collect();
        recipients.sort();
        recipients
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn meeting_create(&self, body: &serde_json::Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "meetings").json(body).send().await
    }

    pub async fn notification_send(&self, body: &serde_json::Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "send-meeting-notification")
            .json(body)
            .send()
            .await
    }

    pub async fn preflight(&self, url: &str) -> reqwest::Result<Response> {
        self.request(Method::OPTIONS, url)
            .header("Origin", "https://portfolio.example")
            .header("Access-Control-Request-Method", "POST")
            .body("this is not json")
            .send()
            .await
    }

    /// A booking client talking to this app
    pub fn scheduler(&self, form: BookingForm) -> Scheduler<HttpBookingStore, HttpNotifier> {
        let base_url = Url::parse(&self.addr).unwrap();
        let store = HttpBookingStore::new(self.client.clone(), &base_url).unwrap();
        let notifier = HttpNotifier::new(self.client.clone(), &base_url).unwrap();

        Scheduler::new(store, notifier, Duration::from_secs(10)).with_form(form)
    }
}
