use std::net::TcpListener;

use anyhow::Context;

use sqlx::PgPool;

use meeting_scheduler::app;
use meeting_scheduler::notification::NotificationDispatcher;
use meeting_scheduler::settings::Settings;
use meeting_scheduler::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info", std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load()?;

    let pool = PgPool::connect_lazy_with(settings.database.with_db());
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let dispatcher = NotificationDispatcher::new(
        settings.email.client()?,
        settings.notification.contacts()?,
    );

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    app::run(listener, pool, dispatcher)?
        .await
        .context("Failed to run app")
}
