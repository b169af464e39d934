use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use sqlx::PgPool;

use tracing_actix_web::TracingLogger;

use crate::controller::{meetings, notifications};
use crate::error::RestError;
use crate::notification::NotificationDispatcher;

/// Request headers browsers may send on cross-origin calls
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// Permissive cross-origin headers, added to every response
fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, CORS_ALLOW_HEADERS))
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    pool: PgPool,
    dispatcher: NotificationDispatcher,
) -> anyhow::Result<Server> {
    // Wrap application data
    let pool = web::Data::new(pool);
    let dispatcher = web::Data::new(dispatcher);

    // Malformed JSON bodies get the same `{ "error": .. }` shape as every other failure
    let json_config =
        web::JsonConfig::default().error_handler(|err, _req| RestError::from(err).into());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .wrap(TracingLogger::default())
            .app_data(json_config.clone())
            .app_data(pool.clone())
            .app_data(dispatcher.clone())
            .service(health_check)
            .service(meetings::scope())
            .service(notifications::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
