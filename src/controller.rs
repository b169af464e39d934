use actix_web::HttpResponse;

pub mod meetings;
pub mod notifications;

/// Answer a cross-origin pre-flight probe; CORS headers are added by the app middleware
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}
