use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use serde::{Deserialize, Serialize};

use thiserror::Error;

use crate::notification::DispatchError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    ParsingError(String),
}

pub type RestResult<T> = std::result::Result<T, RestError>;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("{0}")]
    ParseError(String),

    #[error("{0}")]
    DispatchFailed(String),

    #[error("Internal Server Error: {0}")]
    InternalError(String),
}

impl From<sqlx::Error> for RestError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error.cause_chain = ?e, "Database query failed");
        Self::InternalError("Database error".into())
    }
}

impl From<Error> for RestError {
    fn from(e: Error) -> Self {
        match e {
            Error::ParsingError(msg) => Self::ParseError(msg),
        }
    }
}

impl From<DispatchError> for RestError {
    fn from(e: DispatchError) -> Self {
        Self::DispatchFailed(e.to_string())
    }
}

impl From<JsonPayloadError> for RestError {
    fn from(e: JsonPayloadError) -> Self {
        Self::ParseError(format!("Invalid request body: {}", e))
    }
}

/// Error body shared by every endpoint, `{ "error": "<message>" }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ParseError(_) => StatusCode::BAD_REQUEST,
            Self::DispatchFailed(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
