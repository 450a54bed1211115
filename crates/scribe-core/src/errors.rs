use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

const INTERNAL_MESSAGE: &str = "the server encountered a problem";

/// Error returned by handlers, extractors and middleware.
///
/// The status decides what the client sees: 400-class errors other than
/// 401/403/404 echo the underlying message, while 401, 403, 404 and every
/// 5xx use a fixed message so internal detail never leaks. The full error
/// chain travels with the response as an [`ErrorDetail`] extension and is
/// logged by the request logging middleware.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

/// Full error chain attached to error responses for logging.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// Duplicate username/email. Reported as 400 with the message echoed.
    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }

    /// Message written to the response body.
    pub fn client_message(&self) -> String {
        match self.status {
            StatusCode::UNAUTHORIZED => "unauthorized".to_string(),
            StatusCode::FORBIDDEN => "forbidden".to_string(),
            StatusCode::NOT_FOUND => "not found".to_string(),
            status if status.is_server_error() => INTERNAL_MESSAGE.to_string(),
            _ => self.error.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.client_message()
        }));

        let mut response = (self.status, body).into_response();
        response
            .extensions_mut()
            .insert(ErrorDetail(format!("{:#}", self.error)));
        response
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::internal(err)
    }
}
