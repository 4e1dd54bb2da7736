pub mod filter;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hyper::ext::ReasonPhrase;
use icsfilter_core::FetchError;

/// Request failures, rendered as a status code with a plain-text reason
#[derive(Debug)]
pub enum AppError {
    MissingSource,
    InvalidExclusions,
    Fetch(FetchError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingSource => StatusCode::NOT_FOUND,
            AppError::InvalidExclusions => StatusCode::BAD_REQUEST,
            AppError::Fetch(FetchError::InvalidAddress) => StatusCode::BAD_REQUEST,
            AppError::Fetch(FetchError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Fetch(FetchError::InvalidContent(_)) => StatusCode::BAD_REQUEST,
            AppError::Fetch(FetchError::Upstream { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            AppError::MissingSource => "ics not specified",
            AppError::InvalidExclusions => "Exclusion list was not valid",
            AppError::Fetch(FetchError::InvalidAddress) => "ICS URL was not valid",
            AppError::Fetch(FetchError::NotFound) => "ICS calendar was not found",
            AppError::Fetch(FetchError::InvalidContent(_)) => "Only calendar files are supported",
            AppError::Fetch(FetchError::Upstream { reason, .. }) => reason.as_str(),
        }
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Fetch(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let reason = self.reason().to_string();
        let mut response = (self.status(), reason.clone()).into_response();
        // Also sent as the status line text; phrases hyper rejects are body-only
        if !reason.is_empty() {
            if let Ok(phrase) = ReasonPhrase::try_from(reason) {
                response.extensions_mut().insert(phrase);
            }
        }
        response
    }
}
