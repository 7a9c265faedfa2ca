use std::error::Error as StdError;
use std::fmt::{self, Write as _};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::domain::DomainError;

/// Shown for internal failures that carry nothing presentable.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Error categories exposed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    InvalidRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL",
        }
    }

    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category for every domain failure.
pub const fn categorize(error: &DomainError) -> ErrorCategory {
    match error {
        DomainError::OrderNotCompleted(_)
        | DomainError::InvalidOrderState(_)
        | DomainError::InvalidReview(_)
        | DomainError::ChatClosed(_) => ErrorCategory::InvalidRequest,
        DomainError::ReviewAlreadyExists(_) => ErrorCategory::Conflict,
        DomainError::UnauthorizedReviewAction(_)
        | DomainError::UnauthorizedOrderAction(_)
        | DomainError::ChatForbidden(_) => ErrorCategory::Forbidden,
        DomainError::OrderNotFound(_) => ErrorCategory::NotFound,
        DomainError::GenericFailure(_) => ErrorCategory::Internal,
    }
}

/// Error body sent to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalError {
    #[serde(rename = "code")]
    category: ErrorCategory,
    message: String,
}

impl ExternalError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        Self { category, message }
    }

    pub fn internal() -> Self {
        Self::new(ErrorCategory::Internal, GENERIC_ERROR_MESSAGE)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Unauthorized, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InvalidRequest, message)
    }

    pub const fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&DomainError> for ExternalError {
    fn from(error: &DomainError) -> Self {
        let message = error.message().unwrap_or(GENERIC_ERROR_MESSAGE);
        Self::new(categorize(error), message)
    }
}

impl From<DomainError> for ExternalError {
    fn from(error: DomainError) -> Self {
        Self::from(&error)
    }
}

impl fmt::Display for ExternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

impl StdError for ExternalError {}

/// Translate any failure reaching the API edge.
///
/// A [`DomainError`] anywhere in the source chain is mapped through [`categorize`]; anything
/// else becomes [`ErrorCategory::Internal`] with its own message, or the generic message when
/// it renders blank. An absent error still yields a valid response.
pub fn map_domain_error(error: Option<&(dyn StdError + 'static)>) -> ExternalError {
    let Some(error) = error else {
        return ExternalError::internal();
    };

    if let Some(domain) = find_domain_error(error) {
        return ExternalError::from(domain);
    }

    ExternalError::new(ErrorCategory::Internal, render(error))
}

fn find_domain_error<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a DomainError> {
    let mut current = Some(error);
    while let Some(candidate) = current {
        if let Some(domain) = candidate.downcast_ref::<DomainError>() {
            return Some(domain);
        }
        current = candidate.source();
    }
    None
}

// `to_string` panics on a misbehaving `Display`; a failed write just yields nothing.
fn render(error: &dyn StdError) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{error}").is_err() {
        rendered.clear();
    }
    rendered
}

impl IntoResponse for ExternalError {
    fn into_response(self) -> Response {
        let status = self.category.status_code();
        if self.category == ErrorCategory::Internal {
            error!(code = %self.category, message = %self.message, "request failed");
        } else {
            warn!(code = %self.category, message = %self.message, "request rejected");
        }

        (status, Json(self)).into_response()
    }
}
