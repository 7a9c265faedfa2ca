use super::mapper::GENERIC_ERROR_MESSAGE;

/// Business precondition violated by a use-case.
///
/// Each variant carries the message meant for the caller; [`DomainError::GenericFailure`]
/// may carry none, in which case a generic message is shown instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    OrderNotCompleted(String),
    #[error("{0}")]
    ReviewAlreadyExists(String),
    #[error("{0}")]
    UnauthorizedReviewAction(String),
    #[error("{0}")]
    InvalidReview(String),
    #[error("{0}")]
    InvalidOrderState(String),
    #[error("{0}")]
    UnauthorizedOrderAction(String),
    #[error("{0}")]
    OrderNotFound(String),
    #[error("{0}")]
    ChatForbidden(String),
    #[error("{0}")]
    ChatClosed(String),
    #[error("{}", .0.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    GenericFailure(Option<String>),
}

impl DomainError {
    /// Caller-facing message, if the variant carries a non-blank one.
    pub fn message(&self) -> Option<&str> {
        let message = match self {
            Self::OrderNotCompleted(message)
            | Self::ReviewAlreadyExists(message)
            | Self::UnauthorizedReviewAction(message)
            | Self::InvalidReview(message)
            | Self::InvalidOrderState(message)
            | Self::UnauthorizedOrderAction(message)
            | Self::OrderNotFound(message)
            | Self::ChatForbidden(message)
            | Self::ChatClosed(message) => Some(message.as_str()),
            Self::GenericFailure(message) => message.as_deref(),
        };
        message.filter(|text| !text.trim().is_empty())
    }
}
