//! The seam where internal failures become wire errors.

mod domain;
mod mapper;

pub use domain::DomainError;
pub use mapper::{
    categorize, map_domain_error, ErrorCategory, ExternalError, GENERIC_ERROR_MESSAGE,
};
