//! Order lifecycle, reviews and chat access for clients and professionals.
//!
//! Use-cases report violated business rules as [`DomainError`](crate::boundary::DomainError);
//! the HTTP router hands those to the error boundary unchanged.

pub mod domain;
mod policy;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ChatChannel, OrderAction, OrderId, OrderRecord, OrderView, PlaceOrder, Principal, Review,
    ReviewSubmission, ReviewView, TransitionRequest, UserId,
};
pub use repository::{OrderRepository, RepositoryError};
pub use router::{order_router, USER_ID_HEADER, USER_ROLE_HEADER};
pub use service::OrderService;
