use crate::access::Role;
use crate::boundary::DomainError;
use crate::status::{LifecycleStatus, OrderStatus};

use super::domain::{ActingParty, OrderAction, OrderRecord, Principal};

pub(crate) const MIN_RATING: u8 = 1;
pub(crate) const MAX_RATING: u8 = 5;

/// Chat is unavailable before an order is placed and once the work is settled.
const CHAT_CLOSED: [OrderStatus; 4] = [
    OrderStatus::Draft,
    OrderStatus::Completed,
    OrderStatus::Paid,
    OrderStatus::Canceled,
];

pub(crate) fn can_view(record: &OrderRecord, actor: &Principal) -> Result<(), DomainError> {
    if actor.role == Role::Admin || record.is_participant(actor) {
        Ok(())
    } else {
        Err(DomainError::UnauthorizedOrderAction(format!(
            "you are not a participant of order {}",
            record.id
        )))
    }
}

/// Resulting status when `actor` may apply `action` to the order as it stands.
pub(crate) fn authorize_transition(
    record: &OrderRecord,
    actor: &Principal,
    action: OrderAction,
) -> Result<OrderStatus, DomainError> {
    let permitted = actor.role == Role::Admin
        || match action.party() {
            ActingParty::Client => record.is_client(actor),
            ActingParty::Pro => record.is_pro(actor),
            ActingParty::Participant => record.is_participant(actor),
            ActingParty::AdminOnly => false,
        };

    if !permitted {
        return Err(DomainError::UnauthorizedOrderAction(format!(
            "you are not allowed to {} order {}",
            action.label(),
            record.id
        )));
    }

    if !action.allowed_from().contains(&record.status) {
        return Err(DomainError::InvalidOrderState(format!(
            "cannot {} order {} while it is {}",
            action.label(),
            record.id,
            record.status.code()
        )));
    }

    Ok(action.target())
}

pub(crate) fn authorize_review(
    record: &OrderRecord,
    actor: &Principal,
    rating: u8,
) -> Result<(), DomainError> {
    if !record.is_client(actor) {
        return Err(DomainError::UnauthorizedReviewAction(format!(
            "only the client of order {} can review it",
            record.id
        )));
    }

    if !record.status.is_completed() {
        return Err(DomainError::OrderNotCompleted(format!(
            "order {} must be completed before it can be reviewed",
            record.id
        )));
    }

    if record.review.is_some() {
        return Err(DomainError::ReviewAlreadyExists(format!(
            "order {} has already been reviewed",
            record.id
        )));
    }

    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(DomainError::InvalidReview(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }

    Ok(())
}

pub(crate) fn authorize_chat(record: &OrderRecord, actor: &Principal) -> Result<(), DomainError> {
    if actor.role != Role::Admin && !record.is_participant(actor) {
        return Err(DomainError::ChatForbidden(format!(
            "you are not a participant of order {}",
            record.id
        )));
    }

    if CHAT_CLOSED.contains(&record.status) {
        return Err(DomainError::ChatClosed(format!(
            "chat for order {} is closed ({})",
            record.id,
            record.status.code()
        )));
    }

    Ok(())
}
