use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::access::Role;
use crate::boundary::DomainError;
use crate::display::mask_display_name;
use crate::status::{EntityType, LifecycleStatus, OrderStatus, StatusRegistry};

use super::domain::{
    ChatChannel, OrderAction, OrderId, OrderRecord, OrderView, PlaceOrder, Principal, Review,
    ReviewSubmission, ReviewView,
};
use super::policy;
use super::repository::{OrderRepository, RepositoryError};

/// Order use-cases over a repository; every failure is a [`DomainError`].
pub struct OrderService<R> {
    repository: Arc<R>,
    registry: StatusRegistry,
}

static ORDER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

const MAX_WRITE_ATTEMPTS: u32 = 3;

fn next_order_id() -> OrderId {
    let id = ORDER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    OrderId(format!("ord-{id:06}"))
}

impl<R> OrderService<R>
where
    R: OrderRepository + 'static,
{
    pub fn new(repository: Arc<R>, registry: StatusRegistry) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// Open a new order awaiting the professional's confirmation.
    pub fn place(
        &self,
        actor: &Principal,
        request: PlaceOrder,
    ) -> Result<OrderRecord, DomainError> {
        if actor.role != Role::Client {
            return Err(DomainError::UnauthorizedOrderAction(
                "only clients can place orders".to_string(),
            ));
        }

        let now = Utc::now();
        let record = OrderRecord {
            id: next_order_id(),
            title: request.title.trim().to_string(),
            client_id: actor.user_id.clone(),
            client_name: request.client_name,
            pro_id: request.pro_id,
            status: OrderStatus::PendingProConfirmation,
            review: None,
            created_at: now,
            updated_at: now,
        };

        let stored = self
            .repository
            .insert(record)
            .map_err(|err| storage_failure(err, "insert"))?;
        info!(order_id = %stored.id, client_id = %stored.client_id, "order placed");
        Ok(stored)
    }

    pub fn get(&self, id: &OrderId, actor: &Principal) -> Result<OrderRecord, DomainError> {
        let record = self.load(id)?;
        policy::can_view(&record, actor)?;
        Ok(record)
    }

    /// Apply a lifecycle action and persist the new status.
    pub fn transition(
        &self,
        id: &OrderId,
        actor: &Principal,
        action: OrderAction,
    ) -> Result<OrderRecord, DomainError> {
        let (from, record) = self.modify(id, |current| {
            let next = policy::authorize_transition(current, actor, action)?;
            let mut record = current.clone();
            record.status = next;
            record.updated_at = Utc::now();
            Ok(record)
        })?;

        info!(
            order_id = %record.id,
            actor = %actor.user_id,
            from = from.status.code(),
            to = record.status.code(),
            "order status changed"
        );
        Ok(record)
    }

    pub fn submit_review(
        &self,
        id: &OrderId,
        actor: &Principal,
        submission: ReviewSubmission,
    ) -> Result<OrderRecord, DomainError> {
        let comment = submission
            .comment
            .map(|comment| comment.trim().to_string())
            .filter(|comment| !comment.is_empty());

        let (_, record) = self.modify(id, |current| {
            policy::authorize_review(current, actor, submission.rating)?;
            let now = Utc::now();
            let mut record = current.clone();
            record.review = Some(Review {
                rating: submission.rating,
                comment: comment.clone(),
                author_id: actor.user_id.clone(),
                submitted_at: now,
            });
            record.updated_at = now;
            Ok(record)
        })?;

        info!(order_id = %record.id, rating = submission.rating, "order reviewed");
        Ok(record)
    }

    pub fn open_chat(&self, id: &OrderId, actor: &Principal) -> Result<ChatChannel, DomainError> {
        let record = self.load(id)?;
        policy::authorize_chat(&record, actor)?;

        Ok(ChatChannel {
            channel: format!("order:{}", record.id),
            participants: vec![record.client_id.clone(), record.pro_id.clone()],
            order_id: record.id,
        })
    }

    /// Render a record with localized status and masked names.
    pub fn view(&self, record: &OrderRecord) -> OrderView {
        let masked_client = mask_display_name(&record.client_name);
        OrderView {
            id: record.id.clone(),
            title: record.title.clone(),
            status: self
                .registry
                .badge(EntityType::Order, record.status.code()),
            client_name: masked_client.clone(),
            pro_id: record.pro_id.clone(),
            review: record.review.as_ref().map(|review| ReviewView {
                rating: review.rating,
                comment: review.comment.clone(),
                author_name: masked_client,
                submitted_at: review.submitted_at,
            }),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn load(&self, id: &OrderId) -> Result<OrderRecord, DomainError> {
        match self.repository.fetch(id) {
            Ok(Some(record)) => Ok(record),
            Ok(None) | Err(RepositoryError::NotFound) => {
                Err(DomainError::OrderNotFound(format!("order {id} not found")))
            }
            Err(err) => Err(storage_failure(err, "fetch")),
        }
    }

    /// Read, check and write as one compare-and-set step; returns the previous and new copy.
    ///
    /// `change` runs against the freshest stored copy on every attempt, so a write that lost
    /// a race is re-checked against the winner's result instead of overwriting it.
    fn modify<F>(
        &self,
        id: &OrderId,
        mut change: F,
    ) -> Result<(OrderRecord, OrderRecord), DomainError>
    where
        F: FnMut(&OrderRecord) -> Result<OrderRecord, DomainError>,
    {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let current = self.load(id)?;
            let next = change(&current)?;
            match self.repository.update_if_unchanged(&current, next.clone()) {
                Ok(()) => return Ok((current, next)),
                Err(RepositoryError::Conflict) => {
                    debug!(order_id = %id, attempt, "order changed concurrently; re-checking");
                }
                Err(RepositoryError::NotFound) => {
                    return Err(DomainError::OrderNotFound(format!("order {id} not found")))
                }
                Err(err) => return Err(storage_failure(err, "update")),
            }
        }

        warn!(order_id = %id, "order kept changing; giving up");
        Err(DomainError::InvalidOrderState(format!(
            "order {id} changed while the request was processed"
        )))
    }
}

// Storage details stay in the logs; callers get the generic message.
fn storage_failure(err: RepositoryError, operation: &'static str) -> DomainError {
    error!(error = %err, operation, "order repository failure");
    DomainError::GenericFailure(None)
}
