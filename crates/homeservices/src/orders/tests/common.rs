use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};

use axum::http::{Request, StatusCode};
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::access::Role;
use crate::orders::domain::{OrderId, OrderRecord, PlaceOrder, Principal, UserId};
use crate::orders::repository::{OrderRepository, RepositoryError};
use crate::orders::service::OrderService;
use crate::orders::{order_router, USER_ID_HEADER, USER_ROLE_HEADER};
use crate::status::{Locale, OrderStatus, StatusRegistry};

pub(super) const CLIENT_ID: &str = "client-ana";
pub(super) const PRO_ID: &str = "pro-bruno";

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<OrderId, OrderRecord>>>,
}

impl MemoryRepository {
    pub(super) fn seed(&self, record: OrderRecord) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(record.id.clone(), record);
    }

    pub(super) fn stored(&self, id: &OrderId) -> Option<OrderRecord> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl OrderRepository for MemoryRepository {
    fn insert(&self, record: OrderRecord) -> Result<OrderRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update_if_unchanged(
        &self,
        expected: &OrderRecord,
        record: OrderRecord,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&record.id) {
            Some(stored) if stored == expected => {
                *stored = record;
                Ok(())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &OrderId) -> Result<Option<OrderRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Holds the first `gated` fetches until that many callers have arrived, so concurrent
/// use-cases all read the same snapshot before any of them writes.
pub(super) struct GatedRepository {
    inner: MemoryRepository,
    gate: Barrier,
    gated: usize,
    fetches: AtomicUsize,
}

impl GatedRepository {
    pub(super) fn new(inner: MemoryRepository, gated: usize) -> Self {
        Self {
            inner,
            gate: Barrier::new(gated),
            gated,
            fetches: AtomicUsize::new(0),
        }
    }
}

impl OrderRepository for GatedRepository {
    fn insert(&self, record: OrderRecord) -> Result<OrderRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update_if_unchanged(
        &self,
        expected: &OrderRecord,
        record: OrderRecord,
    ) -> Result<(), RepositoryError> {
        self.inner.update_if_unchanged(expected, record)
    }

    fn fetch(&self, id: &OrderId) -> Result<Option<OrderRecord>, RepositoryError> {
        let snapshot = self.inner.fetch(id);
        if self.fetches.fetch_add(1, Ordering::SeqCst) < self.gated {
            self.gate.wait();
        }
        snapshot
    }
}

pub(super) struct UnavailableRepository;

impl OrderRepository for UnavailableRepository {
    fn insert(&self, _record: OrderRecord) -> Result<OrderRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn update_if_unchanged(
        &self,
        _expected: &OrderRecord,
        _record: OrderRecord,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn fetch(&self, _id: &OrderId) -> Result<Option<OrderRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }
}

pub(super) fn client() -> Principal {
    Principal::new(CLIENT_ID, Role::Client)
}

pub(super) fn pro() -> Principal {
    Principal::new(PRO_ID, Role::Pro)
}

pub(super) fn admin() -> Principal {
    Principal::new("admin-carla", Role::Admin)
}

pub(super) fn stranger(role: Role) -> Principal {
    Principal::new("someone-else", role)
}

pub(super) fn place_request() -> PlaceOrder {
    PlaceOrder {
        pro_id: UserId(PRO_ID.to_string()),
        client_name: "Ana Beatriz Souza".to_string(),
        title: "Fix leaking kitchen sink".to_string(),
    }
}

/// Record in `status` owned by [`client`] and [`pro`].
pub(super) fn order_in(id: &str, status: OrderStatus) -> OrderRecord {
    let created = Utc
        .with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp");
    OrderRecord {
        id: OrderId(id.to_string()),
        title: "Paint the living room".to_string(),
        client_id: UserId(CLIENT_ID.to_string()),
        client_name: "Ana Beatriz Souza".to_string(),
        pro_id: UserId(PRO_ID.to_string()),
        status,
        review: None,
        created_at: created,
        updated_at: created,
    }
}

pub(super) fn build_service() -> (Arc<OrderService<MemoryRepository>>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = OrderService::new(
        Arc::new(repository.clone()),
        StatusRegistry::new(Locale::En),
    );
    (Arc::new(service), repository)
}

pub(super) fn router_with_service(service: Arc<OrderService<MemoryRepository>>) -> axum::Router {
    order_router(service)
}

pub(super) fn request_as(
    method: &str,
    uri: &str,
    actor: Option<&Principal>,
    body: Option<Value>,
) -> Request<axum::body::Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder
            .header(USER_ID_HEADER, actor.user_id.0.as_str())
            .header(USER_ROLE_HEADER, actor.role.as_str());
    }

    match body {
        Some(json) => builder
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(
                serde_json::to_vec(&json).expect("json body"),
            ))
            .expect("request builds"),
        None => builder
            .body(axum::body::Body::empty())
            .expect("request builds"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}

pub(super) async fn assert_error(response: Response, status: StatusCode, code: &str) -> Value {
    assert_eq!(response.status(), status);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("code").and_then(Value::as_str), Some(code));
    payload
}
