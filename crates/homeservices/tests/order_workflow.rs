//! End-to-end order flow through the public HTTP router: a client books a professional,
//! the work moves through its lifecycle, and the client leaves a review.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::response::Response;
    use serde_json::Value;

    use homeservices::orders::{
        order_router, OrderId, OrderRecord, OrderRepository, OrderService, RepositoryError,
        USER_ID_HEADER, USER_ROLE_HEADER,
    };
    use homeservices::status::{Locale, StatusRegistry};

    #[derive(Default)]
    pub(super) struct MemoryOrders {
        records: Mutex<HashMap<OrderId, OrderRecord>>,
    }

    impl OrderRepository for MemoryOrders {
        fn insert(&self, record: OrderRecord) -> Result<OrderRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("mutex poisoned");
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
            let mut guard = self.records.lock().expect("mutex poisoned");
            match guard.get_mut(&record.id) {
                Some(slot) if slot == expected => {
                    *slot = record;
                    Ok(())
                }
                Some(_) => Err(RepositoryError::Conflict),
                None => Err(RepositoryError::NotFound),
            }
        }

        fn fetch(&self, id: &OrderId) -> Result<Option<OrderRecord>, RepositoryError> {
            Ok(self.records.lock().expect("mutex poisoned").get(id).cloned())
        }
    }

    pub(super) fn router(locale: Locale) -> axum::Router {
        let service = OrderService::new(
            Arc::new(MemoryOrders::default()),
            StatusRegistry::new(locale),
        );
        order_router(Arc::new(service))
    }

    pub(super) fn call(
        method: &str,
        uri: &str,
        user: (&str, &str),
        body: Option<Value>,
    ) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_ID_HEADER, user.0)
            .header(USER_ROLE_HEADER, user.1);
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).expect("json")))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        }
    }

    pub(super) async fn json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }
}

use axum::http::StatusCode;
use homeservices::status::Locale;
use serde_json::json;
use tower::ServiceExt;

const CLIENT: (&str, &str) = ("client-1", "CLIENT");
const PRO: (&str, &str) = ("pro-1", "PRO");
const ADMIN: (&str, &str) = ("admin-1", "ADMIN");

#[tokio::test]
async fn order_moves_from_booking_to_review() {
    let router = common::router(Locale::En);

    let placed = router
        .clone()
        .oneshot(common::call(
            "POST",
            "/api/v1/orders",
            CLIENT,
            Some(json!({
                "pro_id": "pro-1",
                "client_name": "Joana Mendes",
                "title": "Replace bathroom tiles"
            })),
        ))
        .await
        .expect("place");
    assert_eq!(placed.status(), StatusCode::CREATED);
    let body = common::json(placed).await;
    let id = body["id"].as_str().expect("order id").to_string();

    let steps = [
        (PRO, "accept", "ACCEPTED"),
        (PRO, "start", "IN_PROGRESS"),
        (PRO, "request_approval", "AWAITING_CLIENT_APPROVAL"),
        (CLIENT, "approve_completion", "COMPLETED"),
        (ADMIN, "mark_paid", "PAID"),
    ];

    for (user, action, expected) in steps {
        let response = router
            .clone()
            .oneshot(common::call(
                "POST",
                &format!("/api/v1/orders/{id}/transitions"),
                user,
                Some(json!({ "action": action })),
            ))
            .await
            .expect("transition");
        assert_eq!(response.status(), StatusCode::OK, "{action}");
        let body = common::json(response).await;
        assert_eq!(body["status"]["status"], json!(expected));
    }

    let chat = router
        .clone()
        .oneshot(common::call(
            "GET",
            &format!("/api/v1/orders/{id}/chat"),
            CLIENT,
            None,
        ))
        .await
        .expect("chat");
    assert_eq!(chat.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::json(chat).await["code"], json!("INVALID_REQUEST"));

    let review = router
        .clone()
        .oneshot(common::call(
            "POST",
            &format!("/api/v1/orders/{id}/review"),
            CLIENT,
            Some(json!({ "rating": 5, "comment": "Great finish" })),
        ))
        .await
        .expect("review");
    assert_eq!(review.status(), StatusCode::CREATED);
    let body = common::json(review).await;
    assert_eq!(body["review"]["author_name"], json!("Joana M."));
    assert_eq!(body["status"]["label"], json!("Paid"));

    let duplicate = router
        .oneshot(common::call(
            "POST",
            &format!("/api/v1/orders/{id}/review"),
            CLIENT,
            Some(json!({ "rating": 3 })),
        ))
        .await
        .expect("duplicate review");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    assert_eq!(common::json(duplicate).await["code"], json!("CONFLICT"));
}

#[tokio::test]
async fn professionals_cannot_review() {
    let router = common::router(Locale::PtBr);

    let placed = router
        .clone()
        .oneshot(common::call(
            "POST",
            "/api/v1/orders",
            CLIENT,
            Some(json!({ "pro_id": "pro-1", "client_name": "Joana", "title": "Gutter" })),
        ))
        .await
        .expect("place");
    let body = common::json(placed).await;
    assert_eq!(
        body["status"]["label"],
        json!("Aguardando confirmação do profissional")
    );
    let id = body["id"].as_str().expect("order id").to_string();

    let response = router
        .oneshot(common::call(
            "POST",
            &format!("/api/v1/orders/{id}/review"),
            PRO,
            Some(json!({ "rating": 1 })),
        ))
        .await
        .expect("review");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(common::json(response).await["code"], json!("FORBIDDEN"));
}
