use std::sync::Arc;

use super::common::*;
use crate::access::Role;
use crate::boundary::{DomainError, ErrorCategory, ExternalError};
use crate::orders::domain::{OrderAction, OrderId, ReviewSubmission};
use crate::orders::service::OrderService;
use crate::status::{Locale, OrderStatus, StatusRegistry, StatusVariant};

#[test]
fn place_starts_pending_pro_confirmation() {
    let (service, repository) = build_service();

    let record = service.place(&client(), place_request()).expect("order placed");

    assert_eq!(record.status, OrderStatus::PendingProConfirmation);
    assert_eq!(record.client_id, client().user_id);
    assert!(record.id.0.starts_with("ord-"));
    assert_eq!(repository.stored(&record.id), Some(record));
}

#[test]
fn only_clients_place_orders() {
    let (service, _) = build_service();
    for actor in [pro(), admin()] {
        let err = service
            .place(&actor, place_request())
            .expect_err("non-clients rejected");
        assert!(matches!(err, DomainError::UnauthorizedOrderAction(_)));
    }
}

#[test]
fn full_lifecycle_reaches_paid_with_review() {
    let (service, _) = build_service();
    let record = service.place(&client(), place_request()).expect("placed");
    let id = record.id.clone();

    let steps = [
        (pro(), OrderAction::Accept, OrderStatus::Accepted),
        (client(), OrderAction::Confirm, OrderStatus::Confirmed),
        (pro(), OrderAction::Start, OrderStatus::InProgress),
        (
            pro(),
            OrderAction::RequestApproval,
            OrderStatus::AwaitingClientApproval,
        ),
        (
            client(),
            OrderAction::ApproveCompletion,
            OrderStatus::Completed,
        ),
        (admin(), OrderAction::MarkPaid, OrderStatus::Paid),
    ];

    for (actor, action, expected) in steps {
        let updated = service
            .transition(&id, &actor, action)
            .unwrap_or_else(|err| panic!("{action:?} failed: {err}"));
        assert_eq!(updated.status, expected);
    }

    let reviewed = service
        .submit_review(
            &id,
            &client(),
            ReviewSubmission {
                rating: 5,
                comment: Some("  Spotless work  ".to_string()),
            },
        )
        .expect("review stored");

    let review = reviewed.review.as_ref().expect("review present");
    assert_eq!(review.comment.as_deref(), Some("Spotless work"));

    let view = service.view(&reviewed);
    assert_eq!(view.status.label, "Paid");
    assert_eq!(view.status.variant, StatusVariant::Success);
    assert_eq!(view.client_name, "Ana S.");
    assert_eq!(
        view.review.map(|review| review.author_name),
        Some("Ana S.".to_string())
    );
}

#[test]
fn second_review_conflicts() {
    let (service, repository) = build_service();
    repository.seed(order_in("ord-review", OrderStatus::Completed));
    let id = OrderId("ord-review".to_string());
    let submission = ReviewSubmission {
        rating: 4,
        comment: None,
    };

    service
        .submit_review(&id, &client(), submission.clone())
        .expect("first review stored");
    let err = service
        .submit_review(&id, &client(), submission)
        .expect_err("duplicate rejected");

    assert_eq!(ExternalError::from(&err).category(), ErrorCategory::Conflict);
}

#[test]
fn missing_orders_are_not_found() {
    let (service, _) = build_service();
    let err = service
        .get(&OrderId("ord-404".to_string()), &client())
        .expect_err("missing order");
    assert_eq!(
        err,
        DomainError::OrderNotFound("order ord-404 not found".to_string())
    );
}

#[test]
fn outsiders_cannot_read_orders() {
    let (service, repository) = build_service();
    repository.seed(order_in("ord-private", OrderStatus::InProgress));
    let id = OrderId("ord-private".to_string());

    assert!(matches!(
        service.get(&id, &stranger(Role::Client)),
        Err(DomainError::UnauthorizedOrderAction(_))
    ));
    assert!(service.get(&id, &admin()).is_ok());
    assert!(service.get(&id, &pro()).is_ok());
}

#[test]
fn chat_lists_both_parties() {
    let (service, repository) = build_service();
    repository.seed(order_in("ord-chat", OrderStatus::Disputed));

    let channel = service
        .open_chat(&OrderId("ord-chat".to_string()), &pro())
        .expect("chat open");

    assert_eq!(channel.channel, "order:ord-chat");
    assert_eq!(channel.participants, vec![client().user_id, pro().user_id]);
}

#[test]
fn storage_failures_hide_details() {
    let service = OrderService::new(
        Arc::new(UnavailableRepository),
        StatusRegistry::new(Locale::En),
    );

    let err = service
        .get(&OrderId("ord-1".to_string()), &client())
        .expect_err("storage down");
    assert_eq!(err, DomainError::GenericFailure(None));

    let external = ExternalError::from(err);
    assert_eq!(external, ExternalError::internal());
    assert!(!external.message().contains("connection refused"));
}

#[test]
fn views_follow_registry_locale() {
    let repository = MemoryRepository::default();
    let service = OrderService::new(
        Arc::new(repository.clone()),
        StatusRegistry::new(Locale::PtBr),
    );
    let view = service.view(&order_in("ord-pt", OrderStatus::AwaitingClientApproval));

    assert_eq!(view.status.status, "AWAITING_CLIENT_APPROVAL");
    assert_eq!(view.status.label, "Aguardando aprovação do cliente");
    assert_eq!(view.status.variant, StatusVariant::Warning);
}

#[test]
fn concurrent_reviews_store_exactly_one() {
    let memory = MemoryRepository::default();
    memory.seed(order_in("ord-race", OrderStatus::Completed));
    let service = OrderService::new(
        Arc::new(GatedRepository::new(memory.clone(), 2)),
        StatusRegistry::new(Locale::En),
    );
    let id = OrderId("ord-race".to_string());

    let outcomes: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = [5u8, 1u8]
            .into_iter()
            .map(|rating| {
                let (service, id) = (&service, &id);
                scope.spawn(move || {
                    service
                        .submit_review(
                            id,
                            &client(),
                            ReviewSubmission {
                                rating,
                                comment: None,
                            },
                        )
                        .map(|record| record.review.map(|review| review.rating))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("reviewer thread"))
            .collect()
    });

    let accepted: Vec<_> = outcomes.iter().filter_map(|outcome| outcome.clone().ok()).collect();
    assert_eq!(accepted.len(), 1, "{outcomes:?}");
    assert!(outcomes
        .iter()
        .any(|outcome| matches!(outcome, Err(DomainError::ReviewAlreadyExists(_)))));

    let stored = memory
        .stored(&id)
        .and_then(|record| record.review)
        .map(|review| review.rating);
    assert_eq!(Some(stored), accepted.into_iter().next());
}

#[test]
fn concurrent_cancel_and_start_cannot_both_win() {
    let memory = MemoryRepository::default();
    memory.seed(order_in("ord-split", OrderStatus::Confirmed));
    let service = OrderService::new(
        Arc::new(GatedRepository::new(memory.clone(), 2)),
        StatusRegistry::new(Locale::En),
    );
    let id = OrderId("ord-split".to_string());

    let outcomes: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = [(client(), OrderAction::Cancel), (pro(), OrderAction::Start)]
            .into_iter()
            .map(|(actor, action)| {
                let (service, id) = (&service, &id);
                scope.spawn(move || service.transition(id, &actor, action))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("actor thread"))
            .collect()
    });

    let winners: Vec<OrderStatus> = outcomes
        .iter()
        .filter_map(|outcome| outcome.as_ref().ok().map(|record| record.status))
        .collect();
    assert_eq!(winners.len(), 1, "{outcomes:?}");
    assert!(outcomes
        .iter()
        .any(|outcome| matches!(outcome, Err(DomainError::InvalidOrderState(_)))));
    assert_eq!(
        memory.stored(&id).map(|record| record.status),
        winners.first().copied()
    );
}
