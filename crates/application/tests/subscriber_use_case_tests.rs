mod helpers;

use helpers::mock_repositories::MockSubscriberRepository;
use pressbase_application::ports::SubscriberRepository;
use pressbase_application::use_cases::{SubscribeUseCase, UnsubscribeUseCase};
use pressbase_domain::{DomainError, NewSubscriber, TenantContext};
use std::sync::Arc;

fn subscriber(email: &str) -> NewSubscriber {
    NewSubscriber {
        email: email.to_string(),
    }
}

#[tokio::test]
async fn subscribe_is_idempotent_per_address() {
    let repo = Arc::new(MockSubscriberRepository::new());
    let use_case = SubscribeUseCase::new(repo.clone());
    let ctx = TenantContext::from_str("site-A").unwrap();

    let first = use_case
        .execute(&ctx, subscriber("reader@example.com"))
        .await
        .unwrap();
    let second = use_case
        .execute(&ctx, subscriber("reader@example.com"))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(repo.stats(&ctx).await.unwrap().total, 1);
}

#[tokio::test]
async fn subscribe_rejects_malformed_address() {
    let repo = Arc::new(MockSubscriberRepository::new());
    let use_case = SubscribeUseCase::new(repo);
    let ctx = TenantContext::from_str("site-A").unwrap();

    let err = use_case
        .execute(&ctx, subscriber("not-an-address"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn same_address_subscribes_independently_per_tenant() {
    let repo = Arc::new(MockSubscriberRepository::new());
    let use_case = SubscribeUseCase::new(repo.clone());

    let ctx_a = TenantContext::from_str("site-A").unwrap();
    let ctx_b = TenantContext::from_str("site-B").unwrap();

    use_case
        .execute(&ctx_a, subscriber("reader@example.com"))
        .await
        .unwrap();
    use_case
        .execute(&ctx_b, subscriber("reader@example.com"))
        .await
        .unwrap();

    assert_eq!(repo.stats(&ctx_a).await.unwrap().total, 1);
    assert_eq!(repo.stats(&ctx_b).await.unwrap().total, 1);
}

#[tokio::test]
async fn unsubscribe_unknown_address_is_a_no_op() {
    let repo = Arc::new(MockSubscriberRepository::new());
    let use_case = UnsubscribeUseCase::new(repo);
    let ctx = TenantContext::from_str("site-A").unwrap();

    assert!(use_case.execute(&ctx, "ghost@example.com").await.is_ok());
}

#[tokio::test]
async fn unsubscribe_removes_only_the_calling_tenants_row() {
    let repo = Arc::new(MockSubscriberRepository::new());
    let subscribe = SubscribeUseCase::new(repo.clone());
    let unsubscribe = UnsubscribeUseCase::new(repo.clone());

    let ctx_a = TenantContext::from_str("site-A").unwrap();
    let ctx_b = TenantContext::from_str("site-B").unwrap();

    subscribe
        .execute(&ctx_a, subscriber("reader@example.com"))
        .await
        .unwrap();
    subscribe
        .execute(&ctx_b, subscriber("reader@example.com"))
        .await
        .unwrap();

    unsubscribe
        .execute(&ctx_a, "reader@example.com")
        .await
        .unwrap();

    assert_eq!(repo.stats(&ctx_a).await.unwrap().total, 0);
    assert_eq!(repo.stats(&ctx_b).await.unwrap().total, 1);
}
