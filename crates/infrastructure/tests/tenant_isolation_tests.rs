mod common;

use common::*;
use pressbase_domain::{ArticleUpdate, DomainError, NewSubscriber};

#[tokio::test]
async fn same_slug_resolves_independently_per_tenant() {
    let app = setup().await;
    let ctx_a = app.provision_site("Site A", "a.example.com").await;
    let ctx_b = app.provision_site("Site B", "b.example.com").await;

    app.articles
        .create(&ctx_a, new_article("hello", "Hi"))
        .await
        .unwrap();
    app.articles
        .create(&ctx_b, new_article("hello", "Yo"))
        .await
        .unwrap();

    let a = app.articles.get_by_slug(&ctx_a, "hello").await.unwrap().unwrap();
    let b = app.articles.get_by_slug(&ctx_b, "hello").await.unwrap().unwrap();
    assert_eq!(a.title, "Hi");
    assert_eq!(b.title, "Yo");

    // and again, now that both are cached
    let a = app.articles.get_by_slug(&ctx_a, "hello").await.unwrap().unwrap();
    assert_eq!(a.title, "Hi");
}

#[tokio::test]
async fn foreign_rows_are_invisible_by_id_and_slug() {
    let app = setup().await;
    let ctx_a = app.provision_site("Site A", "a.example.com").await;
    let ctx_b = app.provision_site("Site B", "b.example.com").await;

    let article = app
        .articles
        .create(&ctx_a, new_article("hello", "Hi"))
        .await
        .unwrap();

    assert!(app
        .articles
        .get_by_id(&ctx_b, &article.id)
        .await
        .unwrap()
        .is_none());
    assert!(app
        .articles
        .get_by_slug(&ctx_b, "hello")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn cross_tenant_update_is_rejected_and_leaves_the_row_intact() {
    let app = setup().await;
    let ctx_a = app.provision_site("Site A", "a.example.com").await;
    let ctx_b = app.provision_site("Site B", "b.example.com").await;

    let article = app
        .articles
        .create(&ctx_a, new_article("hello", "Hi"))
        .await
        .unwrap();

    let err = app
        .articles
        .update(
            &ctx_b,
            &article.id,
            ArticleUpdate {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::TenantMismatch(_)));

    let unchanged = app
        .articles
        .get_by_id(&ctx_a, &article.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.title, "Hi");
}

#[tokio::test]
async fn cross_tenant_delete_is_rejected() {
    let app = setup().await;
    let ctx_a = app.provision_site("Site A", "a.example.com").await;
    let ctx_b = app.provision_site("Site B", "b.example.com").await;

    let article = app
        .articles
        .create(&ctx_a, new_article("hello", "Hi"))
        .await
        .unwrap();

    let err = app.articles.delete(&ctx_b, &article.id).await.unwrap_err();
    assert!(matches!(err, DomainError::TenantMismatch(_)));
    assert!(app
        .articles
        .get_by_id(&ctx_a, &article.id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn tenant_mismatch_reads_exactly_like_not_found() {
    let app = setup().await;
    let ctx_a = app.provision_site("Site A", "a.example.com").await;
    let ctx_b = app.provision_site("Site B", "b.example.com").await;

    let article = app
        .articles
        .create(&ctx_a, new_article("hello", "Hi"))
        .await
        .unwrap();

    let foreign = app
        .articles
        .delete(&ctx_b, &article.id)
        .await
        .unwrap_err()
        .to_string();
    let missing = app
        .articles
        .delete(&ctx_b, "no-such-id")
        .await
        .unwrap_err()
        .to_string();

    // same wording modulo the id, so existence elsewhere never leaks
    assert_eq!(
        foreign.replace(&article.id, "<id>"),
        missing.replace("no-such-id", "<id>")
    );
}

#[tokio::test]
async fn same_email_subscribes_independently_per_tenant() {
    let app = setup().await;
    let ctx_a = app.provision_site("Site A", "a.example.com").await;
    let ctx_b = app.provision_site("Site B", "b.example.com").await;

    app.subscribers
        .subscribe(
            &ctx_a,
            NewSubscriber {
                email: "reader@example.com".to_string(),
            },
        )
        .await
        .unwrap();
    app.subscribers
        .subscribe(
            &ctx_b,
            NewSubscriber {
                email: "reader@example.com".to_string(),
            },
        )
        .await
        .unwrap();

    let a = app
        .subscribers
        .get_by_email(&ctx_a, "reader@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(a.site_id, ctx_a.tenant_id().as_str());
    assert_eq!(app.subscribers.stats(&ctx_b).await.unwrap().total, 1);
}

#[tokio::test]
async fn duplicate_subscription_within_one_tenant_is_a_validation_error() {
    let app = setup().await;
    let ctx = app.provision_site("Site A", "a.example.com").await;
    let subscriber = NewSubscriber {
        email: "reader@example.com".to_string(),
    };

    app.subscribers
        .subscribe(&ctx, subscriber.clone())
        .await
        .unwrap();
    let err = app.subscribers.subscribe(&ctx, subscriber).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn site_deletion_cascades_and_spares_other_tenants() {
    let app = setup().await;
    let ctx_a = app.provision_site("Site A", "a.example.com").await;
    let ctx_b = app.provision_site("Site B", "b.example.com").await;

    app.articles
        .create(&ctx_a, new_article("hello", "Hi"))
        .await
        .unwrap();
    app.subscribers
        .subscribe(
            &ctx_a,
            NewSubscriber {
                email: "reader@example.com".to_string(),
            },
        )
        .await
        .unwrap();
    app.articles
        .create(&ctx_b, new_article("hello", "Yo"))
        .await
        .unwrap();

    app.sites.delete_site(&ctx_a).await.unwrap();

    assert!(app.sites.get(&ctx_a).await.unwrap().is_none());
    assert!(app
        .articles
        .get_by_slug(&ctx_a, "hello")
        .await
        .unwrap()
        .is_none());
    assert_eq!(app.subscribers.stats(&ctx_a).await.unwrap().total, 0);

    // tenant B untouched
    assert!(app.sites.get(&ctx_b).await.unwrap().is_some());
    assert_eq!(
        app.articles
            .get_by_slug(&ctx_b, "hello")
            .await
            .unwrap()
            .unwrap()
            .title,
        "Yo"
    );
}

#[tokio::test]
async fn host_routing_and_admin_listing_see_all_sites() {
    let app = setup().await;
    let ctx_a = app.provision_site("Site A", "a.example.com").await;
    app.provision_site("Site B", "b.example.com").await;

    let routed = app
        .sites
        .find_by_host("a.example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(routed.id, ctx_a.tenant_id().as_str());
    assert!(app.sites.find_by_host("ghost.example.com").await.unwrap().is_none());

    let all = app.sites.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn duplicate_host_is_rejected_at_provisioning() {
    let app = setup().await;
    app.provision_site("Site A", "same.example.com").await;

    let err = app
        .sites
        .create_site(pressbase_domain::NewSite {
            name: "Clone".to_string(),
            host: "same.example.com".to_string(),
            description: None,
            theme: "default".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}
