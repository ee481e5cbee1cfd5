#![allow(dead_code)]

use async_trait::async_trait;
use pressbase_application::ports::{ArticleRepository, SubscriberRepository};
use pressbase_domain::{
    Article, ArticleStats, ArticleUpdate, DomainError, NewArticle, NewSubscriber, Subscriber,
    SubscriberStats, TenantContext,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

fn timestamp() -> String {
    "2026-01-01 00:00:00".to_string()
}

// ============================================================================
// Mock ArticleRepository
// ============================================================================

#[derive(Clone, Default)]
pub struct MockArticleRepository {
    // keyed by (tenant, article id)
    rows: Arc<RwLock<HashMap<(String, String), Article>>>,
    next_id: Arc<RwLock<u64>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    async fn check_failure(&self) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::Storage("Mock storage failed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for MockArticleRepository {
    async fn create(
        &self,
        ctx: &TenantContext,
        article: NewArticle,
    ) -> Result<Article, DomainError> {
        self.check_failure().await?;
        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        let created = Article {
            id: format!("article-{}", *next_id),
            site_id: ctx.tenant_id().as_str().to_string(),
            slug: article.slug,
            title: article.title,
            body: article.body,
            published: article.published,
            created_at: Some(timestamp()),
            updated_at: Some(timestamp()),
        };
        self.rows.write().await.insert(
            (created.site_id.clone(), created.id.clone()),
            created.clone(),
        );
        Ok(created)
    }

    async fn get_by_id(
        &self,
        ctx: &TenantContext,
        id: &str,
    ) -> Result<Option<Article>, DomainError> {
        self.check_failure().await?;
        let key = (ctx.tenant_id().as_str().to_string(), id.to_string());
        Ok(self.rows.read().await.get(&key).cloned())
    }

    async fn get_by_slug(
        &self,
        ctx: &TenantContext,
        slug: &str,
    ) -> Result<Option<Article>, DomainError> {
        self.check_failure().await?;
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|a| a.site_id == ctx.tenant_id().as_str() && a.slug == slug)
            .cloned())
    }

    async fn list(
        &self,
        ctx: &TenantContext,
        published_only: bool,
    ) -> Result<Vec<Article>, DomainError> {
        self.check_failure().await?;
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|a| a.site_id == ctx.tenant_id().as_str())
            .filter(|a| !published_only || a.published)
            .cloned()
            .collect())
    }

    async fn stats(&self, ctx: &TenantContext) -> Result<ArticleStats, DomainError> {
        let all = self.list(ctx, false).await?;
        Ok(ArticleStats {
            total: all.len() as u64,
            published: all.iter().filter(|a| a.published).count() as u64,
        })
    }

    async fn update(
        &self,
        ctx: &TenantContext,
        id: &str,
        patch: ArticleUpdate,
    ) -> Result<Article, DomainError> {
        self.check_failure().await?;
        let key = (ctx.tenant_id().as_str().to_string(), id.to_string());
        let mut rows = self.rows.write().await;
        let article = rows.get_mut(&key).ok_or_else(|| {
            DomainError::TenantMismatch(DomainError::not_found_message("article", id))
        })?;
        if let Some(slug) = patch.slug {
            article.slug = slug;
        }
        if let Some(title) = patch.title {
            article.title = title;
        }
        if let Some(body) = patch.body {
            article.body = body;
        }
        if let Some(published) = patch.published {
            article.published = published;
        }
        Ok(article.clone())
    }

    async fn delete(&self, ctx: &TenantContext, id: &str) -> Result<(), DomainError> {
        self.check_failure().await?;
        let key = (ctx.tenant_id().as_str().to_string(), id.to_string());
        self.rows.write().await.remove(&key).ok_or_else(|| {
            DomainError::TenantMismatch(DomainError::not_found_message("article", id))
        })?;
        Ok(())
    }
}

// ============================================================================
// Mock SubscriberRepository
// ============================================================================

#[derive(Clone, Default)]
pub struct MockSubscriberRepository {
    rows: Arc<RwLock<HashMap<(String, String), Subscriber>>>,
    next_id: Arc<RwLock<u64>>,
}

impl MockSubscriberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberRepository for MockSubscriberRepository {
    async fn subscribe(
        &self,
        ctx: &TenantContext,
        subscriber: NewSubscriber,
    ) -> Result<Subscriber, DomainError> {
        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        let created = Subscriber {
            id: format!("subscriber-{}", *next_id),
            site_id: ctx.tenant_id().as_str().to_string(),
            email: subscriber.email,
            confirmed: false,
            created_at: Some(timestamp()),
            updated_at: Some(timestamp()),
        };
        self.rows.write().await.insert(
            (created.site_id.clone(), created.id.clone()),
            created.clone(),
        );
        Ok(created)
    }

    async fn get_by_email(
        &self,
        ctx: &TenantContext,
        email: &str,
    ) -> Result<Option<Subscriber>, DomainError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|s| s.site_id == ctx.tenant_id().as_str() && s.email == email)
            .cloned())
    }

    async fn list(
        &self,
        ctx: &TenantContext,
        confirmed_only: bool,
    ) -> Result<Vec<Subscriber>, DomainError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|s| s.site_id == ctx.tenant_id().as_str())
            .filter(|s| !confirmed_only || s.confirmed)
            .cloned()
            .collect())
    }

    async fn stats(&self, ctx: &TenantContext) -> Result<SubscriberStats, DomainError> {
        let all = self.list(ctx, false).await?;
        Ok(SubscriberStats {
            total: all.len() as u64,
            confirmed: all.iter().filter(|s| s.confirmed).count() as u64,
        })
    }

    async fn confirm(&self, ctx: &TenantContext, id: &str) -> Result<Subscriber, DomainError> {
        let key = (ctx.tenant_id().as_str().to_string(), id.to_string());
        let mut rows = self.rows.write().await;
        let subscriber = rows.get_mut(&key).ok_or_else(|| {
            DomainError::TenantMismatch(DomainError::not_found_message("subscriber", id))
        })?;
        subscriber.confirmed = true;
        Ok(subscriber.clone())
    }

    async fn unsubscribe(&self, ctx: &TenantContext, id: &str) -> Result<(), DomainError> {
        let key = (ctx.tenant_id().as_str().to_string(), id.to_string());
        self.rows.write().await.remove(&key).ok_or_else(|| {
            DomainError::TenantMismatch(DomainError::not_found_message("subscriber", id))
        })?;
        Ok(())
    }
}
