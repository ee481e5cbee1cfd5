use async_trait::async_trait;
use pressbase_application::ports::ArticleRepository;
use pressbase_domain::config::CacheConfig;
use pressbase_domain::{
    Article, ArticleStats, ArticleUpdate, DomainError, NewArticle, TenantContext,
};
use std::sync::Arc;
use tracing::instrument;

use crate::cache::invalidation::{InvalidationPolicy, Mutation};
use crate::cache::{key, CacheStore, EntityKind};
use crate::guard::{SelectQuery, SqlValue, Table, TenantGuard};

use super::{map_unique_violation, new_entity_id, now_timestamp};

const COLUMNS: &str = "id, site_id, slug, title, body, published, created_at, updated_at";

type ArticleRow = (
    String,
    String,
    String,
    String,
    String,
    bool,
    String,
    String,
);

pub struct SqliteArticleRepository {
    guard: Arc<TenantGuard>,
    cache: Arc<CacheStore>,
    policy: InvalidationPolicy,
    config: CacheConfig,
}

impl SqliteArticleRepository {
    pub fn new(guard: Arc<TenantGuard>, cache: Arc<CacheStore>, config: CacheConfig) -> Self {
        let policy = InvalidationPolicy::new(Arc::clone(&cache));
        Self {
            guard,
            cache,
            policy,
            config,
        }
    }

    fn row_to_article(row: ArticleRow) -> Article {
        let (id, site_id, slug, title, body, published, created_at, updated_at) = row;
        Article {
            id,
            site_id,
            slug,
            title,
            body,
            published,
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        }
    }

    /// Uncached tenant-scoped fetch, for write paths that need the current
    /// row regardless of cache state.
    async fn fetch_by_id(
        &self,
        ctx: &TenantContext,
        id: &str,
    ) -> Result<Option<Article>, DomainError> {
        let query = SelectQuery::from_table(Table::Articles, COLUMNS)
            .filter("id = ?", vec![id.into()]);
        let row: Option<ArticleRow> = self.guard.select_one(ctx.tenant_id(), query).await?;
        Ok(row.map(Self::row_to_article))
    }
}

#[async_trait]
impl ArticleRepository for SqliteArticleRepository {
    #[instrument(skip(self, article))]
    async fn create(
        &self,
        ctx: &TenantContext,
        article: NewArticle,
    ) -> Result<Article, DomainError> {
        let tenant = ctx.tenant_id();
        let id = new_entity_id();
        let now = now_timestamp();

        self.guard
            .insert(
                tenant,
                Table::Articles,
                vec![
                    ("id", id.as_str().into()),
                    ("slug", article.slug.as_str().into()),
                    ("title", article.title.as_str().into()),
                    ("body", article.body.as_str().into()),
                    ("published", article.published.into()),
                    ("created_at", now.as_str().into()),
                    ("updated_at", now.as_str().into()),
                ],
            )
            .await
            .map_err(|e| {
                map_unique_violation(
                    e,
                    &format!("Slug '{}' already exists for this site", article.slug),
                )
            })?;

        self.policy.apply(
            tenant,
            EntityKind::Article,
            Mutation::Create,
            Some(&id),
            Some(&article.slug),
        )?;

        Ok(Article {
            id,
            site_id: tenant.as_str().to_string(),
            slug: article.slug,
            title: article.title,
            body: article.body,
            published: article.published,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        })
    }

    #[instrument(skip(self))]
    async fn get_by_id(
        &self,
        ctx: &TenantContext,
        id: &str,
    ) -> Result<Option<Article>, DomainError> {
        let cache_key = key::entity_by_id(EntityKind::Article, ctx.tenant_id(), id);
        self.cache
            .get_or_load(&cache_key, self.config.entity_ttl(), || {
                self.fetch_by_id(ctx, id)
            })
            .await
    }

    #[instrument(skip(self))]
    async fn get_by_slug(
        &self,
        ctx: &TenantContext,
        slug: &str,
    ) -> Result<Option<Article>, DomainError> {
        let tenant = ctx.tenant_id();
        let cache_key = key::entity_by_natural_key(EntityKind::Article, tenant, slug);
        self.cache
            .get_or_load(&cache_key, self.config.entity_ttl(), || async {
                let query = SelectQuery::from_table(Table::Articles, COLUMNS)
                    .filter("slug = ?", vec![slug.into()]);
                let row: Option<ArticleRow> = self.guard.select_one(tenant, query).await?;
                Ok(row.map(Self::row_to_article))
            })
            .await
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        ctx: &TenantContext,
        published_only: bool,
    ) -> Result<Vec<Article>, DomainError> {
        let tenant = ctx.tenant_id();
        let qualifier = if published_only { "published" } else { "all" };
        let cache_key = key::entity_list(EntityKind::Article, tenant, &[qualifier]);

        self.cache
            .get_or_load(&cache_key, self.config.list_ttl(), || async {
                let mut query = SelectQuery::from_table(Table::Articles, COLUMNS)
                    .order_by("created_at DESC, id DESC");
                if published_only {
                    query = query.filter("published = ?", vec![true.into()]);
                }
                let rows: Vec<ArticleRow> = self.guard.select(tenant, query).await?;
                Ok(rows.into_iter().map(Self::row_to_article).collect())
            })
            .await
    }

    #[instrument(skip(self))]
    async fn stats(&self, ctx: &TenantContext) -> Result<ArticleStats, DomainError> {
        let tenant = ctx.tenant_id();
        let cache_key = key::tenant_stats(EntityKind::Article, tenant, "all");

        self.cache
            .get_or_load(&cache_key, self.config.stats_ttl(), || async {
                let query = SelectQuery::from_table(
                    Table::Articles,
                    "COUNT(*), COALESCE(SUM(published), 0)",
                );
                let row: Option<(i64, i64)> = self.guard.select_one(tenant, query).await?;
                let (total, published) = row.unwrap_or((0, 0));
                Ok(ArticleStats {
                    total: total as u64,
                    published: published as u64,
                })
            })
            .await
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        ctx: &TenantContext,
        id: &str,
        patch: ArticleUpdate,
    ) -> Result<Article, DomainError> {
        let tenant = ctx.tenant_id();

        // Current row, read through the guard: the old slug's cache key has
        // to be purged even when the patch replaces the slug.
        let current = self.fetch_by_id(ctx, id).await?.ok_or_else(|| {
            DomainError::TenantMismatch(DomainError::not_found_message("article", id))
        })?;

        let mut fields: Vec<(&'static str, SqlValue)> = Vec::new();
        if let Some(ref slug) = patch.slug {
            fields.push(("slug", slug.as_str().into()));
        }
        if let Some(ref title) = patch.title {
            fields.push(("title", title.as_str().into()));
        }
        if let Some(ref body) = patch.body {
            fields.push(("body", body.as_str().into()));
        }
        if let Some(published) = patch.published {
            fields.push(("published", published.into()));
        }
        fields.push(("updated_at", now_timestamp().into()));

        let affected = self
            .guard
            .update(tenant, Table::Articles, fields, "id = ?", vec![id.into()])
            .await
            .map_err(|e| map_unique_violation(e, "Slug already exists for this site"))?;
        if affected == 0 {
            return Err(DomainError::TenantMismatch(
                DomainError::not_found_message("article", id),
            ));
        }

        self.policy.apply(
            tenant,
            EntityKind::Article,
            Mutation::Update,
            Some(id),
            Some(&current.slug),
        )?;
        if let Some(ref new_slug) = patch.slug {
            if *new_slug != current.slug {
                self.cache
                    .delete(&key::entity_by_natural_key(EntityKind::Article, tenant, new_slug));
            }
        }

        self.fetch_by_id(ctx, id).await?.ok_or_else(|| {
            DomainError::Storage("Failed to fetch updated article".to_string())
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, ctx: &TenantContext, id: &str) -> Result<(), DomainError> {
        let tenant = ctx.tenant_id();

        let current = self.fetch_by_id(ctx, id).await?.ok_or_else(|| {
            DomainError::TenantMismatch(DomainError::not_found_message("article", id))
        })?;

        let affected = self
            .guard
            .delete(tenant, Table::Articles, "id = ?", vec![id.into()])
            .await?;
        if affected == 0 {
            return Err(DomainError::TenantMismatch(
                DomainError::not_found_message("article", id),
            ));
        }

        self.policy.apply(
            tenant,
            EntityKind::Article,
            Mutation::Delete,
            Some(id),
            Some(&current.slug),
        )?;
        Ok(())
    }
}
