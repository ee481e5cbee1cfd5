use async_trait::async_trait;
use pressbase_application::ports::PageRepository;
use pressbase_domain::config::CacheConfig;
use pressbase_domain::{DomainError, NewPage, Page, PageUpdate, TenantContext};
use std::sync::Arc;
use tracing::instrument;

use crate::cache::invalidation::{InvalidationPolicy, Mutation};
use crate::cache::{key, CacheStore, EntityKind};
use crate::guard::{SelectQuery, SqlValue, Table, TenantGuard};

use super::{map_unique_violation, new_entity_id, now_timestamp};

const COLUMNS: &str = "id, site_id, slug, title, body, position, created_at, updated_at";

type PageRow = (String, String, String, String, String, i64, String, String);

pub struct SqlitePageRepository {
    guard: Arc<TenantGuard>,
    cache: Arc<CacheStore>,
    policy: InvalidationPolicy,
    config: CacheConfig,
}

impl SqlitePageRepository {
    pub fn new(guard: Arc<TenantGuard>, cache: Arc<CacheStore>, config: CacheConfig) -> Self {
        let policy = InvalidationPolicy::new(Arc::clone(&cache));
        Self {
            guard,
            cache,
            policy,
            config,
        }
    }

    fn row_to_page(row: PageRow) -> Page {
        let (id, site_id, slug, title, body, position, created_at, updated_at) = row;
        Page {
            id,
            site_id,
            slug,
            title,
            body,
            position,
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        }
    }

    async fn fetch_by_id(
        &self,
        ctx: &TenantContext,
        id: &str,
    ) -> Result<Option<Page>, DomainError> {
        let query =
            SelectQuery::from_table(Table::Pages, COLUMNS).filter("id = ?", vec![id.into()]);
        let row: Option<PageRow> = self.guard.select_one(ctx.tenant_id(), query).await?;
        Ok(row.map(Self::row_to_page))
    }
}

#[async_trait]
impl PageRepository for SqlitePageRepository {
    #[instrument(skip(self, page))]
    async fn create(&self, ctx: &TenantContext, page: NewPage) -> Result<Page, DomainError> {
        let tenant = ctx.tenant_id();
        let id = new_entity_id();
        let now = now_timestamp();

        self.guard
            .insert(
                tenant,
                Table::Pages,
                vec![
                    ("id", id.as_str().into()),
                    ("slug", page.slug.as_str().into()),
                    ("title", page.title.as_str().into()),
                    ("body", page.body.as_str().into()),
                    ("position", page.position.into()),
                    ("created_at", now.as_str().into()),
                    ("updated_at", now.as_str().into()),
                ],
            )
            .await
            .map_err(|e| {
                map_unique_violation(
                    e,
                    &format!("Slug '{}' already exists for this site", page.slug),
                )
            })?;

        self.policy.apply(
            tenant,
            EntityKind::Page,
            Mutation::Create,
            Some(&id),
            Some(&page.slug),
        )?;

        Ok(Page {
            id,
            site_id: tenant.as_str().to_string(),
            slug: page.slug,
            title: page.title,
            body: page.body,
            position: page.position,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        })
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, ctx: &TenantContext, id: &str) -> Result<Option<Page>, DomainError> {
        let cache_key = key::entity_by_id(EntityKind::Page, ctx.tenant_id(), id);
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
    ) -> Result<Option<Page>, DomainError> {
        let tenant = ctx.tenant_id();
        let cache_key = key::entity_by_natural_key(EntityKind::Page, tenant, slug);
        self.cache
            .get_or_load(&cache_key, self.config.entity_ttl(), || async {
                let query = SelectQuery::from_table(Table::Pages, COLUMNS)
                    .filter("slug = ?", vec![slug.into()]);
                let row: Option<PageRow> = self.guard.select_one(tenant, query).await?;
                Ok(row.map(Self::row_to_page))
            })
            .await
    }

    #[instrument(skip(self))]
    async fn list(&self, ctx: &TenantContext) -> Result<Vec<Page>, DomainError> {
        let tenant = ctx.tenant_id();
        let cache_key = key::entity_list(EntityKind::Page, tenant, &[]);

        self.cache
            .get_or_load(&cache_key, self.config.list_ttl(), || async {
                let query = SelectQuery::from_table(Table::Pages, COLUMNS)
                    .order_by("position ASC, created_at ASC");
                let rows: Vec<PageRow> = self.guard.select(tenant, query).await?;
                Ok(rows.into_iter().map(Self::row_to_page).collect())
            })
            .await
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        ctx: &TenantContext,
        id: &str,
        patch: PageUpdate,
    ) -> Result<Page, DomainError> {
        let tenant = ctx.tenant_id();

        let current = self.fetch_by_id(ctx, id).await?.ok_or_else(|| {
            DomainError::TenantMismatch(DomainError::not_found_message("page", id))
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
        if let Some(position) = patch.position {
            fields.push(("position", position.into()));
        }
        fields.push(("updated_at", now_timestamp().into()));

        let affected = self
            .guard
            .update(tenant, Table::Pages, fields, "id = ?", vec![id.into()])
            .await
            .map_err(|e| map_unique_violation(e, "Slug already exists for this site"))?;
        if affected == 0 {
            return Err(DomainError::TenantMismatch(
                DomainError::not_found_message("page", id),
            ));
        }

        self.policy.apply(
            tenant,
            EntityKind::Page,
            Mutation::Update,
            Some(id),
            Some(&current.slug),
        )?;
        if let Some(ref new_slug) = patch.slug {
            if *new_slug != current.slug {
                self.cache
                    .delete(&key::entity_by_natural_key(EntityKind::Page, tenant, new_slug));
            }
        }

        self.fetch_by_id(ctx, id)
            .await?
            .ok_or_else(|| DomainError::Storage("Failed to fetch updated page".to_string()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, ctx: &TenantContext, id: &str) -> Result<(), DomainError> {
        let tenant = ctx.tenant_id();

        let current = self.fetch_by_id(ctx, id).await?.ok_or_else(|| {
            DomainError::TenantMismatch(DomainError::not_found_message("page", id))
        })?;

        let affected = self
            .guard
            .delete(tenant, Table::Pages, "id = ?", vec![id.into()])
            .await?;
        if affected == 0 {
            return Err(DomainError::TenantMismatch(
                DomainError::not_found_message("page", id),
            ));
        }

        self.policy.apply(
            tenant,
            EntityKind::Page,
            Mutation::Delete,
            Some(id),
            Some(&current.slug),
        )?;
        Ok(())
    }
}
