use async_trait::async_trait;
use pressbase_application::ports::SubscriberRepository;
use pressbase_domain::config::CacheConfig;
use pressbase_domain::{
    DomainError, NewSubscriber, Subscriber, SubscriberStats, TenantContext,
};
use std::sync::Arc;
use tracing::instrument;

use crate::cache::invalidation::{InvalidationPolicy, Mutation};
use crate::cache::{key, CacheStore, EntityKind};
use crate::guard::{SelectQuery, Table, TenantGuard};

use super::{map_unique_violation, new_entity_id, now_timestamp};

const COLUMNS: &str = "id, site_id, email, confirmed, created_at, updated_at";

type SubscriberRow = (String, String, String, bool, String, String);

pub struct SqliteSubscriberRepository {
    guard: Arc<TenantGuard>,
    cache: Arc<CacheStore>,
    policy: InvalidationPolicy,
    config: CacheConfig,
}

impl SqliteSubscriberRepository {
    pub fn new(guard: Arc<TenantGuard>, cache: Arc<CacheStore>, config: CacheConfig) -> Self {
        let policy = InvalidationPolicy::new(Arc::clone(&cache));
        Self {
            guard,
            cache,
            policy,
            config,
        }
    }

    fn row_to_subscriber(row: SubscriberRow) -> Subscriber {
        let (id, site_id, email, confirmed, created_at, updated_at) = row;
        Subscriber {
            id,
            site_id,
            email,
            confirmed,
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        }
    }

    async fn fetch_by_id(
        &self,
        ctx: &TenantContext,
        id: &str,
    ) -> Result<Option<Subscriber>, DomainError> {
        let query = SelectQuery::from_table(Table::Subscribers, COLUMNS)
            .filter("id = ?", vec![id.into()]);
        let row: Option<SubscriberRow> = self.guard.select_one(ctx.tenant_id(), query).await?;
        Ok(row.map(Self::row_to_subscriber))
    }
}

#[async_trait]
impl SubscriberRepository for SqliteSubscriberRepository {
    #[instrument(skip(self, subscriber))]
    async fn subscribe(
        &self,
        ctx: &TenantContext,
        subscriber: NewSubscriber,
    ) -> Result<Subscriber, DomainError> {
        let tenant = ctx.tenant_id();
        let id = new_entity_id();
        let now = now_timestamp();

        self.guard
            .insert(
                tenant,
                Table::Subscribers,
                vec![
                    ("id", id.as_str().into()),
                    ("email", subscriber.email.as_str().into()),
                    ("confirmed", false.into()),
                    ("created_at", now.as_str().into()),
                    ("updated_at", now.as_str().into()),
                ],
            )
            .await
            .map_err(|e| {
                map_unique_violation(e, "Address is already subscribed to this site")
            })?;

        self.policy.apply(
            tenant,
            EntityKind::Subscriber,
            Mutation::Create,
            Some(&id),
            Some(&subscriber.email),
        )?;

        Ok(Subscriber {
            id,
            site_id: tenant.as_str().to_string(),
            email: subscriber.email,
            confirmed: false,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        })
    }

    #[instrument(skip(self))]
    async fn get_by_email(
        &self,
        ctx: &TenantContext,
        email: &str,
    ) -> Result<Option<Subscriber>, DomainError> {
        let tenant = ctx.tenant_id();
        let cache_key = key::entity_by_natural_key(EntityKind::Subscriber, tenant, email);
        self.cache
            .get_or_load(&cache_key, self.config.entity_ttl(), || async {
                let query = SelectQuery::from_table(Table::Subscribers, COLUMNS)
                    .filter("email = ?", vec![email.into()]);
                let row: Option<SubscriberRow> = self.guard.select_one(tenant, query).await?;
                Ok(row.map(Self::row_to_subscriber))
            })
            .await
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        ctx: &TenantContext,
        confirmed_only: bool,
    ) -> Result<Vec<Subscriber>, DomainError> {
        let tenant = ctx.tenant_id();
        let qualifier = if confirmed_only { "confirmed" } else { "all" };
        let cache_key = key::entity_list(EntityKind::Subscriber, tenant, &[qualifier]);

        self.cache
            .get_or_load(&cache_key, self.config.list_ttl(), || async {
                let mut query = SelectQuery::from_table(Table::Subscribers, COLUMNS)
                    .order_by("created_at DESC, id DESC");
                if confirmed_only {
                    query = query.filter("confirmed = ?", vec![true.into()]);
                }
                let rows: Vec<SubscriberRow> = self.guard.select(tenant, query).await?;
                Ok(rows.into_iter().map(Self::row_to_subscriber).collect())
            })
            .await
    }

    #[instrument(skip(self))]
    async fn stats(&self, ctx: &TenantContext) -> Result<SubscriberStats, DomainError> {
        let tenant = ctx.tenant_id();
        let cache_key = key::tenant_stats(EntityKind::Subscriber, tenant, "all");

        self.cache
            .get_or_load(&cache_key, self.config.stats_ttl(), || async {
                let query = SelectQuery::from_table(
                    Table::Subscribers,
                    "COUNT(*), COALESCE(SUM(confirmed), 0)",
                );
                let row: Option<(i64, i64)> = self.guard.select_one(tenant, query).await?;
                let (total, confirmed) = row.unwrap_or((0, 0));
                Ok(SubscriberStats {
                    total: total as u64,
                    confirmed: confirmed as u64,
                })
            })
            .await
    }

    #[instrument(skip(self))]
    async fn confirm(&self, ctx: &TenantContext, id: &str) -> Result<Subscriber, DomainError> {
        let tenant = ctx.tenant_id();

        let current = self.fetch_by_id(ctx, id).await?.ok_or_else(|| {
            DomainError::TenantMismatch(DomainError::not_found_message("subscriber", id))
        })?;

        let affected = self
            .guard
            .update(
                tenant,
                Table::Subscribers,
                vec![
                    ("confirmed", true.into()),
                    ("updated_at", now_timestamp().into()),
                ],
                "id = ?",
                vec![id.into()],
            )
            .await?;
        if affected == 0 {
            return Err(DomainError::TenantMismatch(
                DomainError::not_found_message("subscriber", id),
            ));
        }

        self.policy.apply(
            tenant,
            EntityKind::Subscriber,
            Mutation::Update,
            Some(id),
            Some(&current.email),
        )?;

        self.fetch_by_id(ctx, id)
            .await?
            .ok_or_else(|| DomainError::Storage("Failed to fetch updated subscriber".to_string()))
    }

    #[instrument(skip(self))]
    async fn unsubscribe(&self, ctx: &TenantContext, id: &str) -> Result<(), DomainError> {
        let tenant = ctx.tenant_id();

        let current = self.fetch_by_id(ctx, id).await?.ok_or_else(|| {
            DomainError::TenantMismatch(DomainError::not_found_message("subscriber", id))
        })?;

        let affected = self
            .guard
            .delete(tenant, Table::Subscribers, "id = ?", vec![id.into()])
            .await?;
        if affected == 0 {
            return Err(DomainError::TenantMismatch(
                DomainError::not_found_message("subscriber", id),
            ));
        }

        self.policy.apply(
            tenant,
            EntityKind::Subscriber,
            Mutation::Delete,
            Some(id),
            Some(&current.email),
        )?;
        Ok(())
    }
}
