use async_trait::async_trait;
use pressbase_application::ports::MediaRepository;
use pressbase_domain::config::CacheConfig;
use pressbase_domain::{DomainError, MediaAsset, MediaAssetUpdate, NewMediaAsset, TenantContext};
use std::sync::Arc;
use tracing::instrument;

use crate::cache::invalidation::{InvalidationPolicy, Mutation};
use crate::cache::{key, CacheStore, EntityKind};
use crate::guard::{SelectQuery, SqlValue, Table, TenantGuard};

use super::{new_entity_id, now_timestamp};

const COLUMNS: &str =
    "id, site_id, file_name, content_type, byte_size, alt_text, created_at, updated_at";

type MediaRow = (
    String,
    String,
    String,
    String,
    i64,
    Option<String>,
    String,
    String,
);

pub struct SqliteMediaRepository {
    guard: Arc<TenantGuard>,
    cache: Arc<CacheStore>,
    policy: InvalidationPolicy,
    config: CacheConfig,
}

impl SqliteMediaRepository {
    pub fn new(guard: Arc<TenantGuard>, cache: Arc<CacheStore>, config: CacheConfig) -> Self {
        let policy = InvalidationPolicy::new(Arc::clone(&cache));
        Self {
            guard,
            cache,
            policy,
            config,
        }
    }

    fn row_to_asset(row: MediaRow) -> MediaAsset {
        let (id, site_id, file_name, content_type, byte_size, alt_text, created_at, updated_at) =
            row;
        MediaAsset {
            id,
            site_id,
            file_name,
            content_type,
            byte_size,
            alt_text,
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        }
    }

    async fn fetch_by_id(
        &self,
        ctx: &TenantContext,
        id: &str,
    ) -> Result<Option<MediaAsset>, DomainError> {
        let query = SelectQuery::from_table(Table::MediaAssets, COLUMNS)
            .filter("id = ?", vec![id.into()]);
        let row: Option<MediaRow> = self.guard.select_one(ctx.tenant_id(), query).await?;
        Ok(row.map(Self::row_to_asset))
    }
}

#[async_trait]
impl MediaRepository for SqliteMediaRepository {
    #[instrument(skip(self, asset))]
    async fn create(
        &self,
        ctx: &TenantContext,
        asset: NewMediaAsset,
    ) -> Result<MediaAsset, DomainError> {
        let tenant = ctx.tenant_id();
        let id = new_entity_id();
        let now = now_timestamp();

        self.guard
            .insert(
                tenant,
                Table::MediaAssets,
                vec![
                    ("id", id.as_str().into()),
                    ("file_name", asset.file_name.as_str().into()),
                    ("content_type", asset.content_type.as_str().into()),
                    ("byte_size", asset.byte_size.into()),
                    ("alt_text", asset.alt_text.clone().into()),
                    ("created_at", now.as_str().into()),
                    ("updated_at", now.as_str().into()),
                ],
            )
            .await?;

        self.policy
            .apply(tenant, EntityKind::Media, Mutation::Create, Some(&id), None)?;

        Ok(MediaAsset {
            id,
            site_id: tenant.as_str().to_string(),
            file_name: asset.file_name,
            content_type: asset.content_type,
            byte_size: asset.byte_size,
            alt_text: asset.alt_text,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        })
    }

    #[instrument(skip(self))]
    async fn get_by_id(
        &self,
        ctx: &TenantContext,
        id: &str,
    ) -> Result<Option<MediaAsset>, DomainError> {
        let cache_key = key::entity_by_id(EntityKind::Media, ctx.tenant_id(), id);
        self.cache
            .get_or_load(&cache_key, self.config.entity_ttl(), || {
                self.fetch_by_id(ctx, id)
            })
            .await
    }

    #[instrument(skip(self))]
    async fn list(&self, ctx: &TenantContext) -> Result<Vec<MediaAsset>, DomainError> {
        let tenant = ctx.tenant_id();
        let cache_key = key::entity_list(EntityKind::Media, tenant, &[]);

        self.cache
            .get_or_load(&cache_key, self.config.list_ttl(), || async {
                let query = SelectQuery::from_table(Table::MediaAssets, COLUMNS)
                    .order_by("created_at DESC, id DESC");
                let rows: Vec<MediaRow> = self.guard.select(tenant, query).await?;
                Ok(rows.into_iter().map(Self::row_to_asset).collect())
            })
            .await
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        ctx: &TenantContext,
        id: &str,
        patch: MediaAssetUpdate,
    ) -> Result<MediaAsset, DomainError> {
        let tenant = ctx.tenant_id();

        let mut fields: Vec<(&'static str, SqlValue)> = Vec::new();
        if let Some(ref file_name) = patch.file_name {
            fields.push(("file_name", file_name.as_str().into()));
        }
        if let Some(ref alt_text) = patch.alt_text {
            fields.push(("alt_text", alt_text.as_str().into()));
        }
        fields.push(("updated_at", now_timestamp().into()));

        let affected = self
            .guard
            .update(tenant, Table::MediaAssets, fields, "id = ?", vec![id.into()])
            .await?;
        if affected == 0 {
            return Err(DomainError::TenantMismatch(
                DomainError::not_found_message("media asset", id),
            ));
        }

        self.policy
            .apply(tenant, EntityKind::Media, Mutation::Update, Some(id), None)?;

        self.fetch_by_id(ctx, id)
            .await?
            .ok_or_else(|| DomainError::Storage("Failed to fetch updated media asset".to_string()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, ctx: &TenantContext, id: &str) -> Result<(), DomainError> {
        let tenant = ctx.tenant_id();

        let affected = self
            .guard
            .delete(tenant, Table::MediaAssets, "id = ?", vec![id.into()])
            .await?;
        if affected == 0 {
            return Err(DomainError::TenantMismatch(
                DomainError::not_found_message("media asset", id),
            ));
        }

        self.policy
            .apply(tenant, EntityKind::Media, Mutation::Delete, Some(id), None)?;
        Ok(())
    }
}
