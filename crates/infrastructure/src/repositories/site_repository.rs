use async_trait::async_trait;
use pressbase_application::ports::SiteRepository;
use pressbase_domain::config::CacheConfig;
use pressbase_domain::{
    DomainError, NewSite, Site, SiteSettingsUpdate, TenantContext, TenantId,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::cache::invalidation::{InvalidationPolicy, Mutation};
use crate::cache::{key, CacheStore, EntityKind};
use crate::guard::{SelectQuery, SqlValue, Table, TenantGuard};

use super::{map_unique_violation, new_entity_id, now_timestamp};

const COLUMNS: &str = "id, name, host, description, theme, created_at, updated_at";

type SiteRow = (
    String,
    String,
    String,
    Option<String>,
    String,
    String,
    String,
);

pub struct SqliteSiteRepository {
    guard: Arc<TenantGuard>,
    cache: Arc<CacheStore>,
    policy: InvalidationPolicy,
    config: CacheConfig,
}

impl SqliteSiteRepository {
    pub fn new(guard: Arc<TenantGuard>, cache: Arc<CacheStore>, config: CacheConfig) -> Self {
        let policy = InvalidationPolicy::new(Arc::clone(&cache));
        Self {
            guard,
            cache,
            policy,
            config,
        }
    }

    fn row_to_site(row: SiteRow) -> Site {
        let (id, name, host, description, theme, created_at, updated_at) = row;
        Site {
            id,
            name,
            host,
            description,
            theme,
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        }
    }

    async fn fetch_own(&self, tenant: &TenantId) -> Result<Option<Site>, DomainError> {
        let query = SelectQuery::from_table(Table::Sites, COLUMNS);
        let row: Option<SiteRow> = self.guard.select_one(tenant, query).await?;
        Ok(row.map(Self::row_to_site))
    }
}

#[async_trait]
impl SiteRepository for SqliteSiteRepository {
    #[instrument(skip(self, site))]
    async fn create_site(&self, site: NewSite) -> Result<Site, DomainError> {
        // The generated site id becomes the tenant id; the insert is scoped
        // to it so the scope column always equals the active tenant.
        let id = new_entity_id();
        let tenant = TenantId::new(&id)?;
        let now = now_timestamp();

        self.guard
            .insert(
                &tenant,
                Table::Sites,
                vec![
                    ("name", site.name.as_str().into()),
                    ("host", site.host.as_str().into()),
                    ("description", site.description.clone().into()),
                    ("theme", site.theme.as_str().into()),
                    ("created_at", now.as_str().into()),
                    ("updated_at", now.as_str().into()),
                ],
            )
            .await
            .map_err(|e| {
                map_unique_violation(
                    e,
                    &format!("Host '{}' is already taken by another site", site.host),
                )
            })?;

        self.policy.apply(
            &tenant,
            EntityKind::Site,
            Mutation::Create,
            Some(&id),
            Some(&site.host),
        )?;

        info!(site_id = %id, host = %site.host, "Site provisioned");

        Ok(Site {
            id,
            name: site.name,
            host: site.host,
            description: site.description,
            theme: site.theme,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        })
    }

    #[instrument(skip(self))]
    async fn get(&self, ctx: &TenantContext) -> Result<Option<Site>, DomainError> {
        let tenant = ctx.tenant_id();
        let cache_key = key::entity_by_id(EntityKind::Site, tenant, tenant.as_str());
        self.cache
            .get_or_load(&cache_key, self.config.entity_ttl(), || {
                self.fetch_own(tenant)
            })
            .await
    }

    #[instrument(skip(self, patch))]
    async fn update_settings(
        &self,
        ctx: &TenantContext,
        patch: SiteSettingsUpdate,
    ) -> Result<Site, DomainError> {
        let tenant = ctx.tenant_id();

        let current = self.fetch_own(tenant).await?.ok_or_else(|| {
            DomainError::TenantMismatch(DomainError::not_found_message("site", tenant.as_str()))
        })?;

        let mut fields: Vec<(&'static str, SqlValue)> = Vec::new();
        if let Some(ref name) = patch.name {
            fields.push(("name", name.as_str().into()));
        }
        if let Some(ref host) = patch.host {
            fields.push(("host", host.as_str().into()));
        }
        if let Some(ref description) = patch.description {
            fields.push(("description", description.as_str().into()));
        }
        if let Some(ref theme) = patch.theme {
            fields.push(("theme", theme.as_str().into()));
        }
        fields.push(("updated_at", now_timestamp().into()));

        // The scope condition alone targets the row; sites are keyed by
        // tenant id.
        let affected = self
            .guard
            .update(tenant, Table::Sites, fields, "1 = 1", Vec::new())
            .await
            .map_err(|e| map_unique_violation(e, "Host is already taken by another site"))?;
        if affected == 0 {
            return Err(DomainError::TenantMismatch(
                DomainError::not_found_message("site", tenant.as_str()),
            ));
        }

        // Settings changes fan out into arbitrarily many cached shapes:
        // this is the full-wipe tier, plus the old host's global key.
        self.policy.apply(
            tenant,
            EntityKind::Site,
            Mutation::Update,
            Some(tenant.as_str()),
            Some(&current.host),
        )?;
        if let Some(ref new_host) = patch.host {
            if *new_host != current.host {
                self.cache
                    .delete(&key::global_lookup(EntityKind::Site, "host", new_host));
            }
        }

        self.fetch_own(tenant)
            .await?
            .ok_or_else(|| DomainError::Storage("Failed to fetch updated site".to_string()))
    }

    #[instrument(skip(self))]
    async fn delete_site(&self, ctx: &TenantContext) -> Result<(), DomainError> {
        let tenant = ctx.tenant_id();

        let current = self.fetch_own(tenant).await?.ok_or_else(|| {
            DomainError::TenantMismatch(DomainError::not_found_message("site", tenant.as_str()))
        })?;

        // Children first so the site row never dangles references, then the
        // site row itself.
        for table in [
            Table::Articles,
            Table::Pages,
            Table::MediaAssets,
            Table::Subscribers,
        ] {
            self.guard.delete_all(tenant, table).await?;
        }
        let affected = self.guard.delete_all(tenant, Table::Sites).await?;
        if affected == 0 {
            return Err(DomainError::TenantMismatch(
                DomainError::not_found_message("site", tenant.as_str()),
            ));
        }

        self.policy.apply(
            tenant,
            EntityKind::Site,
            Mutation::Delete,
            Some(tenant.as_str()),
            Some(&current.host),
        )?;

        info!(site_id = %tenant, "Site deleted with all scoped content");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_host(&self, host: &str) -> Result<Option<Site>, DomainError> {
        let cache_key = key::global_lookup(EntityKind::Site, "host", host);
        self.cache
            .get_or_load(&cache_key, self.config.entity_ttl(), || async {
                let rows: Vec<SiteRow> = self
                    .guard
                    .raw_fetch(
                        "site_repository::find_by_host",
                        "SELECT id, name, host, description, theme, created_at, updated_at \
                         FROM sites WHERE host = ?",
                        vec![host.into()],
                    )
                    .await?;
                Ok(rows.into_iter().next().map(Self::row_to_site))
            })
            .await
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Site>, DomainError> {
        let rows: Vec<SiteRow> = self
            .guard
            .raw_fetch(
                "site_repository::list_all",
                "SELECT id, name, host, description, theme, created_at, updated_at \
                 FROM sites ORDER BY created_at DESC",
                Vec::new(),
            )
            .await?;
        Ok(rows.into_iter().map(Self::row_to_site).collect())
    }
}
