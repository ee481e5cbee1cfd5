use async_trait::async_trait;
use pressbase_domain::{DomainError, NewSite, Site, SiteSettingsUpdate, TenantContext};

/// Repository interface for sites (tenants themselves).
///
/// Most operations act on the calling tenant's own row. `find_by_host` and
/// `list_all` are the two sanctioned cross-tenant reads: hostname routing
/// happens before authentication, and `list_all` exists for operator
/// tooling. Implementations route both through their logged escape hatch.
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Provisions a new site. The generated site id becomes the tenant id
    /// for every subsequent operation.
    async fn create_site(&self, site: NewSite) -> Result<Site, DomainError>;

    /// The calling tenant's own site row.
    async fn get(&self, ctx: &TenantContext) -> Result<Option<Site>, DomainError>;

    /// Applies a tenant-level settings patch.
    ///
    /// Settings feed into many unrelated cached shapes (rendering, feeds,
    /// routing), so implementations follow this with a full-tenant cache
    /// wipe rather than a targeted purge.
    async fn update_settings(
        &self,
        ctx: &TenantContext,
        patch: SiteSettingsUpdate,
    ) -> Result<Site, DomainError>;

    /// Deletes the site and every row scoped to it.
    async fn delete_site(&self, ctx: &TenantContext) -> Result<(), DomainError>;

    /// Resolves a hostname to its site, for request routing before any
    /// tenant context exists.
    async fn find_by_host(&self, host: &str) -> Result<Option<Site>, DomainError>;

    /// All sites on the platform. Administrative use only.
    async fn list_all(&self) -> Result<Vec<Site>, DomainError>;
}
