use async_trait::async_trait;
use pressbase_domain::{DomainError, NewPage, Page, PageUpdate, TenantContext};

/// Repository interface for static pages. Same tenant-scoping contract as
/// [`ArticleRepository`](crate::ports::ArticleRepository).
#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn create(&self, ctx: &TenantContext, page: NewPage) -> Result<Page, DomainError>;

    async fn get_by_id(&self, ctx: &TenantContext, id: &str) -> Result<Option<Page>, DomainError>;

    async fn get_by_slug(
        &self,
        ctx: &TenantContext,
        slug: &str,
    ) -> Result<Option<Page>, DomainError>;

    /// Lists the tenant's pages in navigation order.
    async fn list(&self, ctx: &TenantContext) -> Result<Vec<Page>, DomainError>;

    async fn update(
        &self,
        ctx: &TenantContext,
        id: &str,
        patch: PageUpdate,
    ) -> Result<Page, DomainError>;

    async fn delete(&self, ctx: &TenantContext, id: &str) -> Result<(), DomainError>;
}
