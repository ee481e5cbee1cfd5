use async_trait::async_trait;
use pressbase_domain::{Article, ArticleStats, ArticleUpdate, DomainError, NewArticle, TenantContext};

/// Repository interface for articles.
///
/// Every operation is scoped to the tenant in `ctx`; implementations must
/// make it impossible for one tenant to read or mutate another tenant's
/// rows, and are expected to serve reads through a bounded-staleness cache.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Creates a new article under the calling tenant.
    ///
    /// The article id is generated by the repository, never supplied by the
    /// caller.
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - If the slug is already taken within the tenant
    /// * `DomainError::Storage` - If a database error occurs
    async fn create(&self, ctx: &TenantContext, article: NewArticle)
        -> Result<Article, DomainError>;

    /// Retrieves an article by generated id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Article))` - If the article exists under this tenant
    /// * `Ok(None)` - If no such article exists for this tenant
    async fn get_by_id(
        &self,
        ctx: &TenantContext,
        id: &str,
    ) -> Result<Option<Article>, DomainError>;

    /// Retrieves an article by its natural key (slug), unique per tenant.
    async fn get_by_slug(
        &self,
        ctx: &TenantContext,
        slug: &str,
    ) -> Result<Option<Article>, DomainError>;

    /// Lists the tenant's articles, newest first.
    ///
    /// With `published_only`, drafts are excluded.
    async fn list(
        &self,
        ctx: &TenantContext,
        published_only: bool,
    ) -> Result<Vec<Article>, DomainError>;

    /// Aggregate article counts for the tenant.
    async fn stats(&self, ctx: &TenantContext) -> Result<ArticleStats, DomainError>;

    /// Applies a partial update to one article.
    ///
    /// # Errors
    ///
    /// * `DomainError::TenantMismatch` - If the article does not exist for this
    ///   tenant (including when it exists for a different one)
    /// * `DomainError::Storage` - If a database error occurs
    async fn update(
        &self,
        ctx: &TenantContext,
        id: &str,
        patch: ArticleUpdate,
    ) -> Result<Article, DomainError>;

    /// Deletes one article.
    ///
    /// # Errors
    ///
    /// * `DomainError::TenantMismatch` - If the article does not exist for this tenant
    async fn delete(&self, ctx: &TenantContext, id: &str) -> Result<(), DomainError>;
}
