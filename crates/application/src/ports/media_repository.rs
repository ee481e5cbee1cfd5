use async_trait::async_trait;
use pressbase_domain::{DomainError, MediaAsset, MediaAssetUpdate, NewMediaAsset, TenantContext};

/// Repository interface for media asset metadata. The stored bytes live in
/// an external storage collaborator; this layer only tracks the rows.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn create(
        &self,
        ctx: &TenantContext,
        asset: NewMediaAsset,
    ) -> Result<MediaAsset, DomainError>;

    async fn get_by_id(
        &self,
        ctx: &TenantContext,
        id: &str,
    ) -> Result<Option<MediaAsset>, DomainError>;

    /// Lists the tenant's assets, newest first.
    async fn list(&self, ctx: &TenantContext) -> Result<Vec<MediaAsset>, DomainError>;

    async fn update(
        &self,
        ctx: &TenantContext,
        id: &str,
        patch: MediaAssetUpdate,
    ) -> Result<MediaAsset, DomainError>;

    async fn delete(&self, ctx: &TenantContext, id: &str) -> Result<(), DomainError>;
}
