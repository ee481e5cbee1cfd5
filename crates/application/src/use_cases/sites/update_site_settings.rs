use pressbase_domain::{DomainError, Site, SiteSettingsUpdate, TenantContext};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::SiteRepository;

/// Use case for changing tenant-level settings.
pub struct UpdateSiteSettingsUseCase {
    sites: Arc<dyn SiteRepository>,
}

impl UpdateSiteSettingsUseCase {
    pub fn new(sites: Arc<dyn SiteRepository>) -> Self {
        Self { sites }
    }

    #[instrument(skip(self, patch))]
    pub async fn execute(
        &self,
        ctx: &TenantContext,
        patch: SiteSettingsUpdate,
    ) -> Result<Site, DomainError> {
        if patch.is_empty() {
            return Err(DomainError::Validation(
                "Settings patch contains no fields".to_string(),
            ));
        }
        patch.validate()?;

        let updated = self.sites.update_settings(ctx, patch).await?;

        info!(
            tenant_id = %ctx.tenant_id(),
            host = %updated.host,
            "Site settings updated"
        );

        Ok(updated)
    }
}
