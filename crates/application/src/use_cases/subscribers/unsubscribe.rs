use pressbase_domain::{DomainError, TenantContext};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::SubscriberRepository;

/// Use case for removing a subscriber by address.
///
/// Unsubscribing an address that is not on the list succeeds silently;
/// unsubscribe links must stay idempotent.
pub struct UnsubscribeUseCase {
    subscribers: Arc<dyn SubscriberRepository>,
}

impl UnsubscribeUseCase {
    pub fn new(subscribers: Arc<dyn SubscriberRepository>) -> Self {
        Self { subscribers }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, ctx: &TenantContext, email: &str) -> Result<(), DomainError> {
        let Some(subscriber) = self.subscribers.get_by_email(ctx, email).await? else {
            return Ok(());
        };

        self.subscribers.unsubscribe(ctx, &subscriber.id).await?;

        info!(
            tenant_id = %ctx.tenant_id(),
            subscriber_id = %subscriber.id,
            "Subscriber removed"
        );

        Ok(())
    }
}
