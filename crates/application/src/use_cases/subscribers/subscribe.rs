use pressbase_domain::{DomainError, NewSubscriber, Subscriber, TenantContext};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::SubscriberRepository;

/// Use case for adding a subscriber.
///
/// Subscribing an address that is already on the tenant's list returns the
/// existing row unchanged, so a double form submission is harmless.
pub struct SubscribeUseCase {
    subscribers: Arc<dyn SubscriberRepository>,
}

impl SubscribeUseCase {
    pub fn new(subscribers: Arc<dyn SubscriberRepository>) -> Self {
        Self { subscribers }
    }

    #[instrument(skip(self, subscriber))]
    pub async fn execute(
        &self,
        ctx: &TenantContext,
        subscriber: NewSubscriber,
    ) -> Result<Subscriber, DomainError> {
        subscriber.validate()?;

        if let Some(existing) = self
            .subscribers
            .get_by_email(ctx, &subscriber.email)
            .await?
        {
            return Ok(existing);
        }

        let created = self.subscribers.subscribe(ctx, subscriber).await?;

        info!(
            tenant_id = %ctx.tenant_id(),
            subscriber_id = %created.id,
            "Subscriber added"
        );

        Ok(created)
    }
}
