use async_trait::async_trait;
use pressbase_domain::{DomainError, NewSubscriber, Subscriber, SubscriberStats, TenantContext};

/// Repository interface for email subscribers.
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// Adds a subscriber (unconfirmed) under the calling tenant.
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - If the address is already subscribed to this tenant
    /// * `DomainError::Storage` - If a database error occurs
    async fn subscribe(
        &self,
        ctx: &TenantContext,
        subscriber: NewSubscriber,
    ) -> Result<Subscriber, DomainError>;

    /// Looks up a subscriber by address. The same address may be subscribed
    /// to any number of other tenants; those rows are never visible here.
    async fn get_by_email(
        &self,
        ctx: &TenantContext,
        email: &str,
    ) -> Result<Option<Subscriber>, DomainError>;

    async fn list(
        &self,
        ctx: &TenantContext,
        confirmed_only: bool,
    ) -> Result<Vec<Subscriber>, DomainError>;

    /// Aggregate subscriber counts for the tenant.
    async fn stats(&self, ctx: &TenantContext) -> Result<SubscriberStats, DomainError>;

    /// Marks a subscriber as confirmed (double opt-in).
    ///
    /// # Errors
    ///
    /// * `DomainError::TenantMismatch` - If the subscriber does not exist for this tenant
    async fn confirm(&self, ctx: &TenantContext, id: &str) -> Result<Subscriber, DomainError>;

    /// Removes a subscriber.
    ///
    /// # Errors
    ///
    /// * `DomainError::TenantMismatch` - If the subscriber does not exist for this tenant
    async fn unsubscribe(&self, ctx: &TenantContext, id: &str) -> Result<(), DomainError>;
}
