use pressbase_domain::{DomainError, TenantId};
use std::sync::Arc;
use tracing::{debug, warn};

use super::key::{self, EntityKind};
use super::store::CacheStore;

/// Mutation types the policy distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

/// Invalidation cost tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Purge only the keys this mutation could have changed.
    Targeted,
    /// Purge every key belonging to the tenant. Reserved for mutations
    /// whose blast radius is not precisely known.
    FullWipe,
}

/// Static rule table: which tier applies to a mutation of `kind`.
///
/// Tenant-level settings feed into arbitrarily many cached shapes, so site
/// updates and deletions wipe the whole tenant. Everything else gets a
/// targeted purge. Widening a targeted pattern is always safe; narrowing
/// one never is.
pub fn tier_for(kind: EntityKind, mutation: Mutation) -> Tier {
    match (kind, mutation) {
        (EntityKind::Site, Mutation::Update) | (EntityKind::Site, Mutation::Delete) => {
            Tier::FullWipe
        }
        _ => Tier::Targeted,
    }
}

/// Applies the invalidation rules after an acknowledged write.
pub struct InvalidationPolicy {
    cache: Arc<CacheStore>,
}

impl InvalidationPolicy {
    pub fn new(cache: Arc<CacheStore>) -> Self {
        Self { cache }
    }

    /// Purges the cache entries affected by one mutation. Must be called
    /// only after the store has acknowledged the write.
    ///
    /// `id` and `natural_key` widen the targeted purge to the entity's
    /// point-lookup keys; pass what the mutation knows. For sites the
    /// natural key is the hostname, whose lookup key lives in the `global`
    /// tenant slot and is purged in both tiers.
    pub fn apply(
        &self,
        tenant: &TenantId,
        kind: EntityKind,
        mutation: Mutation,
        id: Option<&str>,
        natural_key: Option<&str>,
    ) -> Result<(), DomainError> {
        match tier_for(kind, mutation) {
            Tier::Targeted => self.targeted(tenant, kind, id, natural_key)?,
            Tier::FullWipe => self.full_tenant_wipe(tenant)?,
        }

        if kind == EntityKind::Site {
            if let Some(host) = natural_key {
                self.cache
                    .delete(&key::global_lookup(EntityKind::Site, "host", host));
            }
        }

        Ok(())
    }

    fn targeted(
        &self,
        tenant: &TenantId,
        kind: EntityKind,
        id: Option<&str>,
        natural_key: Option<&str>,
    ) -> Result<(), DomainError> {
        if let Some(id) = id {
            self.cache.delete(&key::entity_by_id(kind, tenant, id));
        }
        if let Some(value) = natural_key {
            self.cache
                .delete(&key::entity_by_natural_key(kind, tenant, value));
        }

        let lists = self.cache.delete_pattern(&key::list_pattern(kind, tenant))?;
        let stats = self
            .cache
            .delete_pattern(&key::stats_pattern(kind, tenant))?;

        debug!(
            tenant_id = %tenant,
            kind = %kind,
            purged_lists = lists,
            purged_stats = stats,
            "Targeted cache invalidation"
        );
        Ok(())
    }

    /// Purges every key in the tenant's namespaces. Always logged.
    pub fn full_tenant_wipe(&self, tenant: &TenantId) -> Result<(), DomainError> {
        let mut purged = 0;
        for pattern in key::tenant_wipe_patterns(tenant) {
            purged += self.cache.delete_pattern(&pattern)?;
        }

        warn!(
            tenant_id = %tenant,
            purged,
            "Full-tenant cache wipe"
        );
        Ok(())
    }
}
