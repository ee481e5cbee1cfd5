use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of one tenant (a "site" on the platform).
///
/// Tenant ids are embedded verbatim as one colon-delimited segment of every
/// tenant-scoped cache key, so they must satisfy the key segment grammar
/// `[A-Za-z0-9_-]+`. Validating here means key construction can never
/// produce a malformed or ambiguous key later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(Arc<str>);

/// Reserved tenant slot for cache keys that hold cross-tenant data
/// (e.g. hostname -> site routing, resolved before authentication).
pub const GLOBAL_TENANT_SEGMENT: &str = "global";

impl TenantId {
    pub fn new(id: &str) -> Result<Self, DomainError> {
        if id.is_empty() {
            return Err(DomainError::Validation(
                "Tenant id cannot be empty".to_string(),
            ));
        }
        if id.len() > 64 {
            return Err(DomainError::Validation(
                "Tenant id cannot exceed 64 characters".to_string(),
            ));
        }
        let valid = id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DomainError::Validation(format!(
                "Tenant id '{}' contains characters outside [A-Za-z0-9_-]",
                id
            )));
        }
        if id == GLOBAL_TENANT_SEGMENT {
            return Err(DomainError::Validation(
                "Tenant id 'global' is reserved".to_string(),
            ));
        }
        Ok(Self(Arc::from(id)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Context carried with every repository operation.
///
/// Supplied by the authenticating caller, never derived from request
/// payloads, and immutable for the lifetime of one logical operation.
#[derive(Debug, Clone)]
pub struct TenantContext {
    tenant_id: TenantId,
}

impl TenantContext {
    pub fn new(tenant_id: TenantId) -> Self {
        Self { tenant_id }
    }

    pub fn from_str(id: &str) -> Result<Self, DomainError> {
        Ok(Self::new(TenantId::new(id)?))
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }
}
