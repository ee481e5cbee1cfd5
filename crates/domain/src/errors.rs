use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// A tenant-scoped mutation touched zero rows: the row either does not
    /// exist or belongs to another tenant. The message is worded exactly
    /// like `NotFound` so callers cannot tell the two cases apart.
    #[error("{0}")]
    TenantMismatch(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    /// Wording shared by `NotFound` and `TenantMismatch` so that a
    /// cross-tenant probe is indistinguishable from a missing row.
    pub fn not_found_message(kind: &str, ident: &str) -> String {
        format!("{} '{}' not found", kind, ident)
    }

    /// Storage errors are the only variant worth retrying; validation and
    /// tenant mismatches are caller bugs or permanent answers.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_mismatch_reads_like_not_found() {
        let missing = DomainError::NotFound(DomainError::not_found_message("article", "a-1"));
        let foreign = DomainError::TenantMismatch(DomainError::not_found_message("article", "a-1"));
        assert_eq!(missing.to_string(), foreign.to_string());
    }

    #[test]
    fn only_storage_is_retryable() {
        assert!(DomainError::Storage("disk io".into()).is_retryable());
        assert!(!DomainError::Validation("bad slug".into()).is_retryable());
        assert!(!DomainError::TenantMismatch("gone".into()).is_retryable());
    }
}
