//! Cache key construction.
//!
//! Key grammar (relied on by invalidation and by tests):
//! `<namespace>:<tenant|"global">:<shape>[:<qualifier>]*`, each segment
//! matching `[A-Za-z0-9_-]+`. The tenant id always occupies its own
//! colon-delimited segment, so a purge for tenant `T1` can never touch
//! tenant `T10`. All builders are pure: identical inputs always yield
//! identical strings.

use pressbase_domain::{TenantId, GLOBAL_TENANT_SEGMENT};
use sha2::{Digest, Sha256};
use std::fmt;

/// Entity kinds known to the cache and invalidation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Site,
    Article,
    Page,
    Media,
    Subscriber,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Site,
        EntityKind::Article,
        EntityKind::Page,
        EntityKind::Media,
        EntityKind::Subscriber,
    ];

    /// First key segment for this kind.
    pub fn namespace(self) -> &'static str {
        match self {
            EntityKind::Site => "sites",
            EntityKind::Article => "articles",
            EntityKind::Page => "pages",
            EntityKind::Media => "media",
            EntityKind::Subscriber => "subscribers",
        }
    }

    /// Qualifier segment naming the kind's natural key.
    pub fn natural_key_label(self) -> &'static str {
        match self {
            EntityKind::Site => "host",
            EntityKind::Article | EntityKind::Page => "slug",
            EntityKind::Media => "file",
            EntityKind::Subscriber => "email",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace())
    }
}

/// Key for one entity fetched by generated id.
pub fn entity_by_id(kind: EntityKind, tenant: &TenantId, id: &str) -> String {
    format!("{}:{}:id:{}", kind.namespace(), tenant, segment(id))
}

/// Key for one entity fetched by its natural key (slug, email, ...).
///
/// Natural key values outside the segment grammar (emails, hostnames) are
/// hashed; grammar-safe values (slugs) pass through readable.
pub fn entity_by_natural_key(kind: EntityKind, tenant: &TenantId, value: &str) -> String {
    format!(
        "{}:{}:{}:{}",
        kind.namespace(),
        tenant,
        kind.natural_key_label(),
        segment(value)
    )
}

/// Key for a list-shaped query, qualified by its filter shape.
pub fn entity_list(kind: EntityKind, tenant: &TenantId, qualifiers: &[&str]) -> String {
    let mut key = format!("{}:{}:list", kind.namespace(), tenant);
    for qualifier in qualifiers {
        key.push(':');
        key.push_str(&segment(qualifier));
    }
    key
}

/// Key for an aggregate/statistics query over a named window.
pub fn tenant_stats(kind: EntityKind, tenant: &TenantId, window: &str) -> String {
    format!("{}:{}:stats:{}", kind.namespace(), tenant, segment(window))
}

/// Key in the reserved `global` tenant slot, for cross-tenant lookups such
/// as hostname routing.
pub fn global_lookup(kind: EntityKind, qualifier: &str, value: &str) -> String {
    format!(
        "{}:{}:{}:{}",
        kind.namespace(),
        GLOBAL_TENANT_SEGMENT,
        qualifier,
        segment(value)
    )
}

/// Glob covering every list-shaped key of one kind for one tenant.
pub fn list_pattern(kind: EntityKind, tenant: &TenantId) -> String {
    format!("{}:{}:list*", kind.namespace(), tenant)
}

/// Glob covering every stats key of one kind for one tenant.
pub fn stats_pattern(kind: EntityKind, tenant: &TenantId) -> String {
    format!("{}:{}:stats:*", kind.namespace(), tenant)
}

/// Globs that together cover every key belonging to one tenant.
pub fn tenant_wipe_patterns(tenant: &TenantId) -> Vec<String> {
    EntityKind::ALL
        .iter()
        .map(|kind| format!("{}:{}:*", kind.namespace(), tenant))
        .collect()
}

/// Makes an arbitrary value safe as one key segment. Values already inside
/// the grammar pass through unchanged; anything else becomes a sha-256 hex
/// digest, which is collision-free for practical purposes and always
/// grammar-safe.
fn segment(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if safe {
        value.to_string()
    } else {
        let digest = Sha256::digest(value.as_bytes());
        format!("{:x}", digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(id: &str) -> TenantId {
        TenantId::new(id).unwrap()
    }

    #[test]
    fn builders_are_deterministic() {
        let t = tenant("site-A");
        assert_eq!(
            entity_by_id(EntityKind::Article, &t, "a1"),
            entity_by_id(EntityKind::Article, &t, "a1"),
        );
        assert_eq!(
            entity_by_natural_key(EntityKind::Subscriber, &t, "reader@example.com"),
            entity_by_natural_key(EntityKind::Subscriber, &t, "reader@example.com"),
        );
    }

    #[test]
    fn slug_keys_stay_readable() {
        let t = tenant("site-A");
        assert_eq!(
            entity_by_natural_key(EntityKind::Article, &t, "hello"),
            "articles:site-A:slug:hello"
        );
    }

    #[test]
    fn email_keys_are_hashed_into_the_grammar() {
        let t = tenant("site-A");
        let key = entity_by_natural_key(EntityKind::Subscriber, &t, "reader@example.com");
        let tail = key.rsplit(':').next().unwrap();
        assert_eq!(tail.len(), 64);
        assert!(tail.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(key.starts_with("subscribers:site-A:email:"));
    }

    #[test]
    fn different_tenants_never_share_keys() {
        let a = entity_by_id(EntityKind::Article, &tenant("T1"), "a1");
        let b = entity_by_id(EntityKind::Article, &tenant("T2"), "a1");
        assert_ne!(a, b);
    }

    #[test]
    fn list_keys_carry_qualifiers() {
        let t = tenant("site-A");
        assert_eq!(
            entity_list(EntityKind::Article, &t, &[]),
            "articles:site-A:list"
        );
        assert_eq!(
            entity_list(EntityKind::Article, &t, &["published"]),
            "articles:site-A:list:published"
        );
    }

    #[test]
    fn stats_keys_carry_window() {
        let t = tenant("site-A");
        assert_eq!(
            tenant_stats(EntityKind::Subscriber, &t, "all"),
            "subscribers:site-A:stats:all"
        );
    }

    #[test]
    fn global_lookups_use_reserved_slot() {
        let key = global_lookup(EntityKind::Site, "host", "blog-example-com");
        assert_eq!(key, "sites:global:host:blog-example-com");
    }

    #[test]
    fn wipe_patterns_cover_every_kind() {
        let patterns = tenant_wipe_patterns(&tenant("site-A"));
        assert_eq!(patterns.len(), EntityKind::ALL.len());
        assert!(patterns.contains(&"articles:site-A:*".to_string()));
        assert!(patterns.contains(&"sites:site-A:*".to_string()));
    }
}
