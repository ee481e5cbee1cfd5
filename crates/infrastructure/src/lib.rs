//! Pressbase Infrastructure Layer
//!
//! Cache store, key namespace, invalidation policy, the tenant guard over
//! SQLite, and the cached repository implementations of the application
//! ports. The `SqlitePool` is owned by [`guard::TenantGuard`]; nothing
//! outside that module can issue an unscoped statement.
pub mod cache;
pub mod database;
pub mod guard;
pub mod repositories;

pub use cache::{CacheStore, EntityKind, InvalidationPolicy};
pub use guard::{SelectQuery, SqlValue, Table, TenantGuard};
pub use repositories::{
    SqliteArticleRepository, SqliteMediaRepository, SqlitePageRepository, SqliteSiteRepository,
    SqliteSubscriberRepository,
};
