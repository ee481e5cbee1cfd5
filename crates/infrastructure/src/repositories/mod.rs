mod article_repository;
mod media_repository;
mod page_repository;
mod site_repository;
mod subscriber_repository;

pub use article_repository::SqliteArticleRepository;
pub use media_repository::SqliteMediaRepository;
pub use page_repository::SqlitePageRepository;
pub use site_repository::SqliteSiteRepository;
pub use subscriber_repository::SqliteSubscriberRepository;

use pressbase_domain::DomainError;

pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub(crate) fn new_entity_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// SQLite reports per-tenant uniqueness violations as a generic driver
/// error; surface them as validation failures with a domain message.
pub(crate) fn map_unique_violation(err: DomainError, message: &str) -> DomainError {
    match err {
        DomainError::Storage(ref detail) if detail.contains("UNIQUE constraint failed") => {
            DomainError::Validation(message.to_string())
        }
        other => other,
    }
}
