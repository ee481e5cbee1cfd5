mod article_repository;
mod media_repository;
mod page_repository;
mod site_repository;
mod subscriber_repository;

pub use article_repository::ArticleRepository;
pub use media_repository::MediaRepository;
pub use page_repository::PageRepository;
pub use site_repository::SiteRepository;
pub use subscriber_repository::SubscriberRepository;
