//! Pressbase Domain Layer
pub mod article;
pub mod config;
pub mod errors;
pub mod media;
pub mod page;
pub mod site;
pub mod subscriber;
pub mod tenant;
pub mod validators;

pub use article::{Article, ArticleStats, ArticleUpdate, NewArticle};
pub use config::Config;
pub use errors::DomainError;
pub use media::{MediaAsset, MediaAssetUpdate, NewMediaAsset};
pub use page::{NewPage, Page, PageUpdate};
pub use site::{NewSite, Site, SiteSettingsUpdate};
pub use subscriber::{NewSubscriber, Subscriber, SubscriberStats};
pub use tenant::{TenantContext, TenantId, GLOBAL_TENANT_SEGMENT};
