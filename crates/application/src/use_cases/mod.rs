pub mod articles;
pub mod sites;
pub mod subscribers;

// Re-export use cases
pub use articles::{CreateArticleUseCase, GetArticleUseCase, UpdateArticleUseCase};
pub use sites::UpdateSiteSettingsUseCase;
pub use subscribers::{SubscribeUseCase, UnsubscribeUseCase};
