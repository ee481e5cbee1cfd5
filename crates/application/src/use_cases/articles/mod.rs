mod create_article;
mod get_article;
mod update_article;

pub use create_article::CreateArticleUseCase;
pub use get_article::GetArticleUseCase;
pub use update_article::UpdateArticleUseCase;
