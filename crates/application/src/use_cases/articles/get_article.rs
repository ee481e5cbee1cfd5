use pressbase_domain::{Article, DomainError, TenantContext};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::ArticleRepository;

/// Use case for fetching one article, surfacing absence as `NotFound`.
pub struct GetArticleUseCase {
    articles: Arc<dyn ArticleRepository>,
}

impl GetArticleUseCase {
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }

    #[instrument(skip(self))]
    pub async fn by_id(&self, ctx: &TenantContext, id: &str) -> Result<Article, DomainError> {
        self.articles
            .get_by_id(ctx, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(DomainError::not_found_message("article", id)))
    }

    #[instrument(skip(self))]
    pub async fn by_slug(&self, ctx: &TenantContext, slug: &str) -> Result<Article, DomainError> {
        self.articles
            .get_by_slug(ctx, slug)
            .await?
            .ok_or_else(|| DomainError::NotFound(DomainError::not_found_message("article", slug)))
    }
}
