use pressbase_domain::{Article, DomainError, NewArticle, TenantContext};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::ArticleRepository;

/// Use case for creating an article.
///
/// Enforced rules:
/// - Slug and title must be well-formed
/// - The slug must be unused within the calling tenant (other tenants may
///   hold the same slug freely)
pub struct CreateArticleUseCase {
    articles: Arc<dyn ArticleRepository>,
}

impl CreateArticleUseCase {
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }

    #[instrument(skip(self, article))]
    pub async fn execute(
        &self,
        ctx: &TenantContext,
        article: NewArticle,
    ) -> Result<Article, DomainError> {
        article.validate()?;

        if self.articles.get_by_slug(ctx, &article.slug).await?.is_some() {
            return Err(DomainError::Validation(format!(
                "Slug '{}' is already in use",
                article.slug
            )));
        }

        let created = self.articles.create(ctx, article).await?;

        info!(
            tenant_id = %ctx.tenant_id(),
            article_id = %created.id,
            slug = %created.slug,
            "Article created"
        );

        Ok(created)
    }
}
