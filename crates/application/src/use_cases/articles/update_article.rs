use pressbase_domain::{Article, ArticleUpdate, DomainError, TenantContext};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::ArticleRepository;

/// Use case for updating an article.
///
/// Enforced rules:
/// - The patch must not be empty
/// - A changed slug must not collide with another article of the same tenant
pub struct UpdateArticleUseCase {
    articles: Arc<dyn ArticleRepository>,
}

impl UpdateArticleUseCase {
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }

    #[instrument(skip(self, patch))]
    pub async fn execute(
        &self,
        ctx: &TenantContext,
        id: &str,
        patch: ArticleUpdate,
    ) -> Result<Article, DomainError> {
        if patch.is_empty() {
            return Err(DomainError::Validation(
                "Update patch contains no fields".to_string(),
            ));
        }
        patch.validate()?;

        if let Some(ref slug) = patch.slug {
            if let Some(existing) = self.articles.get_by_slug(ctx, slug).await? {
                if existing.id != id {
                    return Err(DomainError::Validation(format!(
                        "Slug '{}' is already in use",
                        slug
                    )));
                }
            }
        }

        let updated = self.articles.update(ctx, id, patch).await?;

        info!(
            tenant_id = %ctx.tenant_id(),
            article_id = %updated.id,
            "Article updated"
        );

        Ok(updated)
    }
}
