use crate::errors::DomainError;
use crate::validators;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub site_id: String,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub published: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub slug: String,
    pub title: String,
    pub body: String,
    pub published: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ArticleUpdate {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub published: Option<bool>,
}

impl NewArticle {
    pub fn validate(&self) -> Result<(), DomainError> {
        validators::validate_slug(&self.slug)?;
        validators::validate_title(&self.title, "Article")?;
        Ok(())
    }
}

impl ArticleUpdate {
    pub fn is_empty(&self) -> bool {
        self.slug.is_none() && self.title.is_none() && self.body.is_none() && self.published.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(ref slug) = self.slug {
            validators::validate_slug(slug)?;
        }
        if let Some(ref title) = self.title {
            validators::validate_title(title, "Article")?;
        }
        Ok(())
    }
}

/// Aggregate counts cached under the tenant's stats keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleStats {
    pub total: u64,
    pub published: u64,
}
