use crate::errors::DomainError;
use crate::validators;
use serde::{Deserialize, Serialize};

/// A static page (about, contact, ...). Unlike articles, pages carry an
/// explicit ordering position for navigation menus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub site_id: String,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub position: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPage {
    pub slug: String,
    pub title: String,
    pub body: String,
    pub position: i64,
}

#[derive(Debug, Clone, Default)]
pub struct PageUpdate {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub position: Option<i64>,
}

impl NewPage {
    pub fn validate(&self) -> Result<(), DomainError> {
        validators::validate_slug(&self.slug)?;
        validators::validate_title(&self.title, "Page")?;
        Ok(())
    }
}

impl PageUpdate {
    pub fn is_empty(&self) -> bool {
        self.slug.is_none() && self.title.is_none() && self.body.is_none() && self.position.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(ref slug) = self.slug {
            validators::validate_slug(slug)?;
        }
        if let Some(ref title) = self.title {
            validators::validate_title(title, "Page")?;
        }
        Ok(())
    }
}
