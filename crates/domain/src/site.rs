use crate::errors::DomainError;
use crate::validators;
use serde::{Deserialize, Serialize};

/// One tenant of the platform. The site id is the tenant id: every other
/// entity row is scoped to it, and the repository layer never lets a caller
/// set or change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub host: String,
    pub description: Option<String>,
    pub theme: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSite {
    pub name: String,
    pub host: String,
    pub description: Option<String>,
    pub theme: String,
}

/// Tenant-level settings patch. Any field left `None` is unchanged.
#[derive(Debug, Clone, Default)]
pub struct SiteSettingsUpdate {
    pub name: Option<String>,
    pub host: Option<String>,
    pub description: Option<String>,
    pub theme: Option<String>,
}

impl NewSite {
    pub fn validate(&self) -> Result<(), DomainError> {
        validators::validate_title(&self.name, "Site")?;
        validators::validate_host(&self.host)?;
        validators::validate_comment(&self.description, "Site")?;
        Ok(())
    }
}

impl SiteSettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.host.is_none()
            && self.description.is_none()
            && self.theme.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(ref name) = self.name {
            validators::validate_title(name, "Site")?;
        }
        if let Some(ref host) = self.host {
            validators::validate_host(host)?;
        }
        validators::validate_comment(&self.description, "Site")?;
        Ok(())
    }
}
