use crate::errors::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: String,
    pub site_id: String,
    pub file_name: String,
    pub content_type: String,
    pub byte_size: i64,
    pub alt_text: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMediaAsset {
    pub file_name: String,
    pub content_type: String,
    pub byte_size: i64,
    pub alt_text: Option<String>,
}

/// Only the descriptive fields are mutable; the stored bytes are owned by
/// the external media storage collaborator and replaced, not edited.
#[derive(Debug, Clone, Default)]
pub struct MediaAssetUpdate {
    pub file_name: Option<String>,
    pub alt_text: Option<String>,
}

impl NewMediaAsset {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_file_name(&self.file_name)?;
        if self.content_type.is_empty() || !self.content_type.contains('/') {
            return Err(DomainError::Validation(format!(
                "Content type '{}' is not a valid media type",
                self.content_type
            )));
        }
        if self.byte_size < 0 {
            return Err(DomainError::Validation(
                "Media size cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl MediaAssetUpdate {
    pub fn is_empty(&self) -> bool {
        self.file_name.is_none() && self.alt_text.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(ref name) = self.file_name {
            validate_file_name(name)?;
        }
        if let Some(ref alt) = self.alt_text {
            if alt.len() > 500 {
                return Err(DomainError::Validation(
                    "Alt text cannot exceed 500 characters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn validate_file_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() || name.len() > 255 {
        return Err(DomainError::Validation(
            "File name must be between 1 and 255 characters".to_string(),
        ));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(DomainError::Validation(format!(
            "File name '{}' must not contain path separators",
            name
        )));
    }
    Ok(())
}
