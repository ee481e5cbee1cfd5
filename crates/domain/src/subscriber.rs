use crate::errors::DomainError;
use crate::validators;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: String,
    pub site_id: String,
    pub email: String,
    pub confirmed: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSubscriber {
    pub email: String,
}

impl NewSubscriber {
    pub fn validate(&self) -> Result<(), DomainError> {
        validators::validate_email(&self.email)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriberStats {
    pub total: u64,
    pub confirmed: u64,
}
