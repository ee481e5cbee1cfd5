use crate::errors::DomainError;

/// Slug grammar: lowercase alphanumerics and hyphens, no leading/trailing
/// hyphen. Slugs double as cache key segments, so the grammar is a strict
/// subset of `[A-Za-z0-9_-]+`.
pub fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() {
        return Err(DomainError::Validation("Slug cannot be empty".to_string()));
    }
    if slug.len() > 120 {
        return Err(DomainError::Validation(
            "Slug cannot exceed 120 characters".to_string(),
        ));
    }
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid || slug.starts_with('-') || slug.ends_with('-') {
        return Err(DomainError::Validation(format!(
            "Slug '{}' must match [a-z0-9-]+ without leading or trailing hyphens",
            slug
        )));
    }
    Ok(())
}

pub fn validate_title(title: &str, entity: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation(format!(
            "{entity} title cannot be empty"
        )));
    }
    if title.len() > 200 {
        return Err(DomainError::Validation(format!(
            "{entity} title cannot exceed 200 characters"
        )));
    }
    Ok(())
}

/// Minimal shape check, not RFC 5322. The store enforces per-tenant
/// uniqueness; this only rejects obviously broken input.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.len() > 254 {
        return Err(DomainError::Validation(
            "Email cannot exceed 254 characters".to_string(),
        ));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(DomainError::Validation(format!(
            "Email '{}' is missing '@'",
            email
        )));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err(DomainError::Validation(format!(
            "Email '{}' is not a valid address",
            email
        )));
    }
    Ok(())
}

pub fn validate_host(host: &str) -> Result<(), DomainError> {
    if host.is_empty() || host.len() > 253 {
        return Err(DomainError::Validation(
            "Host must be between 1 and 253 characters".to_string(),
        ));
    }
    let valid = host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if !valid || host.starts_with('.') || host.ends_with('.') {
        return Err(DomainError::Validation(format!(
            "Host '{}' is not a valid hostname",
            host
        )));
    }
    Ok(())
}

pub fn validate_comment(comment: &Option<String>, entity: &str) -> Result<(), DomainError> {
    if let Some(c) = comment {
        if c.len() > 500 {
            return Err(DomainError::Validation(format!(
                "{entity} comment cannot exceed 500 characters"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_grammar() {
        assert!(validate_slug("hello-world-2").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Hello").is_err());
        assert!(validate_slug("hello world").is_err());
        assert!(validate_slug("-hello").is_err());
        assert!(validate_slug("hello-").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("reader@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@nodot").is_err());
    }

    #[test]
    fn host_shape() {
        assert!(validate_host("blog.example.com").is_ok());
        assert!(validate_host(".example.com").is_err());
        assert!(validate_host("bad host").is_err());
    }
}
