use crate::error::ApiError;

/// True when an optional string field was supplied with actual content.
pub fn has_text(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |v| !v.trim().is_empty())
}

/// Check that every required field was supplied, collecting the names of
/// the ones that were not into the client-facing message. Each pair is the
/// field name and whether the request carried it.
pub fn require_fields(fields: &[(&str, bool)]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "Required field(s) {} is missing or empty",
            missing.join(", ")
        )))
    }
}

/// Minimal shape check: one `@`, a dot somewhere, and non-empty local and
/// domain parts.
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let well_formed = email.contains('.') && {
        let parts: Vec<&str> = email.split('@').collect();
        parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty()
    };

    if well_formed {
        Ok(())
    } else {
        Err(ApiError::bad_request("Email address is not valid"))
    }
}
