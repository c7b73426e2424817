//! Caregiver domain model.

use super::ModelValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Store-assigned caregiver identifier. Ascending in creation order.
pub type CaregiverId = i64;

/// A person who can be assigned to shift slots.
///
/// Names are not unique; two caregivers may share a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caregiver {
    pub id: CaregiverId,
    pub name: String,
}

/// Normalizes a caregiver display name.
///
/// Leading/trailing whitespace is removed and inner whitespace runs collapse
/// to a single space.
///
/// # Errors
/// - `BlankCaregiverName` when nothing remains after normalization.
pub fn normalize_caregiver_name(name: &str) -> Result<String, ModelValidationError> {
    let collapsed = WHITESPACE_RE.replace_all(name.trim(), " ");
    if collapsed.is_empty() {
        return Err(ModelValidationError::BlankCaregiverName);
    }
    Ok(collapsed.into_owned())
}

#[cfg(test)]
mod tests {
    use super::normalize_caregiver_name;
    use crate::model::ModelValidationError;

    #[test]
    fn normalize_trims_and_collapses_whitespace() {
        assert_eq!(
            normalize_caregiver_name("  Maria \t  B ").unwrap(),
            "Maria B"
        );
    }

    #[test]
    fn normalize_rejects_blank_names() {
        assert_eq!(
            normalize_caregiver_name(" \n ").unwrap_err(),
            ModelValidationError::BlankCaregiverName
        );
        assert!(normalize_caregiver_name("").is_err());
    }
}
