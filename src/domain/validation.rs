use std::collections::BTreeSet;

pub const DESCRIPTION_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationError {
    TitleEmpty,
    DescriptionTooLong,
}

/// Errors found in the marker form. The form is valid iff the set is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(BTreeSet<ValidationError>);

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, error: ValidationError) -> bool {
        self.0.contains(&error)
    }

    pub fn insert(&mut self, error: ValidationError) {
        self.0.insert(error);
    }

    pub fn remove(&mut self, error: ValidationError) {
        self.0.remove(&error);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ValidationError> + '_ {
        self.0.iter().copied()
    }
}

/// Check title and description the way a save attempt does.
pub fn validate_marker_form(title: &str, description: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    if title.trim().is_empty() {
        errors.insert(ValidationError::TitleEmpty);
    }
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.insert(ValidationError::DescriptionTooLong);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_is_rejected() {
        let errors = validate_marker_form("", "");
        assert!(errors.contains(ValidationError::TitleEmpty));
        assert!(!errors.is_valid());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(validate_marker_form("   ", "").contains(ValidationError::TitleEmpty));
    }

    #[test]
    fn description_limit_is_inclusive() {
        let at_limit = "a".repeat(DESCRIPTION_MAX_CHARS);
        assert!(validate_marker_form("Cafe", &at_limit).is_valid());

        let over = "a".repeat(DESCRIPTION_MAX_CHARS + 1);
        let errors = validate_marker_form("Cafe", &over);
        assert!(errors.contains(ValidationError::DescriptionTooLong));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn description_counts_characters_not_bytes() {
        let cyrillic = "ж".repeat(DESCRIPTION_MAX_CHARS);
        assert!(validate_marker_form("Cafe", &cyrillic).is_valid());
    }

    #[test]
    fn both_errors_reported_together() {
        let errors = validate_marker_form("", &"x".repeat(201));
        assert!(errors.contains(ValidationError::TitleEmpty));
        assert!(errors.contains(ValidationError::DescriptionTooLong));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn valid_form_has_no_errors() {
        let errors = validate_marker_form("Viewpoint", "Nice sunset");
        assert!(errors.is_empty());
        assert!(errors.is_valid());
    }
}
