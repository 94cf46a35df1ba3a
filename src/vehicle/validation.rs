use serde::Serialize;
use std::fmt;

/// Profile input an issue refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileField {
    Category,
    Powertrain,
    Weight,
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileField::Category => "category",
            ProfileField::Powertrain => "powertrain",
            ProfileField::Weight => "weight",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileIssue {
    pub field: ProfileField,
    pub message: String,
}

/// What `ProfileBuilder::finalize` had to say about the selections.
///
/// Errors block the profile. Warnings record defaults that were filled in.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ProfileIssue>,
    pub warnings: Vec<ProfileIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: ProfileField, message: String) {
        self.errors.push(ProfileIssue { field, message });
    }

    pub fn note_default(&mut self, field: ProfileField, message: String) {
        self.warnings.push(ProfileIssue { field, message });
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    /// Fields whose value came from the config instead of the user
    pub fn defaulted_fields(&self) -> Vec<ProfileField> {
        self.warnings.iter().map(|issue| issue.field).collect()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.errors {
            writeln!(f, "error: {}: {}", issue.field, issue.message)?;
        }
        for issue in &self.warnings {
            writeln!(f, "note: {}: {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}
