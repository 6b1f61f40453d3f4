//! Request DTOs for the incident API
//!
//! Defines the structure of incoming HTTP request bodies and the field rules
//! applied before anything reaches the engine.

use serde::Deserialize;

use crate::error::IncidentError;
use crate::models::{IncidentDraft, IncidentUpdate};

/// Maximum incident name length in characters
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum incident description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Request body for creating an incident (POST /incident)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateIncidentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateIncidentRequest {
    /// Validates the request data
    ///
    /// Returns every failed rule, or an empty list if valid.
    pub fn validate(&self) -> Vec<String> {
        validate_fields(self.name.as_deref(), self.description.as_deref())
    }

    /// Validates and converts into an engine draft.
    pub fn into_draft(self) -> Result<IncidentDraft, IncidentError> {
        let errors = self.validate();
        match (self.name, self.description) {
            (Some(name), Some(description)) if errors.is_empty() => {
                Ok(IncidentDraft { name, description })
            }
            _ => Err(IncidentError::Validation(errors)),
        }
    }
}

/// Request body for updating an incident (PUT /incident)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIncidentRequest {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateIncidentRequest {
    /// Validates the request data
    pub fn validate(&self) -> Vec<String> {
        validate_fields(self.name.as_deref(), self.description.as_deref())
    }

    /// Validates and converts into an engine update.
    ///
    /// Field errors are reported before a missing id.
    pub fn into_update(self) -> Result<IncidentUpdate, IncidentError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(IncidentError::Validation(errors));
        }
        let Some(id) = self.id else {
            return Err(IncidentError::InvalidArgument(
                "Incident id cannot be null".to_string(),
            ));
        };
        match (self.name, self.description) {
            (Some(name), Some(description)) => Ok(IncidentUpdate {
                id,
                name,
                description,
            }),
            _ => Err(IncidentError::Validation(errors)),
        }
    }
}

fn validate_fields(name: Option<&str>, description: Option<&str>) -> Vec<String> {
    let mut errors = Vec::new();

    match name {
        Some(name) if !name.trim().is_empty() => {
            if name.chars().count() > MAX_NAME_LENGTH {
                errors.push(format!(
                    "The length of the incident name should be between 1 and {} characters",
                    MAX_NAME_LENGTH
                ));
            }
        }
        _ => errors.push("Name is required".to_string()),
    }

    match description {
        Some(description) if !description.trim().is_empty() => {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                errors.push(format!(
                    "The length of the incident description should be between 1 and {} characters",
                    MAX_DESCRIPTION_LENGTH
                ));
            }
        }
        _ => errors.push("Description is required".to_string()),
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{"name": "Test Incident", "description": "This is a test Incident"}"#;
        let req: CreateIncidentRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_empty());
        let draft = req.into_draft().unwrap();
        assert_eq!(draft.name, "Test Incident");
    }

    #[test]
    fn test_create_missing_name() {
        let json = r#"{"description": "This is a test Incident"}"#;
        let req: CreateIncidentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.validate(), vec!["Name is required".to_string()]);
    }

    #[test]
    fn test_create_blank_fields_report_both() {
        let req = CreateIncidentRequest {
            name: Some("   ".to_string()),
            description: None,
        };
        let errors = req.validate();
        assert!(errors.contains(&"Name is required".to_string()));
        assert!(errors.contains(&"Description is required".to_string()));
    }

    #[test]
    fn test_create_name_too_long() {
        let req = CreateIncidentRequest {
            name: Some("x".repeat(MAX_NAME_LENGTH + 1)),
            description: Some("ok".to_string()),
        };
        assert!(matches!(req.into_draft(), Err(IncidentError::Validation(_))));
    }

    #[test]
    fn test_create_description_at_limit() {
        let req = CreateIncidentRequest {
            name: Some("n".to_string()),
            description: Some("d".repeat(MAX_DESCRIPTION_LENGTH)),
        };
        assert!(req.validate().is_empty());
    }

    #[test]
    fn test_update_without_id() {
        let req = UpdateIncidentRequest {
            id: None,
            name: Some("n".to_string()),
            description: Some("d".to_string()),
        };
        assert!(matches!(
            req.into_update(),
            Err(IncidentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_update_valid_request() {
        let json = r#"{"id": 4, "name": "n", "description": "Updated description"}"#;
        let req: UpdateIncidentRequest = serde_json::from_str(json).unwrap();
        let update = req.into_update().unwrap();
        assert_eq!(update.id, 4);
        assert_eq!(update.description, "Updated description");
    }
}
