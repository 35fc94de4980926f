//! Wire-level domain types shared by the core and the engine.
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Identifier handed out for every accepted generation request.
pub type RequestId = u64;

/// Entry of the strategy selector list (`GET /strategies`).
///
/// The backend returns full strategy objects here; only the two fields the
/// selector needs are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategySummary {
    pub filename: String,
    pub name: String,
}

/// A prompt strategy as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Strategy {
    pub filename: String,
    pub name: String,
    pub abstraction_level: String,
    pub role: String,
    pub format: String,
    pub prompt_prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_requirements: Option<String>,
}

impl Strategy {
    /// Additional requirements, if present and not blank.
    pub fn additional_requirements(&self) -> Option<&str> {
        self.additional_requirements
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Fields of the strategy editor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Name,
    AbstractionLevel,
    Role,
    Format,
    PromptPrefix,
    AdditionalRequirements,
}

impl EditorField {
    pub const ALL: [EditorField; 6] = [
        EditorField::Name,
        EditorField::AbstractionLevel,
        EditorField::Role,
        EditorField::Format,
        EditorField::PromptPrefix,
        EditorField::AdditionalRequirements,
    ];

    /// Parses the snake_case wire name of a field.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(raw.trim()))
    }

    pub fn key(self) -> &'static str {
        match self {
            EditorField::Name => "name",
            EditorField::AbstractionLevel => "abstraction_level",
            EditorField::Role => "role",
            EditorField::Format => "format",
            EditorField::PromptPrefix => "prompt_prefix",
            EditorField::AdditionalRequirements => "additional_requirements",
        }
    }
}

/// Body of `POST /strategies/save`.
///
/// Every field is always sent, blank ones as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyDraft {
    pub name: String,
    pub abstraction_level: String,
    pub role: String,
    pub format: String,
    pub prompt_prefix: String,
    pub additional_requirements: String,
}

impl StrategyDraft {
    pub fn from_strategy(strategy: &Strategy) -> Self {
        Self {
            name: strategy.name.clone(),
            abstraction_level: strategy.abstraction_level.clone(),
            role: strategy.role.clone(),
            format: strategy.format.clone(),
            prompt_prefix: strategy.prompt_prefix.clone(),
            additional_requirements: strategy.additional_requirements.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: EditorField, value: String) {
        let slot = match field {
            EditorField::Name => &mut self.name,
            EditorField::AbstractionLevel => &mut self.abstraction_level,
            EditorField::Role => &mut self.role,
            EditorField::Format => &mut self.format,
            EditorField::PromptPrefix => &mut self.prompt_prefix,
            EditorField::AdditionalRequirements => &mut self.additional_requirements,
        };
        *slot = value;
    }

    pub fn get(&self, field: EditorField) -> &str {
        match field {
            EditorField::Name => &self.name,
            EditorField::AbstractionLevel => &self.abstraction_level,
            EditorField::Role => &self.role,
            EditorField::Format => &self.format,
            EditorField::PromptPrefix => &self.prompt_prefix,
            EditorField::AdditionalRequirements => &self.additional_requirements,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingStrategyName);
        }
        Ok(())
    }
}

/// Response of `POST /strategies/save`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveReceipt {
    pub filename: Option<String>,
}

/// Body of `POST /generate`: a strategy plus a non-blank description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    strategy: Strategy,
    description: String,
}

impl GenerationRequest {
    /// Checks the local preconditions, description first.
    pub fn new(description: &str, strategy: Option<&Strategy>) -> Result<Self, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        let strategy = strategy.ok_or(ValidationError::MissingStrategy)?;
        Ok(Self {
            strategy: strategy.clone(),
            description: description.to_string(),
        })
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Successful `POST /generate` response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationResult {
    pub html: String,
    pub history_id: Option<String>,
}

/// One row of `GET /history`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntrySummary {
    pub id: String,
    pub timestamp: String,
    pub description: String,
    pub strategy: String,
}

/// A full history record (`GET /history/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: String,
    pub description: String,
    pub strategy: String,
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> Strategy {
        Strategy {
            filename: "minimal.json".into(),
            name: "Minimal".into(),
            ..Strategy::default()
        }
    }

    #[test]
    fn request_rejects_blank_description_before_strategy() {
        assert_eq!(
            GenerationRequest::new("  \n\t", None),
            Err(ValidationError::MissingDescription)
        );
        assert_eq!(
            GenerationRequest::new("login form", None),
            Err(ValidationError::MissingStrategy)
        );
    }

    #[test]
    fn request_trims_description() {
        let strategy = strategy();
        let request = GenerationRequest::new("  login form ", Some(&strategy)).unwrap();
        assert_eq!(request.description(), "login form");
        assert_eq!(request.strategy().filename, "minimal.json");
    }

    #[test]
    fn blank_additional_requirements_are_absent() {
        let mut strategy = strategy();
        strategy.additional_requirements = Some("   ".into());
        assert_eq!(strategy.additional_requirements(), None);
        strategy.additional_requirements = Some("dark mode".into());
        assert_eq!(strategy.additional_requirements(), Some("dark mode"));
    }

    #[test]
    fn editor_field_names_round_trip() {
        for field in EditorField::ALL {
            assert_eq!(EditorField::parse(field.key()), Some(field));
        }
        assert_eq!(EditorField::parse("colour"), None);
    }

    #[test]
    fn draft_name_must_not_be_blank() {
        let mut draft = StrategyDraft::default();
        assert_eq!(draft.validate(), Err(ValidationError::MissingStrategyName));
        draft.set(EditorField::Name, "Card A".into());
        assert_eq!(draft.validate(), Ok(()));
        assert_eq!(draft.get(EditorField::Name), "Card A");
    }
}
