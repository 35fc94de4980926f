use crate::{Page, PreviewContent, Strategy, StrategyDraft};

pub const NAME_PLACEHOLDER: &str = "No strategy selected";
pub const FIELD_PLACEHOLDER: &str = "-";
/// Shown for absent additional requirements; never sent to the backend.
pub const NONE_SENTINEL: &str = "none";

/// Read-only strategy fields on the generator page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyDetailsView {
    pub name: String,
    pub abstraction_level: String,
    pub role: String,
    pub format: String,
    pub additional_requirements: String,
}

impl StrategyDetailsView {
    pub fn placeholder() -> Self {
        Self {
            name: NAME_PLACEHOLDER.to_string(),
            abstraction_level: FIELD_PLACEHOLDER.to_string(),
            role: FIELD_PLACEHOLDER.to_string(),
            format: FIELD_PLACEHOLDER.to_string(),
            additional_requirements: FIELD_PLACEHOLDER.to_string(),
        }
    }

    pub fn from_strategy(strategy: &Strategy) -> Self {
        Self {
            name: strategy.name.clone(),
            abstraction_level: strategy.abstraction_level.clone(),
            role: strategy.role.clone(),
            format: strategy.format.clone(),
            additional_requirements: strategy
                .additional_requirements()
                .unwrap_or(NONE_SENTINEL)
                .to_string(),
        }
    }
}

impl Default for StrategyDetailsView {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOptionView {
    pub filename: String,
    pub name: String,
    pub selected: bool,
}

/// Labels of the result view page; blank until a record loads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplayLabelsView {
    pub description: String,
    pub strategy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub page: Page,
    pub strategies: Vec<StrategyOptionView>,
    pub details: StrategyDetailsView,
    pub description: String,
    pub preview: PreviewContent,
    pub preview_enabled: bool,
    pub generating: bool,
    pub replay: ReplayLabelsView,
    pub editing: Option<String>,
    pub editor: StrategyDraft,
    pub dirty: bool,
}
