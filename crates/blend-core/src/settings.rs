//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub screening: ScreeningSettings,
    pub retrieval: RetrievalSettings,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

/// Thresholds for the candidate filter pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSettings {
    pub min_length: usize,
    pub min_candidate_occurrences: u64,
    /// `-1` disables the dictionary frequency filter.
    pub min_dict_occurrences: i64,
    pub proper_noun_cutoff: f64,
    pub proper_noun_min_total: u64,
    pub compound_min_length: usize,
    pub typo_frequency_ratio: u64,
}

impl ScreeningSettings {
    /// Dictionary frequency threshold, or `None` when the filter is disabled.
    pub fn dict_threshold(&self) -> Option<u64> {
        u64::try_from(self.min_dict_occurrences).ok()
    }
}

impl Default for ScreeningSettings {
    fn default() -> Self {
        Settings::default().screening
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalSettings {
    pub top_k: usize,
    pub anchor_len: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Settings::default().retrieval
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    if s.screening.min_dict_occurrences < -1 {
        return Err(SettingsError::InvalidValue {
            field: "screening.min_dict_occurrences".to_string(),
            reason: "must be -1 (disabled) or non-negative".to_string(),
        });
    }
    if !(0.0..=1.0).contains(&s.screening.proper_noun_cutoff) {
        return Err(SettingsError::InvalidValue {
            field: "screening.proper_noun_cutoff".to_string(),
            reason: "must be between 0 and 1".to_string(),
        });
    }

    check_positive_usize!(retrieval.top_k);
    check_positive_usize!(retrieval.anchor_len);

    Ok(())
}
