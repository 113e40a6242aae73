//! Fixed generation configurations and safety settings.
//!
//! The registry is built once at startup and never mutated. Its entry order
//! is the order candidates are generated in, and the order ties are broken
//! in at selection time, so it must stay deterministic.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

/// Sampling temperatures of the default registry, in candidate order.
pub const DEFAULT_TEMPERATURES: [f64; 3] = [0.5, 0.75, 1.0];

/// Nucleus-sampling threshold shared by every default configuration.
pub const DEFAULT_TOP_P: f64 = 0.95;

/// Top-k shared by every default configuration (0 disables top-k sampling).
pub const DEFAULT_TOP_K: u32 = 0;

/// Output-token cap shared by every default configuration.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

/// One sampling configuration for a generation call.
///
/// Serializes to the provider's `generationConfig` wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Builds a configuration with the default sampling constants and the
    /// given temperature.
    pub fn with_temperature(temperature: f64) -> Self {
        Self {
            temperature,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Stringified temperature, used as the document title when embedding the
    /// candidate this configuration produced ("0.5", "0.75", "1").
    pub fn temperature_label(&self) -> String {
        format!("{}", self.temperature)
    }
}

/// Provider harm category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

/// Provider block threshold for one harm category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockNone,
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
}

/// One content-safety threshold, applied uniformly to every generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Immutable registry of generation configurations plus the safety settings
/// shared by all of them.
#[derive(Debug, Clone)]
pub struct Registry {
    configs: Vec<GenerationConfig>,
    safety_settings: Vec<SafetySetting>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            configs: DEFAULT_TEMPERATURES
                .iter()
                .map(|&t| GenerationConfig::with_temperature(t))
                .collect(),
            safety_settings: default_safety_settings(),
        }
    }
}

impl Registry {
    /// Builds a registry from explicit configurations and safety settings.
    pub fn new(configs: Vec<GenerationConfig>, safety_settings: Vec<SafetySetting>) -> Self {
        Self {
            configs,
            safety_settings,
        }
    }

    /// Generation configurations, in candidate order.
    pub fn configs(&self) -> &[GenerationConfig] {
        &self.configs
    }

    /// Safety settings applied to every generation call.
    pub fn safety_settings(&self) -> &[SafetySetting] {
        &self.safety_settings
    }

    /// Number of candidates generated per request.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

fn default_safety_settings() -> Vec<SafetySetting> {
    vec![
        SafetySetting {
            category: HarmCategory::Harassment,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        },
        SafetySetting {
            category: HarmCategory::HateSpeech,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        },
        SafetySetting {
            category: HarmCategory::SexuallyExplicit,
            threshold: HarmBlockThreshold::BlockNone,
        },
        SafetySetting {
            category: HarmCategory::DangerousContent,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        },
    ]
}
