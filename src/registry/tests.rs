use super::*;

#[test]
fn test_default_registry_has_three_configs_in_order() {
    let registry = Registry::default();

    assert_eq!(registry.len(), 3);
    let temperatures: Vec<f64> = registry.configs().iter().map(|c| c.temperature).collect();
    assert_eq!(temperatures, vec![0.5, 0.75, 1.0]);
}

#[test]
fn test_default_configs_share_sampling_constants() {
    for config in Registry::default().configs() {
        assert_eq!(config.top_p, DEFAULT_TOP_P);
        assert_eq!(config.top_k, DEFAULT_TOP_K);
        assert_eq!(config.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
    }
}

#[test]
fn test_temperature_labels() {
    let labels: Vec<String> = Registry::default()
        .configs()
        .iter()
        .map(|c| c.temperature_label())
        .collect();

    // 1.0 formats as "1", matching the integer-like label the provider sees
    // as the document title.
    assert_eq!(labels, vec!["0.5", "0.75", "1"]);
}

#[test]
fn test_default_safety_settings() {
    let registry = Registry::default();
    let settings = registry.safety_settings();

    assert_eq!(settings.len(), 4);
    assert_eq!(
        settings[0],
        SafetySetting {
            category: HarmCategory::Harassment,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        }
    );
    assert_eq!(
        settings[2],
        SafetySetting {
            category: HarmCategory::SexuallyExplicit,
            threshold: HarmBlockThreshold::BlockNone,
        }
    );
}

#[test]
fn test_generation_config_wire_shape() {
    let config = GenerationConfig::with_temperature(0.5);
    let json = serde_json::to_value(config).expect("should serialize");

    assert_eq!(
        json,
        serde_json::json!({
            "temperature": 0.5,
            "topP": 0.95,
            "topK": 0,
            "maxOutputTokens": 4096,
        })
    );
}

#[test]
fn test_safety_setting_wire_shape() {
    let setting = SafetySetting {
        category: HarmCategory::HateSpeech,
        threshold: HarmBlockThreshold::BlockMediumAndAbove,
    };
    let json = serde_json::to_value(setting).expect("should serialize");

    assert_eq!(
        json,
        serde_json::json!({
            "category": "HARM_CATEGORY_HATE_SPEECH",
            "threshold": "BLOCK_MEDIUM_AND_ABOVE",
        })
    );
}

#[test]
fn test_empty_registry() {
    let registry = Registry::new(Vec::new(), Vec::new());

    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}
