use parley::presentation::config::{Environment, ProviderSettings, Settings};

#[test]
fn given_environment_names_when_parsing_then_accepts_known_values() {
    assert_eq!(Environment::try_from("LOCAL".to_string()), Ok(Environment::Local));
    assert_eq!(Environment::try_from("test".to_string()), Ok(Environment::Test));
    assert_eq!(Environment::try_from("production".to_string()), Ok(Environment::Prod));
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_no_overrides_when_loading_settings_then_uses_built_in_defaults() {
    let settings = Settings::load_for(Environment::Test).unwrap();

    assert_eq!(settings.environment, Environment::Test);
    assert_eq!(settings.provider.chat_model, "gpt-4o");
    assert_eq!(settings.provider.max_tokens, 1000);
    assert_eq!(settings.provider.image_max_tokens, 500);
    assert_eq!(settings.uploads.max_bytes(), 10 * 1024 * 1024);
}

#[test]
fn given_simulated_provider_settings_then_carries_no_credential() {
    let settings = ProviderSettings::simulated();

    assert!(settings.api_key.is_none());
    assert!((settings.temperature - 0.7).abs() < f32::EPSILON);
}
