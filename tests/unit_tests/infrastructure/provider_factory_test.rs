use parley::application::services::ProviderMode;
use parley::infrastructure::llm::ProviderFactory;
use parley::presentation::config::ProviderSettings;

#[test]
fn given_no_api_key_when_creating_provider_then_uses_simulation() {
    let gateway = ProviderFactory::create(&ProviderSettings::simulated()).unwrap();

    assert_eq!(gateway.mode(), ProviderMode::Simulated);
}

#[test]
fn given_blank_api_key_when_creating_provider_then_uses_simulation() {
    let settings = ProviderSettings {
        api_key: Some("   ".to_string()),
        ..ProviderSettings::simulated()
    };

    let gateway = ProviderFactory::create(&settings).unwrap();

    assert_eq!(gateway.mode(), ProviderMode::Simulated);
}

#[test]
fn given_api_key_when_creating_provider_then_goes_live() {
    let settings = ProviderSettings {
        api_key: Some("sk-test".to_string()),
        ..ProviderSettings::simulated()
    };

    let gateway = ProviderFactory::create(&settings).unwrap();

    assert_eq!(gateway.mode(), ProviderMode::Live);
}
