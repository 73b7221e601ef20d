mod prompt_sanitizer_test;
mod provider_factory_test;
