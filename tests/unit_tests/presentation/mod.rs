mod api_error_test;
mod settings_test;
