//! Unit tests for token configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;

const STRONG_SECRET: &str = "0123456789abcdef0123456789abcdef";

fn mock_env(vars: HashMap<String, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn with_secret(value: &str) -> MockEnv {
    mock_env(HashMap::from([(SECRET_ENV.to_owned(), value.to_owned())]))
}

fn expect_error(result: Result<TokenSettings, TokenConfigError>, label: &str) -> TokenConfigError {
    match result {
        Ok(settings) => panic!("{label}: got {settings:?}"),
        Err(error) => error,
    }
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn strong_secret_is_accepted(#[case] mode: BuildMode) {
    let settings =
        token_settings_from_env(&with_secret(STRONG_SECRET), mode).expect("strong secret");
    assert_eq!(settings.source, SecretSource::Environment);
    assert_eq!(settings.secret.as_slice(), STRONG_SECRET.as_bytes());
}

#[rstest]
fn release_missing_secret_is_rejected() {
    let err = expect_error(
        token_settings_from_env(&mock_env(HashMap::new()), BuildMode::Release),
        "missing secret must fail in release",
    );
    assert_eq!(err, TokenConfigError::MissingEnv { name: SECRET_ENV });
}

#[rstest]
fn release_empty_secret_counts_as_missing() {
    let err = expect_error(
        token_settings_from_env(&with_secret(""), BuildMode::Release),
        "empty secret must fail in release",
    );
    assert_eq!(err, TokenConfigError::MissingEnv { name: SECRET_ENV });
}

#[rstest]
#[case("short")]
#[case(&STRONG_SECRET[..TOKEN_SECRET_MIN_LEN - 1])]
fn release_short_secret_is_rejected(#[case] secret: &str) {
    let err = expect_error(
        token_settings_from_env(&with_secret(secret), BuildMode::Release),
        "short secret must fail in release",
    );
    assert_eq!(
        err,
        TokenConfigError::SecretTooShort {
            name: SECRET_ENV,
            length: secret.len(),
            min_len: TOKEN_SECRET_MIN_LEN,
        }
    );
}

#[rstest]
fn debug_missing_secret_uses_development_default() {
    let settings = token_settings_from_env(&mock_env(HashMap::new()), BuildMode::Debug)
        .expect("debug falls back");
    assert_eq!(settings.source, SecretSource::DevelopmentDefault);
    assert_eq!(settings.secret.as_slice(), DEVELOPMENT_SECRET.as_bytes());
}

#[rstest]
fn debug_short_secret_is_tolerated() {
    let settings =
        token_settings_from_env(&with_secret("short"), BuildMode::Debug).expect("debug tolerates");
    assert_eq!(settings.source, SecretSource::Environment);
    assert_eq!(settings.secret.as_slice(), b"short");
}

#[rstest]
fn debug_output_hides_the_secret() {
    let settings =
        token_settings_from_env(&with_secret(STRONG_SECRET), BuildMode::Release).expect("valid");
    let rendered = format!("{settings:?}");
    assert!(!rendered.contains(STRONG_SECRET));
    assert!(rendered.contains("secret_len: 32"));
}
