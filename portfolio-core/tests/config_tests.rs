//! Configuration accessor tests for `portfolio-core`.
//!
//! Every case builds its own [`Config`] from literal pairs; nothing here
//! touches the process environment.

use std::time::Duration;

use portfolio_core::config::{
    self, Config, DEFAULT_HTTP_TIMEOUT, DEFAULT_REGION, DEFAULT_SNAPSHOT_DIR,
};
use portfolio_core::{ConfigError, ServiceKind};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

#[rstest]
#[case("true", true)]
#[case("TRUE", true)]
#[case("True", true)]
#[case("false", false)]
#[case("1", false)]
#[case("yes", false)]
fn dry_run_flag_parsing(#[case] raw: &str, #[case] expected: bool) {
    let cfg = Config::from_pairs([(config::DRY_RUN, raw)]);
    assert_eq!(cfg.dry_run(), expected);
}

#[test]
fn flags_default_to_false() {
    let cfg = Config::default();
    assert!(!cfg.dry_run());
    assert!(!cfg.skip_npm_ci());
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn defaults_apply_when_unset() {
    let cfg = Config::default();
    assert_eq!(cfg.region(), DEFAULT_REGION);
    assert_eq!(cfg.http_timeout().expect("timeout"), DEFAULT_HTTP_TIMEOUT);
    assert_eq!(cfg.snapshot_dir(), std::path::PathBuf::from(DEFAULT_SNAPSHOT_DIR));
    assert!(cfg.distribution_id().is_none());
    assert!(cfg.s3_prefix().is_none());
}

#[rstest]
#[case("3", Some(Duration::from_secs(3)))]
#[case("0", None)]
#[case("abc", None)]
#[case("-1", None)]
fn http_timeout_parsing(#[case] raw: &str, #[case] expected: Option<Duration>) {
    let cfg = Config::from_pairs([(config::HTTP_TIMEOUT_SECS, raw)]);
    match expected {
        Some(d) => assert_eq!(cfg.http_timeout().expect("timeout"), d),
        None => assert!(matches!(
            cfg.http_timeout(),
            Err(ConfigError::Invalid { key: config::HTTP_TIMEOUT_SECS, .. })
        )),
    }
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[test]
fn services_skip_unset_bases() {
    let cfg = Config::from_pairs([
        (config::FORECAST_API_BASE, "https://forecast.example.com/"),
        (config::PORTFOLIO_API_BASE, "https://portfolio.example.com"),
    ]);
    let services = cfg.services().expect("services");
    let kinds: Vec<_> = services.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![ServiceKind::Forecast, ServiceKind::Portfolio]);
    assert_eq!(services[0].base_url, "https://forecast.example.com");
}

#[test]
fn no_services_is_a_config_error() {
    let err = Config::default().services().unwrap_err();
    assert!(matches!(err, ConfigError::NoServices { .. }), "got: {err}");
    assert!(err.to_string().contains("MONTE_API_BASE"));
}

#[test]
fn public_api_falls_back_to_portfolio_base() {
    let cfg = Config::from_pairs([(config::PORTFOLIO_API_BASE, "https://p.example.com")]);
    assert_eq!(cfg.public_api(), Some("https://p.example.com"));

    let cfg = Config::from_pairs([
        (config::PORTFOLIO_API_BASE, "https://p.example.com"),
        (config::NEXT_PUBLIC_PORTFOLIO_API, "https://public.example.com"),
    ]);
    assert_eq!(cfg.public_api(), Some("https://public.example.com"));
}

#[test]
fn missing_portfolio_names_the_key() {
    let err = Config::default().portfolio().unwrap_err();
    assert!(err.to_string().contains("PORTFOLIO_API_BASE"), "got: {err}");
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

#[rstest]
#[case(&[], true)]
#[case(&[(config::AWS_ACCESS_KEY_ID, "AKIA"), (config::AWS_SECRET_ACCESS_KEY, "s")], true)]
#[case(&[(config::AWS_ACCESS_KEY_ID, "AKIA")], false)]
#[case(&[(config::AWS_SECRET_ACCESS_KEY, "s")], false)]
fn credentials_must_be_paired(#[case] pairs: &[(&str, &str)], #[case] ok: bool) {
    let cfg = Config::from_pairs(pairs.iter().copied());
    assert_eq!(cfg.check_credentials().is_ok(), ok);
}
