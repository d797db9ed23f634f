use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;
use std::time::Duration;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SHELFWATCH_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();

    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.log_dir.is_none());
    assert_eq!(cfg.base_url, "https://zakupy.biedronka.pl");
    assert_eq!(
        cfg.categories_path,
        PathBuf::from("./config/categories.yaml")
    );
    assert_eq!(cfg.output_dir, PathBuf::from("./results"));
    assert!(cfg.chrome_path.is_none());
    assert!(cfg.headless);
    assert_eq!(cfg.timings.first_page_settle, Duration::from_millis(5000));
    assert_eq!(cfg.timings.scroll_settle, Duration::from_millis(2000));
    assert_eq!(cfg.timings.ready_timeout, Duration::from_secs(15));
    assert_eq!(cfg.max_pages, 200);
}

#[test]
fn default_timings_match_config_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.timings, ScrapeTimings::default());
}

#[test]
fn base_url_trailing_slash_is_stripped() {
    let mut map = HashMap::new();
    map.insert("SHELFWATCH_BASE_URL", "https://shop.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, "https://shop.example.com");
}

#[test]
fn base_url_without_scheme_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SHELFWATCH_BASE_URL", "shop.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFWATCH_BASE_URL"),
        "expected InvalidEnvVar(SHELFWATCH_BASE_URL), got: {result:?}"
    );
}

#[test]
fn base_url_scheme_only_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SHELFWATCH_BASE_URL", "https://");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn settle_delays_override() {
    let mut map = HashMap::new();
    map.insert("SHELFWATCH_FIRST_PAGE_SETTLE_MS", "0");
    map.insert("SHELFWATCH_SCROLL_SETTLE_MS", "750");
    map.insert("SHELFWATCH_READY_TIMEOUT_SECS", "30");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.timings.first_page_settle, Duration::ZERO);
    assert_eq!(cfg.timings.scroll_settle, Duration::from_millis(750));
    assert_eq!(cfg.timings.ready_timeout, Duration::from_secs(30));
}

#[test]
fn scroll_settle_invalid() {
    let mut map = HashMap::new();
    map.insert("SHELFWATCH_SCROLL_SETTLE_MS", "two seconds");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFWATCH_SCROLL_SETTLE_MS"),
        "expected InvalidEnvVar(SHELFWATCH_SCROLL_SETTLE_MS), got: {result:?}"
    );
}

#[test]
fn max_pages_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SHELFWATCH_MAX_PAGES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFWATCH_MAX_PAGES"),
        "expected InvalidEnvVar(SHELFWATCH_MAX_PAGES), got: {result:?}"
    );
}

#[test]
fn max_pages_override() {
    let mut map = HashMap::new();
    map.insert("SHELFWATCH_MAX_PAGES", "12");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_pages, 12);
}

#[test]
fn headless_accepts_common_spellings() {
    for (raw, expected) in [("false", false), ("0", false), ("OFF", false), ("yes", true)] {
        let mut map = HashMap::new();
        map.insert("SHELFWATCH_HEADLESS", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.headless, expected, "SHELFWATCH_HEADLESS={raw}");
    }
}

#[test]
fn headless_invalid() {
    let mut map = HashMap::new();
    map.insert("SHELFWATCH_HEADLESS", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFWATCH_HEADLESS"),
        "expected InvalidEnvVar(SHELFWATCH_HEADLESS), got: {result:?}"
    );
}

#[test]
fn blank_optional_paths_are_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("SHELFWATCH_LOG_DIR", "   ");
    map.insert("SHELFWATCH_CHROME_PATH", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.log_dir.is_none());
    assert!(cfg.chrome_path.is_none());
}

#[test]
fn optional_paths_override() {
    let mut map = HashMap::new();
    map.insert("SHELFWATCH_LOG_DIR", "logs");
    map.insert("SHELFWATCH_CHROME_PATH", "/usr/bin/chromium");
    map.insert("SHELFWATCH_OUTPUT_DIR", "wyniki");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_dir, Some(PathBuf::from("logs")));
    assert_eq!(cfg.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
    assert_eq!(cfg.output_dir, PathBuf::from("wyniki"));
}
