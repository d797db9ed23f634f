use crate::app_config::{AppConfig, Environment, ScrapeTimings};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;
    use std::time::Duration;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got '{other}'"),
            }),
        }
    };

    let env = parse_environment(&or_default("SHELFWATCH_ENV", "development"))?;
    let log_level = or_default("SHELFWATCH_LOG_LEVEL", "info");
    let log_dir = lookup("SHELFWATCH_LOG_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let base_url = parse_base_url(&or_default(
        "SHELFWATCH_BASE_URL",
        "https://zakupy.biedronka.pl",
    ))?;
    let categories_path = PathBuf::from(or_default(
        "SHELFWATCH_CATEGORIES_PATH",
        "./config/categories.yaml",
    ));
    let output_dir = PathBuf::from(or_default("SHELFWATCH_OUTPUT_DIR", "./results"));
    let chrome_path = lookup("SHELFWATCH_CHROME_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let headless = parse_bool("SHELFWATCH_HEADLESS", "true")?;

    let timings = ScrapeTimings {
        first_page_settle: Duration::from_millis(parse_u64(
            "SHELFWATCH_FIRST_PAGE_SETTLE_MS",
            "5000",
        )?),
        scroll_settle: Duration::from_millis(parse_u64("SHELFWATCH_SCROLL_SETTLE_MS", "2000")?),
        ready_timeout: Duration::from_secs(parse_u64("SHELFWATCH_READY_TIMEOUT_SECS", "15")?),
    };

    let max_pages = parse_u32("SHELFWATCH_MAX_PAGES", "200")?;
    if max_pages == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHELFWATCH_MAX_PAGES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        log_dir,
        base_url,
        categories_path,
        output_dir,
        chrome_path,
        headless,
        timings,
        max_pages,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHELFWATCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Validates the storefront base URL and strips any trailing slash so
/// category paths can be appended with a single `/`.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));

    match host {
        Some(h) if !h.is_empty() => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidEnvVar {
            var: "SHELFWATCH_BASE_URL".to_string(),
            reason: format!("'{raw}' is not an http(s) URL"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
