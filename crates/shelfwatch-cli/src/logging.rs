use std::path::PathBuf;
use std::sync::Mutex;

use shelfwatch_core::AppConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber: stderr always, plus a plain-text file
/// under `log_dir` when one is configured.
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// Returns the log file path, if any.
pub(crate) fn init(config: &AppConfig) -> anyhow::Result<Option<PathBuf>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;

    let console = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, path) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let path = dir.join(log_file_name(chrono::Local::now().naive_local()));
            let file = std::fs::File::create(&path)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file_layer)
        .try_init()?;

    Ok(path)
}

fn log_file_name(now: chrono::NaiveDateTime) -> String {
    format!("scraping_log_{}.txt", now.format("%Y-%m-%d_%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_name_is_timestamped() {
        let now = chrono::NaiveDate::from_ymd_opt(2024, 11, 2)
            .unwrap()
            .and_hms_opt(23, 4, 5)
            .unwrap();
        assert_eq!(log_file_name(now), "scraping_log_2024-11-02_23-04-05.txt");
    }
}
