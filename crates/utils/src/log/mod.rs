pub mod config;

pub use tracing::{
    debug, debug_span, error, error_span, event, info, info_span, span, trace,
    trace_span, warn, warn_span, Level, Subscriber,
};
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use self::config::LogConfig;

static INIT_ONCE: std::sync::Once = std::sync::Once::new();

impl LogConfig {
    /// Installs the global subscriber. Only the first call has effect.
    pub fn init(&self) {
        INIT_ONCE.call_once(|| {
            // Console log
            let console_filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(self.console_level.clone()))
                .expect("failed to create console logger filter");
            let console_layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_filter(console_filter);

            // File log
            if let Some(log_file) = self.file.clone() {
                let file_filter = EnvFilter::try_from_default_env()
                    .or_else(|_| EnvFilter::try_new(self.file_level.clone()))
                    .expect("failed to create file logger filter");
                let file_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(move || {
                        let file = std::fs::OpenOptions::new()
                            .create(true)
                            .append(true)
                            .open(&log_file)
                            .expect("failed to open log file");
                        Box::new(file) as Box<dyn std::io::Write + Send + Sync>
                    })
                    .with_filter(file_filter);
                tracing_subscriber::registry()
                    .with(console_layer)
                    .with(file_layer)
                    .init();
            } else {
                tracing_subscriber::registry().with(console_layer).init();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_log() {
        let log_file = NamedTempFile::new().unwrap();
        let cfg = LogConfig {
            console_level: "info".to_string(),
            file_level: "info".to_string(),
            file: Some(log_file.path().to_str().unwrap().to_string()),
        };
        cfg.init();
        info!(key = "word", "test log");
        debug!("should not exist");
        let mut log_content = String::new();
        log_file
            .reopen()
            .unwrap()
            .read_to_string(&mut log_content)
            .unwrap();
        assert!(log_content.contains("test log"));
        assert!(!log_content.contains("should not exist"));
    }
}
