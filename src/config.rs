use std::env;

use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    /// Directory for the rolling daily log file.
    pub log_dir: String,
    /// Default look-back window for performance reports when the caller
    /// gives no explicit range.
    pub report_window_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            report_window_days: env::var("REPORT_WINDOW_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        }
    }
}
