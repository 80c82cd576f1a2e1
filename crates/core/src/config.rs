use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `REVPULSE__`. The analytics contracts themselves are
/// argument-driven; configuration only feeds the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Attribution model key, one of the six catalog ids.
    #[serde(default = "default_model")]
    pub model: String,
    /// Trailing analysis window in days: 30, 90, 180, or 365.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Number of touchpoints returned by the ranking.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Cohort tracking horizon in months.
    #[serde(default = "default_months_to_track")]
    pub months_to_track: usize,
    /// Path to the JSON snapshot of input arrays.
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

// Default functions
fn default_model() -> String {
    "data_driven".to_string()
}
fn default_window_days() -> u32 {
    90
}
fn default_top_n() -> usize {
    10
}
fn default_months_to_track() -> usize {
    12
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            window_days: default_window_days(),
            top_n: default_top_n(),
            months_to_track: default_months_to_track(),
            snapshot_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("REVPULSE")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
