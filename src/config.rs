use crate::report::{MIN_WIDTH, ReportStyle};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "cpureport.toml";
pub const MAX_WIDTH: usize = 400;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Box,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: OutputFormat,
    /// Inner width of the box in terminal columns.
    pub width: usize,
    pub color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Box,
            width: 100,
            color: true,
        }
    }
}

impl ReportConfig {
    pub fn style(&self) -> ReportStyle {
        ReportStyle {
            width: self.width,
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

impl AppConfig {
    /// Load from `CONFIG_FILE` or `cpureport.toml`; a missing file means defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(s) => Self::load_from_str(&s)
                .map_err(|e| anyhow::anyhow!("config {}: {}", path.display(), e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(anyhow::anyhow!("config {}: {}", path.display(), e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (MIN_WIDTH..=MAX_WIDTH).contains(&self.report.width),
            "report.width must be between {} and {}, got {}",
            MIN_WIDTH,
            MAX_WIDTH,
            self.report.width
        );
        anyhow::ensure!(
            !self.logging.level.trim().is_empty(),
            "logging.level must be non-empty"
        );
        anyhow::ensure!(
            tracing_subscriber::EnvFilter::try_new(&self.logging.level).is_ok(),
            "logging.level is not a valid filter: {}",
            self.logging.level
        );
        Ok(())
    }
}
