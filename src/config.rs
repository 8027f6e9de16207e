//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::pricing::money::CurrencyCode;
use crate::rates::{DEFAULT_RATE_URL, FALLBACK_KZT_RUB};
use crate::steam::client::STEAM_STORE_BASE;
use crate::steam::regions::Region;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Home storefront region
    #[serde(default)]
    pub region: Region,

    /// Region compared against the home region
    #[serde(default = "default_compare_region")]
    pub compare_region: Region,

    /// Currency both sides are converted to before comparing
    #[serde(default = "default_display_currency")]
    pub display_currency: CurrencyCode,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Base delay between storefront requests in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Storefront base URL
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// Rate source URL template with `{from}` / `{to}` placeholders
    #[serde(default = "default_rate_url")]
    pub rate_url: String,

    /// KZT -> RUB rate used when the rate source fails
    #[serde(default = "default_fallback_rate")]
    pub fallback_rate: f64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// How annotation parts are joined
    #[serde(default)]
    pub layout: AnnotationLayout,
}

fn default_compare_region() -> Region {
    Region::Kz
}

fn default_display_currency() -> CurrencyCode {
    CurrencyCode::Rub
}

fn default_delay_ms() -> u64 {
    250
}

fn default_delay_jitter_ms() -> u64 {
    250
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_store_url() -> String {
    STEAM_STORE_BASE.to_string()
}

fn default_rate_url() -> String {
    DEFAULT_RATE_URL.to_string()
}

fn default_fallback_rate() -> f64 {
    FALLBACK_KZT_RUB
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: Region::Ru,
            compare_region: default_compare_region(),
            display_currency: default_display_currency(),
            proxy: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            timeout_secs: default_timeout_secs(),
            store_url: default_store_url(),
            rate_url: default_rate_url(),
            fallback_rate: default_fallback_rate(),
            format: OutputFormat::Table,
            layout: AnnotationLayout::Inline,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("steam-price-compare").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(region) = std::env::var("STEAM_REGION") {
            if let Ok(r) = region.parse() {
                self.region = r;
            }
        }

        if let Ok(region) = std::env::var("STEAM_COMPARE_REGION") {
            if let Ok(r) = region.parse() {
                self.compare_region = r;
            }
        }

        if let Ok(proxy) = std::env::var("STEAM_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("STEAM_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(url) = std::env::var("STEAM_RATE_URL") {
            self.rate_url = url;
        }

        self
    }

    /// Returns the region a price seen in `region` is compared against.
    ///
    /// The configured pair maps onto each other; any other region is compared
    /// against the compare region.
    pub fn counterpart(&self, region: Region) -> Region {
        if region == self.compare_region {
            self.region
        } else {
            self.compare_region
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Annotation,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "annotation" | "text" => Ok(OutputFormat::Annotation),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: {}. Use: table, annotation, json, markdown, csv",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Annotation => write!(f, "annotation"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Placement of annotation parts relative to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLayout {
    /// One line, parts joined with ` | `
    #[default]
    Inline,
    /// One part per line
    Below,
}

impl AnnotationLayout {
    pub fn separator(&self) -> &'static str {
        match self {
            AnnotationLayout::Inline => " | ",
            AnnotationLayout::Below => "\n",
        }
    }
}

impl std::str::FromStr for AnnotationLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" => Ok(AnnotationLayout::Inline),
            "below" => Ok(AnnotationLayout::Below),
            _ => Err(format!("Unknown layout: {}. Use: inline, below", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Environment variables are process-wide
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.region, Region::Ru);
        assert_eq!(config.compare_region, Region::Kz);
        assert_eq!(config.display_currency, CurrencyCode::Rub);
        assert_eq!(config.delay_ms, 250);
        assert_eq!(config.delay_jitter_ms, 250);
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.store_url, STEAM_STORE_BASE);
        assert_eq!(config.rate_url, DEFAULT_RATE_URL);
        assert_eq!(config.fallback_rate, FALLBACK_KZT_RUB);
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.layout, AnnotationLayout::Inline);
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_counterpart() {
        let config = Config::default();
        assert_eq!(config.counterpart(Region::Ru), Region::Kz);
        assert_eq!(config.counterpart(Region::Kz), Region::Ru);
        assert_eq!(config.counterpart(Region::Us), Region::Kz);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Annotation);
        assert_eq!("annotation".parse::<OutputFormat>().unwrap(), OutputFormat::Annotation);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        let err = "invalid".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Annotation.to_string(), "annotation");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_layout_parsing() {
        assert_eq!("inline".parse::<AnnotationLayout>().unwrap(), AnnotationLayout::Inline);
        assert_eq!("Below".parse::<AnnotationLayout>().unwrap(), AnnotationLayout::Below);
        assert!("sideways".parse::<AnnotationLayout>().is_err());
        assert_eq!(AnnotationLayout::Below.separator(), "\n");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            region = "kz"
            compare_region = "ru"
            display_currency = "KZT"
            delay_ms = 1000
            fallback_rate = 0.16
            format = "annotation"
            layout = "below"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.region, Region::Kz);
        assert_eq!(config.compare_region, Region::Ru);
        assert_eq!(config.display_currency, CurrencyCode::Kzt);
        assert_eq!(config.delay_ms, 1000);
        assert_eq!(config.fallback_rate, 0.16);
        assert_eq!(config.format, OutputFormat::Annotation);
        assert_eq!(config.layout, AnnotationLayout::Below);
        // Untouched fields keep defaults
        assert_eq!(config.store_url, STEAM_STORE_BASE);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            region = "us"
            rate_url = "http://localhost/{{from}}"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.region, Region::Us);
        assert_eq!(config.rate_url, "http://localhost/{from}");
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let err = Config::from_file(file.path()).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"compare_region = "us""#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.compare_region, Region::Us);
    }

    #[test]
    fn test_config_with_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        let orig: Vec<_> = ["STEAM_REGION", "STEAM_COMPARE_REGION", "STEAM_DELAY", "STEAM_RATE_URL"]
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        std::env::set_var("STEAM_REGION", "kz");
        std::env::set_var("STEAM_COMPARE_REGION", "us");
        std::env::set_var("STEAM_DELAY", "900");
        std::env::set_var("STEAM_RATE_URL", "http://rates.local/{from}");

        let config = Config::new().with_env();
        assert_eq!(config.region, Region::Kz);
        assert_eq!(config.compare_region, Region::Us);
        assert_eq!(config.delay_ms, 900);
        assert_eq!(config.rate_url, "http://rates.local/{from}");

        for (key, value) in orig {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_config_with_env_invalid_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        let orig_region = std::env::var("STEAM_REGION").ok();
        let orig_delay = std::env::var("STEAM_DELAY").ok();

        std::env::set_var("STEAM_REGION", "atlantis");
        std::env::set_var("STEAM_DELAY", "soon");

        let config = Config::new().with_env();
        assert_eq!(config.region, Region::Ru);
        assert_eq!(config.delay_ms, 250);

        match orig_region {
            Some(v) => std::env::set_var("STEAM_REGION", v),
            None => std::env::remove_var("STEAM_REGION"),
        }
        match orig_delay {
            Some(v) => std::env::set_var("STEAM_DELAY", v),
            None => std::env::remove_var("STEAM_DELAY"),
        }
    }
}
