use serde::{Deserialize, Serialize};

use std::{env, fmt::Display, fs, path::Path, str::FromStr, time::Duration};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_SUMMARIZER_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_SUMMARIZER_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_MAX_LENGTH: u32 = 50;
pub const DEFAULT_MIN_LENGTH: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("Failed to parse {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(
        "Config file not found and environment variables are incomplete. \
         Tried: '{path}', 'config.yaml', 'config.example.yaml', and environment variables. \
         Error: {source}"
    )]
    NotFound {
        path: String,
        source: Box<ConfigError>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    pub database_dsn: String,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    #[serde(default = "default_min_length")]
    pub min_length: u32,
    /// No timeout when unset.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_token: None,
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
            timeout: None,
        }
    }
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_base_url() -> String {
    DEFAULT_SUMMARIZER_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_SUMMARIZER_MODEL.to_string()
}

const fn default_max_length() -> u32 {
    DEFAULT_MAX_LENGTH
}

const fn default_min_length() -> u32 {
    DEFAULT_MIN_LENGTH
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_dsn.trim().is_empty() {
            return Err(ConfigError::Invalid("database_dsn must not be empty".into()));
        }

        let summarizer = &self.summarizer;
        if summarizer.max_length == 0 {
            return Err(ConfigError::Invalid(
                "summarizer.max_length must be greater than zero".into(),
            ));
        }
        if summarizer.min_length > summarizer.max_length {
            return Err(ConfigError::Invalid(format!(
                "summarizer.min_length ({}) must not exceed summarizer.max_length ({})",
                summarizer.min_length, summarizer.max_length
            )));
        }

        Ok(())
    }
}

pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    lookup(name)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| ConfigError::InvalidVar {
                name,
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn load_from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let database_dsn = lookup("PG_DSN").ok_or(ConfigError::MissingVar("PG_DSN"))?;
    let port = parse_var(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);

    let summarizer = SummarizerConfig {
        base_url: lookup("SUMMARIZER_URL").unwrap_or_else(default_base_url),
        model: lookup("SUMMARIZER_MODEL").unwrap_or_else(default_model),
        api_token: lookup("SUMMARIZER_API_TOKEN").filter(|token| !token.is_empty()),
        max_length: parse_var(&lookup, "SUMMARY_MAX_LENGTH")?.unwrap_or(DEFAULT_MAX_LENGTH),
        min_length: parse_var(&lookup, "SUMMARY_MIN_LENGTH")?.unwrap_or(DEFAULT_MIN_LENGTH),
        timeout: parse_var::<humantime::Duration>(&lookup, "SUMMARIZER_TIMEOUT")?.map(Into::into),
    };

    let config = Config {
        port,
        database_dsn,
        summarizer,
    };
    config.validate()?;

    Ok(config)
}

fn load_from_file(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn load_config() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path = env::var("NOTES_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return load_from_file("config.yaml");
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return load_from_file("config.example.yaml");
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match load_from_vars(|name| env::var(name).ok()) {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(e) => Err(ConfigError::NotFound {
            path: config_path,
            source: Box::new(e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn yaml_with_only_dsn_uses_defaults() {
        let config = parse_config("database_dsn: \"host=db user=notes\"\n").unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.summarizer.model, DEFAULT_SUMMARIZER_MODEL);
        assert_eq!(config.summarizer.base_url, DEFAULT_SUMMARIZER_URL);
        assert_eq!(config.summarizer.max_length, 50);
        assert_eq!(config.summarizer.min_length, 10);
        assert!(config.summarizer.api_token.is_none());
        assert!(config.summarizer.timeout.is_none());
    }

    #[test]
    fn yaml_reads_humantime_timeout() {
        let yaml = r#"
port: 9000
database_dsn: "host=db"
summarizer:
  base_url: "http://localhost:8080"
  model: "sshleifer/distilbart-cnn-12-6"
  api_token: "hf_secret"
  max_length: 120
  min_length: 30
  timeout: 2m 30s
"#;
        let config = parse_config(yaml).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.summarizer.base_url, "http://localhost:8080");
        assert_eq!(config.summarizer.api_token.as_deref(), Some("hf_secret"));
        assert_eq!(config.summarizer.max_length, 120);
        assert_eq!(config.summarizer.timeout, Some(Duration::from_secs(150)));
    }

    #[test]
    fn yaml_without_dsn_is_rejected() {
        assert!(matches!(
            parse_config("port: 8000\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn min_length_above_max_length_is_rejected() {
        let yaml = "database_dsn: \"host=db\"\nsummarizer:\n  max_length: 5\n  min_length: 10\n";
        assert!(matches!(parse_config(yaml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_max_length_is_rejected() {
        let yaml = "database_dsn: \"host=db\"\nsummarizer:\n  max_length: 0\n  min_length: 0\n";
        assert!(matches!(parse_config(yaml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn env_requires_dsn() {
        assert!(matches!(
            load_from_vars(vars(&[("PORT", "8080")])),
            Err(ConfigError::MissingVar("PG_DSN"))
        ));
    }

    #[test]
    fn env_overrides_defaults() {
        let config = load_from_vars(vars(&[
            ("PG_DSN", "host=db"),
            ("PORT", "8081"),
            ("SUMMARIZER_MODEL", "google/pegasus-xsum"),
            ("SUMMARIZER_API_TOKEN", ""),
            ("SUMMARY_MAX_LENGTH", "80"),
            ("SUMMARIZER_TIMEOUT", "1m 15s"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.summarizer.model, "google/pegasus-xsum");
        assert!(config.summarizer.api_token.is_none());
        assert_eq!(config.summarizer.max_length, 80);
        assert_eq!(config.summarizer.min_length, DEFAULT_MIN_LENGTH);
        assert_eq!(config.summarizer.timeout, Some(Duration::from_secs(75)));
    }

    #[test]
    fn env_rejects_timeout_without_unit() {
        let err = load_from_vars(vars(&[("PG_DSN", "host=db"), ("SUMMARIZER_TIMEOUT", "15")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidVar {
                name: "SUMMARIZER_TIMEOUT",
                ..
            }
        ));
    }

    #[test]
    fn env_reports_unparsable_numbers() {
        let err = load_from_vars(vars(&[("PG_DSN", "host=db"), ("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "PORT", .. }));
    }
}
