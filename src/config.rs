use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::cli::Cli;
use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_FILE: &str = ".devassist.toml";
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_MODELS: &[&str] = &["gpt-4", "gpt-3.5-turbo"];
pub const DEFAULT_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub components_dir: Option<String>,
    pub reports_dir: Option<String>,
    pub tests_dir: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub api_url: Option<String>,
    pub models: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    pub api_key_env: Option<String>,
    pub prompts_dir: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct Config {
    /// Project root; every other directory is relative to it.
    pub root: PathBuf,
    pub components_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub tests_dir: PathBuf,
    pub extensions: Vec<String>,
    pub api_url: String,
    pub models: Vec<String>,
    pub timeout: Duration,
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub prompts_dir: Option<PathBuf>,
}

// Hand-written so the credential never reaches the logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("root", &self.root)
            .field("components_dir", &self.components_dir)
            .field("reports_dir", &self.reports_dir)
            .field("tests_dir", &self.tests_dir)
            .field("extensions", &self.extensions)
            .field("api_url", &self.api_url)
            .field("models", &self.models)
            .field("timeout", &self.timeout)
            .field("api_key_env", &self.api_key_env)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("prompts_dir", &self.prompts_dir)
            .finish()
    }
}

impl Config {
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = PathBuf::from(cli.root.as_deref().unwrap_or("."));

        let file_config = match cli.config {
            Some(ref explicit) => {
                let path = Path::new(explicit);
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.to_path_buf()));
                }
                parse_config(&std::fs::read_to_string(path)?)?
            }
            None => {
                let path = root.join(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    parse_config(&std::fs::read_to_string(&path)?)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        let mut config = merge(file_config, cli);
        validate(&config)?;
        config.api_key = resolve_api_key(&config.api_key_env);
        Ok(config)
    }

    pub fn components_path(&self) -> PathBuf {
        self.root.join(&self.components_dir)
    }

    pub fn reports_path(&self) -> PathBuf {
        self.root.join(&self.reports_dir)
    }

    pub fn tests_path(&self) -> PathBuf {
        self.root.join(&self.tests_dir)
    }
}

/// Read the credential from the environment. Absent or blank disables the remote path.
pub fn resolve_api_key(api_key_env: &str) -> Option<String> {
    match std::env::var(api_key_env) {
        Ok(key) if !key.trim().is_empty() => Some(key.trim().to_string()),
        _ => {
            warn!("{api_key_env} not found, using fallback heuristics");
            None
        }
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    // Discovered paths are mirrored under tests_dir, so they must stay relative to root.
    if config.components_dir.is_absolute()
        || config
            .components_dir
            .components()
            .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(Error::ConfigValidation(format!(
            "components_dir must be a relative path inside the root, got: {}",
            config.components_dir.display()
        )));
    }
    if config.models.is_empty() {
        return Err(Error::ConfigValidation(
            "models must list at least one model".to_string(),
        ));
    }
    if config.models.iter().any(|m| m.trim().is_empty()) {
        return Err(Error::ConfigValidation(
            "model names must not be empty".to_string(),
        ));
    }
    if config.extensions.is_empty() {
        return Err(Error::ConfigValidation(
            "extensions must list at least one extension".to_string(),
        ));
    }
    if config.timeout.is_zero() {
        return Err(Error::ConfigValidation(
            "timeout_secs must be > 0".to_string(),
        ));
    }
    if !(config.api_url.starts_with("http://") || config.api_url.starts_with("https://")) {
        return Err(Error::ConfigValidation(format!(
            "api_url must be an http(s) URL, got: {}",
            config.api_url
        )));
    }
    Ok(())
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn merge(file: ConfigFile, cli: &Cli) -> Config {
    let models = if cli.models.is_empty() {
        file.models.unwrap_or_else(|| owned(DEFAULT_MODELS))
    } else {
        cli.models.clone()
    };

    Config {
        root: PathBuf::from(cli.root.as_deref().unwrap_or(".")),
        components_dir: cli
            .components_dir
            .clone()
            .or(file.components_dir)
            .unwrap_or_else(|| "src/components".to_string())
            .into(),
        reports_dir: cli
            .reports_dir
            .clone()
            .or(file.reports_dir)
            .unwrap_or_else(|| "reports".to_string())
            .into(),
        tests_dir: cli
            .tests_dir
            .clone()
            .or(file.tests_dir)
            .unwrap_or_else(|| "tests".to_string())
            .into(),
        extensions: file
            .extensions
            .unwrap_or_else(|| owned(DEFAULT_EXTENSIONS))
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect(),
        api_url: cli
            .api_url
            .clone()
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        models,
        timeout: Duration::from_secs(
            cli.timeout_secs
                .or(file.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
        api_key_env: file
            .api_key_env
            .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string()),
        api_key: None,
        prompts_dir: cli.prompts_dir.clone().or(file.prompts_dir).map(PathBuf::from),
    }
}
