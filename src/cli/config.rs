// ABOUTME: Configuration management for the routeview application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::template::{EngineOptions, DEFAULT_TEMPLATE_DIR};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub templates: TemplatesConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub template_vars: HashMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Handlebars,
    Tera,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Handlebars => write!(f, "handlebars"),
            EngineKind::Tera => write!(f, "tera"),
        }
    }
}

impl FromStr for EngineKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "handlebars" | "hbs" | "mustache" => Ok(EngineKind::Handlebars),
            "tera" | "jinja" => Ok(EngineKind::Tera),
            other => Err(anyhow::anyhow!(
                "Unknown template engine '{}'. Expected 'handlebars' or 'tera'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default = "default_template_dir")]
    pub directory: PathBuf,

    #[serde(default)]
    pub engine: EngineKind,

    #[serde(flatten)]
    pub options: EngineOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_template_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE_DIR)
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            directory: default_template_dir(),
            engine: EngineKind::default(),
            options: EngineOptions::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4567,
        }
    }
}

impl ServerConfig {
    /// Resolve host and port to the first matching socket address
    pub async fn socket_addr(&self) -> Result<SocketAddr> {
        let mut addrs = tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| anyhow::anyhow!("Invalid server address {}:{}: {}", self.host, self.port, e))?;

        addrs
            .next()
            .ok_or_else(|| anyhow::anyhow!("No address found for {}:{}", self.host, self.port))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            Self::from_yaml(&contents)?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = vec![
            PathBuf::from("routeview.yaml"),
            PathBuf::from("routeview.yml"),
            PathBuf::from(".routeview.yaml"),
            PathBuf::from(".routeview.yml"),
        ];

        // Check current directory
        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        // Check home directory
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".routeview").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Return default path (may not exist)
        PathBuf::from("routeview.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Template configuration
        if let Some(dir) = lookup("ROUTEVIEW_TEMPLATE_DIR") {
            self.templates.directory = PathBuf::from(dir);
        }
        if let Some(engine) = lookup("ROUTEVIEW_ENGINE") {
            self.templates.engine = engine.parse()?;
        }
        if let Some(strict) = lookup("ROUTEVIEW_STRICT") {
            self.templates.options.strict = parse_bool(&strict)?;
        }

        // Server configuration
        if let Some(host) = lookup("ROUTEVIEW_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ROUTEVIEW_PORT") {
            self.server.port = port.parse()?;
        }

        // Logging configuration
        if let Some(level) = lookup("ROUTEVIEW_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("ROUTEVIEW_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Merge additional variables into template variables
    pub fn merge_variables(&mut self, vars: HashMap<String, String>) {
        self.template_vars.extend(vars);
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("Invalid boolean value '{}'", other)),
    }
}
