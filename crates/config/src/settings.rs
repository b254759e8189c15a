// Application settings
// Loaded from ~/.config/carsales/settings.toml

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ConfigError {
    /// Settings file could not be read.
    Read { path: String, message: String },
    /// TOML parse / deserialization error.
    Parse(String),
    /// No recipient configured and no user name to derive one from.
    NoRecipient,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read {path}: {message}"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::NoRecipient => {
                write!(f, "no email recipient configured and $USER is not set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// How the report email leaves the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransportKind {
    /// Pipe to the local MTA's sendmail binary (default)
    #[default]
    Sendmail,
    /// Write .eml files into a directory
    Outbox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Title printed at the top of the report
    pub title: String,

    /// Where the report artifact is written; format follows the extension
    pub path: PathBuf,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "Cars Report".to_string(),
            path: std::env::temp_dir().join("cars.xlsx"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    /// Send the report at the end of `run`
    pub enabled: bool,

    pub sender: String,

    /// Empty = "<$USER>@example.com"
    pub recipient: String,

    pub subject: String,

    pub transport: MailTransportKind,

    /// sendmail binary name or path (Sendmail transport)
    pub sendmail: String,

    /// Directory for .eml files (Outbox transport)
    pub outbox_dir: PathBuf,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            sender: "automation@example.com".to_string(),
            recipient: String::new(),
            subject: "Sales summary for last month".to_string(),
            transport: MailTransportKind::Sendmail,
            sendmail: "sendmail".to_string(),
            outbox_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("carsales")
                .join("outbox"),
        }
    }
}

impl EmailSettings {
    /// The configured recipient, or `<user>@example.com` when none is set.
    pub fn resolve_recipient(&self, user: Option<&str>) -> Result<String, ConfigError> {
        let configured = self.recipient.trim();
        if !configured.is_empty() {
            return Ok(configured.to_string());
        }
        match user.map(str::trim) {
            Some(user) if !user.is_empty() => Ok(format!("{user}@example.com")),
            _ => Err(ConfigError::NoRecipient),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub report: ReportSettings,
    pub email: EmailSettings,
}

impl Settings {
    /// Default settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("carsales")
            .join("settings.toml")
    }

    /// Parse settings from a TOML string. Missing keys take their defaults.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load an explicit settings file. The file must exist.
    ///
    /// Relative paths inside the file resolve against the file's directory.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut settings = Self::from_toml(&contents)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        settings.resolve_relative(base_dir);
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    fn resolve_relative(&mut self, base_dir: &Path) {
        if self.report.path.is_relative() {
            self.report.path = base_dir.join(&self.report.path);
        }
        if self.email.outbox_dir.is_relative() {
            self.email.outbox_dir = base_dir.join(&self.email.outbox_dir);
        }
    }
}
