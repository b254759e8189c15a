// Configuration loading

pub mod settings;

pub use settings::{ConfigError, EmailSettings, MailTransportKind, ReportSettings, Settings};
