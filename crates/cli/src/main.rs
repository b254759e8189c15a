// carsales CLI - sales summary, report artifact and report email

mod exit_codes;
mod sales;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use carsales_config::ConfigError;
use carsales_engine::SalesError;
use carsales_io::{LoadError, ReportFormat};
use carsales_mail::MailError;

use exit_codes::{
    sales_exit_code, EXIT_CONFIG, EXIT_DATA_SCHEMA, EXIT_ERROR, EXIT_IO, EXIT_MAIL, EXIT_SUCCESS,
    EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "carsales")]
#[command(about = "Summarize car sales data, write a report and email it")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the three-line sales summary
    #[command(after_help = "\
Examples:
  carsales summary car_sales.json
  carsales summary car_sales.json --json | jq .top_year")]
    Summary {
        /// Sales data (JSON array of records)
        data: PathBuf,

        /// Output the full summary as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write the report artifact and print the summary
    #[command(after_help = "\
Examples:
  carsales report car_sales.json -o cars.xlsx
  carsales report car_sales.json -o cars.csv
  carsales report car_sales.json -o report.out -f text --title 'March Sales'")]
    Report {
        /// Sales data (JSON array of records)
        data: PathBuf,

        /// Report file (default: report.path from settings)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Report format (inferred from extension if not specified)
        #[arg(long, short = 'f')]
        format: Option<Format>,

        /// Report title (default: report.title from settings)
        #[arg(long)]
        title: Option<String>,

        /// Settings file (default: ~/.config/carsales/settings.toml)
        #[arg(long, env = "CARSALES_CONFIG")]
        config: Option<PathBuf>,

        /// Suppress stderr status lines
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Summarize, write the report and email it
    #[command(after_help = "\
Email goes to email.recipient from settings, or $USER@example.com when unset.

Examples:
  carsales run car_sales.json
  carsales run car_sales.json --to ops@example.com
  carsales run car_sales.json --config settings.toml --no-email")]
    Run {
        /// Sales data (JSON array of records)
        data: PathBuf,

        /// Report file (default: report.path from settings)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Report format (inferred from extension if not specified)
        #[arg(long, short = 'f')]
        format: Option<Format>,

        /// Settings file (default: ~/.config/carsales/settings.toml)
        #[arg(long, env = "CARSALES_CONFIG")]
        config: Option<PathBuf>,

        /// Recipient address (overrides settings)
        #[arg(long)]
        to: Option<String>,

        /// Write the report but do not send it
        #[arg(long)]
        no_email: bool,

        /// Suppress stderr status lines
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Xlsx,
    Csv,
    Text,
}

impl From<Format> for ReportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Xlsx => ReportFormat::Xlsx,
            Format::Csv => ReportFormat::Csv,
            Format::Text => ReportFormat::Text,
        }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  carsales-engine ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Summary { data, json } => sales::cmd_summary(data, json),
        Commands::Report { data, output, format, title, config, quiet } => {
            sales::cmd_report(data, output, format.map(Into::into), title, config, quiet)
        }
        Commands::Run { data, output, format, config, to, no_email, quiet } => {
            sales::cmd_run(sales::RunArgs {
                data,
                output,
                format: format.map(Into::into),
                config,
                to,
                no_email,
                quiet,
            })
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<SalesError> for CliError {
    fn from(err: SalesError) -> Self {
        let hint = match &err {
            SalesError::MalformedPrice { .. } => {
                Some("prices must look like \"$1234.56\"".to_string())
            }
            SalesError::EmptyInput => Some("the data file is an empty JSON array".to_string()),
            _ => None,
        };
        Self { code: sales_exit_code(&err), message: err.to_string(), hint }
    }
}

impl From<LoadError> for CliError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Read { .. } => Self::io(err.to_string()),
            LoadError::Json(_) => Self { code: EXIT_DATA_SCHEMA, message: err.to_string(), hint: None },
            LoadError::Records(inner) => inner.into(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::NoRecipient => Some("pass --to or set email.recipient".to_string()),
            _ => None,
        };
        Self { code: EXIT_CONFIG, message: err.to_string(), hint }
    }
}

impl From<MailError> for CliError {
    fn from(err: MailError) -> Self {
        let hint = match &err {
            MailError::SendmailNotFound(_) => Some(
                "install an MTA, set email.sendmail, or use transport = \"outbox\"".to_string(),
            ),
            _ => None,
        };
        Self { code: EXIT_MAIL, message: err.to_string(), hint }
    }
}
