//! `carsales summary|report|run`: load, aggregate, write, email.

use std::path::{Path, PathBuf};

use carsales_config::{MailTransportKind, Settings};
use carsales_engine::{aggregate, ReportTable, SalesRecord, Summary};
use carsales_io::{load_records, write_report, Report, ReportFormat};
use carsales_mail::{Attachment, Message, Outbox, Sendmail, Transport};

use crate::CliError;

pub struct RunArgs {
    pub data: PathBuf,
    pub output: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    pub config: Option<PathBuf>,
    pub to: Option<String>,
    pub no_email: bool,
    pub quiet: bool,
}

pub fn cmd_summary(data: PathBuf, json: bool) -> Result<(), CliError> {
    let (_, summary) = load_and_aggregate(&data)?;

    if json {
        let out = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::internal(format!("JSON serialization error: {e}")))?;
        println!("{out}");
    } else {
        println!("{}", summary.text());
    }
    Ok(())
}

pub fn cmd_report(
    data: PathBuf,
    output: Option<PathBuf>,
    format: Option<ReportFormat>,
    title: Option<String>,
    config: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let settings = load_settings(config.as_deref())?;
    let (records, summary) = load_and_aggregate(&data)?;
    println!("{}", summary.text());

    let path = output.unwrap_or_else(|| settings.report.path.clone());
    let title = title.unwrap_or_else(|| settings.report.title.clone());
    write_report_file(&path, format, title, &summary, &records, quiet)
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let settings = load_settings(args.config.as_deref())?;
    let (records, summary) = load_and_aggregate(&args.data)?;
    println!("{}", summary.text());

    let path = args.output.clone().unwrap_or_else(|| settings.report.path.clone());
    write_report_file(&path, args.format, settings.report.title.clone(), &summary, &records, args.quiet)?;

    if args.no_email || !settings.email.enabled {
        log::info!("email disabled; report left at {}", path.display());
        return Ok(());
    }

    let recipient = match args.to {
        Some(to) => to,
        None => {
            let user = std::env::var("USER").ok();
            settings.email.resolve_recipient(user.as_deref())?
        }
    };

    let message = Message::new(
        settings.email.sender.clone(),
        recipient,
        settings.email.subject.clone(),
        summary.text(),
    )?
    .with_attachment(Attachment::from_path(&path)?);

    let transport: Box<dyn Transport> = match settings.email.transport {
        MailTransportKind::Sendmail => Box::new(Sendmail::new(settings.email.sendmail.clone())),
        MailTransportKind::Outbox => Box::new(Outbox::new(settings.email.outbox_dir.clone())),
    };
    transport.send(&message)?;

    if !args.quiet {
        eprintln!("emailed {} to {}", path.display(), message.recipient);
    }
    Ok(())
}

fn load_settings(config: Option<&Path>) -> Result<Settings, CliError> {
    match config {
        Some(path) => Ok(Settings::load_from(path)?),
        None => Ok(Settings::load()),
    }
}

fn load_and_aggregate(data: &Path) -> Result<(Vec<SalesRecord>, Summary), CliError> {
    let records = load_records(data)?;
    let summary = aggregate(&records)?;
    log::debug!(
        "aggregated {} records across {} model years",
        summary.record_count,
        summary.year_totals.len()
    );
    Ok((records, summary))
}

fn write_report_file(
    path: &Path,
    format: Option<ReportFormat>,
    title: String,
    summary: &Summary,
    records: &[SalesRecord],
    quiet: bool,
) -> Result<(), CliError> {
    let format = match format.or_else(|| ReportFormat::from_path(path)) {
        Some(f) => f,
        None => {
            return Err(CliError::args(format!(
                "cannot infer report format from '{}'",
                path.display()
            ))
            .with_hint("use --format xlsx|csv|text or a .xlsx/.csv/.txt extension"))
        }
    };

    let report = Report::new(title, summary, ReportTable::from_records(records));
    write_report(path, format, &report)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;

    if !quiet {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
