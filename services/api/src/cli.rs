use crate::infra::{build_report, load_snapshot, AnalysisArgs};
use crate::render::{render_interview_types, render_report};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hiring_funnel::config::AppConfig;
use hiring_funnel::error::AppError;
use hiring_funnel::funnel::{filter_scope, write_calibration_csv};
use hiring_funnel::telemetry;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Hiring Funnel",
    about = "Analyze a Greenhouse hiring funnel from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the funnel, disagreement and interviewer report
    Report(ReportArgs),
    /// List the department's interview types and the stage each maps to
    InterviewTypes(AnalysisArgs),
    /// Write interviewer calibration as CSV
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) analysis: AnalysisArgs,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    analysis: AnalysisArgs,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Destination CSV file (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    analysis: AnalysisArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args).await,
        Command::InterviewTypes(args) => run_interview_types(args).await,
        Command::Export(args) => run_export(args).await,
    }
}

fn prepare(args: AnalysisArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    args.apply(&mut config)?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = prepare(args.analysis)?;
    let report = build_report(&config).await?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_report(&report);
    }
    Ok(())
}

async fn run_interview_types(args: AnalysisArgs) -> Result<(), AppError> {
    let config = prepare(args)?;
    let snapshot = load_snapshot(&config).await?;
    let scope = filter_scope(&snapshot, &config.funnel.department, &config.funnel.stage_map)?;

    render_interview_types(&scope.department.name, &scope.interview_types);
    Ok(())
}

async fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let config = prepare(args.analysis)?;
    let report = build_report(&config).await?;

    match args.output {
        Some(path) => {
            write_calibration_csv(File::create(&path)?, &report.interviewers)?;
            tracing::info!(
                path = %path.display(),
                rows = report.interviewers.len(),
                "wrote interviewer calibration"
            );
        }
        None => write_calibration_csv(std::io::stdout().lock(), &report.interviewers)?,
    }
    Ok(())
}
