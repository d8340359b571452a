use crate::audit::{run_audit, run_levels, AuditArgs, LevelsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pdf_a11y::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "PDF Accessibility Auditor",
    about = "Score PDF accessibility (WCAG / PDF-UA) and serve audits over HTTP",
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
    /// Audit a document from extracted facts and print the report
    Audit(AuditArgs),
    /// List the available analysis levels
    Levels(LevelsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Audit(args) => run_audit(args).await,
        Command::Levels(args) => run_levels(args),
    }
}
