use crate::server;
use crate::underwrite::{run_evaluate, run_policy, EvaluateArgs, PolicyArgs};
use clap::{Args, Parser, Subcommand};
use underwriter::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Underwriting Agent",
    about = "Evaluate loan applications against a lending policy document",
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
    /// Evaluate one application against a policy document
    Evaluate(EvaluateArgs),
    /// Show the structured policy extracted from a policy document
    Policy(PolicyArgs),
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
        Command::Evaluate(args) => run_evaluate(args).await,
        Command::Policy(args) => run_policy(args).await,
    }
}
