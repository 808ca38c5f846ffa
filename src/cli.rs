use crate::report::{run_parameters, run_score, run_validate, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use geocubo::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "GeoCubo Hub",
    about = "Score real-estate development projects with the GeoCubo MCDA hierarchy",
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
    /// Inspect the MCDA hierarchy and score projects offline
    Mcda(McdaArgs),
}

#[derive(Args, Debug)]
struct McdaArgs {
    /// JSON hierarchy definition to use instead of the standard table
    #[arg(long, global = true)]
    hierarchy: Option<PathBuf>,
    #[command(subcommand)]
    command: McdaCommand,
}

#[derive(Subcommand, Debug)]
enum McdaCommand {
    /// List categories and parameters with their weights
    Parameters,
    /// Check that category and parameter weights each total 100
    Validate,
    /// Compute the composite score for a set of parameter evaluations
    Score(ScoreArgs),
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
        Command::Mcda(McdaArgs { hierarchy, command }) => match command {
            McdaCommand::Parameters => run_parameters(hierarchy),
            McdaCommand::Validate => run_validate(hierarchy),
            McdaCommand::Score(args) => run_score(hierarchy, args),
        },
    }
}
