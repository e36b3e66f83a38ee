use crate::commands::{run_defaults, run_rank, run_validate, RankArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use sample_ordering::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Sample Ordering",
    about = "Rank tasting-session samples by weighted, configurable criteria",
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
    /// Check an ordering configuration file and list every issue found
    Validate(ValidateArgs),
    /// Rank a JSON array of samples with an ordering configuration
    Rank(RankArgs),
    /// Print the standard ordering configuration as JSON
    Defaults,
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
        Command::Validate(args) => run_validate(args),
        Command::Rank(args) => run_rank(args),
        Command::Defaults => run_defaults(),
    }
}
