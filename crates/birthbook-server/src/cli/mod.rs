use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "birthbook-server")]
#[command(about = "Birthbook user record service")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Print OpenAPI spec (optionally to a file)
    Openapi(OpenApiArgs),
}

#[derive(Args)]
struct OpenApiArgs {
    #[arg(long, short)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Server,
    Migrate,
    OpenApi { out: Option<PathBuf> },
}

impl From<Cli> for RunMode {
    fn from(cli: Cli) -> Self {
        match cli.command {
            None | Some(Command::Serve) => Self::Server,
            Some(Command::Migrate) => Self::Migrate,
            Some(Command::Openapi(args)) => Self::OpenApi { out: args.out },
        }
    }
}

pub fn parse_args() -> RunMode {
    Cli::parse().into()
}
