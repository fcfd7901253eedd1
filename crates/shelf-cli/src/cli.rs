use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "shelf",
    about = "Read-only book catalog served by one worker process per core",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Address every worker binds (shared via SO_REUSEPORT)
    #[arg(long, global = true)]
    pub bind: Option<SocketAddr>,

    /// Catalog database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Number of workers (default: one per logical CPU)
    #[arg(long, global = true)]
    pub workers: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed the catalog, start the workers and supervise them (default)
    Serve,
    /// Serve the catalog API as one worker of a running coordinator
    #[command(hide = true)]
    Worker(WorkerArgs),
    /// Seed the catalog file and exit
    Seed,
    /// Print the effective configuration
    Config,
}

#[derive(Args, Debug)]
pub struct WorkerArgs {
    #[arg(long)]
    pub index: usize,
}

/// What this process is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Coordinator,
    Worker { index: usize },
    Seed,
    ShowConfig,
}

impl Cli {
    pub fn role(&self) -> Role {
        match &self.command {
            None | Some(Command::Serve) => Role::Coordinator,
            Some(Command::Worker(args)) => Role::Worker { index: args.index },
            Some(Command::Seed) => Role::Seed,
            Some(Command::Config) => Role::ShowConfig,
        }
    }
}
