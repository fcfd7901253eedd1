use std::ffi::OsString;

use anyhow::Context;
use colored::Colorize;
use shelf_fleet::{Coordinator, ProcessLauncher};
use shelf_server::WorkerServer;
use shelf_store::Seeder;

use crate::cli::{Cli, Role};
use crate::config::ShelfConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = ShelfConfig::resolve(&cli)?;
    match cli.role() {
        Role::Coordinator => cmd_serve(&cli, config),
        Role::Worker { index } => cmd_worker(config, index),
        Role::Seed => cmd_seed(config),
        Role::ShowConfig => cmd_config(config),
    }
}

/// Each process runs a single-threaded runtime; parallelism comes from
/// running one process per core.
fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")
}

fn cmd_serve(cli: &Cli, config: ShelfConfig) -> anyhow::Result<()> {
    let launcher = ProcessLauncher::current_exe()
        .context("locating own executable")?
        .args(worker_args(cli, &config));
    let coordinator = Coordinator::new(&config.server.db_path, config.fleet, Box::new(launcher));
    let report = runtime()?.block_on(coordinator.run())?;
    tracing::info!(
        workers = report.workers,
        killed = report.shutdown.killed,
        reason = report.stop_reason,
        "coordinator exiting"
    );
    Ok(())
}

/// Arguments that put a child into the worker role with this process's
/// settings. The launcher appends `--index`.
fn worker_args(cli: &Cli, config: &ShelfConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "worker".into(),
        "--bind".into(),
        config.server.bind_addr.to_string().into(),
        "--db".into(),
        config.server.db_path.clone().into_os_string(),
    ];
    if let Some(path) = &cli.config {
        args.push("--config".into());
        args.push(path.clone().into_os_string());
    }
    if cli.verbose {
        args.push("--verbose".into());
    }
    args
}

fn cmd_worker(config: ShelfConfig, index: usize) -> anyhow::Result<()> {
    let span = tracing::info_span!("worker", index, pid = std::process::id());
    let _guard = span.enter();
    let server = WorkerServer::new(config.server, index);
    runtime()?
        .block_on(server.serve())
        .with_context(|| format!("worker {index} failed"))
}

fn cmd_seed(config: ShelfConfig) -> anyhow::Result<()> {
    let path = &config.server.db_path;
    let report = Seeder::new(path)
        .run()
        .with_context(|| format!("seeding {}", path.display()))?;
    println!("{} Seeded {}", "✓".green().bold(), path.display().to_string().bold());
    println!("  Inserted: {}", report.inserted.to_string().yellow());
    println!("  Total:    {}", report.total);
    println!("  Journal:  {}", report.journal_mode.cyan());
    Ok(())
}

fn cmd_config(config: ShelfConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
