use clap::Parser;
use std::fs::File;
use std::path::PathBuf;

use arbor::tui::Program;
use arbor::{AppConfig, AppRoot, ArborResult, ConfigSource, RootNode, RuntimeConfig};
use arbor_core::observability::init_tracing;

#[derive(Parser)]
#[command(name = "arbor", version)]
#[command(about = "Terminal program built as a tree of lifecycle-driven components", long_about = None)]
struct Cli {
    /// Configuration file (default: $HOME/.config/arbor/arbor.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show the configuration form even when the file is complete
    #[arg(long)]
    reconf: bool,

    /// Log file (default: <tmpdir>/arbor-<pid>.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(format!("arbor-{}.log", std::process::id()))
}

#[tokio::main]
async fn main() -> ArborResult<()> {
    let cli = Cli::parse();

    // The terminal belongs to the driver, so logs go to a file
    let log_path = cli.log_file.unwrap_or_else(default_log_path);
    init_tracing(File::create(&log_path)?, cli.debug)?;

    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::default_path()?,
    };

    println!("arbor v{}", env!("CARGO_PKG_VERSION"));
    println!("  log file:    {}", log_path.display());
    println!("  config file: {}", config_path.display());
    tracing::info!(config = %config_path.display(), reconf = cli.reconf, "Starting arbor");

    let runtime = RuntimeConfig::default();
    let source = ConfigSource::new(config_path).force_form(cli.reconf);
    let root = AppRoot::assemble(source, runtime.clone());
    let root = Program::new(root, runtime).run().await?;

    if let Some(err) = root.last_error() {
        tracing::error!(error = %err, "Exiting with error");
        eprintln!("application error: {}", err);
        std::process::exit(1);
    }

    tracing::info!("Exiting normally");
    Ok(())
}
