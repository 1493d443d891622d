use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use ovnplot::config::{Format, Mode, PlotConfig};
use ovnplot::config_loader::{self, CliOverrides};
use ovnplot::orchestrator::plot_topology;
use ovnplot::topology::load_snapshot;

/// Plot an OVN northbound topology in a human readable way
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the northbound snapshot (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Optional YAML file with mode, filter and format
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The output format
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Show only nodes whose names match this regular expression
    #[arg(long)]
    filter: Option<String>,

    /// The naming conventions to apply
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Write the graph here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Logs go to stderr; stdout carries the graph
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str())).init();

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => PlotConfig::default(),
    };
    let overrides = CliOverrides {
        mode: args.mode,
        filter: args.filter.clone(),
        format: args.format,
    };
    config_loader::apply_cli_overrides(&mut config, &overrides)?;

    let snapshot = load_snapshot(&args.snapshot)?;
    let output = plot_topology(&snapshot, &config)
        .wrap_err_with(|| format!("Failed to plot '{}'", args.snapshot.display()))?;

    match &args.output {
        Some(path) => {
            fs::write(path, output + "\n")
                .wrap_err_with(|| format!("Failed to write output file '{}'", path.display()))?;
            info!("Graph written to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", output).wrap_err("Failed to write output")?;
        }
    }

    Ok(())
}
