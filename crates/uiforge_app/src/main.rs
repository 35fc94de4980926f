mod platform;

use std::path::PathBuf;

use clap::Parser;
use platform::logging::LogDestination;
use platform::LaunchOptions;

/// UI Forge - terminal client for the component generation service
#[derive(Parser, Debug)]
#[command(name = "uiforge")]
#[command(about = "Generate UI components from descriptions and prompt strategies", long_about = None)]
struct Args {
    /// Page to open, e.g. `/` or `/result-view?history_id=42`
    #[arg(value_name = "ROUTE", default_value = "/")]
    route: String,

    /// Backend base URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    backend: Option<String>,

    /// Config file (default: ./uiforge.ron)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where log output goes
    #[arg(long, value_enum)]
    log: Option<LogDestination>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    platform::run_app(LaunchOptions {
        route: args.route,
        backend_url: args.backend,
        config_path: args.config,
        log_destination: args.log,
    })
}
