use clap::Parser;
use dojo::core::config::{self, CliOverrides, DojoConfig};
use dojo::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "dojo", about = "Terminal client for the Dojo blog")]
struct Args {
    /// Blog server base URL (overrides DOJO_BASE_URL and the config file)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Path to open on start, e.g. /blogs/1
    #[arg(short, long)]
    path: Option<String>,

    /// Delay before each fetch is dispatched, in milliseconds
    #[arg(long)]
    dispatch_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to dojo.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("dojo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, falling back to defaults", e);
        DojoConfig::default()
    });
    let overrides = CliOverrides {
        base_url: args.base_url,
        start_path: args.path,
        dispatch_delay_ms: args.dispatch_delay_ms,
    };
    let resolved = config::resolve(&file_config, &overrides);

    log::info!(
        "Dojo starting up against {} at {}",
        resolved.base_url,
        resolved.start_path
    );

    tui::run(resolved)
}
