use clap::Parser;
use gozcu::Panel;
use gozcu::core::config;
use gozcu::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "gozcu", about = "Chatbot admin console and chat client")]
struct Args {
    /// Panel to open at startup
    #[arg(short, long, default_value_t, value_enum)]
    panel: Panel,

    /// Backend REST API base URL (e.g. http://localhost:5000/api)
    #[arg(long)]
    api_url: Option<String>,

    /// Bot webhook base URL (e.g. http://localhost:5005)
    #[arg(long)]
    bot_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to gozcu.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("gozcu.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("gozcu: {e}");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
        }
    };
    let resolved = config::resolve(
        &file_config,
        args.api_url.as_deref(),
        args.bot_url.as_deref(),
    );

    log::info!(
        "Gozcu starting up: panel={:?}, backend={}, bot={}",
        args.panel,
        resolved.backend_base_url,
        resolved.bot_base_url
    );

    tui::run(args.panel, resolved)
}
