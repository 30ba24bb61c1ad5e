//! Test results uploader - CI step entry point.
//!
//! Collects test results for the current build and uploads them in one request.

use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use test_results_uploader::config::Config;
use test_results_uploader::services::{self, HttpSink};

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging; stdout is reserved for the server response
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - BITRISE_BUILD_SLUG must be set");
            error!("  - HOME must be set unless TRU_DERIVED_DATA_DIR is given");
            std::process::exit(1);
        }
    };

    info!("Build: {}", config.build_slug);
    info!("Source directory: {:?}", config.source_dir);
    info!("Derived data directory: {:?}", config.derived_data_dir);

    let sink = match HttpSink::new(config.endpoint.clone(), config.http_timeout) {
        Ok(sink) => sink,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    match services::run(&config, &sink) {
        Ok(response) => {
            println!("{}", response);
            println!();
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
