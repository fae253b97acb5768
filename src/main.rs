use clap::Parser;
use page_harvest::{CrawlConfig, JsonFileSink, Sink};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Configure logging before the config is read so load warnings show up
    env_logger::Builder::new()
        .filter_level(::log::LevelFilter::Trace)
        .parse_default_env()
        .init();

    let mut config = match CrawlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load config {}: {}", args.config.display(), e);
            std::process::exit(1);
        }
    };
    args.apply(&mut config);

    // RUST_LOG, when set, takes precedence over the configured level
    if std::env::var_os("RUST_LOG").is_none() {
        ::log::set_max_level(config.log_level.as_filter());
    }

    ::log::info!(
        "Loaded configuration from {} ({} start URL(s))",
        args.config.display(),
        config.start_urls.len()
    );

    let outcome = match page_harvest::crawl(&config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            ::log::error!("Fatal error: {}", e);
            std::process::exit(1);
        }
    };

    let mut sink = JsonFileSink::new(&config.output_file);
    if let Err(e) = sink.write(&outcome.pages) {
        ::log::error!("Failed to save results to {}: {}", sink.path().display(), e);
        std::process::exit(1);
    }

    ::log::info!(
        "Crawl finished. Saved {} record(s) to {}",
        outcome.pages.len(),
        sink.path().display()
    );
}
