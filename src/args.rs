use clap::Parser;
use page_harvest::CrawlConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-harvest")]
#[command(about = "Bounded breadth-first crawler that turns HTML pages into JSON records")]
#[command(version)]
pub struct Args {
    /// Path to the JSON crawl configuration
    #[arg(default_value = "data/input.example.json")]
    pub config: PathBuf,

    /// Override the output file from the configuration
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the maximum crawl depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Override the maximum number of pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Override the delay between requests, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut CrawlConfig) {
        if let Some(output) = &self.output {
            config.output_file = output.clone();
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_example_config() {
        let args = Args::parse_from(["page-harvest"]);
        assert_eq!(args.config, PathBuf::from("data/input.example.json"));
        assert!(args.output.is_none());
    }

    #[test]
    fn test_overrides_applied() {
        let args = Args::parse_from([
            "page-harvest",
            "my.json",
            "--output",
            "out.json",
            "--max-depth",
            "4",
            "--max-pages",
            "7",
            "--delay-ms",
            "0",
        ]);
        let mut config = CrawlConfig::new(["https://example.com/"]);
        args.apply(&mut config);

        assert_eq!(args.config, PathBuf::from("my.json"));
        assert_eq!(config.output_file, PathBuf::from("out.json"));
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_pages, 7);
        assert_eq!(config.delay_ms, 0);
    }
}
