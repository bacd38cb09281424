//! Command-line front end: scrape one URL, print the results, write the
//! export artifact.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use page_scraper::fetch::RetryPolicy;
use page_scraper::render::render_text;
use page_scraper::{ExportFormat, FetchConfig, LogProgress, ScrapeSession, ScrapeSettings};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "page-scraper", version, about = "Scrape tables, headlines, links and images from one web page")]
struct Cli {
    /// URL to scrape.
    url: String,

    /// Skip table extraction (on by default).
    #[arg(long)]
    no_tables: bool,

    /// Headline tags to collect, in this order (e.g. -H h1 -H h2). Enables headlines.
    #[arg(short = 'H', long = "headline", value_name = "TAG")]
    headline_tags: Vec<String>,

    /// Collect absolute links.
    #[arg(short, long)]
    links: bool,

    /// Collect image sources.
    #[arg(short, long)]
    images: bool,

    /// Collect the text of every element with this tag.
    #[arg(short = 't', long, value_name = "TAG")]
    custom_tag: Option<String>,

    /// Fetch through this proxy (http and https).
    #[arg(long, value_name = "URL")]
    proxy: Option<String>,

    /// Export format: json or xlsx.
    #[arg(short, long, default_value = "json")]
    format: ExportFormat,

    /// Directory the artifact is written to.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Print the JSON export to stdout instead of writing a file.
    #[arg(long)]
    stdout: bool,

    /// Request timeout in seconds (0 disables).
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Total fetch attempts.
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn settings(&self) -> ScrapeSettings {
        ScrapeSettings {
            scrape_tables: !self.no_tables,
            scrape_headlines: !self.headline_tags.is_empty(),
            headline_tags: self.headline_tags.clone(),
            scrape_links: self.links,
            scrape_images: self.images,
            custom_tag: self.custom_tag.clone(),
            use_proxy: self.proxy.is_some(),
            proxy_url: self.proxy.clone(),
        }
    }

    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            retry: RetryPolicy {
                max_attempts: self.retries.max(1),
                ..RetryPolicy::default()
            },
            timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
            ..FetchConfig::default()
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> page_scraper::Result<()> {
    let mut session = ScrapeSession::new(cli.fetch_config());
    let result = session.scrape(&cli.url, &cli.settings(), &mut LogProgress)?;

    if cli.stdout {
        let artifact = session.export_last(ExportFormat::Json)?;
        print!("{}", String::from_utf8_lossy(&artifact.bytes));
    } else {
        print!("{}", render_text(result));
        let artifact = session.export_last(cli.format)?;
        let path = artifact.write_to(&cli.output_dir)?;
        eprintln!("Saved {} ({})", path.display(), artifact.content_type);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
