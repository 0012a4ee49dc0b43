use clap::{Parser, ValueEnum};
use coread_crawler::{CrawlConfig, Crawler, SnapshotSource};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Find readers who share your reading history
#[derive(Parser, Debug)]
#[command(name = "coread")]
#[command(about = "Rank readers by how closely their ratings match yours", long_about = None)]
struct Args {
    /// Seed reader: a profile URL or a bare reviewer id
    seed: String,

    /// JSON snapshot of reviewer and item pages to crawl
    #[arg(short, long)]
    snapshot: PathBuf,

    /// JSON crawl configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Deepest task to expand (seed = 0, its items = 1, co-reviewers = 2)
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum reviewer and item identities to claim
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Tasks in flight at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-fetch timeout in seconds
    #[arg(long)]
    fetch_timeout_secs: Option<u64>,

    /// Global crawl deadline in seconds
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Shared items required before a similarity is reported
    #[arg(long)]
    min_overlap: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn crawl_config(&self) -> anyhow::Result<CrawlConfig> {
        let mut config = match &self.config {
            Some(path) => CrawlConfig::from_json_file(path)?,
            None => CrawlConfig::default(),
        };

        if let Some(depth) = self.max_depth {
            config = config.with_max_depth(depth);
        }
        if let Some(nodes) = self.max_nodes {
            config = config.with_max_nodes(nodes);
        }
        if let Some(workers) = self.concurrency {
            config = config.with_concurrency(workers);
        }
        if let Some(secs) = self.fetch_timeout_secs {
            config = config.with_fetch_timeout_secs(secs);
        }
        if let Some(secs) = self.deadline_secs {
            config = config.with_deadline_secs(secs);
        }
        if let Some(min) = self.min_overlap {
            config = config.with_min_overlap(min);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting coread v{}", env!("CARGO_PKG_VERSION"));

    let config = args.crawl_config()?;

    let source = SnapshotSource::from_json_file(&args.snapshot)?;
    info!("Snapshot loaded from {:?}", args.snapshot);

    let crawler = Crawler::new(source, config)?;
    info!(
        max_depth = crawler.config().max_depth,
        max_nodes = crawler.config().max_nodes,
        concurrency = crawler.config().concurrency,
        "Crawl configuration loaded"
    );
    let report = crawler.run(&args.seed).await?;

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
