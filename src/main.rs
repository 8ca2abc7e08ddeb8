use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pubmed_papers::config::{find_config_file, get_config, load_config, to_toml, Config};
use pubmed_papers::report;
use pubmed_papers::utils::HttpClient;
use pubmed_papers::{PaperFetcher, PubMedSource, SearchQuery};
use std::fs::File;
use std::io::{BufWriter, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch PubMed papers and list those with company-affiliated authors
#[derive(Parser, Debug)]
#[command(name = "pubmed-papers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch PubMed papers and identify company-affiliated authors", long_about = None)]
struct Cli {
    /// PubMed search query (e.g. "cancer immunotherapy"); full PubMed syntax is supported
    #[arg(required_unless_present = "print_config")]
    query: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    debug: bool,

    /// Suppress everything except errors on stderr
    #[arg(long, short, conflicts_with = "debug")]
    quiet: bool,

    /// Write results as CSV to this file instead of printing them
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Maximum number of PubMed records to fetch
    #[arg(long, short)]
    max_results: Option<usize>,

    /// Console output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Contact email sent to NCBI (overrides NCBI_EMAIL)
    #[arg(long)]
    email: Option<String>,

    /// NCBI API key (overrides NCBI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Output format for results printed to stdout
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Table on a terminal, CSV otherwise
    Auto,
    /// Table format (human-readable)
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// JSON array of rows
    Json,
}

/// Concrete renderer once `auto` has been resolved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Renderer {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    fn renderer(self, interactive: bool) -> Renderer {
        match self {
            OutputFormat::Auto if interactive => Renderer::Table,
            OutputFormat::Auto | OutputFormat::Csv => Renderer::Csv,
            OutputFormat::Table => Renderer::Table,
            OutputFormat::Json => Renderer::Json,
        }
    }
}

fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.debug {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("pubmed_papers={}", level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(path) = &cli.config {
        load_config(path).with_context(|| format!("Failed to load config {}", path.display()))?
    } else if let Some(path) = find_config_file() {
        tracing::info!("Using config file: {}", path.display());
        load_config(&path).with_context(|| format!("Failed to load config {}", path.display()))?
    } else {
        get_config().context("Failed to read configuration from environment")?
    };

    if let Some(max) = cli.max_results {
        config.search.max_results = max;
    }
    if let Some(email) = &cli.email {
        config.ncbi.email = Some(email.clone());
    }
    if let Some(key) = &cli.api_key {
        config.ncbi.api_key = Some(key.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    if cli.print_config {
        print!("{}", to_toml(&config).context("Failed to render configuration")?);
        return Ok(());
    }

    let query = cli.query.clone().unwrap_or_default();
    if config.ncbi.email.is_none() {
        tracing::debug!("No NCBI contact email configured; set NCBI_EMAIL or --email");
    }

    let client = HttpClient::from_config(&config.http)?;
    let source = PubMedSource::with_client(client, &config.ncbi, config.retry.to_retry_config());
    let fetcher = PaperFetcher::new(source);

    let search = SearchQuery::new(&query).max_results(config.search.max_results);
    let papers = fetcher
        .search_papers(&search)
        .await
        .with_context(|| format!("Search for {:?} failed", query))?;

    if papers.is_empty() {
        tracing::warn!("No papers found with company affiliations");
        return Ok(());
    }

    if let Some(path) = &cli.file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        report::write_csv(&papers, BufWriter::new(file)).context("Failed to write CSV")?;
        tracing::info!("Results saved to {}", path.display());
        return Ok(());
    }

    match cli.output.renderer(std::io::stdout().is_terminal()) {
        Renderer::Table => println!("{}", report::render_table(&papers, report::terminal_width())),
        Renderer::Csv => print!("{}", report::to_csv_string(&papers)?),
        Renderer::Json => println!("{}", report::render_json(&papers)?),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
