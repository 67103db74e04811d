use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use pdf_finder::config::{get_config, load_config, Config};
use pdf_finder::models::{AttemptOutcome, ResolutionRequest, ResolutionResult};
use pdf_finder::resolver::Resolver;
use pdf_finder::utils::{normalize_doi, validate_url};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// PDF Finder - Locate and download PDFs of scientific papers from multiple sources
#[derive(Parser, Debug)]
#[command(name = "pdf-finder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Locate and download PDFs of scientific papers from multiple sources", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (plain if TTY, JSON otherwise)
    Auto,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

impl OutputFormat {
    fn resolved(self) -> Self {
        match self {
            OutputFormat::Auto => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Plain
                } else {
                    OutputFormat::Json
                }
            }
            other => other,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Locate a PDF URL for a work without downloading it
    #[command(alias = "f")]
    Find {
        /// DOI of the work (e.g. "10.1038/nature12345")
        #[arg(long, short)]
        doi: Option<String>,

        /// Landing-page URL of the work
        #[arg(long, short)]
        url: Option<String>,

        /// Title of the work (exact-phrase preprint search)
        #[arg(long, short)]
        title: Option<String>,
    },

    /// Locate a PDF and download it to a file
    Fetch {
        /// DOI of the work
        #[arg(long, short)]
        doi: Option<String>,

        /// Landing-page URL of the work
        #[arg(long, short)]
        url: Option<String>,

        /// Title of the work
        #[arg(long, short)]
        title: Option<String>,

        /// Where to save the PDF
        #[arg(long, short = 'O', default_value = "paper.pdf")]
        out: PathBuf,
    },

    /// Download a known PDF URL to a file
    Download {
        /// Direct PDF URL
        pdf_url: String,

        /// Where to save the PDF
        #[arg(long, short = 'O', default_value = "paper.pdf")]
        out: PathBuf,
    },

    /// List the enabled sources in trial order
    Sources,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pdf_finder={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_request(
    doi: Option<String>,
    url: Option<String>,
    title: Option<String>,
) -> Result<ResolutionRequest> {
    let mut request = ResolutionRequest::new();

    if let Some(doi) = doi {
        request.doi = Some(normalize_doi(&doi).context("invalid --doi")?);
    }
    if let Some(url) = url {
        request.landing_url = Some(validate_url(&url).context("invalid --url")?);
    }
    if let Some(title) = title {
        request.title = Some(title);
    }

    if !request.has_identifier() {
        bail!("at least one of --doi, --url, --title is required");
    }

    Ok(request)
}

fn print_result(result: &ResolutionResult, format: OutputFormat) -> Result<()> {
    match format.resolved() {
        OutputFormat::Json | OutputFormat::Auto => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Plain => {
            for attempt in &result.attempted_sources {
                match attempt.outcome {
                    AttemptOutcome::Success => println!(
                        "  {} {}: {}",
                        "✓".green(),
                        attempt.source,
                        attempt.pdf_url.as_deref().unwrap_or_default()
                    ),
                    AttemptOutcome::NotFound => println!(
                        "  {} {}: {}",
                        "∅".yellow(),
                        attempt.source,
                        attempt.error.as_deref().unwrap_or("not found")
                    ),
                    AttemptOutcome::Error => println!(
                        "  {} {}: {}",
                        "✗".red(),
                        attempt.source,
                        attempt.error.as_deref().unwrap_or("error")
                    ),
                }
            }
            if result.success {
                println!(
                    "{} {}",
                    "Found PDF:".green().bold(),
                    result.pdf_url.as_deref().unwrap_or_default()
                );
            } else {
                println!(
                    "{} {}",
                    "No PDF found.".red().bold(),
                    result.message.as_deref().unwrap_or_default()
                );
            }
        }
    }
    Ok(())
}

fn load_effective_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            load_config(path).with_context(|| format!("failed to load {}", path.display()))
        }
        None => Ok(get_config()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Find { doi, url, title } => {
            let config = load_effective_config(cli.config.as_ref())?;
            let resolver = Resolver::from_config(&config)?;
            let request = build_request(doi, url, title)?;

            let result = resolver.resolve(&request).await;
            print_result(&result, cli.output)?;

            if !result.success {
                std::process::exit(1);
            }
        }

        Commands::Fetch {
            doi,
            url,
            title,
            out,
        } => {
            let config = load_effective_config(cli.config.as_ref())?;
            let resolver = Resolver::from_config(&config)?;
            let request = build_request(doi, url, title)?;

            let result = resolver.resolve(&request).await;
            print_result(&result, cli.output)?;

            let Some(pdf_url) = result.pdf_url.as_deref() else {
                std::process::exit(1);
            };

            let document = resolver.download(pdf_url).await?;
            tokio::fs::write(&out, &document.bytes)
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;

            if !cli.quiet {
                eprintln!("Saved {} bytes to {}", document.len(), out.display());
            }
        }

        Commands::Download { pdf_url, out } => {
            let config = load_effective_config(cli.config.as_ref())?;
            let resolver = Resolver::from_config(&config)?;
            let pdf_url = validate_url(&pdf_url).context("invalid PDF URL")?;

            let document = resolver.download(&pdf_url).await?;
            tokio::fs::write(&out, &document.bytes)
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;

            if !cli.quiet {
                eprintln!("Saved {} bytes to {}", document.len(), out.display());
            }
        }

        Commands::Sources => {
            let config = load_effective_config(cli.config.as_ref())?;
            let resolver = Resolver::from_config(&config)?;

            let mut stdout = std::io::stdout();
            for (i, source) in resolver.chain().iter().enumerate() {
                writeln!(stdout, "{}. {} ({})", i + 1, source.name(), source.id())?;
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}
