//! CollateX client - command line entry point
//!
//! Reads one witness per file, sends them to a CollateX service and writes the
//! result to stdout (or `--output`). Logs go to stderr; set `RUST_LOG` to tune.
//!
//! Usage:
//! ```bash
//! export COLLATEX_URL=http://localhost:7369/
//! collatex-client --format table-html w1.txt w2.txt w3.txt
//! ```

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use collatex_client::collatex::{Algorithm, CollationClient};
use collatex_client::config::ClientConfig;
use collatex_client::pipeline::{self, OutputKind, SigilStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "collatex-client")]
#[command(about = "Collate witnesses with a CollateX service and render the alignment")]
#[command(version)]
struct Cli {
    /// Witness text files, one witness per file
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output representation
    #[arg(short, long, value_enum, default_value = "table-html")]
    format: Format,

    /// Base URL of the CollateX service (overrides COLLATEX_URL)
    #[arg(short, long)]
    url: Option<String>,

    /// Service path or absolute URL (overrides COLLATEX_SERVICE)
    #[arg(long)]
    service: Option<String>,

    /// Alignment algorithm (overrides COLLATEX_ALGORITHM)
    #[arg(short, long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Match tokens within this edit distance (overrides COLLATEX_DISTANCE)
    #[arg(long)]
    fuzzy: Option<u32>,

    /// Do not join adjacent aligned tokens
    #[arg(long)]
    no_join: bool,

    /// Request timeout in seconds (overrides COLLATEX_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,

    /// Label witnesses A, B, C, ... instead of by file name
    #[arg(long)]
    letters: bool,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    TableHtml,
    TableCsv,
    TableTsv,
    Json,
    Tei,
    Svg,
    Graphviz,
    Graphml,
}

impl From<Format> for OutputKind {
    fn from(format: Format) -> Self {
        match format {
            Format::TableHtml => OutputKind::TableHtml,
            Format::TableCsv => OutputKind::TableCsv,
            Format::TableTsv => OutputKind::TableTsv,
            Format::Json => OutputKind::Json,
            Format::Tei => OutputKind::Tei,
            Format::Svg => OutputKind::Svg,
            Format::Graphviz => OutputKind::GraphViz,
            Format::Graphml => OutputKind::GraphMl,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Dekker,
    NeedlemanWunsch,
    Medite,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Dekker => Algorithm::Dekker,
            AlgorithmArg::NeedlemanWunsch => Algorithm::NeedlemanWunsch,
            AlgorithmArg::Medite => Algorithm::Medite,
        }
    }
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    fn config(&self) -> anyhow::Result<ClientConfig> {
        let mut config = ClientConfig::from_env().context("Invalid environment configuration")?;

        if let Some(url) = &self.url {
            config.base_url = Some(url.clone());
        }
        if let Some(service) = &self.service {
            config.service_url = service.clone();
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm.into();
        }
        if let Some(distance) = self.fuzzy {
            config.fuzzy_distance = Some(distance);
        }
        if self.no_join {
            config.joined = false;
        }
        if let Some(secs) = self.timeout {
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = config.base_url.as_deref().unwrap_or("-"),
        service = %config.service_url,
        algorithm = %config.algorithm,
        "CollateX client starting"
    );

    let style = if cli.letters {
        SigilStyle::Letters
    } else {
        SigilStyle::FileStem
    };
    let witnesses = pipeline::load_witnesses(&cli.files, style).context("Failed to read witnesses")?;
    if witnesses.is_empty() {
        bail!("All witness files are empty; nothing to collate");
    }

    let client = CollationClient::connect(&config)?;
    let output = pipeline::run(&client, &witnesses, cli.format.into())
        .await
        .context("Collation failed")?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = output.len(), "Result written");
        }
        None => print!("{}", output),
    }

    Ok(())
}
