//! CLI command definitions, routing, and tracing setup.

use crate::error::CliError;
use crate::stages;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use prepline_config::{Loader, PrepConfig};
use prepline_core::prep::{
    decode, explain, highlight, process_batch, tokenize_bytes, BatchError, BatchPolicy,
    CustomStageRef, Document, Pipeline, PipelineError, PipelineOptions, ProcessedDocument, Span,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

/// Picked up from the working directory when present.
const LOCAL_CONFIG: &str = "prepline.toml";

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// prepline: text preprocessing with reversible token provenance.
#[derive(Parser)]
#[command(
    name = "prepline",
    version,
    about = "Preprocess text for classifiers and map every token back to the raw text.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Configuration file layered over the defaults.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override one configuration key, e.g. --set pipeline.ngram_size=2 (repeatable).
    #[arg(long = "set", global = true, value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Shortcuts for the most common pipeline settings. Applied after the config file and --set.
#[derive(Args, Debug, Default)]
pub(crate) struct PipelineArgs {
    /// Disable built-in stages and run only custom ones.
    #[arg(long, global = true)]
    pub bypass: bool,

    /// Build n-grams of this order.
    #[arg(long, global = true, value_name = "N")]
    pub ngrams: Option<usize>,

    /// Append a registered custom stage (uppercase, reverse). Repeatable.
    #[arg(long = "custom", global = true, value_name = "NAME")]
    pub custom: Vec<String>,

    /// Also emit every lower-order n-gram.
    #[arg(long, global = true)]
    pub keep_lower_orders: bool,
}

impl PipelineArgs {
    fn apply(&self, mut options: PipelineOptions) -> PipelineOptions {
        if self.bypass {
            options.bypass_defaults = true;
        }
        if let Some(size) = self.ngrams {
            options.ngram_size = size;
        }
        if self.keep_lower_orders {
            options.keep_lower_orders = true;
        }
        options
            .custom_stages
            .extend(self.custom.iter().map(|name| CustomStageRef::new(name.as_str())));
        options
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Text,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print raw tokens with their byte spans as JSON.
    Tokenize {
        file: PathBuf,
    },

    /// Run the pipeline and print processed tokens with their spans.
    Process {
        file: PathBuf,

        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Print the raw spans a processed token came from.
    Lookup {
        file: PathBuf,

        /// Processed text to look up, e.g. "wast your time".
        query: String,

        /// Only the first occurrence.
        #[arg(long)]
        first: bool,
    },

    /// Print every processed token next to the raw words it came from.
    Explain {
        file: PathBuf,
    },

    /// Process files (or every file in a directory) and print classifier inputs as JSON lines.
    Batch {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Stop at the first failing document, including files that cannot be read.
        #[arg(long)]
        abort_on_error: bool,
    },
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match cli.verbose {
        0 => "prepline=warn,prepline_core=warn",
        1 => "prepline=info,prepline_core=info",
        2 => "prepline=debug,prepline_core=debug",
        _ => "prepline=trace,prepline_core=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let config = load_config(&cli)?;
    let options = cli.pipeline.apply(config.pipeline.clone());

    match cli.command {
        Command::Tokenize { file } => tokenize_command(&file),
        Command::Process { file, format } => {
            let pipeline = build_pipeline(&options)?;
            process_command(&pipeline, &file, format)
        }
        Command::Lookup { file, query, first } => {
            let pipeline = build_pipeline(&options)?;
            lookup_command(&pipeline, &config, &file, &query, first)
        }
        Command::Explain { file } => {
            let pipeline = build_pipeline(&options)?;
            explain_command(&pipeline, &config, &file)
        }
        Command::Batch {
            paths,
            abort_on_error,
        } => {
            let pipeline = build_pipeline(&options)?;
            let policy = if abort_on_error {
                BatchPolicy::AbortOnError
            } else {
                config.batch.policy
            };
            batch_command(&pipeline, &paths, policy)
        }
    }
}

fn load_config(cli: &Cli) -> Result<PrepConfig, CliError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    for assignment in &cli.overrides {
        loader = loader.set_assignment(assignment)?;
    }
    Ok(loader.build()?)
}

fn build_pipeline(options: &PipelineOptions) -> Result<Pipeline, CliError> {
    let pipeline = stages::registry()?.build(options)?;
    debug!(?pipeline, "using pipeline");
    Ok(pipeline)
}

fn read(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn document_error(path: &Path, source: impl Into<PipelineError>) -> CliError {
    CliError::Document {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

/// Read, decode and process one file.
fn process_file(pipeline: &Pipeline, path: &Path) -> Result<(String, ProcessedDocument), CliError> {
    let bytes = read(path)?;
    let text = decode(&bytes).map_err(|e| document_error(path, e))?.to_string();
    let document = pipeline
        .process_text(&text)
        .map_err(|e| document_error(path, e))?;
    Ok((text, document))
}

fn format_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(Span::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn tokenize_command(path: &Path) -> Result<ExitCode, CliError> {
    let bytes = read(path)?;
    let tokens = tokenize_bytes(&bytes).map_err(|e| document_error(path, e))?;
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(ExitCode::SUCCESS)
}

fn process_command(
    pipeline: &Pipeline,
    path: &Path,
    format: OutputFormat,
) -> Result<ExitCode, CliError> {
    let (_, document) = process_file(pipeline, path)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&document.to_json())?),
        OutputFormat::Text => {
            for token in document.tokens() {
                println!("{}\t{}", token.text, format_spans(&token.spans));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn lookup_command(
    pipeline: &Pipeline,
    config: &PrepConfig,
    path: &Path,
    query: &str,
    first: bool,
) -> Result<ExitCode, CliError> {
    let (text, document) = process_file(pipeline, path)?;
    let spans = if first {
        document.provenance().lookup_first(query)
    } else {
        document.provenance().lookup(query)
    };
    if spans.is_empty() {
        return Err(CliError::NoMatch(query.to_string()));
    }

    for span in &spans {
        println!("{}\t{}", span, span.slice(&text).unwrap_or_default());
    }
    println!(
        "{}",
        highlight(&text, &spans, &config.render.open, &config.render.close)
    );
    Ok(ExitCode::SUCCESS)
}

fn explain_command(
    pipeline: &Pipeline,
    config: &PrepConfig,
    path: &Path,
) -> Result<ExitCode, CliError> {
    let (text, document) = process_file(pipeline, path)?;
    for row in explain(&text, &document, &config.render.arrow) {
        println!("{}\t{}\t{}", row.processed, row.raw, format_spans(&row.spans));
    }
    Ok(ExitCode::SUCCESS)
}

/// Expand directories into their files, sorted by path.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let entries = fs::read_dir(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            let mut found = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|source| CliError::Read {
                    path: path.clone(),
                    source,
                })?;
                if entry.path().is_file() {
                    found.push(entry.path());
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// A batch input that never reached the pipeline: unreadable or not UTF-8.
struct Rejected {
    document_id: String,
    reason: String,
}

/// Files that cannot be read or decoded count as failed documents, so with the default
/// policy they are reported and skipped. With `--abort-on-error` the first one ends the run.
fn batch_command(
    pipeline: &Pipeline,
    paths: &[PathBuf],
    policy: BatchPolicy,
) -> Result<ExitCode, CliError> {
    let files = collect_files(paths)?;
    if files.is_empty() {
        return Err(CliError::NoInput);
    }

    let mut documents = Vec::with_capacity(files.len());
    let mut rejected = Vec::new();
    for path in &files {
        let id = path.display().to_string();
        let bytes = match read(path) {
            Ok(bytes) => bytes,
            Err(error) if policy == BatchPolicy::AbortOnError => return Err(error),
            Err(error) => {
                warn!(document = %id, %error, "skipping unreadable document");
                rejected.push(Rejected {
                    document_id: id,
                    reason: error.to_string(),
                });
                continue;
            }
        };
        match decode(&bytes) {
            Ok(text) => documents.push(Document::new(id, text)),
            Err(error) if policy == BatchPolicy::AbortOnError => {
                return Err(BatchError::Aborted {
                    document_id: id,
                    source: error.into(),
                }
                .into());
            }
            Err(error) => rejected.push(Rejected {
                document_id: id,
                reason: error.to_string(),
            }),
        }
    }
    info!(files = files.len(), "documents collected");

    let report = process_batch(pipeline, &documents, policy)?;

    for output in &report.outputs {
        println!("{}", serde_json::to_string(output)?);
    }
    for failure in &rejected {
        eprintln!("failed: {}: {}", failure.document_id, failure.reason);
    }
    for failure in &report.failures {
        eprintln!("failed: {}: {}", failure.document_id, failure.error);
    }
    let failed = rejected.len() + report.failures.len();
    eprintln!("{} of {} documents failed", failed, files.len());

    if failed == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}
