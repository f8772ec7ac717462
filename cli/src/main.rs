//! CLI entrypoint for examforge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use examforge_application::ports::progress::{GenerationProgress, NoProgress};
use examforge_application::ports::transcript::{NoTranscriptLogger, TranscriptLogger};
use examforge_application::{PrepareContextUseCase, RunGeneralUseCase, RunGroundedUseCase};
use examforge_domain::GenerationRequest;
use examforge_infrastructure::{
    ConfigLoader, FileConfig, GeminiEmbedder, GeminiGateway, JsonlTranscriptLogger, open_document,
};
use examforge_presentation::{
    ChatRepl, Cli, ConsoleFormatter, DocumentOpener, SessionOptions, SpinnerReporter,
    render_stream,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    // Missing credentials are fatal at process start, not per-request.
    let api_key = ConfigLoader::resolve_api_key(&config.service)?;

    info!("Starting examforge");

    // === Dependency Injection ===
    let gateway = Arc::new(
        GeminiGateway::new(&config.service, api_key.clone())
            .context("could not initialize the LLM gateway")?,
    );
    let embedder = Arc::new(
        GeminiEmbedder::new(&config.service, api_key)
            .context("could not initialize the embedding service")?,
    );
    let transcript = build_transcript_logger(&config);

    let retrieval = config.retrieval.to_params();
    let general = RunGeneralUseCase::new(gateway.clone()).with_transcript(transcript.clone());
    let grounded = RunGroundedUseCase::new(gateway.clone(), embedder.clone())
        .with_transcript(transcript.clone())
        .with_params(retrieval.clone());
    let prepare = PrepareContextUseCase::new(embedder.clone()).with_params(retrieval);

    let opener: DocumentOpener = Box::new(|path| open_document(path));

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(general, grounded, prepare, opener)
            .with_document(cli.document.clone())
            .with_examples(cli.examples.clone())
            .with_options(SessionOptions {
                include_answer_key: !cli.no_answer_key,
                show_progress: !cli.quiet,
            });
        repl.run().await?;
        return Ok(());
    }

    // Single-shot mode - prompt is required
    let prompt = match cli.prompt.clone() {
        Some(p) => p,
        None => bail!("A prompt is required. Use --chat for interactive mode."),
    };
    let Some(request) = GenerationRequest::try_new(prompt) else {
        bail!("The prompt cannot be empty.");
    };
    let request = request
        .with_examples(example_text(&cli))
        .with_answer_key(!cli.no_answer_key);

    let progress: Box<dyn GenerationProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(SpinnerReporter::new())
    };

    let handle = match &cli.document {
        Some(path) => {
            let source = open_document(path);
            info!("Preparing context from '{}'", source.name());
            let index = prepare.build_index(source.as_ref()).await.with_context(|| {
                format!("could not prepare course document '{}'", path.display())
            })?;
            grounded.execute(&request, &index, progress.as_ref()).await
        }
        None => general.execute(&request, progress.as_ref()).await,
    };

    let full_text = render_stream(handle).await;
    println!(
        "{}",
        ConsoleFormatter::format_final(&full_text, request.include_answer_key())
    );

    Ok(())
}

/// Extract example text from the CLI-supplied file, degrading to an
/// empty string when absent or unreadable.
fn example_text(cli: &Cli) -> String {
    match &cli.examples {
        Some(path) => {
            let source = open_document(path);
            PrepareContextUseCase::extract_example_text(source.as_ref())
        }
        None => String::new(),
    }
}

/// Build the transcript logger per configuration, falling back to the
/// no-op logger whenever the file cannot be created.
fn build_transcript_logger(config: &FileConfig) -> Arc<dyn TranscriptLogger> {
    if !config.transcript.enabled {
        return Arc::new(NoTranscriptLogger);
    }

    let dir = config
        .transcript
        .dir
        .clone()
        .or_else(|| dirs::data_dir().map(|d| d.join("examforge").join("transcripts")));
    let Some(dir) = dir else {
        return Arc::new(NoTranscriptLogger);
    };

    let file = dir.join(format!(
        "run-{}.jsonl",
        chrono::Utc::now().format("%Y%m%dT%H%M%SZ")
    ));
    match JsonlTranscriptLogger::new(&file) {
        Some(logger) => {
            info!("Writing run transcript to {}", file.display());
            Arc::new(logger)
        }
        None => Arc::new(NoTranscriptLogger),
    }
}
