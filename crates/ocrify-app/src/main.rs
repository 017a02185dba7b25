use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ocrify_config::Config;
use ocrify_dictionary::{DefinitionResolver, DictionaryApiResolver, DisabledResolver};
use ocrify_ocr::{ImageHandle, TesseractEngine};
use ocrify_types::PipelineEvent;

mod pipeline;
mod render;

use pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "ocrify", about = "Extract text from an image and analyze it")]
struct Cli {
    /// Image to process (PNG, JPEG, GIF, BMP, TIFF)
    image: PathBuf,

    /// OCR language model, overrides OCRIFY_OCR_LANG
    #[arg(long)]
    lang: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Skip the dictionary lookup for the rarest word
    #[arg(long)]
    no_dictionary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::new();
    if let Some(lang) = cli.lang {
        config.ocr.language = lang;
    }
    if cli.no_dictionary {
        config.dictionary.enabled = false;
    }

    let engine = TesseractEngine::new(&config.ocr);
    let version = engine
        .probe()
        .await
        .context("OCR engine is not available")?;
    tracing::info!("using {version}");

    let decoded = image::open(&cli.image)
        .with_context(|| format!("failed to load image {}", cli.image.display()))?;
    let handle = ImageHandle::new(decoded);

    let resolver: Arc<dyn DefinitionResolver> = if config.dictionary.enabled {
        Arc::new(DictionaryApiResolver::new(&config.dictionary))
    } else {
        Arc::new(DisabledResolver)
    };

    let (pipeline, events) = Pipeline::spawn(
        Arc::new(engine),
        resolver,
        Duration::from_secs(config.ocr.timeout_secs),
    );

    let request = pipeline.submit(handle)?;
    tracing::debug!(request_id = %request.id, "request admitted");

    while let Ok(event) = events.recv().await {
        match event {
            PipelineEvent::Progress(stage) => tracing::info!("{stage}..."),
            PipelineEvent::Completed(result) => {
                render::print_result(&result, cli.json)?;
                break;
            }
            PipelineEvent::Failed(result) => match result.extraction_error {
                Some(error) => anyhow::bail!(error),
                None => anyhow::bail!("extraction failed"),
            },
            PipelineEvent::Cancelled => {
                tracing::warn!("request cancelled");
                break;
            }
        }
    }

    Ok(())
}
