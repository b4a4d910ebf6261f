//! CLI tool that turns a news article into a zip of 1280x720 slides.

use anyhow::{Context, Result};
use clap::Parser;
use newsdeck_core::DeckConfig;
use newsdeck_http::{GoogleTranslator, HttpArticleExtractor, HttpImageRelay};
use newsdeck_slides::{save_zip, BlockFont, DeckBuilder, FontBackend, FontdueFont};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Fetch a news article, translate it if needed, and render it as slides.
///
/// Translation uses Google Cloud Translation; set TRANSLATE_API_KEY.
#[derive(Parser, Debug)]
#[command(name = "newsdeck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Article URL (http or https)
    url: String,

    /// Output zip archive
    #[arg(short, long, default_value = "slides.zip")]
    output: PathBuf,

    /// Target language code (default: or)
    #[arg(short = 'l', long = "lang")]
    language: Option<String>,

    /// Regular font file (.ttf/.otf); without it glyphs are drawn as blocks
    #[arg(long)]
    font: Option<PathBuf>,

    /// Bold font file used for the title and footer
    #[arg(long, requires = "font")]
    bold_font: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of slides rendered concurrently
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let fonts = load_fonts(args)?;

    let extractor = HttpArticleExtractor::new()?.with_max_text_chars(config.max_body_chars);
    let translator = GoogleTranslator::from_env()?;
    let images = HttpImageRelay::new()?;

    if args.verbose {
        eprintln!(
            "Building slides for {} (target: {}, {})",
            args.url, config.target_language, config.target_script.name
        );
    }

    let builder = DeckBuilder::new(
        Arc::new(extractor),
        Arc::new(translator),
        Arc::new(images),
        fonts,
        config,
    );

    let deck = builder
        .build(&args.url)
        .await
        .with_context(|| format!("could not build slides for {}", args.url))?;

    save_zip(&deck, &args.output)
        .with_context(|| format!("could not write {}", args.output.display()))?;

    println!("Title: {}", deck.title);
    if let Some(image_url) = &deck.image_url {
        println!("Image: {}", image_url);
    }
    println!("Wrote {} slide(s) to {}", deck.len(), args.output.display());

    Ok(())
}

/// Load the configuration file, if any, and apply command-line overrides.
fn load_config(args: &Args) -> Result<DeckConfig> {
    let mut config = match &args.config {
        Some(path) => DeckConfig::from_path(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => DeckConfig::new(),
    };

    if let Some(language) = &args.language {
        config = config.with_target_language(language.as_str());
    }
    if let Some(jobs) = args.jobs {
        config = config.with_concurrency(jobs);
    }

    Ok(config)
}

fn load_fonts(args: &Args) -> Result<Arc<dyn FontBackend>> {
    match &args.font {
        Some(regular) => {
            let font = FontdueFont::from_paths(regular, args.bold_font.as_deref())
                .with_context(|| format!("Failed to load font {}", regular.display()))?;
            Ok(Arc::new(font))
        }
        None => {
            log::warn!("No --font given; drawing placeholder block glyphs");
            Ok(Arc::new(BlockFont::new()))
        }
    }
}
