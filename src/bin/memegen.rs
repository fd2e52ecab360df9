//! CLI binary for memegen.
//!
//! A thin shim over the library crate: `generate` maps flags to a
//! `MemeRequest` + `MemeConfig` and prints the result, `serve` starts the
//! web form.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use memegen::web::{AppState, HttpServer, ServerConfig};
use memegen::{generate_meme, MemeConfig, MemeRequest};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Random dog, random quote
  memegen generate

  # Your own image and caption
  memegen generate --path photo.jpg --body "Stay pawsitive" --author Rex

  # Pick among several images, print JSON
  memegen generate --path a.jpg --path https://example.com/b.png --json

  # Web form on port 8080
  memegen serve --port 8080

QUOTE SOURCES:
  .txt    one "quote - author" per line
  .csv    header row with `body` and `author` columns
  .docx   one "quote - author" per paragraph
  .pdf    one "quote - author" per line (needs libpdfium; set PDFIUM_LIB_PATH
          to a library file or directory if it is not on the system path)
"#;

/// Caption images with quotes.
#[derive(Parser, Debug)]
#[command(
    name = "memegen",
    version,
    about = "Caption images with quotes from TXT, CSV, DOCX and PDF files",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "MEMEGEN_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "MEMEGEN_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one meme and print its path.
    Generate(GenerateArgs),
    /// Serve the meme web form.
    Serve(ServeArgs),
}

/// Catalogue and rendering options shared by both subcommands.
#[derive(Args, Debug)]
struct CommonArgs {
    /// Directory searched (recursively) for random images.
    #[arg(long, env = "MEMEGEN_IMAGES_DIR", default_value = "./_data/photos/dog")]
    images_dir: PathBuf,

    /// Quote source file; repeat for several. Defaults to the bundled DogQuotes set.
    #[arg(long = "quotes", env = "MEMEGEN_QUOTES")]
    quotes: Vec<PathBuf>,

    /// TrueType/OpenType font; the embedded DejaVu Sans is used otherwise.
    #[arg(long, env = "MEMEGEN_FONT")]
    font: Option<PathBuf>,

    /// Quote font size in pixels (the author line is 80% of it).
    #[arg(long, env = "MEMEGEN_FONT_SIZE", default_value_t = 30)]
    font_size: u32,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "MEMEGEN_DOWNLOAD_TIMEOUT", default_value_t = 30)]
    download_timeout: u64,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Image path or URL; repeat to pick one at random.
    #[arg(short, long, env = "MEMEGEN_PATH")]
    path: Vec<String>,

    /// Quote text (requires --author).
    #[arg(short, long, env = "MEMEGEN_BODY")]
    body: Option<String>,

    /// Quote author.
    #[arg(short, long, env = "MEMEGEN_AUTHOR")]
    author: Option<String>,

    /// Output width in pixels (1–500).
    #[arg(short, long, env = "MEMEGEN_WIDTH", default_value_t = 500,
          value_parser = clap::value_parser!(u32).range(1..=500))]
    width: u32,

    /// Directory the meme is written to.
    #[arg(short, long, env = "MEMEGEN_OUTPUT_DIR", default_value = "./tmp")]
    output_dir: PathBuf,

    /// Print the result as JSON instead of a bare path.
    #[arg(long, env = "MEMEGEN_JSON")]
    json: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "MEMEGEN_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "MEMEGEN_PORT", default_value_t = 5000)]
    port: u16,

    /// Directory memes are written to and served from under /static.
    #[arg(long, env = "MEMEGEN_STATIC_DIR", default_value = "./static")]
    static_dir: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Generate(args) => run_generate(args).await,
        Command::Serve(args) => run_serve(args).await,
    }
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = build_config(&args.common)
        .width(args.width)
        .output_dir(&args.output_dir)
        .build()
        .context("Invalid configuration")?;

    let request = MemeRequest {
        images: args.path,
        body: args.body,
        author: args.author,
        width: Some(args.width),
    };

    let output = generate_meme(&request, &config)
        .await
        .context("Meme generation failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else {
        println!("{}", output.path.display());
    }
    Ok(())
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = build_config(&args.common)
        .build()
        .context("Invalid configuration")?;

    let state = AppState::load(&config, &args.static_dir)
        .await
        .context("Failed to load quotes and images")?;

    let server = HttpServer::new(
        ServerConfig::new(args.host, args.port, args.static_dir),
        state,
    );
    server
        .run_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("HTTP server failed")
}

/// Map the shared flags onto a config builder.
fn build_config(common: &CommonArgs) -> memegen::MemeConfigBuilder {
    let mut builder = MemeConfig::builder()
        .images_dir(&common.images_dir)
        .font_size(common.font_size)
        .download_timeout_secs(common.download_timeout);
    if !common.quotes.is_empty() {
        builder = builder.quote_sources(common.quotes.iter().cloned());
    }
    if let Some(ref font) = common.font {
        builder = builder.font_path(font);
    }
    builder
}
