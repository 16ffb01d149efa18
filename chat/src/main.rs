mod config;
mod repl;
mod sink;
mod source;

use anyhow::{Context, anyhow};
use clap::Parser;
use config::Settings;
use pixmorph::{ConversationId, InMemorySessionStore, SessionMachine};
use sink::TerminalSink;
use source::FileImageSource;
use std::path::PathBuf;

/// Chat with the image transform pipeline from a terminal
///
/// Commands: /start, /photo <path>, /pixelate, /ascii, /invert, /quit.
/// Any other line is sent as text (the ASCII charset after /ascii).
#[derive(Parser, Debug)]
#[command(name = "pixmorph")]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings file (TOML)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Directory for transformed images
    #[arg(long, short, default_value = ".")]
    output_dir: PathBuf,

    /// Conversation id used for this session
    #[arg(long, default_value = "local")]
    conversation: String,
}

fn main() -> anyhow::Result<()> {
    // Configure logging
    env_logger::init();

    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;
    let base_dir = std::env::current_dir().context("failed to read current directory")?;

    let machine = SessionMachine::new(
        InMemorySessionStore::new(),
        FileImageSource::new(base_dir),
        settings.transform,
    )
    .map_err(|e| anyhow!("invalid transform settings: {}", e))?;
    log::info!("starting conversation '{}'", args.conversation);

    let conversation = ConversationId::new(args.conversation);
    let mut sink = TerminalSink::new(std::io::stdout().lock(), &args.output_dir);
    repl::run_conversation(&machine, &conversation, std::io::stdin().lock(), &mut sink)
        .context("conversation I/O failed")?;

    Ok(())
}
