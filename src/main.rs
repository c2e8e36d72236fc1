// ABOUTME: Main entry point for the slidetty program.
// ABOUTME: Provides the CLI interface: the interactive viewer and the `init` scaffolder.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing the slide files
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Theme: 'auto' or a path to a JSON style file
    #[arg(short, long)]
    theme: Option<String>,

    /// Reload slides automatically when files in the deck change
    #[arg(short, long)]
    watch: bool,

    /// Write logs to this file while the viewer runs
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new deck with metadata files and example slides
    Init(InitArgs),
}

#[derive(Args)]
struct InitArgs {
    /// Directory to create
    #[arg(default_value = "slides")]
    path: PathBuf,

    /// Presentation title
    #[arg(long, default_value = "My Presentation")]
    title: String,

    /// Presentation author
    #[arg(long, default_value = "Unknown")]
    author: String,
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Init(args)) => run_init(args),
        None => run_viewer(&cli),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_init(args: &InitArgs) -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("SLIDETTY_LOG", "info")).init();

    let config = slidetty::ScaffoldConfig {
        target: args.path.clone(),
        title: args.title.clone(),
        author: args.author.clone(),
    };
    let written = slidetty::scaffold_deck(&config)
        .with_context(|| format!("Failed to create deck at {:?}", args.path))?;

    println!("Created deck in {:?}:", args.path);
    for path in written {
        println!("  {}", path.display());
    }
    println!("Run `slidetty --dir {}` to present it.", args.path.display());
    Ok(())
}

fn run_viewer(cli: &Cli) -> anyhow::Result<()> {
    let mut config = slidetty::Config::from_env();
    if let Some(dir) = &cli.dir {
        config.slides_dir = dir.clone();
    }
    if let Some(theme) = &cli.theme {
        config.theme = Some(theme.clone());
    }
    if cli.watch {
        config.watch = true;
    }
    if let Some(log_file) = &cli.log_file {
        config.log_file = Some(log_file.clone());
    }

    init_viewer_logging(&config)?;
    slidetty::tui::run(&config)?;
    Ok(())
}

// The viewer owns the terminal, so logs only ever go to a file
fn init_viewer_logging(config: &slidetty::Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("SLIDETTY_LOG", "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
