use std::{
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use console_race::{
    Ease, GenerationIndex, JsonLinesRenderer, KeyframeOptions, RaceConfig, RaceSession,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "console-race", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the keyframes of one transition as JSON.
    Frames(FramesArgs),
    /// Reveal the start generation, then step forward emitting renderer events as JSON lines.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct Source {
    /// Sales dataset JSON (defaults to the bundled console table).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Race config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    source: Source,

    /// Start generation (0 animates up from nothing).
    #[arg(long)]
    from: u32,

    /// End generation.
    #[arg(long)]
    to: u32,

    /// Override the configured easing curve. Anything but `linear` reshapes the
    /// interpolated frames away from even `i / n` stepping.
    #[arg(long, value_enum)]
    ease: Option<Ease>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    source: Source,

    /// Last generation to step to (defaults to the configured maximum).
    #[arg(long)]
    to: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load(source: &Source) -> anyhow::Result<(GenerationIndex, RaceConfig)> {
    let index = match &source.data {
        Some(path) => GenerationIndex::from_path(path)
            .with_context(|| format!("load dataset '{}'", path.display()))?,
        None => GenerationIndex::bundled().context("load bundled dataset")?,
    };
    let config = match &source.config {
        Some(path) => read_config(path)?,
        None => RaceConfig::spanning(&index),
    };
    Ok((index, config))
}

fn read_config(path: &Path) -> anyhow::Result<RaceConfig> {
    RaceConfig::from_path(path).with_context(|| format!("load config '{}'", path.display()))
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (index, config) = load(&args.source)?;
    let mut opts = KeyframeOptions::from(&config);
    if let Some(ease) = args.ease {
        opts.ease = ease;
    }

    let keyframes = console_race::generate_keyframes(&index, args.from, args.to, opts)
        .with_context(|| format!("generate keyframes {} -> {}", args.from, args.to))?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    serde_json::to_writer_pretty(&mut out, &keyframes).context("write keyframes")?;
    writeln!(out).context("write keyframes")?;
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let (index, config) = load(&args.source)?;
    let last = args.to.unwrap_or(config.max_generation);
    if !(config.start_generation..=config.max_generation).contains(&last) {
        anyhow::bail!(
            "--to {last} is outside [{}, {}]",
            config.start_generation,
            config.max_generation
        );
    }

    let out = BufWriter::new(std::io::stdout().lock());
    let mut session = RaceSession::new(index, config, JsonLinesRenderer::new(out))?;

    pollster::block_on(async {
        session.start().await?;
        while session.current_generation() < last {
            session.next().await?;
        }
        anyhow::Ok(())
    })?;

    session
        .into_renderer()
        .into_inner()
        .flush()
        .context("flush events")?;
    Ok(())
}
