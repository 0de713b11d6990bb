use anyhow::Context;
use battlemap::headless::{self, HeadlessRequest};
use battlemap_core::{Dataset, ViewMode, config::Config};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "battlemap", about = "Battle events map, in the terminal")]
struct Cli {
    /// Dataset file (JSON array of event records). Overrides `[data] path`.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Write debug logs to $TMPDIR/battlemap-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Print the map for one selection as JSON instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Battle to show (headless). Defaults to the first battle in the file.
    #[arg(long, requires = "headless")]
    event: Option<String>,

    /// Display mode (headless): note, all or time. Defaults to all.
    #[arg(long, requires = "headless")]
    mode: Option<ViewMode>,

    /// Key event note to show in note mode (headless).
    #[arg(long, requires = "headless")]
    note: Option<String>,

    /// Timestamp to show in time mode, "YYYY-MM-DD HH:MM:SS" (headless).
    #[arg(long, requires = "headless")]
    time: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let path = std::env::temp_dir().join("battlemap-debug.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("battlemap debug log started, tail -f {}", path.display());
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::defaults()
    });

    let data_path = cli.data.clone().unwrap_or_else(|| config.data.path.clone());
    let dataset = Dataset::load(&data_path)
        .with_context(|| format!("failed to load dataset {}", data_path.display()))?;

    if cli.headless {
        let req = HeadlessRequest {
            event: cli.event,
            mode: cli.mode.unwrap_or(ViewMode::AllNotes),
            note: cli.note,
            time: cli.time,
        };
        return headless::run(
            &dataset,
            &req,
            config.map.default_viewport(),
            &mut std::io::stdout().lock(),
            &mut std::io::stderr().lock(),
        );
    }

    battlemap_tui::run(dataset, config)
}
