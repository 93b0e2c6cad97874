use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use fivetwelve::config::AppConfig;
use fivetwelve::ui::App;

/// Play FiveTwelve, a small 2048 variant, in the terminal.
#[derive(Parser)]
#[command(name = "fivetwelve", about = "Play FiveTwelve, a small 2048 variant")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Seed the tile-placement RNG for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Override number of board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of board columns
    #[arg(long)]
    cols: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(seed) = cli.seed {
        config.board.seed = Some(seed);
    }
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.board.cols = cols;
    }
    config.validate().context("invalid configuration")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(&config);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res?;
    Ok(())
}
