//! Terminal front end for the memory game: menu, board, history and the desktop shell commands.

use clap::{Parser, Subcommand};
use memorito_core::{GameSession, SessionConfig};
use memorito_protocol::{HistoryLog, ShellCommand, ShellReply, WindowState};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

mod app;
mod input;
mod render;
mod store;

pub use app::*;
pub use input::*;
pub use store::*;

#[derive(Debug, Parser)]
#[command(version, about = "Memory card game for the terminal")]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Directory holding the saved history
    #[arg(long, default_value = ".memorito")]
    pub data_dir: PathBuf,

    /// Window size the board is laid out for
    #[arg(long, default_value = "1280x800", value_parser = parse_viewport)]
    pub viewport: (u32, u32),

    /// Show the intro messages before each round
    #[arg(long)]
    pub intro: bool,

    /// Report efficiency along with flips and misses
    #[arg(long)]
    pub efficiency: bool,

    /// How long a mismatched pair stays up, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub resolve_delay_ms: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play interactively (default)
    Play,
    /// Print the round history
    History,
    /// Print stats over the history
    Stats,
    /// Forget every recorded round
    ClearHistory,
    /// Write history and stats to a file
    Export { path: PathBuf },
    /// Replace history with the one in an exported file
    Import { path: PathBuf },
}

impl Args {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            resolve_delay: Duration::from_millis(self.resolve_delay_ms),
            with_intro: self.intro,
            track_efficiency: self.efficiency,
            ..SessionConfig::default()
        }
    }

    pub fn window(&self) -> WindowState {
        let (width, height) = self.viewport;
        WindowState {
            width,
            height,
            is_maximized: false,
            is_full_screen: false,
        }
    }
}

pub fn run(args: Args) -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}, data in {}", seed, args.data_dir.display());

    let session = GameSession::seeded(seed, args.session_config());
    let history = HistoryLog::new(FileStore::new(&args.data_dir));
    let mut app = App::new(session, history, args.window());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let (flow, reply) = match args.command {
        None | Some(Command::Play) => return app.run(io::stdin().lock(), &mut out),
        Some(Command::History) => (app.handle_line("history", &mut out)?, None),
        Some(Command::Stats) => (app.handle_line("stats", &mut out)?, None),
        Some(Command::ClearHistory) => (app.handle_line("clear", &mut out)?, None),
        Some(Command::Export { path }) => {
            app.dispatch(ShellCommand::SaveGameData { path }, &mut out)?
        }
        Some(Command::Import { path }) => {
            app.dispatch(ShellCommand::LoadGameData { path }, &mut out)?
        }
    };
    log::trace!("one-shot command finished with {:?}", flow);

    if let Some(reply) = reply {
        writeln!(out, "{}", render::describe_reply(&reply))?;
        if let ShellReply::Failed { message } = reply {
            anyhow::bail!(message);
        }
    }
    Ok(())
}
