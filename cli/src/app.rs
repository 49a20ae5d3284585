use anyhow::Context;
use chrono::Utc;
use memorito_core::*;
use memorito_protocol::*;
use std::fs;
use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::input::{Input, parse_input};
use crate::render;

/// Time each intro message stays on screen.
pub const INTRO_STEP: Duration = Duration::from_millis(1200);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Menu,
    Game,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Terminal front end: owns the session, the history log and the pretend window.
pub struct App<S, G = RandomBoardGenerator> {
    session: GameSession<G>,
    history: HistoryLog<S>,
    window: WindowState,
    screen: Screen,
    intro_step: Duration,
}

impl<S: KeyValueStore, G: BoardGenerator> App<S, G> {
    pub fn new(session: GameSession<G>, history: HistoryLog<S>, window: WindowState) -> Self {
        Self {
            session,
            history,
            window,
            screen: Screen::Menu,
            intro_step: INTRO_STEP,
        }
    }

    pub fn with_intro_step(mut self, step: Duration) -> Self {
        self.intro_step = step;
        self
    }

    pub fn session(&self) -> &GameSession<G> {
        &self.session
    }

    pub fn history(&self) -> &HistoryLog<S> {
        &self.history
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn window(&self) -> WindowState {
        self.window
    }

    /// Reads lines until input runs out or the player quits.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
        self.draw_menu(out)?;
        for line in input.lines() {
            let line = line.context("reading input")?;
            if self.handle_line(&line, out)? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> anyhow::Result<Flow> {
        let input = parse_input(line);
        log::trace!("input {:?} on {:?}", input, self.screen);

        match input {
            Input::Empty => match self.screen {
                Screen::Menu => self.start_round(out)?,
                Screen::Game => self.draw_game(out)?,
            },
            Input::Flip(position) => self.flip(position, out)?,
            Input::Shell(command) => {
                let (flow, reply) = self.dispatch(command, out)?;
                if let Some(reply) = reply {
                    writeln!(out, "{}", render::describe_reply(&reply))?;
                }
                return Ok(flow);
            }
            Input::Resize { width, height } => self.resize(width, height, out)?,
            Input::History => {
                writeln!(out, "Game History")?;
                render::draw_history(out, &self.history.entries())?;
            }
            Input::Stats => render::draw_stats(out, &self.history.stats())?,
            Input::ClearHistory => {
                self.history.clear();
                writeln!(out, "History cleared")?;
            }
            Input::Help => draw_help(out)?,
            Input::Unknown(line) => writeln!(out, "Unknown command {line:?}, type ? for help")?,
        }
        Ok(Flow::Continue)
    }

    /// Runs one shell command, returns the reply a desktop shell would get back.
    ///
    /// Navigation commands draw their screen and reply nothing.
    pub fn dispatch(
        &mut self,
        command: ShellCommand,
        out: &mut impl Write,
    ) -> anyhow::Result<(Flow, Option<ShellReply>)> {
        log::debug!("shell command {:?}", command);
        let reply = match command {
            ShellCommand::NewRound => {
                self.start_round(out)?;
                None
            }
            ShellCommand::MainMenu => {
                self.screen = Screen::Menu;
                self.draw_menu(out)?;
                None
            }
            ShellCommand::Exit => return Ok((Flow::Exit, Some(ShellReply::Done))),
            ShellCommand::SaveGameData { path } => Some(self.save_game_data(path)),
            ShellCommand::LoadGameData { path } => Some(self.load_game_data(path)),
            ShellCommand::WindowState => Some(ShellReply::Window(self.window)),
        };
        Ok((Flow::Continue, reply))
    }

    fn save_game_data(&self, path: std::path::PathBuf) -> ShellReply {
        let export = self.history.export(Utc::now());
        let written = export
            .to_json_pretty()
            .map_err(anyhow::Error::from)
            .and_then(|json| {
                fs::write(&path, json).with_context(|| format!("writing {}", path.display()))
            });
        match written {
            Ok(()) => {
                log::info!(
                    "saved {} history entries to {}",
                    export.history.len(),
                    path.display()
                );
                ShellReply::Saved { path }
            }
            Err(err) => {
                log::error!("Error saving game data: {:#}", err);
                ShellReply::Failed {
                    message: format!("{err:#}"),
                }
            }
        }
    }

    fn load_game_data(&mut self, path: std::path::PathBuf) -> ShellReply {
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) => {
                log::error!("Error loading game data from {}: {}", path.display(), err);
                return ShellReply::Failed {
                    message: format!("reading {}: {err}", path.display()),
                };
            }
        };
        match self.history.import(&json) {
            Some(entries) => ShellReply::Loaded { path, entries },
            None => ShellReply::Failed {
                message: format!("{} holds no game history", path.display()),
            },
        }
    }

    fn start_round(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        self.session.start_round(self.window.board_shape())?;
        self.screen = Screen::Game;

        if self.session.phase() == SessionPhase::Intro {
            for message in INTRO_MESSAGES {
                writeln!(out, "{message}")?;
                out.flush()?;
                thread::sleep(self.intro_step);
            }
            self.session.finish_intro();
        }
        self.draw_game(out)
    }

    fn flip(&mut self, position: Position, out: &mut impl Write) -> anyhow::Result<()> {
        if self.screen != Screen::Game {
            return Ok(writeln!(out, "Start a round first (press Enter)")?);
        }

        let outcome = match self.session.flip(position) {
            Ok(outcome) => outcome,
            Err(GameError::InvalidPosition) => {
                return Ok(writeln!(out, "There is no card at {position}")?);
            }
            Err(err) => return Err(err.into()),
        };
        if !outcome.has_update() {
            return Ok(writeln!(out, "Card {position} can't be flipped right now")?);
        }
        if let Some(event) = outcome.event() {
            writeln!(out, "{}", render::describe_event(event))?;
        }

        let Some(ticket) = outcome.pending() else {
            return self.draw_game(out);
        };

        render::draw_board(out, &self.session)?;
        out.flush()?;
        thread::sleep(self.session.config().resolve_delay);

        let resolved = self.session.resolve(ticket);
        for event in resolved.events() {
            writeln!(out, "{}", render::describe_event(event))?;
        }

        match resolved.summary() {
            Some(summary) => self.finish_round(&summary, out),
            None => self.draw_game(out),
        }
    }

    fn finish_round(
        &mut self,
        summary: &RoundSummary,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        self.history.record(HistoryEntry::from_summary(summary, Utc::now()));
        render::draw_board(out, &self.session)?;
        out.flush()?;
        thread::sleep(self.session.config().completion_delay);

        writeln!(out, "Congratulations!")?;
        render::draw_summary(out, summary)?;
        writeln!(out, "n: play again, m: main menu, q: quit")?;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32, out: &mut impl Write) -> anyhow::Result<()> {
        self.window.width = width;
        self.window.height = height;
        if self.session.on_viewport_change(f64::from(width), f64::from(height)) {
            writeln!(out, "Board re-dealt for the new window")?;
            self.draw_game(out)?;
        }
        Ok(())
    }

    fn draw_game(&self, out: &mut impl Write) -> anyhow::Result<()> {
        render::draw_board(out, &self.session)?;
        render::draw_counters(
            out,
            self.session.counters(),
            self.session.config().track_efficiency,
        )?;
        render::draw_revealed(out, self.session.revealed_faces())?;
        Ok(())
    }

    fn draw_menu(&self, out: &mut impl Write) -> anyhow::Result<()> {
        writeln!(out, "Memory")?;
        writeln!(out, "Enter: play  h: history  s: stats  ?: help  q: quit")?;
        Ok(())
    }
}

fn draw_help(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "<number>       flip the card at that position")?;
    writeln!(out, "n              new round")?;
    writeln!(out, "m              main menu")?;
    writeln!(out, "h / s          history / stats")?;
    writeln!(out, "clear          clear history")?;
    writeln!(out, "save [PATH]    export game data")?;
    writeln!(out, "load [PATH]    import game data")?;
    writeln!(out, "resize WxH     change the window size")?;
    writeln!(out, "window         show the window state")?;
    writeln!(out, "q              quit")
}
