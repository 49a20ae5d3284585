use memorito_core::Position;
use memorito_protocol::{EXPORT_FILE_NAME, ShellCommand};
use std::path::PathBuf;

/// One line typed by the player.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Empty,
    Flip(Position),
    Shell(ShellCommand),
    Resize { width: u32, height: u32 },
    History,
    Stats,
    ClearHistory,
    Help,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    if let Ok(position) = word.parse::<Position>() {
        return Input::Flip(position);
    }

    match word.to_ascii_lowercase().as_str() {
        "" => Input::Empty,
        "n" | "new" | "p" | "play" => Input::Shell(ShellCommand::NewRound),
        "m" | "menu" => Input::Shell(ShellCommand::MainMenu),
        "q" | "quit" | "exit" => Input::Shell(ShellCommand::Exit),
        "save" => Input::Shell(ShellCommand::SaveGameData {
            path: path_or_default(rest),
        }),
        "load" => Input::Shell(ShellCommand::LoadGameData {
            path: path_or_default(rest),
        }),
        "window" => Input::Shell(ShellCommand::WindowState),
        "resize" => match parse_viewport(rest) {
            Ok((width, height)) => Input::Resize { width, height },
            Err(_) => Input::Unknown(line.to_owned()),
        },
        "h" | "history" => Input::History,
        "s" | "stats" => Input::Stats,
        "clear" => Input::ClearHistory,
        "?" | "help" => Input::Help,
        _ => Input::Unknown(line.to_owned()),
    }
}

fn path_or_default(rest: &str) -> PathBuf {
    if rest.is_empty() {
        PathBuf::from(EXPORT_FILE_NAME)
    } else {
        PathBuf::from(rest)
    }
}

/// Parses `WIDTHxHEIGHT`, both sides non-zero.
pub fn parse_viewport(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value:?}"))?;
    let width: u32 = width.trim().parse().map_err(|err| format!("bad width: {err}"))?;
    let height: u32 = height.trim().parse().map_err(|err| format!("bad height: {err}"))?;
    if width == 0 || height == 0 {
        return Err("viewport sides must be non-zero".to_owned());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_flip_cards() {
        assert_eq!(parse_input("7"), Input::Flip(7));
        assert_eq!(parse_input("  12 \n"), Input::Flip(12));
    }

    #[test]
    fn shell_commands_map_to_protocol() {
        assert_eq!(parse_input("n"), Input::Shell(ShellCommand::NewRound));
        assert_eq!(parse_input("Q"), Input::Shell(ShellCommand::Exit));
        assert_eq!(
            parse_input("save /tmp/scores.json"),
            Input::Shell(ShellCommand::SaveGameData {
                path: PathBuf::from("/tmp/scores.json")
            })
        );
        assert_eq!(
            parse_input("load"),
            Input::Shell(ShellCommand::LoadGameData {
                path: PathBuf::from(EXPORT_FILE_NAME)
            })
        );
    }

    #[test]
    fn resize_needs_a_viewport() {
        assert_eq!(
            parse_input("resize 1920x1080"),
            Input::Resize {
                width: 1920,
                height: 1080
            }
        );
        assert_eq!(
            parse_input("resize wide"),
            Input::Unknown("resize wide".to_owned())
        );
    }

    #[test]
    fn viewport_rejects_zero_and_garbage() {
        assert_eq!(parse_viewport("1280X800"), Ok((1280, 800)));
        assert!(parse_viewport("0x800").is_err());
        assert!(parse_viewport("1280").is_err());
        assert!(parse_viewport("ax1").is_err());
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_input(""), Input::Empty);
        assert_eq!(parse_input("dance"), Input::Unknown("dance".to_owned()));
    }
}
