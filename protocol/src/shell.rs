use memorito_core::{BoardShape, determine_shape};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Requests crossing the desktop shell boundary, in either direction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum ShellCommand {
    NewRound,
    MainMenu,
    Exit,
    SaveGameData { path: PathBuf },
    LoadGameData { path: PathBuf },
    WindowState,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    pub width: u32,
    pub height: u32,
    pub is_maximized: bool,
    pub is_full_screen: bool,
}

impl WindowState {
    pub fn board_shape(&self) -> BoardShape {
        determine_shape(f64::from(self.width), f64::from(self.height))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "kebab-case")]
pub enum ShellReply {
    Done,
    Saved { path: PathBuf },
    Loaded { path: PathBuf, entries: usize },
    Window(WindowState),
    Failed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_tagged_by_name() {
        let json = serde_json::to_value(ShellCommand::SaveGameData {
            path: PathBuf::from("scores.json"),
        })
        .unwrap();
        assert_eq!(json["command"], "save-game-data");
        assert_eq!(json["path"], "scores.json");

        let parsed: ShellCommand = serde_json::from_str(r#"{"command":"new-round"}"#).unwrap();
        assert_eq!(parsed, ShellCommand::NewRound);
    }

    #[test]
    fn window_state_picks_board() {
        let window = WindowState {
            width: 1280,
            height: 720,
            is_maximized: false,
            is_full_screen: false,
        };
        assert_eq!(window.board_shape(), BoardShape::LANDSCAPE);
    }
}
