//! Player intents and their console syntax.
//!
//! ```text
//! join <name>     ready     move <x> <y>     run on|off     kill <id>
//! ```
//! Coordinates are in server units (meters).

use shared::{commands, MobId, ProtocolError};

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Join(String),
    Ready,
    Move(f32, f32),
    Run(bool),
    Kill(MobId),
}

/// Why a console line could not be turned into an [`Intent`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ParseIntentError(String);

impl Intent {
    pub fn parse(line: &str) -> Result<Self, ParseIntentError> {
        let mut words = line.split_whitespace();
        let command = words
            .next()
            .ok_or_else(|| ParseIntentError("empty command".to_string()))?;
        let args: Vec<&str> = words.collect();

        match (command, args.as_slice()) {
            ("join", [name]) => Ok(Intent::Join(name.to_string())),
            ("ready", []) => Ok(Intent::Ready),
            ("move", [x, y]) => Ok(Intent::Move(parse_arg(x)?, parse_arg(y)?)),
            ("run", ["on"]) => Ok(Intent::Run(true)),
            ("run", ["off"]) => Ok(Intent::Run(false)),
            ("kill", [id]) => Ok(Intent::Kill(parse_arg(id)?)),
            _ => Err(ParseIntentError(format!("unrecognized command: {}", line.trim()))),
        }
    }

    /// Frame ready to be sent to the server.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        match self {
            Intent::Join(name) => commands::join_request(name),
            Intent::Ready => commands::player_ready(),
            Intent::Move(x, y) => commands::move_to(*x, *y),
            Intent::Run(run) => commands::set_running(*run),
            Intent::Kill(id) => commands::kill_request(*id),
        }
    }
}

fn parse_arg<T: std::str::FromStr>(word: &str) -> Result<T, ParseIntentError> {
    word.parse()
        .map_err(|_| ParseIntentError(format!("invalid argument: {}", word)))
}
