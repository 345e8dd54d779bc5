//! Ready-to-send frames for every player intent.
//!
//! Nothing is validated here; the server decides what a command means.

use crate::codec::encode;
use crate::{
    CommandKill, CommandMove, CommandRun, JoinRequest, MessageKind, MobId, PlayerReady,
    ProtocolError, Vec2,
};

pub fn join_request(name: &str) -> Result<Vec<u8>, ProtocolError> {
    encode(
        MessageKind::JoinRequest,
        &JoinRequest {
            name: name.to_string(),
        },
    )
}

pub fn player_ready() -> Result<Vec<u8>, ProtocolError> {
    encode(MessageKind::PlayerReady, &PlayerReady)
}

/// Target in server units (meters).
pub fn move_to(x: f32, y: f32) -> Result<Vec<u8>, ProtocolError> {
    encode(
        MessageKind::CommandMove,
        &CommandMove {
            target: Vec2::new(x, y),
        },
    )
}

pub fn set_running(run: bool) -> Result<Vec<u8>, ProtocolError> {
    encode(MessageKind::CommandRun, &CommandRun { run })
}

pub fn kill_request(target_id: MobId) -> Result<Vec<u8>, ProtocolError> {
    encode(MessageKind::CommandKill, &CommandKill { mob_id: target_id })
}
