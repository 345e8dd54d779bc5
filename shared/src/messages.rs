//! Message kinds and payload schemas for both directions of the protocol.
//!
//! Payload structs are plain serde types; the codec frames them behind a
//! [`MessageKind`] discriminant. All positions are in server units (meters).

use serde::{Deserialize, Serialize};

/// Entity key as reported by the server.
pub type MobId = u16;
/// Roster key of a connected player.
pub type PlayerId = u16;
/// Visual variant of a mob.
pub type Species = u16;

/// Discriminant carried in the header of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    // Client -> server
    JoinRequest,
    PlayerReady,
    CommandMove,
    CommandRun,
    CommandKill,

    // Server -> client
    InitMetadata,
    Level,
    WorldState,
    SimpleServerEvent,
    DeathReport,
    HighscoreUpdate,

    /// Unset (0) or unrecognized discriminant.
    Unknown(u16),
}

impl MessageKind {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => MessageKind::JoinRequest,
            2 => MessageKind::PlayerReady,
            3 => MessageKind::CommandMove,
            4 => MessageKind::CommandRun,
            5 => MessageKind::CommandKill,
            16 => MessageKind::InitMetadata,
            17 => MessageKind::Level,
            18 => MessageKind::WorldState,
            19 => MessageKind::SimpleServerEvent,
            20 => MessageKind::DeathReport,
            21 => MessageKind::HighscoreUpdate,
            other => MessageKind::Unknown(other),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            MessageKind::JoinRequest => 1,
            MessageKind::PlayerReady => 2,
            MessageKind::CommandMove => 3,
            MessageKind::CommandRun => 4,
            MessageKind::CommandKill => 5,
            MessageKind::InitMetadata => 16,
            MessageKind::Level => 17,
            MessageKind::WorldState => 18,
            MessageKind::SimpleServerEvent => 19,
            MessageKind::DeathReport => 20,
            MessageKind::HighscoreUpdate => 21,
            MessageKind::Unknown(code) => code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Client -> server
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JoinRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PlayerReady;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CommandMove {
    pub target: Vec2,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CommandRun {
    pub run: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CommandKill {
    pub mob_id: MobId,
}

// ---------------------------------------------------------------------------
// Server -> client
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlayerInfo {
    pub name: String,
    pub id: PlayerId,
    pub species: Species,
    pub ready: bool,
}

/// Sent once the lobby fills: who we are and who we play against.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InitMetadata {
    pub self_id: MobId,
    pub level_id: u16,
    pub players: Vec<PlayerInfo>,
}

/// Circular obstacle (bush or stone).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Level {
    pub bushes: Vec<Obstacle>,
    pub stones: Vec<Obstacle>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MobState {
    Idle,
    Walking,
    Running,
    Attacking,
}

/// How a mob relates to the receiving player.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerRelation {
    #[default]
    None,
    /// Within kill distance.
    Close,
    /// The player's current kill target.
    Targeted,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MobRecord {
    pub id: MobId,
    pub species: Species,
    pub pos: Vec2,
    /// Radians.
    pub heading: f32,
    pub state: MobState,
    pub relation: PlayerRelation,
}

/// Direction and proximity cue towards another player.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Indicator {
    /// Radians.
    pub angle: f32,
    /// 0.0 (far) to 1.0 (close).
    pub force: f32,
    pub visible: bool,
}

/// Complete picture of every mob the receiving player can see.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WorldState {
    pub mobs: Vec<MobRecord>,
    pub indicators: Vec<Indicator>,
    pub steps_remaining: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleServerEventKind {
    TooFarToKill,
    KilledCivilian,
    GameStart,
    GameEnded,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SimpleServerEvent {
    pub kind: SimpleServerEventKind,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeathReport {
    pub killer_name: String,
    pub killed_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HighscoreEntry {
    pub name: String,
    pub points: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct HighscoreUpdate {
    pub players: Vec<HighscoreEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_stable() {
        let kinds = [
            MessageKind::JoinRequest,
            MessageKind::PlayerReady,
            MessageKind::CommandMove,
            MessageKind::CommandRun,
            MessageKind::CommandKill,
            MessageKind::InitMetadata,
            MessageKind::Level,
            MessageKind::WorldState,
            MessageKind::SimpleServerEvent,
            MessageKind::DeathReport,
            MessageKind::HighscoreUpdate,
        ];

        for kind in kinds {
            assert_eq!(MessageKind::from_code(kind.code()), kind);
        }
    }

    #[test]
    fn test_unset_and_unknown_codes() {
        assert_eq!(MessageKind::from_code(0), MessageKind::Unknown(0));
        assert_eq!(MessageKind::from_code(999), MessageKind::Unknown(999));
        assert_eq!(MessageKind::Unknown(999).code(), 999);
    }

    #[test]
    fn test_relation_default_is_none() {
        assert_eq!(PlayerRelation::default(), PlayerRelation::None);
    }
}
