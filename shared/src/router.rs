//! Typed views over an [`Envelope`].
//!
//! Every `as_*` probe is total: `Ok(None)` when the envelope carries a
//! different kind, `Err` only if the matching payload is malformed. Unknown
//! discriminants therefore never match anything.
//!
//! [`route`] folds the inbound probes into a single [`ServerMessage`] so that
//! consumers can match exhaustively instead of trying probes in sequence.

use serde::de::DeserializeOwned;

use crate::codec::Envelope;
use crate::{
    CommandKill, CommandMove, CommandRun, DeathReport, HighscoreUpdate, InitMetadata, JoinRequest,
    Level, MessageKind, PlayerReady, ProtocolError, SimpleServerEvent, SimpleServerEventKind,
    WorldState,
};

fn probe<T: DeserializeOwned>(
    envelope: &Envelope<'_>,
    kind: MessageKind,
) -> Result<Option<T>, ProtocolError> {
    if envelope.kind() != kind {
        return Ok(None);
    }
    envelope.payload().map(Some)
}

pub fn as_init_metadata(envelope: &Envelope<'_>) -> Result<Option<InitMetadata>, ProtocolError> {
    probe(envelope, MessageKind::InitMetadata)
}

pub fn as_level(envelope: &Envelope<'_>) -> Result<Option<Level>, ProtocolError> {
    probe(envelope, MessageKind::Level)
}

pub fn as_world_state(envelope: &Envelope<'_>) -> Result<Option<WorldState>, ProtocolError> {
    probe(envelope, MessageKind::WorldState)
}

/// Returns just the event kind, which is all a simple event carries.
pub fn as_simple_server_event(
    envelope: &Envelope<'_>,
) -> Result<Option<SimpleServerEventKind>, ProtocolError> {
    Ok(probe::<SimpleServerEvent>(envelope, MessageKind::SimpleServerEvent)?.map(|ev| ev.kind))
}

pub fn as_death_report(envelope: &Envelope<'_>) -> Result<Option<DeathReport>, ProtocolError> {
    probe(envelope, MessageKind::DeathReport)
}

pub fn as_highscore_update(
    envelope: &Envelope<'_>,
) -> Result<Option<HighscoreUpdate>, ProtocolError> {
    probe(envelope, MessageKind::HighscoreUpdate)
}

pub fn as_join_request(envelope: &Envelope<'_>) -> Result<Option<JoinRequest>, ProtocolError> {
    probe(envelope, MessageKind::JoinRequest)
}

pub fn as_player_ready(envelope: &Envelope<'_>) -> Result<Option<PlayerReady>, ProtocolError> {
    probe(envelope, MessageKind::PlayerReady)
}

pub fn as_command_move(envelope: &Envelope<'_>) -> Result<Option<CommandMove>, ProtocolError> {
    probe(envelope, MessageKind::CommandMove)
}

pub fn as_command_run(envelope: &Envelope<'_>) -> Result<Option<CommandRun>, ProtocolError> {
    probe(envelope, MessageKind::CommandRun)
}

pub fn as_command_kill(envelope: &Envelope<'_>) -> Result<Option<CommandKill>, ProtocolError> {
    probe(envelope, MessageKind::CommandKill)
}

/// Everything a client can receive, fully decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    InitMetadata(InitMetadata),
    Level(Level),
    WorldState(WorldState),
    SimpleServerEvent(SimpleServerEventKind),
    DeathReport(DeathReport),
    HighscoreUpdate(HighscoreUpdate),
    /// Unknown discriminant, or a server-bound kind arriving at a client.
    Unexpected(MessageKind),
}

/// Decodes an inbound envelope into its variant.
pub fn route(envelope: &Envelope<'_>) -> Result<ServerMessage, ProtocolError> {
    let message = match envelope.kind() {
        MessageKind::InitMetadata => ServerMessage::InitMetadata(envelope.payload()?),
        MessageKind::Level => ServerMessage::Level(envelope.payload()?),
        MessageKind::WorldState => ServerMessage::WorldState(envelope.payload()?),
        MessageKind::SimpleServerEvent => {
            ServerMessage::SimpleServerEvent(envelope.payload::<SimpleServerEvent>()?.kind)
        }
        MessageKind::DeathReport => ServerMessage::DeathReport(envelope.payload()?),
        MessageKind::HighscoreUpdate => ServerMessage::HighscoreUpdate(envelope.payload()?),
        other => ServerMessage::Unexpected(other),
    };
    Ok(message)
}
