use shared::ProtocolError;
use tokio_tungstenite::tungstenite;

/// Failures that end a client session.
///
/// Single malformed frames are not among them: those are logged and dropped.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] tungstenite::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}
