//! Connection settings for a single session.

pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:63987";
pub const DEFAULT_NICKNAME: &str = "fish";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Websocket URL of the match server.
    pub server_url: String,
    /// Name sent in the join request.
    pub nickname: String,
    /// Send `PlayerReady` right after joining.
    pub auto_ready: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            nickname: DEFAULT_NICKNAME.to_string(),
            auto_ready: false,
        }
    }
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            nickname: nickname.into(),
            ..Self::default()
        }
    }

    pub fn with_auto_ready(mut self, auto_ready: bool) -> Self {
        self.auto_ready = auto_ready;
        self
    }
}
