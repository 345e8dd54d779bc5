//! # Match Client Library
//!
//! Client side of the fish match: keeps a local mirror of the authoritative
//! server state and forwards player intents. The client never simulates
//! anything itself. It receives, reconciles and presents.
//!
//! ## Data flow
//!
//! ```text
//! socket -> codec -> router -> { SessionState | ClientGameState } -> Presenter -> Presentation
//! Intent -> commands -> codec -> socket
//! ```
//!
//! ## Module Organization
//!
//! ### Session (`session`)
//! Identity, level geometry, roster, score table and the running flag for a
//! single connection.
//!
//! ### Game (`game`)
//! The entity reconciler. Each `WorldState` snapshot is diffed against the
//! live mob set and produces spawn/move/state/despawn effects. A mob missing
//! from a snapshot is gone.
//!
//! ### Presentation (`presentation`)
//! The drawing boundary. `Presenter` owns the mob id to view handle table and
//! is the only place where meters become pixels.
//!
//! ### Dispatch (`dispatch`)
//! Decodes one frame at a time and applies it to the session, the reconciler
//! and the presenter.
//!
//! ### Input (`input`)
//! Player intents, parsed from console lines and encoded as command frames.
//!
//! ### Network (`network`)
//! The websocket session loop. No reconnect logic: a new connection is a new
//! session.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::config::ClientConfig;
//! use client::network::Client;
//! use client::presentation::LogPresentation;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("ws://127.0.0.1:63987", "nemo").with_auto_ready(true);
//!     let (_intent_tx, intent_rx) = tokio::sync::mpsc::unbounded_channel();
//!
//!     let client = Client::connect(config, LogPresentation::new()).await?;
//!     let finished = client.run(intent_rx).await?;
//!
//!     for row in finished.session().highscores() {
//!         println!("{} {}", row.name, row.points);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod game;
pub mod input;
pub mod network;
pub mod presentation;
pub mod session;

pub use error::ClientError;
