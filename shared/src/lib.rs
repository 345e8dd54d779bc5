//! Wire protocol shared by the match client and its tests.
//!
//! - [`codec`]: frame layout, [`Envelope`] and [`encode`] / [`decode_envelope`]
//! - [`router`]: per-variant probes and the [`ServerMessage`] sum type
//! - [`commands`]: one constructor per outgoing player intent
//!
//! Positions travel in server units (meters). Conversion to pixels happens at
//! the presentation edge using [`METERS_TO_PIXELS`].

pub mod codec;
pub mod commands;
mod error;
mod messages;
pub mod router;

pub use codec::{decode_envelope, encode, Envelope};
pub use error::ProtocolError;
pub use messages::*;
pub use router::{route, ServerMessage};

pub const METERS_TO_PIXELS: f32 = 100.0;
/// Server simulation steps per second.
pub const SERVER_TICK_RATE: u64 = 20;
/// Species of non-player mobs.
pub const CIVILIAN_SPECIES: Species = Species::MAX;
