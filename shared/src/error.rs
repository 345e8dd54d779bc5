//! Errors raised while framing or unframing protocol messages.

/// Failures of the wire codec.
///
/// A frame whose discriminant is not recognized is *not* an error: it decodes
/// into an envelope of kind [`MessageKind::Unknown`](crate::MessageKind::Unknown)
/// and every probe reports "no match" for it. Likewise a probe that does not
/// match the envelope kind returns `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The buffer is too short, its declared length disagrees with the bytes
    /// present, or the payload does not decode as the variant its kind names.
    /// Fatal to that one frame only.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// Serializing an outgoing payload failed.
    #[error("encode failed: {0}")]
    Encode(bincode::Error),
}
