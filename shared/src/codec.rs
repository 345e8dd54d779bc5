//! Frame layout and the envelope reader.
//!
//! ```text
//! +-----------+------------------+---------------------+
//! | kind: u16 | payload_len: u32 | payload (bincode)   |
//! +-----------+------------------+---------------------+
//!   little-endian header, HEADER_LEN bytes
//! ```
//!
//! The envelope only classifies the header. Payloads are decoded on demand
//! through [`Envelope::payload`], keyed by the variant the caller asks for.

use bincode::{deserialize, serialize};
use serde::{de::DeserializeOwned, Serialize};

use crate::{MessageKind, ProtocolError};

pub const HEADER_LEN: usize = 6;

/// A validated frame whose payload has not been decoded yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope<'a> {
    kind: MessageKind,
    payload: &'a [u8],
}

impl<'a> Envelope<'a> {
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Decodes the payload as `T`. The caller is responsible for having
    /// checked that `T` is the schema for [`Self::kind`].
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, ProtocolError> {
        deserialize(self.payload).map_err(|e| {
            ProtocolError::MalformedFrame(format!("{:?} payload: {}", self.kind, e))
        })
    }
}

/// Builds a complete frame for `kind` carrying `payload`.
pub fn encode<T: Serialize>(kind: MessageKind, payload: &T) -> Result<Vec<u8>, ProtocolError> {
    let body = serialize(payload).map_err(ProtocolError::Encode)?;
    let len = u32::try_from(body.len())
        .map_err(|_| ProtocolError::Encode(Box::new(bincode::ErrorKind::SizeLimit)))?;

    let mut frame = Vec::with_capacity(HEADER_LEN + body.len());
    frame.extend_from_slice(&kind.code().to_le_bytes());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Parses the frame header.
///
/// Fails only on structural problems; an unrecognized discriminant yields an
/// envelope of kind [`MessageKind::Unknown`].
pub fn decode_envelope(bytes: &[u8]) -> Result<Envelope<'_>, ProtocolError> {
    if bytes.len() < HEADER_LEN {
        return Err(ProtocolError::MalformedFrame(format!(
            "{} bytes is shorter than the {} byte header",
            bytes.len(),
            HEADER_LEN
        )));
    }

    let code = u16::from_le_bytes([bytes[0], bytes[1]]);
    let declared = u32::from_le_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]) as usize;
    let payload = &bytes[HEADER_LEN..];

    if payload.len() != declared {
        return Err(ProtocolError::MalformedFrame(format!(
            "header declares {} payload bytes, frame carries {}",
            declared,
            payload.len()
        )));
    }

    Ok(Envelope {
        kind: MessageKind::from_code(code),
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommandKill, JoinRequest, PlayerReady};

    #[test]
    fn test_header_layout() {
        let frame = encode(MessageKind::CommandKill, &CommandKill { mob_id: 0x0102 }).unwrap();

        assert_eq!(&frame[0..2], &5u16.to_le_bytes());
        assert_eq!(&frame[2..6], &2u32.to_le_bytes());
        assert_eq!(&frame[6..], &[0x02, 0x01]);
    }

    #[test]
    fn test_empty_buffer_is_malformed() {
        let result = decode_envelope(&[]);
        assert!(matches!(result, Err(ProtocolError::MalformedFrame(_))));
    }

    #[test]
    fn test_short_header_is_malformed() {
        let result = decode_envelope(&[16, 0, 0]);
        assert!(matches!(result, Err(ProtocolError::MalformedFrame(_))));
    }

    #[test]
    fn test_truncated_payload_is_malformed() {
        let frame = encode(
            MessageKind::JoinRequest,
            &JoinRequest {
                name: "nemo".to_string(),
            },
        )
        .unwrap();

        let result = decode_envelope(&frame[..frame.len() - 1]);
        assert!(matches!(result, Err(ProtocolError::MalformedFrame(_))));
    }

    #[test]
    fn test_trailing_garbage_is_malformed() {
        let mut frame = encode(MessageKind::PlayerReady, &PlayerReady).unwrap();
        frame.push(0xff);

        let result = decode_envelope(&frame);
        assert!(matches!(result, Err(ProtocolError::MalformedFrame(_))));
    }

    #[test]
    fn test_unknown_discriminant_decodes() {
        let mut frame = Vec::new();
        frame.extend_from_slice(&777u16.to_le_bytes());
        frame.extend_from_slice(&0u32.to_le_bytes());

        let envelope = decode_envelope(&frame).unwrap();
        assert_eq!(envelope.kind(), MessageKind::Unknown(777));
        assert!(matches!(
            envelope.payload::<CommandKill>(),
            Err(ProtocolError::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_payload_decoding_is_lazy() {
        // Header is fine, payload is not a JoinRequest: only the payload
        // read fails.
        let mut frame = Vec::new();
        frame.extend_from_slice(&MessageKind::JoinRequest.code().to_le_bytes());
        frame.extend_from_slice(&3u32.to_le_bytes());
        frame.extend_from_slice(&[1, 2, 3]);

        let envelope = decode_envelope(&frame).unwrap();
        assert_eq!(envelope.kind(), MessageKind::JoinRequest);

        let result = envelope.payload::<JoinRequest>();
        assert!(matches!(result, Err(ProtocolError::MalformedFrame(_))));
    }

    #[test]
    fn test_unit_payload_has_empty_body() {
        let frame = encode(MessageKind::PlayerReady, &PlayerReady).unwrap();
        assert_eq!(frame.len(), HEADER_LEN);

        let envelope = decode_envelope(&frame).unwrap();
        assert_eq!(envelope.payload::<PlayerReady>().unwrap(), PlayerReady);
    }
}
