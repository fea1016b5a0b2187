pub mod api_versions;
pub mod describe_topic_partitions;

use std::borrow::Cow;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ProtocolError;

use super::types;

/// message_size, request_api_key, request_api_version, correlation_id, client_id length
pub const HEADER_FIXED_LEN: usize = 4 + 2 + 2 + 4 + 2;

/// Smallest payload after the size field: the fixed fields, an empty client_id and the tag buffer
pub const MIN_PAYLOAD_LEN: usize = HEADER_FIXED_LEN - 4 + 1;

/// Request Header v2
// https://kafka.apache.org/protocol.html#protocol_messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderV2 {
    /// Byte count of the frame after the size field itself
    pub length: i32,
    pub request_api_key: i16, // https://kafka.apache.org/protocol.html#protocol_api_keys
    pub request_api_version: i16,
    pub correlation_id: i32,
    /// NULLABLE_STRING: opaque bytes, `None` when the length is -1
    pub client_id: Option<Bytes>,
}

impl HeaderV2 {
    /// Builds a header for a frame carrying `body_len` more bytes after the header
    pub fn new(
        request_api_key: i16,
        request_api_version: i16,
        correlation_id: i32,
        client_id: Option<Bytes>,
        body_len: usize,
    ) -> Self {
        let client_id_len = client_id.as_ref().map_or(0, Bytes::len);
        let length = (MIN_PAYLOAD_LEN + client_id_len + body_len) as i32;
        Self {
            length,
            request_api_key,
            request_api_version,
            correlation_id,
            client_id,
        }
    }

    /// Decodes the header from the front of a frame (size field included) and leaves
    /// `src` positioned right after the header's tag buffer.
    pub fn from_bytes(src: &mut Bytes) -> Result<Self, ProtocolError> {
        if src.remaining() < HEADER_FIXED_LEN {
            return Err(ProtocolError::MalformedHeader(format!(
                "{} bytes, need at least {HEADER_FIXED_LEN}",
                src.remaining()
            )));
        }

        let length = src.get_i32();
        if length < 0 || length as usize > src.remaining() {
            return Err(ProtocolError::MalformedHeader(format!(
                "message size {length} with {} bytes following",
                src.remaining()
            )));
        }

        let request_api_key = src.get_i16();
        let request_api_version = src.get_i16();
        let correlation_id = src.get_i32();

        let client_id_len = src.get_i16();
        let client_id_len = match client_id_len {
            -1 => None,
            n if n >= 0 => Some(n as usize),
            n => {
                return Err(ProtocolError::MalformedHeader(format!(
                    "client_id length {n}"
                )))
            }
        };

        // client_id plus the trailing tag buffer
        let claimed = client_id_len.unwrap_or(0) + 1;
        if src.remaining() < claimed {
            return Err(ProtocolError::MalformedHeader(format!(
                "client_id and tag buffer claim {claimed} bytes, {} left",
                src.remaining()
            )));
        }
        let client_id = client_id_len.map(|len| src.split_to(len));

        types::skip_tag_buffer(src)?;

        Ok(Self {
            length,
            request_api_key,
            request_api_version,
            correlation_id,
            client_id,
        })
    }

    /// Encodes the header with its size field, as a client would send it
    pub fn to_bytes(&self) -> Bytes {
        let mut b = BytesMut::new();
        b.put_i32(self.length);
        b.put_i16(self.request_api_key);
        b.put_i16(self.request_api_version);
        b.put_i32(self.correlation_id);
        match &self.client_id {
            Some(client_id) => {
                b.put_i16(client_id.len() as i16);
                b.put_slice(client_id);
            }
            None => b.put_i16(-1),
        }
        types::put_tag_buffer(&mut b);
        b.freeze()
    }

    pub fn client_id_lossy(&self) -> Cow<'_, str> {
        match &self.client_id {
            Some(client_id) => String::from_utf8_lossy(client_id),
            None => Cow::Borrowed("-"),
        }
    }
}
