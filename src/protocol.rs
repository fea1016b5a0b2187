pub mod request;
pub mod response;
pub mod types;

use bytes::{BufMut, BytesMut};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// https://kafka.apache.org/protocol.html#protocol_api_keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(i16)]
pub enum ApiKey {
    ApiVersions = 18,
    DescribeTopicPartitions = 75,
}

/// https://kafka.apache.org/protocol.html#protocol_error_codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(i16)]
pub enum ErrorCode {
    None = 0,
    UnknownTopicOrPartition = 3,
    UnsupportedVersion = 35,
}

/// Response Message is a wrapper around API response with prepended message size
// https://kafka.apache.org/protocol.html#protocol_common
pub struct ResponseMessage {
    bytes: BytesMut,
}

impl ResponseMessage {
    /// Serializes the response and prepends its size once the whole body is assembled
    pub fn from_response(resp: &dyn Response) -> Self {
        let mut bytes = BytesMut::new();

        let msg_size = 0; // placeholder; will be counted later
        bytes.put_i32(msg_size);

        resp.serialize(&mut bytes);

        let resp_size = bytes.len() as i32 - 4;
        bytes[..4].copy_from_slice(&resp_size.to_be_bytes());

        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub trait Response {
    fn correlation_id(&self) -> i32;

    /// Appends the response header and body to `dst`
    fn serialize(&self, dst: &mut BytesMut);
}
