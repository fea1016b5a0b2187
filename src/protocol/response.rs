pub mod api_versions;
pub mod describe_topic_partitions;

use bytes::{BufMut, BytesMut};

use super::types;

// The APIVersions response uses the "v0" header format, while all other responses use the "v1" header format.
// The response header format (v0) is 4 bytes long, and contains exactly one field: correlation_id
// The response header format (v1) contains an additional tag_buffer field.
// https://kafka.apache.org/protocol.html#protocol_messages

pub trait ResponseHeader {
    fn correlation_id(&self) -> i32;
    fn serialize(&self, dst: &mut BytesMut);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderV0 {
    pub correlation_id: i32,
}

impl HeaderV0 {
    pub fn new(correlation_id: i32) -> Self {
        Self { correlation_id }
    }
}

impl ResponseHeader for HeaderV0 {
    fn correlation_id(&self) -> i32 {
        self.correlation_id
    }

    fn serialize(&self, dst: &mut BytesMut) {
        dst.put_i32(self.correlation_id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderV1 {
    pub correlation_id: i32,
}

impl HeaderV1 {
    pub fn new(correlation_id: i32) -> Self {
        Self { correlation_id }
    }
}

impl ResponseHeader for HeaderV1 {
    fn correlation_id(&self) -> i32 {
        self.correlation_id
    }

    fn serialize(&self, dst: &mut BytesMut) {
        dst.put_i32(self.correlation_id);
        types::put_tag_buffer(dst);
    }
}
