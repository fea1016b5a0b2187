use bytes::Bytes;

use crate::error::ProtocolError;
use crate::protocol::types::{self, CheckedBuf, CompactArray, CompactString};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeTopicPartitionsRequestV0 {
    pub topics: Vec<CompactString>,
    pub response_partition_limit: i32,
    pub cursor: u8,
}

impl DescribeTopicPartitionsRequestV0 {
    // https://kafka.apache.org/protocol.html#The_Messages_DescribeTopicPartitions
    /// Decodes the body that follows the request header
    pub fn from_bytes(src: &mut Bytes) -> Result<Self, ProtocolError> {
        // each topic entry: name COMPACT_STRING, then its own tag buffer
        let topics = CompactArray::deserialize::<CompactString>(src)?;
        let response_partition_limit = src.checked_i32("response_partition_limit")?;
        let cursor = src.checked_u8("cursor")?; // 0xff when the client sends a null cursor

        if !src.is_empty() {
            types::skip_tag_buffer(src)?;
        }

        Ok(Self {
            topics,
            response_partition_limit,
            cursor,
        })
    }
}
