use bytes::{BufMut, BytesMut};

use crate::protocol::types::{self, CompactArray, CompactString, Serialize, TopicId};
use crate::protocol::{ErrorCode, Response};

use super::{HeaderV1, ResponseHeader};

// https://kafka.apache.org/protocol.html#The_Messages_DescribeTopicPartitions
#[derive(Debug)]
pub struct DescribeTopicPartitionsResponseV0 {
    pub header: HeaderV1,
    pub throttle_time_ms: i32,
    pub topics: Vec<Topic>,
    pub next_cursor: u8,
}

impl DescribeTopicPartitionsResponseV0 {
    pub fn new(correlation_id: i32, topics: Vec<Topic>) -> Self {
        Self {
            header: HeaderV1::new(correlation_id),
            throttle_time_ms: 0,
            topics,
            next_cursor: 0,
        }
    }
}

impl Response for DescribeTopicPartitionsResponseV0 {
    fn correlation_id(&self) -> i32 {
        self.header.correlation_id()
    }

    fn serialize(&self, dst: &mut BytesMut) {
        // HEADER v1
        self.header.serialize(dst);

        // BODY
        dst.put_i32(self.throttle_time_ms);
        CompactArray::serialize(&self.topics, dst);
        dst.put_u8(self.next_cursor);
        types::put_tag_buffer(dst);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub error_code: ErrorCode,
    pub name: CompactString,
    pub topic_id: TopicId,
    pub is_internal: bool,
    /// Partitions are never reported, the array is always empty
    pub partitions_marker: u8,
    pub topic_authorized_operations: i32, // A 4-byte integer (bitfield) representing the authorized operations for this topic.
}

impl Topic {
    pub fn unknown(name: CompactString) -> Self {
        Self {
            error_code: ErrorCode::UnknownTopicOrPartition,
            name,
            topic_id: TopicId::ZERO,
            is_internal: false,
            partitions_marker: 0,
            topic_authorized_operations: 0,
        }
    }
}

impl Serialize for Topic {
    fn serialize(&self, dst: &mut BytesMut) {
        dst.put_i16(self.error_code.into());
        self.name.serialize(dst);
        self.topic_id.serialize(dst);
        dst.put_u8(self.is_internal.into());
        dst.put_u8(self.partitions_marker);
        dst.put_i32(self.topic_authorized_operations);
        types::put_tag_buffer(dst);
    }
}
