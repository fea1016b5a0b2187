use bytes::{BufMut, BytesMut};

use crate::protocol::types::{self, CompactArray, Serialize};
use crate::protocol::{ApiKey, ErrorCode, Response};

use super::{HeaderV0, ResponseHeader};

/// Supported version range of one API, as advertised to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiKeyDescriptor {
    pub api_key: ApiKey,
    pub min_version: i16,
    pub max_version: i16,
}

impl Serialize for ApiKeyDescriptor {
    fn serialize(&self, dst: &mut BytesMut) {
        dst.put_i16(self.api_key.into());
        dst.put_i16(self.min_version);
        dst.put_i16(self.max_version);
        types::put_tag_buffer(dst); // _tagged_fields
    }
}

// The APIVersions response uses the "v0" header format
// https://kafka.apache.org/protocol.html#The_Messages_ApiVersions
#[derive(Debug)]
pub struct ApiVersionsResponseV3 {
    pub header: HeaderV0,
    pub error_code: ErrorCode,
    pub api_keys: Vec<ApiKeyDescriptor>,
    pub throttle_time_ms: i32,
}

impl ApiVersionsResponseV3 {
    pub fn new(correlation_id: i32, api_keys: Vec<ApiKeyDescriptor>, throttle_time_ms: i32) -> Self {
        Self {
            header: HeaderV0::new(correlation_id),
            error_code: ErrorCode::None,
            api_keys,
            throttle_time_ms,
        }
    }

    /// Carries only the correlation id and error code
    pub fn unsupported_version(correlation_id: i32) -> Self {
        Self {
            header: HeaderV0::new(correlation_id),
            error_code: ErrorCode::UnsupportedVersion,
            api_keys: Vec::new(),
            throttle_time_ms: 0,
        }
    }
}

impl Response for ApiVersionsResponseV3 {
    fn correlation_id(&self) -> i32 {
        self.header.correlation_id()
    }

    fn serialize(&self, dst: &mut BytesMut) {
        // HEADER v0
        self.header.serialize(dst);

        // BODY - ApiVersions Response (Version: 3)
        dst.put_i16(self.error_code.into());
        if self.error_code != ErrorCode::None {
            return;
        }

        CompactArray::serialize(&self.api_keys, dst);
        dst.put_i32(self.throttle_time_ms);
        types::put_tag_buffer(dst); // _tagged_fields
    }
}
