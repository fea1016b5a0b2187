use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use crate::protocol::response::api_versions::ApiKeyDescriptor;
use crate::protocol::ApiKey;

pub const DEFAULT_PORT: u16 = 9092;

/// Fixed throttle time advertised in successful ApiVersions responses
pub const API_VERSIONS_THROTTLE_TIME_MS: i32 = 1000;

/// https://kafka.apache.org/protocol.html#protocol_common
/// Frames above this size are rejected before the payload is read.
pub const MAX_FRAME_SIZE: usize = 100 * 1024 * 1024;

/// Broker settings handed explicitly to the connection loop and the dispatcher.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// Advertised in ApiVersions, in this order. The ApiVersions entry also bounds
    /// which ApiVersions request versions are accepted.
    pub supported_apis: Vec<ApiKeyDescriptor>,
    pub api_versions_throttle_time_ms: i32,
    pub max_frame_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            supported_apis: vec![
                ApiKeyDescriptor {
                    api_key: ApiKey::ApiVersions,
                    min_version: 0,
                    max_version: 4,
                },
                ApiKeyDescriptor {
                    api_key: ApiKey::DescribeTopicPartitions,
                    min_version: 0,
                    max_version: 0,
                },
            ],
            api_versions_throttle_time_ms: API_VERSIONS_THROTTLE_TIME_MS,
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}

impl ServerConfig {
    /// Supported version range for `api_key`, if the broker advertises it
    pub fn version_range(&self, api_key: ApiKey) -> Option<(i16, i16)> {
        self.supported_apis
            .iter()
            .find(|d| d.api_key == api_key)
            .map(|d| (d.min_version, d.max_version))
    }

    pub fn supports_version(&self, api_key: ApiKey, version: i16) -> bool {
        self.version_range(api_key)
            .is_some_and(|(min, max)| (min..=max).contains(&version))
    }
}
