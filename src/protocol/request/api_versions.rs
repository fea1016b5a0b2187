use tracing::warn;

use crate::config::ServerConfig;
use crate::protocol::response::api_versions::ApiVersionsResponseV3;
use crate::protocol::ApiKey;

use super::HeaderV2;

/// ApiVersions carries nothing the broker needs besides the header; any body
/// (client software name and version from v3 on) is left unread.
#[derive(Debug)]
pub struct ApiVersionsRequest<'a> {
    header: &'a HeaderV2,
}

impl<'a> ApiVersionsRequest<'a> {
    // https://kafka.apache.org/protocol.html#The_Messages_ApiVersions
    pub fn new(header: &'a HeaderV2) -> Self {
        Self { header }
    }

    pub fn process(self, config: &ServerConfig) -> ApiVersionsResponseV3 {
        let correlation_id = self.header.correlation_id;
        let version = self.header.request_api_version;

        if !config.supports_version(ApiKey::ApiVersions, version) {
            warn!(correlation_id, version, "unsupported ApiVersions version");
            return ApiVersionsResponseV3::unsupported_version(correlation_id);
        }

        ApiVersionsResponseV3::new(
            correlation_id,
            config.supported_apis.clone(),
            config.api_versions_throttle_time_ms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::response::api_versions::ApiKeyDescriptor;
    use crate::protocol::ErrorCode;

    fn request(version: i16) -> HeaderV2 {
        HeaderV2::new(ApiKey::ApiVersions.into(), version, 311908132, None, 0)
    }

    #[test]
    fn supported_versions_advertise_both_apis() {
        let config = ServerConfig::default();
        for version in 0..=4 {
            let header = request(version);
            let resp = ApiVersionsRequest::new(&header).process(&config);
            assert_eq!(resp.error_code, ErrorCode::None);
            assert_eq!(resp.header.correlation_id, 311908132);
            assert_eq!(resp.throttle_time_ms, 1000);
            assert_eq!(
                resp.api_keys,
                vec![
                    ApiKeyDescriptor {
                        api_key: ApiKey::ApiVersions,
                        min_version: 0,
                        max_version: 4
                    },
                    ApiKeyDescriptor {
                        api_key: ApiKey::DescribeTopicPartitions,
                        min_version: 0,
                        max_version: 0
                    },
                ]
            );
        }
    }

    #[test]
    fn unsupported_versions_get_error_35() {
        let config = ServerConfig::default();
        for version in [-1, 5, 32767, i16::MIN] {
            let header = request(version);
            let resp = ApiVersionsRequest::new(&header).process(&config);
            assert_eq!(resp.error_code, ErrorCode::UnsupportedVersion);
            assert!(resp.api_keys.is_empty());
        }
    }

    #[test]
    fn accepted_range_follows_config() {
        let config = ServerConfig {
            supported_apis: vec![ApiKeyDescriptor {
                api_key: ApiKey::ApiVersions,
                min_version: 3,
                max_version: 3,
            }],
            api_versions_throttle_time_ms: 0,
            ..ServerConfig::default()
        };

        let header = request(2);
        let resp = ApiVersionsRequest::new(&header).process(&config);
        assert_eq!(resp.error_code, ErrorCode::UnsupportedVersion);

        let header = request(3);
        let resp = ApiVersionsRequest::new(&header).process(&config);
        assert_eq!(resp.error_code, ErrorCode::None);
        assert_eq!(resp.api_keys.len(), 1);
        assert_eq!(resp.throttle_time_ms, 0);
    }
}
