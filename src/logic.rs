pub mod topic_partitions;

use bytes::Bytes;
use tracing::warn;

use crate::config::ServerConfig;
use crate::error::ProtocolError;
use crate::protocol::{
    request::{
        api_versions::ApiVersionsRequest,
        describe_topic_partitions::DescribeTopicPartitionsRequestV0, HeaderV2,
    },
    ApiKey, Response,
};

/// Decodes the body that follows `header`, runs the handler for its API key and returns
/// the response to be framed. An API key without a handler is an error, never a silent no-op.
pub fn process(
    header: &HeaderV2,
    body: &mut Bytes,
    config: &ServerConfig,
) -> Result<Box<dyn Response + Send>, ProtocolError> {
    let api_key = ApiKey::try_from(header.request_api_key)
        .map_err(|_| ProtocolError::UnsupportedApi(header.request_api_key))?;

    let response: Box<dyn Response + Send> = match api_key {
        ApiKey::ApiVersions => {
            let req = ApiVersionsRequest::new(header);
            Box::new(req.process(config))
        }
        ApiKey::DescribeTopicPartitions => {
            if !config.supports_version(api_key, header.request_api_version) {
                // answered like v0 regardless
                warn!(
                    correlation_id = header.correlation_id,
                    version = header.request_api_version,
                    "unadvertised DescribeTopicPartitions version"
                );
            }
            let req = DescribeTopicPartitionsRequestV0::from_bytes(body)?;
            Box::new(topic_partitions::process(header.correlation_id, req))
        }
    };

    Ok(response)
}
