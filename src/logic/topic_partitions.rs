use tracing::debug;

use crate::protocol::{
    request::describe_topic_partitions::DescribeTopicPartitionsRequestV0,
    response::describe_topic_partitions::{DescribeTopicPartitionsResponseV0, Topic},
};

/// There is no topic registry: every requested topic is reported as unknown,
/// in request order, with its name echoed byte for byte.
pub fn process(
    correlation_id: i32,
    req: DescribeTopicPartitionsRequestV0,
) -> DescribeTopicPartitionsResponseV0 {
    debug!(
        correlation_id,
        topics = ?req.topics,
        response_partition_limit = req.response_partition_limit,
        cursor = req.cursor,
        "describe topic partitions"
    );

    let topics = req.topics.into_iter().map(Topic::unknown).collect();

    DescribeTopicPartitionsResponseV0::new(correlation_id, topics)
}
