//! A broker speaking a subset of the Kafka wire protocol: ApiVersions and
//! DescribeTopicPartitions, answered without any topic state.

pub mod config;
pub mod error;
pub mod logic;
pub mod protocol;
pub mod server;
