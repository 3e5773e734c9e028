//! Error types and constants for the topic module
//!
//! Individual error types stay in their submodules; this module aggregates
//! them for callers that want a single error type.

use thiserror::Error;

use super::topic_match::TopicMatchError;
use super::topic_pattern_item::TopicPatternError;

/// Any error produced while parsing patterns or matching topics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopicError {
	/// Route pattern parsing error
	#[error("Topic pattern error: {0}")]
	Pattern(#[from] TopicPatternError),

	/// Topic did not match a pattern
	#[error("Topic match error: {0}")]
	Match(#[from] TopicMatchError),
}

/// Convenient Result type for topic operations
pub type TopicResult<T> = Result<T, TopicError>;

/// Convenient Result type for pattern operations
pub type PatternResult<T> = Result<T, TopicPatternError>;

/// Topic processing limits
pub mod limits {
	/// Maximum number of segments in a route pattern
	pub const MAX_TOPIC_DEPTH: usize = 32;
}
