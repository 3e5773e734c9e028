//! Route pattern handling
//!
//! Parses route patterns (`home/<room>:{kitchen,hall}/+`), matches inbound
//! topics against them and expands them into broker subscription paths.

pub mod error;
pub mod topic_match;
pub mod topic_pattern_item;
/// Route pattern parsing, matching and subscription expansion
pub mod topic_pattern_path;

#[cfg(test)]
mod topic_pattern_path_tests;

pub use error::{PatternResult, TopicError, TopicResult, limits};
pub use topic_match::{TopicMatch, TopicMatchError, TopicPath};
pub use topic_pattern_item::{
	TopicPatternError, TopicPatternItem, WILDCARD_TOKEN,
};
pub use topic_pattern_path::TopicPatternPath;
