//! Inbound topics and pattern match results

use std::fmt;

use arcstr::{ArcStr, Substr};
use smallvec::SmallVec;
use thiserror::Error;

/// Inbound topic split into its `/`-delimited segments.
#[derive(Debug, Clone)]
pub struct TopicPath {
	/// Full topic string
	pub path: ArcStr,
	/// Segments borrowed from `path`
	pub segments: Vec<Substr>,
}

impl TopicPath {
	/// Splits a topic into segments.
	pub fn new(path: impl Into<ArcStr>) -> Self {
		let path = path.into();
		let segments: Vec<Substr> =
			path.split('/').map(|s| path.substr_from(s)).collect();
		Self { path, segments }
	}

	/// Returns the full topic string.
	pub fn path(&self) -> ArcStr {
		self.path.clone()
	}

	/// Returns the number of segments.
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	/// Always false: splitting yields at least one (possibly empty) segment.
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}
}

impl fmt::Display for TopicPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.path)
	}
}

/// Reason a topic did not match a pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopicMatchError {
	/// Topic has more segments than the pattern
	#[error("Topic is longer than the pattern")]
	UnexpectedEndOfPattern,

	/// Topic has fewer segments than the pattern
	#[error("Topic is shorter than the pattern")]
	UnexpectedEndOfTopic,

	/// Literal segment differs
	#[error("Expected '{expected}' at position {position}, found '{found}'")]
	SegmentMismatch {
		/// Literal from the pattern
		expected: String,
		/// Segment from the topic
		found: String,
		/// Segment index
		position: usize,
	},

	/// Segment is not one of the enumerated options
	#[error(
		"Value '{found}' at position {position} is not an option of \
		 placeholder '{name}'"
	)]
	OptionMismatch {
		/// Placeholder name
		name: String,
		/// Segment from the topic
		found: String,
		/// Segment index
		position: usize,
	},
}

/// Successful match: the topic plus captured placeholder values in
/// declaration order.
#[derive(Clone)]
pub struct TopicMatch {
	topic: ArcStr,
	captures: SmallVec<[(Substr, Substr); 4]>,
}

impl TopicMatch {
	pub(crate) fn from_match_result(
		topic: ArcStr,
		captures: SmallVec<[(Substr, Substr); 4]>,
	) -> Self {
		Self { topic, captures }
	}

	/// Full matched topic.
	pub fn topic(&self) -> &ArcStr {
		&self.topic
	}

	/// Captured value by position among captures.
	pub fn get_param(&self, index: usize) -> Option<&Substr> {
		self.captures.get(index).map(|(_, value)| value)
	}

	/// Captured value by placeholder name.
	pub fn get_named_param(&self, name: &str) -> Option<&Substr> {
		self.captures
			.iter()
			.find(|(n, _)| n.as_str() == name)
			.map(|(_, value)| value)
	}

	/// Iterator over `(name, value)` pairs in declaration order.
	pub fn captures(&self) -> impl Iterator<Item = (&str, &Substr)> {
		self.captures.iter().map(|(name, value)| (name.as_str(), value))
	}

	/// Number of captured placeholders.
	pub fn len(&self) -> usize {
		self.captures.len()
	}

	/// True if the pattern had no named placeholders.
	pub fn is_empty(&self) -> bool {
		self.captures.is_empty()
	}
}

impl fmt::Debug for TopicMatch {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TopicMatch {{ topic: {}, captures: {{", self.topic)?;
		for (i, (name, value)) in self.captures.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{name}: {value}")?;
		}
		write!(f, "}} }}")
	}
}

impl fmt::Display for TopicMatch {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Match({})", self.topic)?;
		if !self.captures.is_empty() {
			write!(f, " with {} params", self.captures.len())?;
		}
		Ok(())
	}
}
