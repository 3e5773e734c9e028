use std::collections::HashSet;
use std::convert::TryFrom;
use std::slice::Iter;

use arcstr::{ArcStr, Substr};
use smallvec::SmallVec;

use super::error::limits::MAX_TOPIC_DEPTH;
use super::topic_match::{TopicMatch, TopicMatchError, TopicPath};
use super::topic_pattern_item::{TopicPatternError, TopicPatternItem};

/// Parsed route pattern with placeholder support
///
/// Holds the original template (`home/<room>:{kitchen,hall}/+`) and its
/// segments. Matching is segment-wise and requires the topic to have exactly
/// as many segments as the pattern.
#[derive(Debug, Clone)]
pub struct TopicPatternPath {
	template_pattern: ArcStr,
	segments: Vec<TopicPatternItem>,
}

impl TopicPatternPath {
	/// Parses a route pattern.
	pub fn new_from_string(
		topic_pattern: impl Into<ArcStr>,
	) -> Result<Self, TopicPatternError> {
		let topic_pattern = topic_pattern.into();
		if topic_pattern.trim().is_empty() {
			return Err(TopicPatternError::EmptyTopic);
		}

		let depth = topic_pattern.split('/').count();
		if depth > MAX_TOPIC_DEPTH {
			return Err(TopicPatternError::TooDeep {
				depth,
				max: MAX_TOPIC_DEPTH,
			});
		}

		let segments = topic_pattern
			.split('/')
			.map(|s| topic_pattern.substr_from(s))
			.map(TopicPatternItem::try_from)
			.collect::<Result<Vec<_>, _>>()?;

		let mut seen_names = HashSet::new();
		for name in segments.iter().filter_map(TopicPatternItem::param_name) {
			if !seen_names.insert(name.as_str()) {
				return Err(TopicPatternError::DuplicatePlaceholder {
					name: name.to_string(),
					pattern: topic_pattern.to_string(),
				});
			}
		}

		Ok(Self {
			template_pattern: topic_pattern,
			segments,
		})
	}

	/// Returns original pattern as registered.
	pub fn topic_pattern(&self) -> ArcStr {
		self.template_pattern.clone()
	}

	/// Returns iterator over pattern segments.
	pub fn iter(&self) -> Iter<'_, TopicPatternItem> {
		self.segments.iter()
	}

	/// Returns number of segments in pattern.
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	/// Returns true if pattern has no segments.
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// Returns pattern segments as slice.
	pub fn slice(&self) -> &[TopicPatternItem] {
		&self.segments
	}

	/// Placeholder names in declaration order. Anonymous `+` is skipped.
	pub fn param_names(&self) -> SmallVec<[Substr; 4]> {
		self.segments
			.iter()
			.filter_map(TopicPatternItem::param_name)
			.cloned()
			.collect()
	}

	/// Returns true if `name` is a placeholder of this pattern.
	pub fn has_param(&self, name: &str) -> bool {
		self.segments
			.iter()
			.filter_map(TopicPatternItem::param_name)
			.any(|param| param.as_str() == name)
	}

	/// Expands the pattern into concrete broker subscription paths.
	///
	/// Every enumerated placeholder contributes one path per option
	/// (Cartesian product, first placeholder varying slowest); plain
	/// placeholders and `+` become `+`. Substitution is positional, so a
	/// literal that happens to contain a placeholder name is left intact.
	pub fn subscription_paths(&self) -> Vec<String> {
		let mut combinations: Vec<Vec<&str>> = vec![Vec::new()];
		for segment in &self.segments {
			let choices = segment.subscription_choices();
			combinations = combinations
				.into_iter()
				.flat_map(|prefix| {
					choices.iter().map(move |choice| {
						let mut next = prefix.clone();
						next.push(*choice);
						next
					})
				})
				.collect();
		}
		combinations
			.into_iter()
			.map(|segments| segments.join("/"))
			.collect()
	}

	/// Number of subscription paths the pattern expands to, saturating at
	/// `usize::MAX`.
	pub fn subscription_count(&self) -> usize {
		self.segments.iter().fold(1_usize, |count, segment| {
			count.saturating_mul(segment.subscription_choices().len())
		})
	}

	/// Matches topic path against this pattern, extracting placeholders.
	pub fn try_match(
		&self,
		topic: &TopicPath,
	) -> Result<TopicMatch, TopicMatchError> {
		if topic.segments.len() > self.segments.len() {
			return Err(TopicMatchError::UnexpectedEndOfPattern);
		}
		if topic.segments.len() < self.segments.len() {
			return Err(TopicMatchError::UnexpectedEndOfTopic);
		}

		let mut captures = SmallVec::new();
		for (position, (pattern_segment, topic_segment)) in
			self.segments.iter().zip(topic.segments.iter()).enumerate()
		{
			if !pattern_segment.matches_segment(topic_segment) {
				return Err(match pattern_segment {
					| TopicPatternItem::Options { name, .. } => {
						TopicMatchError::OptionMismatch {
							name: name.to_string(),
							found: topic_segment.to_string(),
							position,
						}
					}
					| other => TopicMatchError::SegmentMismatch {
						expected: other.to_string(),
						found: topic_segment.to_string(),
						position,
					},
				});
			}
			if let Some(name) = pattern_segment.param_name() {
				captures.push((name.clone(), topic_segment.clone()));
			}
		}
		Ok(TopicMatch::from_match_result(topic.path(), captures))
	}

	/// Returns true if the topic matches this pattern.
	pub fn is_match(&self, topic: &TopicPath) -> bool {
		self.try_match(topic).is_ok()
	}
}

impl std::fmt::Display for TopicPatternPath {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.template_pattern)
	}
}

impl TryFrom<String> for TopicPatternPath {
	type Error = TopicPatternError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new_from_string(value)
	}
}

impl TryFrom<&str> for TopicPatternPath {
	type Error = TopicPatternError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::new_from_string(value)
	}
}

impl TryFrom<ArcStr> for TopicPatternPath {
	type Error = TopicPatternError;

	fn try_from(value: ArcStr) -> Result<Self, Self::Error> {
		Self::new_from_string(value)
	}
}
