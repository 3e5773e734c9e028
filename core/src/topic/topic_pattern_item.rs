//! Route pattern segment types and parsing

use std::borrow::Cow;
use std::convert::TryFrom;

use arcstr::Substr;
use smallvec::SmallVec;
use thiserror::Error;

/// Single-segment wildcard token used in subscription paths
pub const WILDCARD_TOKEN: &str = "+";

const LHS_VARIABLE_TOKEN: char = '<';
const RHS_VARIABLE_TOKEN: char = '>';
const VARIABLE_OPTIONS_DELIMITER: char = ':';
const LHS_OPTIONS_TOKEN: char = '{';
const RHS_OPTIONS_TOKEN: char = '}';
const OPTIONS_DELIMITER: char = ',';

/// Error types for route pattern parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopicPatternError {
	/// Empty pattern is not valid
	#[error("Topic pattern cannot be empty")]
	EmptyTopic,

	/// Wildcard characters (+ or #) used incorrectly
	#[error("Invalid wildcard usage: {usage}")]
	WildcardUsage {
		/// Description of invalid usage
		usage: String,
	},

	/// Segment looks like a placeholder but is not well formed
	#[error("Malformed placeholder segment '{segment}'")]
	MalformedPlaceholder {
		/// The offending segment
		segment: String,
	},

	/// Enumerated placeholder without any usable option
	#[error("Placeholder segment '{segment}' declares no options")]
	EmptyOptions {
		/// The offending segment
		segment: String,
	},

	/// Enumerated option that cannot appear in a concrete topic
	#[error("Invalid option '{option}' in placeholder segment '{segment}'")]
	InvalidOption {
		/// The offending segment
		segment: String,
		/// The rejected option
		option: String,
	},

	/// The same placeholder name appears twice in one pattern
	#[error("Placeholder '{name}' declared more than once in '{pattern}'")]
	DuplicatePlaceholder {
		/// Repeated placeholder name
		name: String,
		/// Full pattern
		pattern: String,
	},

	/// Pattern has more segments than allowed
	#[error("Pattern too deep: {depth} segments > {max}")]
	TooDeep {
		/// Segment count of the pattern
		depth: usize,
		/// Allowed maximum
		max: usize,
	},
}

impl TopicPatternError {
	/// Creates a new WildcardUsage error
	pub fn wildcard_usage(usage: impl Into<String>) -> Self {
		Self::WildcardUsage {
			usage: usage.into(),
		}
	}

	/// Creates a new MalformedPlaceholder error
	pub fn malformed_placeholder(segment: impl Into<String>) -> Self {
		Self::MalformedPlaceholder {
			segment: segment.into(),
		}
	}

	/// Creates a new InvalidOption error
	pub fn invalid_option(
		segment: impl Into<String>,
		option: impl Into<String>,
	) -> Self {
		Self::InvalidOption {
			segment: segment.into(),
			option: option.into(),
		}
	}
}

/// Route pattern segment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TopicPatternItem {
	/// Literal segment, matched verbatim
	Str(Substr),
	/// Anonymous single-segment wildcard `+`, value discarded
	Plus,
	/// Single-segment capture `<name>`
	Named(Substr),
	/// Capture restricted to a literal set `<name>:{a,b,c}`
	Options {
		/// Placeholder name
		name: Substr,
		/// Allowed literal values in declaration order
		options: SmallVec<[Substr; 4]>,
	},
}

impl TopicPatternItem {
	/// Returns the segment as written in the route pattern.
	pub fn as_template(&self) -> Cow<'_, str> {
		match self {
			| TopicPatternItem::Str(s) => Cow::Borrowed(s.as_str()),
			| TopicPatternItem::Plus => Cow::Borrowed(WILDCARD_TOKEN),
			| TopicPatternItem::Named(name) => {
				Cow::Owned(format!("<{name}>"))
			}
			| TopicPatternItem::Options { name, options } => {
				let joined: Vec<&str> =
					options.iter().map(Substr::as_str).collect();
				Cow::Owned(format!("<{name}>:{{{}}}", joined.join(",")))
			}
		}
	}

	/// Returns placeholder name for named and named-enumerated segments.
	pub fn param_name(&self) -> Option<&Substr> {
		match self {
			| TopicPatternItem::Named(name)
			| TopicPatternItem::Options { name, .. } => Some(name),
			| _ => None,
		}
	}

	/// Returns true if this segment matches more than one literal.
	pub fn is_placeholder(&self) -> bool {
		!matches!(self, TopicPatternItem::Str(_))
	}

	/// Values this segment takes in broker subscription paths.
	pub fn subscription_choices(&self) -> SmallVec<[&str; 4]> {
		match self {
			| TopicPatternItem::Str(s) => smallvec::smallvec![s.as_str()],
			| TopicPatternItem::Plus | TopicPatternItem::Named(_) => {
				smallvec::smallvec![WILDCARD_TOKEN]
			}
			| TopicPatternItem::Options { options, .. } => {
				options.iter().map(Substr::as_str).collect()
			}
		}
	}

	/// Returns true if a single topic segment satisfies this pattern segment.
	pub fn matches_segment(&self, segment: &str) -> bool {
		match self {
			| TopicPatternItem::Str(expected) => expected.as_str() == segment,
			| TopicPatternItem::Plus | TopicPatternItem::Named(_) => true,
			| TopicPatternItem::Options { options, .. } => {
				options.iter().any(|option| option.as_str() == segment)
			}
		}
	}

	fn parse_options(
		item: &Substr,
		variable: &str,
		options: &str,
	) -> Result<Self, TopicPatternError> {
		let name = Self::parse_variable_name(item, variable)?;
		let inner = options
			.strip_prefix(LHS_OPTIONS_TOKEN)
			.and_then(|rest| rest.strip_suffix(RHS_OPTIONS_TOKEN))
			.ok_or_else(|| {
				TopicPatternError::malformed_placeholder(item.as_str())
			})?;

		let mut parsed = SmallVec::new();
		for option in inner.split(OPTIONS_DELIMITER).filter(|o| !o.is_empty())
		{
			if option.contains([
				'+',
				'#',
				LHS_VARIABLE_TOKEN,
				RHS_VARIABLE_TOKEN,
				LHS_OPTIONS_TOKEN,
				RHS_OPTIONS_TOKEN,
			]) {
				return Err(TopicPatternError::invalid_option(
					item.as_str(),
					option,
				));
			}
			parsed.push(item.substr_from(option));
		}
		if parsed.is_empty() {
			return Err(TopicPatternError::EmptyOptions {
				segment: item.to_string(),
			});
		}
		Ok(TopicPatternItem::Options {
			name,
			options: parsed,
		})
	}

	fn parse_variable_name(
		item: &Substr,
		variable: &str,
	) -> Result<Substr, TopicPatternError> {
		let inner = variable
			.strip_prefix(LHS_VARIABLE_TOKEN)
			.and_then(|rest| rest.strip_suffix(RHS_VARIABLE_TOKEN))
			.filter(|name| !name.is_empty())
			.ok_or_else(|| {
				TopicPatternError::malformed_placeholder(item.as_str())
			})?;
		if inner.contains([
			LHS_VARIABLE_TOKEN,
			RHS_VARIABLE_TOKEN,
			LHS_OPTIONS_TOKEN,
			RHS_OPTIONS_TOKEN,
			'+',
			'#',
		]) {
			return Err(TopicPatternError::malformed_placeholder(
				item.as_str(),
			));
		}
		Ok(item.substr_from(inner))
	}
}

impl std::fmt::Display for TopicPatternItem {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_template())
	}
}

impl TryFrom<Substr> for TopicPatternItem {
	type Error = TopicPatternError;

	fn try_from(item: Substr) -> Result<Self, Self::Error> {
		if let Some((variable, options)) =
			item.split_once(VARIABLE_OPTIONS_DELIMITER)
		{
			if options.contains(LHS_OPTIONS_TOKEN)
				&& options.contains(RHS_OPTIONS_TOKEN)
			{
				return Self::parse_options(&item, variable, options);
			}
		}

		let res = match item.as_str() {
			| WILDCARD_TOKEN => TopicPatternItem::Plus,
			| s if s.starts_with(LHS_VARIABLE_TOKEN)
				&& s.ends_with(RHS_VARIABLE_TOKEN) =>
			{
				TopicPatternItem::Named(Self::parse_variable_name(&item, s)?)
			}
			| s if s.contains(['+', '#']) => {
				return Err(TopicPatternError::wildcard_usage(s));
			}
			| s if s.contains([
				LHS_VARIABLE_TOKEN,
				RHS_VARIABLE_TOKEN,
				LHS_OPTIONS_TOKEN,
				RHS_OPTIONS_TOKEN,
			]) =>
			{
				return Err(TopicPatternError::malformed_placeholder(s));
			}
			| _ => TopicPatternItem::Str(item),
		};
		Ok(res)
	}
}
