//! Tests for TopicPatternPath functionality

use std::collections::HashSet;

use super::{TopicMatchError, TopicPath, TopicPatternError, TopicPatternPath};

fn create_pattern(pattern: &str) -> TopicPatternPath {
	TopicPatternPath::new_from_string(pattern).expect("Pattern should be valid")
}

mod parsing_tests {
	use super::*;
	use crate::topic::limits::MAX_TOPIC_DEPTH;

	#[test]
	fn test_param_names_in_declaration_order() {
		let pattern =
			create_pattern("home/<room>:{kitchen,hall}/+/<sensor>/value");
		let names: Vec<String> =
			pattern.param_names().iter().map(|n| n.to_string()).collect();

		assert_eq!(names, ["room", "sensor"]);
		assert!(pattern.has_param("room"));
		assert!(!pattern.has_param("value"));
		assert_eq!(pattern.len(), 5);
	}

	#[test]
	fn test_topic_pattern_preserves_template() {
		let template = "home/<room>:{kitchen,hall}/temperature";
		let pattern = create_pattern(template);

		assert_eq!(pattern.topic_pattern().as_str(), template);
		assert_eq!(pattern.to_string(), template);
	}

	#[test]
	fn test_empty_pattern_rejected() {
		assert_eq!(
			TopicPatternPath::new_from_string("").unwrap_err(),
			TopicPatternError::EmptyTopic
		);
		assert_eq!(
			TopicPatternPath::new_from_string("   ").unwrap_err(),
			TopicPatternError::EmptyTopic
		);
	}

	#[test]
	fn test_duplicate_placeholder_rejected() {
		let result = TopicPatternPath::new_from_string(
			"home/<room>/<room>:{a,b}",
		);

		assert!(matches!(
			result,
			Err(TopicPatternError::DuplicatePlaceholder { ref name, .. })
				if name == "room"
		));
	}

	#[test]
	fn test_hash_wildcard_rejected() {
		assert!(matches!(
			TopicPatternPath::new_from_string("home/#"),
			Err(TopicPatternError::WildcardUsage { .. })
		));
	}

	#[test]
	fn test_too_deep_pattern_rejected() {
		let too_deep = vec!["a"; MAX_TOPIC_DEPTH + 1].join("/");
		assert!(matches!(
			TopicPatternPath::new_from_string(too_deep),
			Err(TopicPatternError::TooDeep { .. })
		));

		let max_depth = vec!["a"; MAX_TOPIC_DEPTH].join("/");
		assert!(TopicPatternPath::new_from_string(max_depth).is_ok());
	}

	#[test]
	fn test_try_from_conversions() {
		assert!(TopicPatternPath::try_from("a/<b>").is_ok());
		assert!(TopicPatternPath::try_from("a/<b>".to_string()).is_ok());
		assert!(TopicPatternPath::try_from(arcstr::literal!("a/<b>")).is_ok());
		assert!(TopicPatternPath::try_from("a/<b").is_err());
	}
}

mod subscription_tests {
	use super::*;

	#[test]
	fn test_literal_pattern_is_its_own_subscription() {
		for literal in ["home", "home/kitchen/temperature", "a//b"] {
			let pattern = create_pattern(literal);
			assert_eq!(pattern.subscription_paths(), [literal]);
			assert_eq!(pattern.subscription_count(), 1);
		}
	}

	#[test]
	fn test_plain_placeholders_become_wildcards() {
		let pattern = create_pattern("home/<room>/+/<sensor>");

		assert_eq!(pattern.subscription_paths(), ["home/+/+/+"]);
	}

	#[test]
	fn test_single_enumerated_placeholder() {
		let pattern =
			create_pattern("home/<room>:{kitchen,living_room,hall}/temperature");

		assert_eq!(
			pattern.subscription_paths(),
			[
				"home/kitchen/temperature",
				"home/living_room/temperature",
				"home/hall/temperature",
			]
		);
	}

	#[test]
	fn test_subscription_count_saturates_for_deep_enumerations() {
		let template = (0..28)
			.map(|i| format!("<a{i}>:{{0,1,2,3,4,5,6,7,8,9}}"))
			.collect::<Vec<_>>()
			.join("/");
		let pattern = create_pattern(&template);

		assert_eq!(pattern.subscription_count(), usize::MAX);
	}

	#[test]
	fn test_cartesian_product_of_two_enumerations() {
		let pattern = create_pattern(
			"home/<room>:{living_room,kitchen}/<sensor>:{sensor1,sensor2,sensor3}",
		);
		let paths = pattern.subscription_paths();

		assert_eq!(paths.len(), 6);
		assert_eq!(pattern.subscription_count(), 6);
		let unique: HashSet<&String> = paths.iter().collect();
		assert_eq!(unique.len(), 6);
		// First placeholder varies slowest
		assert_eq!(paths[0], "home/living_room/sensor1");
		assert_eq!(paths[1], "home/living_room/sensor2");
		assert_eq!(paths[3], "home/kitchen/sensor1");
		assert_eq!(paths[5], "home/kitchen/sensor3");
	}

	#[test]
	fn test_mixed_placeholders() {
		let pattern = create_pattern("<site>/<room>:{a,b}/+/status");

		assert_eq!(pattern.subscription_paths(), ["+/a/+/status", "+/b/+/status"]);
	}

	#[test]
	fn test_substitution_is_positional() {
		// A literal containing the placeholder name must survive expansion
		let pattern = create_pattern("room/<room>:{kitchen,hall}/roomy");

		assert_eq!(
			pattern.subscription_paths(),
			["room/kitchen/roomy", "room/hall/roomy"]
		);
	}
}

mod matching_tests {
	use super::*;

	fn topic(path: &str) -> TopicPath {
		TopicPath::new(path)
	}

	#[test]
	fn test_named_capture() {
		let pattern = create_pattern("home/<any_variable>/temperature");
		let topic_match =
			pattern.try_match(&topic("home/kitchen/temperature")).unwrap();

		assert_eq!(topic_match.topic().as_str(), "home/kitchen/temperature");
		assert_eq!(topic_match.len(), 1);
		assert_eq!(
			topic_match.get_named_param("any_variable").unwrap().as_str(),
			"kitchen"
		);
		assert_eq!(topic_match.get_param(0).unwrap().as_str(), "kitchen");
	}

	#[test]
	fn test_enumerated_captures() {
		let pattern = create_pattern(
			"home/<room>:{kitchen,living_room}/<sensor>:{sensor2,temperature}",
		);
		let topic_match =
			pattern.try_match(&topic("home/kitchen/temperature")).unwrap();

		let captures: Vec<(&str, &str)> = topic_match
			.captures()
			.map(|(name, value)| (name, value.as_str()))
			.collect();
		assert_eq!(captures, [("room", "kitchen"), ("sensor", "temperature")]);
	}

	#[test]
	fn test_enumerated_rejects_unlisted_value() {
		let pattern = create_pattern("home/<room>:{kitchen,living_room}/temp");
		let err = pattern.try_match(&topic("home/garage/temp")).unwrap_err();

		assert_eq!(
			err,
			TopicMatchError::OptionMismatch {
				name: "room".to_string(),
				found: "garage".to_string(),
				position: 1,
			}
		);
	}

	#[test]
	fn test_anonymous_wildcard_captures_nothing() {
		let pattern = create_pattern("home/+/temperature");
		let topic_match =
			pattern.try_match(&topic("home/truly_anything/temperature")).unwrap();

		assert!(topic_match.is_empty());
	}

	#[test]
	fn test_segment_count_must_be_equal() {
		let pattern = create_pattern("test/first");

		assert_eq!(
			pattern.try_match(&topic("test/first/second")).unwrap_err(),
			TopicMatchError::UnexpectedEndOfPattern
		);
		assert_eq!(
			pattern.try_match(&topic("test")).unwrap_err(),
			TopicMatchError::UnexpectedEndOfTopic
		);
		assert!(pattern.is_match(&topic("test/first")));
	}

	#[test]
	fn test_placeholder_prefix_never_matches_longer_topic() {
		let pattern = create_pattern("home/<room>");

		assert!(!pattern.is_match(&topic("home/kitchen/temperature")));
		assert!(!pattern.is_match(&topic("home")));
	}

	#[test]
	fn test_literal_mismatch_reports_position() {
		let pattern = create_pattern("home/<room>/temperature");
		let err = pattern.try_match(&topic("home/kitchen/humidity")).unwrap_err();

		assert_eq!(
			err,
			TopicMatchError::SegmentMismatch {
				expected: "temperature".to_string(),
				found: "humidity".to_string(),
				position: 2,
			}
		);
	}

	#[test]
	fn test_placeholder_matches_empty_segment() {
		let pattern = create_pattern("home/<room>/temperature");
		let topic_match = pattern.try_match(&topic("home//temperature")).unwrap();

		assert_eq!(topic_match.get_named_param("room").unwrap().as_str(), "");
	}
}
