//! Tests for handler function analysis and validation logic

use syn::parse_quote;

use super::analysis::*;

/// Test case for handler analysis
struct AnalysisTestCase {
	name: &'static str,
	pattern: Option<&'static str>,
	function: syn::ItemFn,
	expected_result: AnalysisResult,
}

/// Expected result of analysis
#[derive(Debug, PartialEq)]
enum AnalysisResult {
	Success {
		param_names: Vec<&'static str>,
		output_type: &'static str,
		has_pattern: bool,
	},
	Error {
		error_contains: &'static str,
	},
}

fn type_string(ty: &syn::Type) -> String {
	quote::quote!(#ty).to_string().replace(' ', "")
}

/// Run a single analysis test case
fn run_analysis_test(test_case: AnalysisTestCase) {
	let literal = test_case
		.pattern
		.map(|p| syn::LitStr::new(p, proc_macro2::Span::call_site()));
	let result =
		HandlerAnalysisContext::analyze(&test_case.function, literal.as_ref());

	match test_case.expected_result {
		| AnalysisResult::Success {
			param_names,
			output_type,
			has_pattern,
		} => {
			let context = result.unwrap_or_else(|err| {
				panic!("Test '{}' should succeed but failed: {err}", test_case.name)
			});

			assert_eq!(
				context.param_names(),
				param_names,
				"Test '{}': param names mismatch",
				test_case.name
			);
			assert_eq!(
				type_string(&context.output_type),
				output_type,
				"Test '{}': output type mismatch",
				test_case.name
			);
			assert_eq!(
				context.pattern.is_some(),
				has_pattern,
				"Test '{}': pattern presence mismatch",
				test_case.name
			);
		}
		| AnalysisResult::Error { error_contains } => {
			let err = match result {
				| Ok(_) => panic!("Test '{}' should fail but succeeded", test_case.name),
				| Err(err) => err.to_string(),
			};
			assert!(
				err.contains(error_contains),
				"Test '{}': error '{}' should contain '{}'",
				test_case.name,
				err,
				error_contains
			);
		}
	}
}

#[test]
fn test_valid_handlers() {
	let cases = vec![
		AnalysisTestCase {
			name: "no parameters",
			pattern: None,
			function: parse_quote! {
				async fn ping() -> Result<(), Error> { Ok(()) }
			},
			expected_result: AnalysisResult::Success {
				param_names: vec![],
				output_type: "()",
				has_pattern: false,
			},
		},
		AnalysisTestCase {
			name: "topic and message without pattern",
			pattern: None,
			function: parse_quote! {
				async fn log(topic: String, message: String) -> Result<String, Error> {
					Ok(topic)
				}
			},
			expected_result: AnalysisResult::Success {
				param_names: vec!["topic", "message"],
				output_type: "String",
				has_pattern: false,
			},
		},
		AnalysisTestCase {
			name: "placeholders in any order",
			pattern: Some("home/<room>:{kitchen,hall}/<sensor>"),
			function: parse_quote! {
				async fn reading(sensor: String, message: f64, room: String)
					-> std::result::Result<f64, std::num::ParseFloatError>
				{
					Ok(message)
				}
			},
			expected_result: AnalysisResult::Success {
				param_names: vec!["sensor", "message", "room"],
				output_type: "f64",
				has_pattern: true,
			},
		},
		AnalysisTestCase {
			name: "single argument result alias",
			pattern: Some("jobs/<id>"),
			function: parse_quote! {
				pub async fn job(id: u32) -> anyhow::Result<Vec<u8>> {
					Ok(Vec::new())
				}
			},
			expected_result: AnalysisResult::Success {
				param_names: vec!["id"],
				output_type: "Vec<u8>",
				has_pattern: true,
			},
		},
		AnalysisTestCase {
			name: "raw identifier",
			pattern: Some("ops/<type>"),
			function: parse_quote! {
				async fn op(r#type: String) -> Result<(), Error> { Ok(()) }
			},
			expected_result: AnalysisResult::Success {
				param_names: vec!["type"],
				output_type: "()",
				has_pattern: true,
			},
		},
	];

	for case in cases {
		run_analysis_test(case);
	}
}

#[test]
fn test_invalid_handlers() {
	let cases = vec![
		AnalysisTestCase {
			name: "not async",
			pattern: None,
			function: parse_quote! {
				fn sync(message: String) -> Result<(), Error> { Ok(()) }
			},
			expected_result: AnalysisResult::Error {
				error_contains: "async functions",
			},
		},
		AnalysisTestCase {
			name: "generic",
			pattern: None,
			function: parse_quote! {
				async fn generic<T>(message: T) -> Result<(), Error> { Ok(()) }
			},
			expected_result: AnalysisResult::Error {
				error_contains: "cannot be generic",
			},
		},
		AnalysisTestCase {
			name: "method receiver",
			pattern: None,
			function: parse_quote! {
				async fn method(&self, message: String) -> Result<(), Error> { Ok(()) }
			},
			expected_result: AnalysisResult::Error {
				error_contains: "not methods",
			},
		},
		AnalysisTestCase {
			name: "destructuring pattern",
			pattern: None,
			function: parse_quote! {
				async fn pair((a, b): (String, String)) -> Result<(), Error> { Ok(()) }
			},
			expected_result: AnalysisResult::Error {
				error_contains: "plain identifiers",
			},
		},
		AnalysisTestCase {
			name: "borrowed parameter",
			pattern: None,
			function: parse_quote! {
				async fn borrowed(message: &str) -> Result<(), Error> { Ok(()) }
			},
			expected_result: AnalysisResult::Error {
				error_contains: "owned types",
			},
		},
		AnalysisTestCase {
			name: "missing return type",
			pattern: None,
			function: parse_quote! {
				async fn nothing(message: String) {}
			},
			expected_result: AnalysisResult::Error {
				error_contains: "must return Result",
			},
		},
		AnalysisTestCase {
			name: "non result return type",
			pattern: None,
			function: parse_quote! {
				async fn option(message: String) -> Option<String> { None }
			},
			expected_result: AnalysisResult::Error {
				error_contains: "must return Result",
			},
		},
		AnalysisTestCase {
			name: "unknown parameter",
			pattern: Some("home/<room>/temperature"),
			function: parse_quote! {
				async fn unknown(room: String, sensor: String) -> Result<(), Error> {
					Ok(())
				}
			},
			expected_result: AnalysisResult::Error {
				error_contains: "Unknown parameter 'sensor'",
			},
		},
		AnalysisTestCase {
			name: "anonymous wildcard is not a parameter",
			pattern: Some("home/+/temperature"),
			function: parse_quote! {
				async fn wildcard(room: String) -> Result<(), Error> { Ok(()) }
			},
			expected_result: AnalysisResult::Error {
				error_contains: "Unknown parameter 'room'",
			},
		},
		AnalysisTestCase {
			name: "malformed pattern",
			pattern: Some("home/<room/temperature"),
			function: parse_quote! {
				async fn malformed(message: String) -> Result<(), Error> { Ok(()) }
			},
			expected_result: AnalysisResult::Error {
				error_contains: "Topic pattern error",
			},
		},
	];

	for case in cases {
		run_analysis_test(case);
	}
}
