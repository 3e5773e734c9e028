//! Handler function analysis and validation logic
//!
//! Validates the annotated function and, when a route pattern is given,
//! checks every parameter against it. Produces everything the code generator
//! needs.

use mqtt_topic_router_core::routing::{MESSAGE_PARAM, TOPIC_PARAM};
use mqtt_topic_router_core::topic::TopicPatternPath;
use syn::ext::IdentExt;
use syn::{FnArg, GenericArgument, ItemFn, Pat, PathArguments, ReturnType};

/// One handler parameter: its binding name and declared type
#[derive(Debug, Clone)]
pub struct HandlerParam {
	/// Name the value is bound under (`room`, `topic`, `message`, ...)
	pub name: String,
	/// Identifier used in the generated call
	pub ident: syn::Ident,
	/// Declared type, parsed from the bound string
	pub ty: syn::Type,
}

/// Route pattern given to the attribute, already validated
#[derive(Debug, Clone)]
pub struct RoutePattern {
	/// Literal as written, for spans
	pub literal: syn::LitStr,
	/// Parsed pattern
	pub path: TopicPatternPath,
}

/// Contains all validated information about the handler function
#[derive(Debug)]
pub struct HandlerAnalysisContext {
	/// Name of the annotated function
	pub fn_ident: syn::Ident,
	/// Parameters in declaration order
	pub params: Vec<HandlerParam>,
	/// `T` of the function's `Result<T, E>` return type
	pub output_type: syn::Type,
	/// Pattern the handler is defined for, if any
	pub pattern: Option<RoutePattern>,
}

impl HandlerAnalysisContext {
	/// Analyze the function and optional pattern
	///
	/// # Validation Rules
	/// 1. Must be a free `async fn` without generics
	/// 2. Every parameter must be a plain identifier with an owned type
	/// 3. Return type must be `Result<T, E>` (any path ending in `Result`)
	/// 4. With a pattern, every parameter must be `topic`, `message` or one
	///    of the pattern's placeholders
	pub fn analyze(
		input_fn: &ItemFn,
		pattern: Option<&syn::LitStr>,
	) -> Result<Self, syn::Error> {
		let sig = &input_fn.sig;
		if sig.asyncness.is_none() {
			return Err(syn::Error::new_spanned(
				sig.fn_token,
				"route_handler can only be applied to async functions",
			));
		}
		if !sig.generics.params.is_empty() {
			return Err(syn::Error::new_spanned(
				&sig.generics,
				"route_handler functions cannot be generic",
			));
		}

		let params = Self::extract_params(sig.inputs.iter())?;
		let output_type = Self::extract_output_type(&sig.output)?;
		let pattern = pattern.map(Self::parse_pattern).transpose()?;
		if let Some(pattern) = &pattern {
			Self::validate_params_against_pattern(&params, pattern)?;
		}

		Ok(Self {
			fn_ident: sig.ident.clone(),
			params,
			output_type,
			pattern,
		})
	}

	fn extract_params<'a>(
		inputs: impl Iterator<Item = &'a FnArg>,
	) -> Result<Vec<HandlerParam>, syn::Error> {
		let mut params: Vec<HandlerParam> = Vec::new();
		for input in inputs {
			let typed = match input {
				| FnArg::Receiver(receiver) => {
					return Err(syn::Error::new_spanned(
						receiver,
						"route_handler can only be applied to free functions, \
						 not methods",
					));
				}
				| FnArg::Typed(typed) => typed,
			};

			let ident = match typed.pat.as_ref() {
				| Pat::Ident(pat) if pat.by_ref.is_none() && pat.subpat.is_none() => {
					pat.ident.clone()
				}
				| other => {
					return Err(syn::Error::new_spanned(
						other,
						"route_handler parameters must be plain identifiers",
					));
				}
			};

			if matches!(typed.ty.as_ref(), syn::Type::Reference(_)) {
				return Err(syn::Error::new_spanned(
					&typed.ty,
					"route_handler parameters must be owned types implementing \
					 FromStr, e.g. String instead of &str",
				));
			}

			let name = ident.unraw().to_string();
			if params.iter().any(|p| p.name == name) {
				return Err(syn::Error::new_spanned(
					&ident,
					format!("Duplicate parameter '{name}'"),
				));
			}
			params.push(HandlerParam {
				name,
				ident,
				ty: typed.ty.as_ref().clone(),
			});
		}
		Ok(params)
	}

	/// Extract `T` from a `Result<T, E>` return type
	fn extract_output_type(output: &ReturnType) -> Result<syn::Type, syn::Error> {
		const MESSAGE: &str = "route_handler functions must return Result<T, E>";

		let ty = match output {
			| ReturnType::Type(_, ty) => ty.as_ref(),
			| ReturnType::Default => {
				return Err(syn::Error::new_spanned(output, MESSAGE));
			}
		};
		let syn::Type::Path(type_path) = ty else {
			return Err(syn::Error::new_spanned(ty, MESSAGE));
		};
		let Some(segment) = type_path.path.segments.last() else {
			return Err(syn::Error::new_spanned(ty, MESSAGE));
		};
		if segment.ident != "Result" {
			return Err(syn::Error::new_spanned(ty, MESSAGE));
		}
		match &segment.arguments {
			| PathArguments::AngleBracketed(args) => match args.args.first() {
				| Some(GenericArgument::Type(inner)) => Ok(inner.clone()),
				| _ => Err(syn::Error::new_spanned(ty, MESSAGE)),
			},
			| _ => Err(syn::Error::new_spanned(ty, MESSAGE)),
		}
	}

	fn parse_pattern(literal: &syn::LitStr) -> Result<RoutePattern, syn::Error> {
		let path = TopicPatternPath::new_from_string(literal.value()).map_err(
			|err| {
				syn::Error::new_spanned(
					literal,
					format!("Topic pattern error: {err}"),
				)
			},
		)?;
		Ok(RoutePattern {
			literal: literal.clone(),
			path,
		})
	}

	fn validate_params_against_pattern(
		params: &[HandlerParam],
		pattern: &RoutePattern,
	) -> Result<(), syn::Error> {
		let available: Vec<String> = pattern
			.path
			.param_names()
			.iter()
			.map(|name| name.to_string())
			.collect();

		for param in params {
			let known = param.name == TOPIC_PARAM
				|| param.name == MESSAGE_PARAM
				|| available.contains(&param.name);
			if !known {
				return Err(syn::Error::new_spanned(
					&param.ident,
					format!(
						"Unknown parameter '{}'. Allowed: '{TOPIC_PARAM}', \
						 '{MESSAGE_PARAM}' and placeholders of '{}': [{}]",
						param.name,
						pattern.literal.value(),
						available.join(", ")
					),
				));
			}
		}
		Ok(())
	}

	/// Parameter names in declaration order
	pub fn param_names(&self) -> Vec<&str> {
		self.params.iter().map(|p| p.name.as_str()).collect()
	}
}
