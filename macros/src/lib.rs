//! Attribute macro turning an async function into an MQTT route handler.

mod analysis;
mod codegen;
mod naming;

#[cfg(test)]
mod analysis_test;

use proc_macro::TokenStream;
use syn::parse::{Parse, ParseStream};
use syn::{LitStr, parse_macro_input};

use crate::analysis::HandlerAnalysisContext;
use crate::codegen::CodeGenerator;

/// Arguments of `#[route_handler]`: an optional route pattern literal
#[derive(Debug, Default)]
pub(crate) struct MacroArgs {
	pub pattern: Option<LitStr>,
}

impl Parse for MacroArgs {
	fn parse(input: ParseStream) -> syn::Result<Self> {
		if input.is_empty() {
			return Ok(Self::default());
		}
		let pattern: LitStr = input.parse()?;
		if !input.is_empty() {
			return Err(input.error(
				"route_handler takes at most one argument: the route pattern",
			));
		}
		Ok(Self {
			pattern: Some(pattern),
		})
	}
}

/// Declares an async function as a route handler.
///
/// Generates a unit struct named after the function (`on_temperature` gives
/// `OnTemperatureHandler`) implementing `RouteHandler<T>` for a function
/// returning `Result<T, E>`. The function's parameter names are the names the
/// router binds: `topic`, `message` or a placeholder of the route pattern.
/// Each parameter type is parsed from the bound string with `FromStr`.
///
/// With a pattern argument, parameters are checked against it at compile time
/// and `RouteDefinition` is implemented, so the handler can be mounted with
/// `Router::mount`.
///
/// ```rust,ignore
/// #[route_handler("home/<room>:{kitchen,hall}/temperature")]
/// async fn on_temperature(room: String, message: f64) -> Result<String, Infallible> {
///     Ok(format!("{room}: {message}"))
/// }
///
/// router.mount(OnTemperatureHandler)?;
/// ```
#[proc_macro_attribute]
pub fn route_handler(args: TokenStream, input: TokenStream) -> TokenStream {
	let macro_args = parse_macro_input!(args as MacroArgs);
	let input_fn = parse_macro_input!(input as syn::ItemFn);

	let result = (|| -> Result<proc_macro2::TokenStream, syn::Error> {
		let context = HandlerAnalysisContext::analyze(
			&input_fn,
			macro_args.pattern.as_ref(),
		)?;
		Ok(CodeGenerator::new(context).generate_complete_implementation(&input_fn))
	})();
	match result {
		| Ok(tokens) => tokens.into(),
		| Err(err) => err.to_compile_error().into(),
	}
}
