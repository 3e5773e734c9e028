//! Naming utilities for generated handler types

use quote::format_ident;
use syn::ext::IdentExt;

/// Name of the unit struct generated for a handler function:
/// `on_temperature` becomes `OnTemperatureHandler`
pub fn handler_struct_name(fn_ident: &syn::Ident) -> syn::Ident {
	let base_name = to_pascal_case(&fn_ident.unraw().to_string());
	format_ident!("{}Handler", base_name, span = fn_ident.span())
}

/// Convert snake_case to PascalCase
fn to_pascal_case(input: &str) -> String {
	input
		.split('_')
		.filter(|part| !part.is_empty())
		.map(|part| {
			let mut chars = part.chars();
			match chars.next() {
				| Some(first) => first.to_uppercase().chain(chars).collect(),
				| None => String::new(),
			}
		})
		.collect()
}
