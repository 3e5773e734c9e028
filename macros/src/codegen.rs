//! Code generation logic
//!
//! Emits the original function unchanged plus a unit struct implementing
//! `RouteHandler` (and `RouteDefinition` when a pattern was given).

use quote::quote;

use crate::analysis::HandlerAnalysisContext;
use crate::naming::handler_struct_name;

/// Handles all code generation for route handlers
pub struct CodeGenerator {
	context: HandlerAnalysisContext,
}

impl CodeGenerator {
	/// Create a new code generator with the given analysis context
	pub fn new(context: HandlerAnalysisContext) -> Self {
		Self { context }
	}

	/// Generate the function, its handler struct and trait implementations
	pub fn generate_complete_implementation(
		&self,
		input_fn: &syn::ItemFn,
	) -> proc_macro2::TokenStream {
		let handler_struct = self.generate_handler_struct(&input_fn.vis);
		let handler_impl = self.generate_route_handler_impl();
		let definition_impl = self.generate_route_definition_impl();

		quote! {
			#input_fn
			#handler_struct
			#handler_impl
			#definition_impl
		}
	}

	fn generate_handler_struct(
		&self,
		vis: &syn::Visibility,
	) -> proc_macro2::TokenStream {
		let struct_name = handler_struct_name(&self.context.fn_ident);
		let doc = format!(
			"Route handler calling [`{}`].",
			self.context.fn_ident
		);

		quote! {
			#[doc = #doc]
			#[derive(Debug, Clone, Copy, Default)]
			#vis struct #struct_name;
		}
	}

	fn generate_route_handler_impl(&self) -> proc_macro2::TokenStream {
		let struct_name = handler_struct_name(&self.context.fn_ident);
		let fn_ident = &self.context.fn_ident;
		let output_type = &self.context.output_type;
		let names = self.context.param_names();
		let idents: Vec<_> = self.context.params.iter().map(|p| &p.ident).collect();
		let bindings = self.context.params.iter().map(|param| {
			let ident = &param.ident;
			let ty = &param.ty;
			let name = &param.name;
			quote! {
				let #ident: #ty = args.parse(#name)?;
			}
		});

		quote! {
			impl ::mqtt_topic_router::RouteHandler<#output_type> for #struct_name {
				fn parameter_names(&self) -> &[&'static str] {
					&[#(#names),*]
				}

				#[allow(unused_variables)]
				fn call(
					&self,
					args: ::mqtt_topic_router::RouteArguments,
				) -> ::std::pin::Pin<::std::boxed::Box<
					dyn ::std::future::Future<
						Output = ::std::result::Result<
							#output_type,
							::mqtt_topic_router::HandlerError,
						>,
					> + ::std::marker::Send + 'static,
				>> {
					::std::boxed::Box::pin(async move {
						#(#bindings)*
						#fn_ident(#(#idents),*)
							.await
							.map_err(::mqtt_topic_router::HandlerError::failed)
					})
				}
			}
		}
	}

	fn generate_route_definition_impl(&self) -> proc_macro2::TokenStream {
		let Some(pattern) = &self.context.pattern else {
			return quote! {};
		};
		let struct_name = handler_struct_name(&self.context.fn_ident);
		let output_type = &self.context.output_type;
		let literal = &pattern.literal;

		quote! {
			impl ::mqtt_topic_router::RouteDefinition<#output_type> for #struct_name {
				const PATTERN: &'static str = #literal;
			}
		}
	}
}
