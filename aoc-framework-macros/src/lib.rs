//! Procedural macros for the `aoc-framework` crate.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::parse::Parse;
use syn::{Error, Expr, Item, ItemImpl, ItemStruct, Type, parse_macro_input};

/// Properties given to `#[solution_runner(...)]`.
#[derive(Default)]
struct RunnerProperties {
    /// The expression to use as a solution name; should resolve to string slice.
    name: Option<Expr>,
    /// The type to use for a `ParseData` generic parameter.
    parsed: Option<Type>,
    /// The type to use for a `Solution<PartOne>` generic parameter.
    part_one: Option<Type>,
    /// The type to use for a `Solution<PartTwo>` generic parameter.
    part_two: Option<Type>,
}

/// Parse a property value into a slot, rejecting a property given twice.
fn set_once<T: Parse>(
    slot: &mut Option<T>,
    meta: &ParseNestedMeta,
    property: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate '{property}' property")));
    }
    *slot = Some(meta.value()?.parse()?);
    Ok(())
}

impl RunnerProperties {
    fn parse_property(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            set_once(&mut self.name, meta, "name")
        } else if meta.path.is_ident("parsed") {
            set_once(&mut self.parsed, meta, "parsed")
        } else if meta.path.is_ident("part_one") {
            set_once(&mut self.part_one, meta, "part_one")
        } else if meta.path.is_ident("part_two") {
            set_once(&mut self.part_two, meta, "part_two")
        } else {
            Err(meta.error("unsupported solution runner property"))
        }
    }

    /// Build the call to the `aoc_framework::runner` function matching the given properties.
    fn solve_call(self) -> syn::Result<proc_macro2::TokenStream> {
        let name = self.name.ok_or_else(|| missing_property("name"))?;
        let part_one = self.part_one.ok_or_else(|| missing_property("part_one"))?;

        let call = match (self.parsed, self.part_two) {
            (None, None) => quote! {
                aoc_framework::runner::solve_half_solution::<#part_one>(
                    #name, input, handler, options
                )
            },
            (None, Some(part_two)) => quote! {
                aoc_framework::runner::solve_full_solution::<#part_one, #part_two>(
                    #name, input, handler, options
                )
            },
            (Some(parsed), None) => quote! {
                aoc_framework::runner::solve_parsed_half_solution::<#parsed, #part_one>(
                    #name, input, handler, options
                )
            },
            (Some(parsed), Some(part_two)) => quote! {
                aoc_framework::runner::solve_parsed_full_solution::<#parsed, #part_one, #part_two>(
                    #name, input, handler, options
                )
            },
        };
        Ok(call)
    }
}

fn missing_property(property: &str) -> Error {
    Error::new(
        Span::call_site(),
        format!("missing required property: '{property}'"),
    )
}

/// Procedural macro attribute that generates a `SolutionRunner` implementation.
///
/// The generated `run` routes to the `aoc_framework::runner` function matching which solution
/// types are provided, forwarding the `RunOptions` it is given.
///
/// # Properties
///
/// - `name` (required): An expression that evaluates to `&str`, the solution's display name.
/// - `part_one` (required): The type implementing `Solution<PartOne>`.
/// - `part_two` (optional): The type implementing `Solution<PartTwo>`. If omitted, a requested
///   part two is reported as skipped.
/// - `parsed` (optional): A type that implements `ParseData`, used to parse input before solving.
///   If omitted, the unparsed input string is passed directly to solvers.
///
/// # Errors
///
/// Returns a compile error if:
/// - Applied to anything other than a struct or impl block
/// - Required properties (`name`, `part_one`) are missing
/// - Any property is specified more than once
/// - An unsupported property is provided
///
/// # Examples
///
/// ```ignore
/// #[solution_runner(name = "Day 1", part_one = Day01)]
/// struct Day01Runner;
/// ```
///
/// ```ignore
/// #[solution_runner(name = "Day 9", parsed = DiskMap, part_one = Day09, part_two = Day09)]
/// impl super::AdventOfCode2024<9> {}
/// ```
#[proc_macro_attribute]
pub fn solution_runner(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut properties = RunnerProperties::default();
    let properties_parser = syn::meta::parser(|meta| properties.parse_property(&meta));
    parse_macro_input!(args with properties_parser);

    let solve_call = match properties.solve_call() {
        Ok(call) => call,
        Err(error) => return error.to_compile_error().into(),
    };

    let original_input = proc_macro2::TokenStream::from(input.clone());
    let item = parse_macro_input!(input as Item);

    // the runner is implemented for the annotated struct, or the impl block's self type
    let runner_ty: Type = match item {
        Item::Struct(ItemStruct { ident, .. }) => syn::parse_quote!(#ident),
        Item::Impl(ItemImpl { self_ty, .. }) => *self_ty,
        _ => {
            return Error::new(
                Span::call_site(),
                "the #[solution_runner] macro can only be applied to a struct or an impl block",
            )
            .to_compile_error()
            .into();
        }
    };

    TokenStream::from(quote! {
        #original_input

        impl aoc_framework::runner::SolutionRunner for #runner_ty {
            fn run(
                input: &str,
                handler: &mut dyn aoc_framework::runner::OutputHandler,
                options: aoc_framework::runner::RunOptions,
            ) -> aoc_framework::DynamicResult<()> {
                #solve_call
            }
        }
    })
}
