/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */
#![forbid(unsafe_code)]

//! Quern Macro Library
//!
//! This library provides procedural macros for the Quern actor framework.
//!
//! # Message Macro
//!
//! The [`quern_message`] macro simplifies creating message types for actor
//! communication:
//!
//! ```ignore
//! #[quern_message]
//! pub struct Ping;
//!
//! #[quern_message]
//! pub struct Increment {
//!     pub amount: u32,
//! }
//! ```

use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, DeriveInput};

fn has_derive(input: &DeriveInput, trait_name: &str) -> bool {
    input.attrs.iter().any(|attr| {
        if attr.path().is_ident("derive") {
            let mut found = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(trait_name) {
                    found = true;
                }
                Ok(())
            });
            found
        } else {
            false
        }
    })
}

/// A procedural macro to derive the traits a Quern message needs.
///
/// Any `Clone + Debug + Send + Sync + 'static` type is a valid message; this
/// macro derives the first two when they are not already present and adds a
/// compile-time assertion for the rest, so invalid message types fail early
/// with a clear error.
///
/// # Usage
///
/// ```ignore
/// use quern_macro::quern_message;
///
/// #[quern_message]
/// pub struct Ping;
///
/// #[quern_message]
/// pub enum Tally {
///     AddCount,
/// }
/// ```
///
/// This expands to:
/// - `#[derive(Clone, Debug)]` (only the traits not already present)
/// - A compile-time assertion that the type is `Send + Sync + 'static`
#[proc_macro_attribute]
pub fn quern_message(_attr: TokenStream, item: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree.
    let input = parse_macro_input!(item as DeriveInput);

    // Get the name and generics of the type.
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // Determine which traits need to be derived
    let need_clone = !has_derive(&input, "Clone");
    let need_debug = !has_derive(&input, "Debug");

    // Build the list of traits to derive
    let derives = {
        let mut traits = Vec::new();
        if need_clone {
            traits.push(quote!(Clone));
        }
        if need_debug {
            traits.push(quote!(Debug));
        }
        if traits.is_empty() {
            quote!()
        } else {
            quote!(#[derive(#(#traits),*)])
        }
    };

    // Generate a unique identifier for the static assertion to avoid conflicts
    let assert_ident = quote::format_ident!("_AssertQuernMessage_{}", name);

    let expanded = quote! {
        #derives
        #input

        // Compile-time assertion that the message type satisfies Send + Sync + 'static.
        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types, non_snake_case, clippy::needless_lifetimes)]
        const _: () = {
            fn #assert_ident #impl_generics () #where_clause {
                fn assert_bounds<T: Send + Sync + 'static>() {}
                assert_bounds::<#name #ty_generics>();
            }
        };
    };

    // Return the generated tokens.
    TokenStream::from(expanded)
}
