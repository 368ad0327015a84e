// Copyright (C) 2019-2021 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

#![deny(rustdoc::broken_intra_doc_links, missing_docs)]

//! A replacement #[[macro@test]] attribute that initializes tracing before
//! running tests.

use darling::ast::NestedMeta;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, parse_quote, ItemFn, Meta, ReturnType};

/// A procedural macro for the `test` attribute.
///
/// The attribute defines a test that has `tracing` initialized, with
/// events of the ordo crates written to the test output.
///
/// Override `#[test]` for a whole module by importing it:
/// ```rust,ignore
/// use ordo_test_log::test;
///
/// #[test]
/// fn it_logs() {
///     log::debug!("visible with RUST_LOG=ordo=debug");
/// }
/// ```
///
/// Another test attribute can be wrapped, e.g. `#[test(tokio::test)]` for
/// async tests.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match NestedMeta::parse_meta_list(attr.into()) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };
    let input = parse_macro_input!(item as ItemFn);

    let inner_test = match args.as_slice() {
        [] => NestedMeta::Meta(Meta::Path(parse_quote! { ::core::prelude::v1::test })),
        [inner] => inner.clone(),
        [_, extra, ..] => {
            return syn::Error::new_spanned(extra, "expected at most one inner test attribute")
                .to_compile_error()
                .into();
        }
    };

    expand_wrapper(&inner_test, &input).into()
}

/// Emits the test function, running `ordo_test_log::initialize()` before the
/// original body.
fn expand_wrapper(inner_test: &NestedMeta, wrappee: &ItemFn) -> TokenStream2 {
    let ItemFn {
        attrs, sig, block, ..
    } = wrappee;
    let name = &sig.ident;
    let asyncness = &sig.asyncness;
    let await_ = asyncness.as_ref().map(|_| quote! { .await });

    // `#[should_panic]` tests must return `()`, so the return type is kept as is.
    let output = match &sig.output {
        ReturnType::Default => quote! {},
        ReturnType::Type(arrow, ty) => quote! { #arrow #ty },
    };

    quote! {
        #[#inner_test]
        #(#attrs)*
        #asyncness fn #name() #output {
            #asyncness fn test_impl() #output #block

            ::ordo_test_log::initialize();

            test_impl() #await_
        }
    }
}
