// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Derive macros for `scalewire::Encode` and `scalewire::Decode`.
//!
//! Structs encode as tuples: every field in declaration order, no framing.
//! Enums write a one-byte discriminant, then the variant's fields. The
//! discriminant is the variant's position unless `#[codec(index = N)]` says
//! otherwise, so at most 256 variants fit.
//!
//! Decoding a derived value takes one level of the reader's `max_depth`, so a
//! recursive type fails with `DepthLimit` instead of exhausting the stack.
//!
//! # Attributes
//!
//! - `#[codec(compact)]` on an integer field: encode it as `Compact<T>`
//! - `#[codec(skip)]` on a field: not on the wire, decoded as `Default::default()`
//! - `#[codec(index = N)]` on a variant: explicit discriminant
//!
//! # Example
//!
//! ```ignore
//! use scalewire::{Decode, Encode};
//!
//! #[derive(Encode, Decode)]
//! struct Transfer {
//!     #[codec(compact)]
//!     amount: u128,
//!     memo: Option<String>,
//! }
//!
//! #[derive(Encode, Decode)]
//! enum Call {
//!     Noop,
//!     #[codec(index = 5)]
//!     Transfer(Transfer),
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attrs;
mod expand;

/// Derive `scalewire::Encode`.
#[proc_macro_derive(Encode, attributes(codec))]
pub fn derive_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::encode(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive `scalewire::Decode`.
#[proc_macro_derive(Decode, attributes(codec))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::decode(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
