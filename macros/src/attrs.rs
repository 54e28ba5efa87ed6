// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `#[codec(...)]` attribute parsing.

use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, Lit, Meta, Token};

/// Field-level options.
#[derive(Default)]
pub struct FieldAttrs {
    pub compact: bool,
    pub skip: bool,
}

/// Variant-level options.
#[derive(Default)]
pub struct VariantAttrs {
    pub index: Option<u8>,
}

fn codec_metas(attrs: &[Attribute]) -> syn::Result<Vec<Meta>> {
    let mut metas = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("codec")) {
        let nested = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        metas.extend(nested);
    }
    Ok(metas)
}

impl FieldAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = FieldAttrs::default();
        for meta in codec_metas(attrs)? {
            match &meta {
                Meta::Path(path) if path.is_ident("compact") => result.compact = true,
                Meta::Path(path) if path.is_ident("skip") => result.skip = true,
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected `compact` or `skip`",
                    ))
                }
            }
        }
        if result.compact && result.skip {
            return Err(syn::Error::new_spanned(
                &attrs[0],
                "a skipped field can't also be compact",
            ));
        }
        Ok(result)
    }
}

impl VariantAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = VariantAttrs::default();
        for meta in codec_metas(attrs)? {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("index") => {
                    let Expr::Lit(ExprLit {
                        lit: Lit::Int(int), ..
                    }) = &nv.value
                    else {
                        return Err(syn::Error::new_spanned(&nv.value, "index must be an integer"));
                    };
                    let index = int.base10_parse::<u8>().map_err(|_| {
                        syn::Error::new_spanned(int, "index must fit in one byte (0..=255)")
                    })?;
                    result.index = Some(index);
                }
                other => return Err(syn::Error::new_spanned(other, "expected `index = N`")),
            }
        }
        Ok(result)
    }
}
