// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Code generation for both derives.

use std::collections::HashMap;

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{
    parse_quote, Data, DataEnum, DeriveInput, Fields, GenericParam, Generics, Ident, Index, Member,
};

use crate::attrs::{FieldAttrs, VariantAttrs};

// ============================================================================
// SHARED
// ============================================================================

/// One field as the generated code sees it.
struct WireField {
    member: Member,
    /// Local binding used in enum match arms.
    binding: Ident,
    ty: syn::Type,
    attrs: FieldAttrs,
}

fn wire_fields(fields: &Fields) -> syn::Result<Vec<WireField>> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(Index::from(i)),
            };
            Ok(WireField {
                member,
                binding: format_ident!("__field{}", i),
                ty: field.ty.clone(),
                attrs: FieldAttrs::from_attrs(&field.attrs)?,
            })
        })
        .collect()
}

fn add_bound(generics: &Generics, bound: TokenStream) -> Generics {
    let mut generics = generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(#bound));
        }
    }
    generics
}

/// Discriminant per variant: explicit `index` or declaration position.
fn discriminants(data: &DataEnum) -> syn::Result<Vec<u8>> {
    if data.variants.len() > 256 {
        return Err(syn::Error::new(
            Span::call_site(),
            "at most 256 variants fit a one-byte discriminant",
        ));
    }
    let mut seen: HashMap<u8, &Ident> = HashMap::new();
    let mut tags = Vec::with_capacity(data.variants.len());
    for (position, variant) in data.variants.iter().enumerate() {
        let attrs = VariantAttrs::from_attrs(&variant.attrs)?;
        let tag = match attrs.index {
            Some(index) => index,
            // position < 256, checked above
            None => position as u8,
        };
        if let Some(previous) = seen.insert(tag, &variant.ident) {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                format!("discriminant {tag} already used by `{previous}`"),
            ));
        }
        tags.push(tag);
    }
    Ok(tags)
}

/// A pattern binding every field of a variant to its `__fieldN` local.
fn variant_pattern(fields: &Fields, wire: &[WireField]) -> TokenStream {
    let bindings = wire.iter().map(|f| &f.binding);
    match fields {
        Fields::Named(_) => {
            let members = wire.iter().map(|f| &f.member);
            quote!({ #(#members: #bindings),* })
        }
        Fields::Unnamed(_) => quote!(( #(#bindings),* )),
        Fields::Unit => quote!(),
    }
}

// ============================================================================
// ENCODE
// ============================================================================

fn encode_field(field: &WireField, access: TokenStream) -> (TokenStream, TokenStream) {
    if field.attrs.skip {
        (quote!(), quote!())
    } else if field.attrs.compact {
        (
            quote! {
                ::scalewire::Encode::encode_to(&::scalewire::Compact(*#access), __dest);
            },
            quote! {
                + ::scalewire::Encode::encoded_size(&::scalewire::Compact(*#access))
            },
        )
    } else {
        (
            quote! { ::scalewire::Encode::encode_to(#access, __dest); },
            quote! { + ::scalewire::Encode::encoded_size(#access) },
        )
    }
}

pub fn encode(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let generics = add_bound(&input.generics, quote!(::scalewire::Encode));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let (encode_body, size_body) = match &input.data {
        Data::Struct(data) => {
            let wire = wire_fields(&data.fields)?;
            let (writes, sizes): (Vec<_>, Vec<_>) = wire
                .iter()
                .map(|f| {
                    let member = &f.member;
                    encode_field(f, quote!(&self.#member))
                })
                .unzip();
            (quote! { #(#writes)* }, quote! { 0 #(#sizes)* })
        }
        Data::Enum(data) => {
            let tags = discriminants(data)?;
            let mut encode_arms = Vec::new();
            let mut size_arms = Vec::new();
            for (variant, tag) in data.variants.iter().zip(tags) {
                let ident = &variant.ident;
                let wire = wire_fields(&variant.fields)?;
                let pattern = variant_pattern(&variant.fields, &wire);
                let (writes, sizes): (Vec<_>, Vec<_>) = wire
                    .iter()
                    .map(|f| {
                        let binding = &f.binding;
                        encode_field(f, quote!(#binding))
                    })
                    .unzip();
                encode_arms.push(quote! {
                    #[allow(unused_variables)]
                    Self::#ident #pattern => {
                        ::scalewire::Output::push_byte(__dest, #tag);
                        #(#writes)*
                    }
                });
                size_arms.push(quote! {
                    #[allow(unused_variables)]
                    Self::#ident #pattern => 1 #(#sizes)*,
                });
            }
            if data.variants.is_empty() {
                (quote! { match *self {} }, quote! { match *self {} })
            } else {
                (
                    quote! { match self { #(#encode_arms)* } },
                    quote! { match self { #(#size_arms)* } },
                )
            }
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "unions have no defined wire form",
            ))
        }
    };

    Ok(quote! {
        impl #impl_generics ::scalewire::Encode for #name #ty_generics #where_clause {
            fn encode_to<__O: ::scalewire::Output + ?Sized>(&self, __dest: &mut __O) {
                #encode_body
            }

            fn encoded_size(&self) -> usize {
                #size_body
            }
        }
    })
}

// ============================================================================
// DECODE
// ============================================================================

fn decode_field(field: &WireField) -> TokenStream {
    let ty = &field.ty;
    if field.attrs.skip {
        quote! { ::core::default::Default::default() }
    } else if field.attrs.compact {
        quote! {
            <::scalewire::Compact<#ty> as ::scalewire::Decode>::decode(__input)?.0
        }
    } else {
        quote! { <#ty as ::scalewire::Decode>::decode(__input)? }
    }
}

/// Constructor expression for `path` with every field decoded in order.
fn construct(path: TokenStream, fields: &Fields) -> syn::Result<TokenStream> {
    let wire = wire_fields(fields)?;
    let values = wire.iter().map(decode_field);
    Ok(match fields {
        Fields::Named(_) => {
            let members = wire.iter().map(|f| &f.member);
            quote!(#path { #(#members: #values),* })
        }
        Fields::Unnamed(_) => quote!(#path ( #(#values),* )),
        Fields::Unit => quote!(#path),
    })
}

pub fn decode(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let generics = add_bound(&input.generics, quote!(::scalewire::Decode));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => {
            let value = construct(quote!(Self), &data.fields)?;
            quote! { ::core::result::Result::Ok(#value) }
        }
        Data::Enum(data) => {
            let tags = discriminants(data)?;
            let target = name.to_string();
            let arms = data
                .variants
                .iter()
                .zip(tags)
                .map(|(variant, tag)| {
                    let ident = &variant.ident;
                    let value = construct(quote!(Self::#ident), &variant.fields)?;
                    Ok(quote! { #tag => ::core::result::Result::Ok(#value), })
                })
                .collect::<syn::Result<Vec<_>>>()?;
            quote! {
                let __tag = __input.read_byte()?;
                match __tag {
                    #(#arms)*
                    _ => ::core::result::Result::Err(::scalewire::Error::UnknownVariant {
                        tag: __tag,
                        target: #target,
                    }),
                }
            }
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "unions have no defined wire form",
            ))
        }
    };

    Ok(quote! {
        impl #impl_generics ::scalewire::Decode for #name #ty_generics #where_clause {
            fn decode(__input: &mut ::scalewire::Reader<'_>) -> ::scalewire::Result<Self> {
                // each derived value is one nesting level
                __input.descend(|__input| { #body })
            }
        }
    })
}
