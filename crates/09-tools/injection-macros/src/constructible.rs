//! `#[derive(Constructible)]` 实现

use crate::utils::{field_has_attribute, injected_shape, InjectedShape};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Result};

fn field_value(field: &Field) -> Result<TokenStream> {
    if !field_has_attribute(field, "inject") {
        return Ok(quote! { ::core::default::Default::default() });
    }
    Ok(match injected_shape(field)? {
        InjectedShape::Required(key) => quote! { resolver.resolve::<#key>()? },
        InjectedShape::Optional(key) => quote! { resolver.resolve_optional::<#key>()? },
    })
}

pub fn derive_constructible_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "#[derive(Constructible)] 只能用于结构体",
            ))
        }
    };

    let body = match &data.fields {
        Fields::Named(named) => {
            let values = named
                .named
                .iter()
                .map(|field| {
                    let ident = &field.ident;
                    field_value(field).map(|value| quote! { #ident: #value })
                })
                .collect::<Result<Vec<_>>>()?;
            quote! { Self { #(#values),* } }
        }
        Fields::Unnamed(unnamed) => {
            let values = unnamed
                .unnamed
                .iter()
                .map(field_value)
                .collect::<Result<Vec<_>>>()?;
            quote! { Self(#(#values),*) }
        }
        Fields::Unit => quote! { Self },
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics di_abstractions::Constructible for #struct_name #ty_generics #where_clause {
            #[allow(unused_imports, unused_variables)]
            fn construct(
                resolver: &dyn di_abstractions::DependencyResolver,
            ) -> infrastructure_common::DependencyResult<Self> {
                use di_abstractions::ResolverExt as _;
                ::core::result::Result::Ok(#body)
            }
        }
    })
}
