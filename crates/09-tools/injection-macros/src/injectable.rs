//! `#[derive(Injectable)]` 实现

use crate::utils::{field_has_attribute, generate_unique_ident, injected_shape, InjectedShape};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitInt, Result};

/// 注入目标参数
#[derive(Debug, Default)]
struct InjectableArgs {
    /// 注入优先级
    priority: i32,
}

impl InjectableArgs {
    fn from_attributes(input: &DeriveInput) -> Result<Self> {
        let mut args = Self::default();
        for attr in input.attrs.iter().filter(|a| a.path().is_ident("injectable")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("priority") {
                    let value: LitInt = meta.value()?.parse()?;
                    args.priority = value.base10_parse()?;
                    Ok(())
                } else {
                    Err(meta.error("未知的 injectable 参数，只支持 priority"))
                }
            })?;
        }
        Ok(args)
    }
}

pub fn derive_injectable_impl(input: DeriveInput) -> Result<TokenStream> {
    let args = InjectableArgs::from_attributes(&input)?;
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "#[derive(Injectable)] 只支持具名字段或单元结构体",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "#[derive(Injectable)] 只能用于结构体",
            ))
        }
    };

    let mut sites = Vec::new();
    let mut arms = Vec::new();
    for field in fields.into_iter().filter(|f| field_has_attribute(f, "inject")) {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "注入字段必须有名称"))?;
        let member = ident.to_string();
        let shape = injected_shape(field)?;
        let key = shape.key();

        sites.push(quote! {
            infrastructure_common::InjectionSite::new(
                owner,
                #member,
                infrastructure_common::DependencyKey::of::<#key>(),
            )
        });
        let assigned = match shape {
            InjectedShape::Required(_) => quote! { site.downcast_value::<#key>(&value)? },
            InjectedShape::Optional(_) => quote! { Some(site.downcast_value::<#key>(&value)?) },
        };
        arms.push(quote! {
            #member => {
                self.#ident = #assigned;
                Ok(())
            }
        });
    }

    let priority = args.priority;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let injectable_impl = quote! {
        impl #impl_generics infrastructure_common::Injectable for #struct_name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn injection_sites() -> ::std::vec::Vec<infrastructure_common::InjectionSite> {
                let owner = infrastructure_common::DependencyKey::of::<Self>();
                ::std::vec![#(#sites),*]
            }

            fn priority() -> i32 {
                #priority
            }

            #[allow(unused_variables)]
            fn assign(
                &mut self,
                site: &infrastructure_common::InjectionSite,
                value: infrastructure_common::Instance,
            ) -> infrastructure_common::DependencyResult<()> {
                match site.member {
                    #(#arms)*
                    _ => Err(site.unknown_member()),
                }
            }
        }
    };

    // 泛型类型无法在启动时登记，由调用方显式登记
    let registration = if input.generics.params.is_empty() {
        let registration_fn_name =
            generate_unique_ident(&struct_name.to_string(), "register_injection_target");
        quote! {
            // 使用 ctor 在程序启动时自动登记注入目标
            #[ctor::ctor]
            #[allow(non_snake_case)]
            fn #registration_fn_name() {
                infrastructure_common::register_injection_target::<#struct_name>();
            }
        }
    } else {
        TokenStream::new()
    };

    Ok(quote! {
        #injectable_impl

        #registration
    })
}
