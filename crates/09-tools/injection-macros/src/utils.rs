//! 宏工具函数

use proc_macro2::Span;
use syn::{Field, Ident, Type};

/// 从类型中提取第一个泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    match ty {
        Type::Path(type_path) => {
            let segment = type_path.path.segments.last()?;
            match &segment.arguments {
                syn::PathArguments::AngleBracketed(args) => match args.args.first() {
                    Some(syn::GenericArgument::Type(inner_type)) => Some(inner_type),
                    _ => None,
                },
                _ => None,
            }
        }
        _ => None,
    }
}

fn last_segment_is(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map_or(false, |segment| segment.ident == name),
        _ => false,
    }
}

/// 检查类型是否为 Option<T>
pub fn is_option_type(ty: &Type) -> bool {
    last_segment_is(ty, "Option")
}

/// 检查类型是否为 Arc<T>
pub fn is_arc_type(ty: &Type) -> bool {
    last_segment_is(ty, "Arc")
}

/// 注入字段的形状
pub enum InjectedShape<'a> {
    /// `Arc<K>`：必需依赖
    Required(&'a Type),
    /// `Option<Arc<K>>`：成员注入或可选依赖
    Optional(&'a Type),
}

impl<'a> InjectedShape<'a> {
    /// 依赖键类型 `K`
    pub fn key(&self) -> &'a Type {
        match self {
            Self::Required(key) | Self::Optional(key) => key,
        }
    }
}

/// 识别注入字段的类型，只接受 `Arc<K>` 和 `Option<Arc<K>>`
pub fn injected_shape(field: &Field) -> syn::Result<InjectedShape<'_>> {
    let ty = &field.ty;
    if is_arc_type(ty) {
        if let Some(key) = extract_generic_type(ty) {
            return Ok(InjectedShape::Required(key));
        }
    }
    if is_option_type(ty) {
        if let Some(inner) = extract_generic_type(ty) {
            if is_arc_type(inner) {
                if let Some(key) = extract_generic_type(inner) {
                    return Ok(InjectedShape::Optional(key));
                }
            }
        }
    }
    Err(syn::Error::new_spanned(
        ty,
        "#[inject] 字段的类型必须是 Arc<K> 或 Option<Arc<K>>",
    ))
}

/// 检查字段是否有特定属性
pub fn field_has_attribute(field: &Field, attr_name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(attr_name))
}

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            // 检查前一个字符是否为小写，或者下一个字符是否为小写
            let prev_is_lower = chars.get(i - 1).map_or(false, |c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.push(ch.to_lowercase().next().unwrap_or(ch));
    }

    result
}

/// 生成唯一的标识符
pub fn generate_unique_ident(base_name: &str, suffix: &str) -> Ident {
    let unique_name = format!("__{}__{}", to_snake_case(base_name), suffix);
    Ident::new(&unique_name, Span::call_site())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn field(ty: Type) -> Field {
        parse_quote! { #[inject] pub value: #ty }
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("MyService"), "my_service");
        assert_eq!(to_snake_case("HTTPClient"), "http_client");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_unique_ident() {
        let ident = generate_unique_ident("OrderPanel", "register_injection_target");
        assert_eq!(ident.to_string(), "__order_panel__register_injection_target");
    }

    #[test]
    fn test_required_shape() {
        let f = field(parse_quote!(std::sync::Arc<dyn Logger>));
        let shape = injected_shape(&f).unwrap();
        assert!(matches!(shape, InjectedShape::Required(_)));
        let expected: Type = parse_quote!(dyn Logger);
        assert_eq!(shape.key(), &expected);
        assert!(field_has_attribute(&f, "inject"));
    }

    #[test]
    fn test_optional_shape() {
        let f = field(parse_quote!(Option<Arc<Clock>>));
        let shape = injected_shape(&f).unwrap();
        assert!(matches!(shape, InjectedShape::Optional(_)));
        let expected: Type = parse_quote!(Clock);
        assert_eq!(shape.key(), &expected);
    }

    #[test]
    fn test_rejected_shapes() {
        assert!(injected_shape(&field(parse_quote!(Box<dyn Logger>))).is_err());
        assert!(injected_shape(&field(parse_quote!(Option<String>))).is_err());
        assert!(injected_shape(&field(parse_quote!(u32))).is_err());
    }
}
