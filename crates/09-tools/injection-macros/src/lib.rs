//! # Injection Macros
//!
//! 这个 crate 提供了用于声明注入目标和可构造类型的过程宏。
//!
//! ## 核心宏
//!
//! - [`Injectable`](derive@Injectable) - 声明注入目标，`#[inject]` 字段即为注入点
//! - [`Constructible`](derive@Constructible) - 由解析器构造实例，`#[inject]` 字段从解析器取得
//!
//! 生成的代码引用 `infrastructure_common`、`di_abstractions` 和 `ctor`，
//! 使用方需要依赖这三个 crate。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use injection_macros::{Constructible, Injectable};
//! use std::sync::Arc;
//!
//! #[derive(Default, Injectable)]
//! #[injectable(priority = 10)]
//! pub struct OrderPanel {
//!     #[inject]
//!     logger: Option<Arc<dyn Logger>>,
//! }
//!
//! #[derive(Constructible)]
//! pub struct OrderService {
//!     #[inject]
//!     repository: Arc<dyn OrderRepository>,
//!     retries: u32,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod constructible;
mod injectable;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 注入目标派生宏
///
/// 为结构体实现 `Injectable`，并在程序启动时把类型登记到进程级注入目标目录
/// （泛型结构体除外，需要调用 `register_injection_target` 显式登记）。
///
/// # 参数
///
/// - `#[inject]` - 标记注入字段，类型为 `Option<Arc<K>>` 或 `Arc<K>`，依赖键为 `K`
/// - `#[injectable(priority = N)]` - 注入优先级（默认为 0）
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Default, Injectable)]
/// pub struct Panel {
///     #[inject]
///     clock: Option<Arc<dyn Clock>>,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(inject, injectable))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 可构造类型派生宏
///
/// 为结构体实现 `Constructible`：`Arc<K>` 注入字段必须能解析，
/// `Option<Arc<K>>` 注入字段在未注册时为 `None`，其余字段取 `Default::default()`。
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Constructible)]
/// pub struct Service {
///     #[inject]
///     store: Arc<dyn Store>,
/// }
/// ```
#[proc_macro_derive(Constructible, attributes(inject))]
pub fn derive_constructible(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    constructible::derive_constructible_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
