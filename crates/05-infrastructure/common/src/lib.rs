//! # Infrastructure Common
//!
//! 依赖注入运行时的公共数据模型。
//!
//! ## 核心内容
//!
//! - [`DependencyKey`] - 依赖键（请求方要求的抽象类型身份）
//! - [`Lifetime`] - 生命周期策略
//! - [`Injectable`] / [`InjectionSite`] - 注入目标与注入点
//! - [`InjectionDescriptor`] - 进程级注入目标目录
//! - [`ContainerConfig`] - 容器配置
//! - [`DependencyError`] / [`InjectionError`] - 错误类型

pub mod component;
pub mod configuration;
pub mod discovery;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use component::*;
pub use configuration::*;
pub use discovery::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
