//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义注册、解析和注入的核心接口。
//!
//! ## 核心接口
//!
//! - [`ServiceRegister`] - 只写的注册表接口
//! - [`DependencyResolver`] - 依赖解析器接口
//! - [`Constructible`] / [`RawInstanceFactory`] - 构造边界
//! - [`CandidateSource`] - 候选对象来源
//! - [`Injector`] / [`InjectionStrategy`] - 成员注入与注入策略

pub mod discovery;
pub mod factory;
pub mod injection;
pub mod registry;
pub mod resolver;

pub use discovery::*;
pub use factory::*;
pub use injection::*;
pub use registry::*;
pub use resolver::*;
