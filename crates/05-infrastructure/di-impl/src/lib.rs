//! # 依赖注入具体实现
//!
//! 提供注册表、解析器、上下文解析器、注入目标定位器、成员注入器和注入策略的实现。
//!
//! 典型流程：
//!
//! 1. 通过 [`ServiceRegistry`] 记录注册
//! 2. 构建只读的 [`Resolver`]
//! 3. 用 [`InjectionTargetLocator`] 从候选对象中筛出注入目标
//! 4. 交给 [`DefaultInjectionStrategy`] 或其他策略注入

pub mod catalog;
pub mod contextual;
pub mod factory;
pub mod injector;
pub mod locator;
pub mod registry;
pub mod resolver;
pub mod strategy;

pub use catalog::TypeCatalog;
pub use contextual::ContextualResolver;
pub use factory::{InjectingFactory, PrototypeFactory};
pub use injector::MemberInjector;
pub use locator::InjectionTargetLocator;
pub use registry::ServiceRegistry;
pub use resolver::Resolver;
pub use strategy::{strategy_for, DefaultInjectionStrategy, PriorityInjectionStrategy};
