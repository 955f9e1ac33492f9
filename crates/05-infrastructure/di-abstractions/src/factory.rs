//! 构造边界
//!
//! [`Constructible`] 描述“解析器可以构造的类型”，
//! [`RawInstanceFactory`] 描述“给我一个刚构造好、尚未注入的对象”。

use crate::resolver::DependencyResolver;
use infrastructure_common::{Candidate, DependencyKey, DependencyResult};

/// 可构造类型 trait
///
/// 瞬态和单例注册要求产出类型实现此 trait；构造函数的依赖通过传入的解析器递归解析。
pub trait Constructible: Sized + Send + Sync + 'static {
    /// 构造实例
    fn construct(resolver: &dyn DependencyResolver) -> DependencyResult<Self>;
}

/// 原始实例工厂 trait
///
/// 由宿主环境提供，返回尚未注入的新对象。
pub trait RawInstanceFactory: Send + Sync {
    /// 构造指定类型的新对象
    fn instantiate(&self, key: &DependencyKey) -> DependencyResult<Box<Candidate>>;

    /// 是否能够构造指定类型
    fn can_instantiate(&self, key: &DependencyKey) -> bool;
}
