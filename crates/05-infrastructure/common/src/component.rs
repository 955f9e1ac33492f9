//! 注入目标接口定义
//!
//! 被标记为注入目标的类型必须实现 [`Injectable`]

use crate::errors::{DependencyError, DependencyResult};
use crate::metadata::{downcast, DependencyKey, Instance};
use std::any::Any;
use std::sync::Arc;

/// 注入点
///
/// 描述“某类型的某个成员需要某个依赖键”这一事实，只由类型声明决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InjectionSite {
    /// 声明该成员的类型
    pub owner: DependencyKey,
    /// 成员名称
    pub member: &'static str,
    /// 成员需要的依赖键
    pub key: DependencyKey,
}

impl InjectionSite {
    /// 创建新的注入点
    pub fn new(owner: DependencyKey, member: &'static str, key: DependencyKey) -> Self {
        Self { owner, member, key }
    }

    /// 将解析出的实例还原为该注入点的类型
    pub fn downcast_value<K: ?Sized + Send + Sync + 'static>(
        &self,
        value: &Instance,
    ) -> DependencyResult<Arc<K>> {
        downcast::<K>(value).ok_or_else(|| DependencyError::TypeMismatch {
            expected: std::any::type_name::<K>().to_string(),
            actual: format!("{} 的解析结果", self.key),
        })
    }

    /// 成员不存在时的错误
    pub fn unknown_member(&self) -> DependencyError {
        DependencyError::invalid_argument(format!(
            "{} 没有名为 {} 的注入成员",
            self.owner, self.member
        ))
    }
}

/// 注入目标 trait
///
/// 通常由 `#[derive(Injectable)]` 生成：带 `#[inject]` 的字段即为注入点，
/// 可见性不影响发现。
pub trait Injectable: Any + Send + Sync {
    /// 该类型声明的所有注入点
    fn injection_sites() -> Vec<InjectionSite>
    where
        Self: Sized;

    /// 注入优先级，数值越高越先注入
    fn priority() -> i32
    where
        Self: Sized,
    {
        0
    }

    /// 将解析出的实例写入注入点对应的成员
    fn assign(&mut self, site: &InjectionSite, value: Instance) -> DependencyResult<()>;
}
