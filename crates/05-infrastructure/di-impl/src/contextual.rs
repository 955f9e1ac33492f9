//! 上下文解析器
//!
//! 在某个解析器之上叠加一层覆盖映射，只影响本次上下文的解析。

use di_abstractions::{ContextualOverrideMap, DependencyResolver};
use infrastructure_common::{DependencyKey, DependencyResult, Instance, Scope};
use tracing::trace;

/// 上下文解析器
///
/// 覆盖映射中有的键直接返回映射里的值，其余键交给内部解析器。
/// 内部解析器不会被修改；空的覆盖映射也是合法的。
pub struct ContextualResolver<R> {
    inner: R,
    overrides: ContextualOverrideMap,
    scope: Scope,
}

impl<R: DependencyResolver> ContextualResolver<R> {
    /// 创建上下文解析器
    pub fn new(inner: R, overrides: ContextualOverrideMap) -> Self {
        Self::with_scope(inner, overrides, Scope::new("contextual"))
    }

    /// 使用指定作用域创建上下文解析器
    pub fn with_scope(inner: R, overrides: ContextualOverrideMap, scope: Scope) -> Self {
        Self {
            inner,
            overrides,
            scope,
        }
    }

    /// 内层解析器
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// 上下文覆盖表
    pub fn overrides(&self) -> &ContextualOverrideMap {
        &self.overrides
    }

    /// 上下文所属的作用域
    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl<R: DependencyResolver> DependencyResolver for ContextualResolver<R> {
    fn resolve_key(&self, key: &DependencyKey) -> DependencyResult<Instance> {
        if let Some(value) = self.overrides.get(key) {
            trace!("{} 使用上下文覆盖值: {}", self.scope, key);
            return Ok(value.clone());
        }
        self.inner.resolve_key(key)
    }

    fn can_resolve(&self, key: &DependencyKey) -> bool {
        self.overrides.contains(key) || self.inner.can_resolve(key)
    }
}

impl<R> std::fmt::Debug for ContextualResolver<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextualResolver")
            .field("scope", &self.scope)
            .field("overrides", &self.overrides)
            .finish()
    }
}
