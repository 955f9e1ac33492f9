//! 依赖解析器抽象接口
//!
//! 任何满足“按键解析出实例”契约的组件都可以互相替换，
//! 上下文覆盖、作用域等都以装饰器的形式叠加。

use infrastructure_common::{
    downcast, erase, DependencyError, DependencyKey, DependencyResult, Instance,
};
use std::collections::HashMap;
use std::sync::Arc;

/// 依赖解析器 trait
pub trait DependencyResolver: Send + Sync {
    /// 按依赖键解析实例
    fn resolve_key(&self, key: &DependencyKey) -> DependencyResult<Instance>;

    /// 检查是否可以解析指定依赖键
    fn can_resolve(&self, key: &DependencyKey) -> bool;
}

/// 解析器的泛型便捷接口
pub trait ResolverExt: DependencyResolver {
    /// 解析指定类型
    fn resolve<K>(&self) -> DependencyResult<Arc<K>>
    where
        K: ?Sized + Send + Sync + 'static,
    {
        let key = DependencyKey::of::<K>();
        let instance = self.resolve_key(&key)?;
        downcast::<K>(&instance).ok_or_else(|| DependencyError::TypeMismatch {
            expected: key.name().to_string(),
            actual: "解析结果的载荷类型".to_string(),
        })
    }

    /// 解析指定类型，未注册时返回 `None`
    fn resolve_optional<K>(&self) -> DependencyResult<Option<Arc<K>>>
    where
        K: ?Sized + Send + Sync + 'static,
    {
        match self.resolve::<K>() {
            Ok(value) => Ok(Some(value)),
            Err(DependencyError::ComponentNotRegistered { type_name })
                if type_name == std::any::type_name::<K>() =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// 检查是否可以解析指定类型
    fn can_resolve_type<K: ?Sized + 'static>(&self) -> bool {
        self.can_resolve(&DependencyKey::of::<K>())
    }
}

impl<R: DependencyResolver + ?Sized> ResolverExt for R {}

impl<R: DependencyResolver + ?Sized> DependencyResolver for &R {
    fn resolve_key(&self, key: &DependencyKey) -> DependencyResult<Instance> {
        (**self).resolve_key(key)
    }

    fn can_resolve(&self, key: &DependencyKey) -> bool {
        (**self).can_resolve(key)
    }
}

impl<R: DependencyResolver + ?Sized> DependencyResolver for Arc<R> {
    fn resolve_key(&self, key: &DependencyKey) -> DependencyResult<Instance> {
        (**self).resolve_key(key)
    }

    fn can_resolve(&self, key: &DependencyKey) -> bool {
        (**self).can_resolve(key)
    }
}

impl<R: DependencyResolver + ?Sized> DependencyResolver for Box<R> {
    fn resolve_key(&self, key: &DependencyKey) -> DependencyResult<Instance> {
        (**self).resolve_key(key)
    }

    fn can_resolve(&self, key: &DependencyKey) -> bool {
        (**self).can_resolve(key)
    }
}

/// 上下文覆盖表
///
/// 依赖键到实例的映射，在委托给被包装的解析器之前先查此表。
#[derive(Clone, Default)]
pub struct ContextualOverrideMap {
    entries: HashMap<DependencyKey, Instance>,
}

impl ContextualOverrideMap {
    /// 创建空的覆盖表
    pub fn new() -> Self {
        Self::default()
    }

    /// 以类型 `K` 为键加入覆盖值
    pub fn insert<K>(&mut self, value: Arc<K>) -> Option<Instance>
    where
        K: ?Sized + Send + Sync + 'static,
    {
        self.entries.insert(DependencyKey::of::<K>(), erase(value))
    }

    /// 链式加入覆盖值
    pub fn with<K>(mut self, value: Arc<K>) -> Self
    where
        K: ?Sized + Send + Sync + 'static,
    {
        self.insert(value);
        self
    }

    /// 加入类型擦除的覆盖值，载荷必须是 `Arc<K>`
    pub fn insert_erased(&mut self, key: DependencyKey, value: Instance) -> Option<Instance> {
        self.entries.insert(key, value)
    }

    /// 查找覆盖值
    pub fn get(&self, key: &DependencyKey) -> Option<&Instance> {
        self.entries.get(key)
    }

    /// 是否包含指定键
    pub fn contains(&self, key: &DependencyKey) -> bool {
        self.entries.contains_key(key)
    }

    /// 覆盖项数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 所有覆盖的键
    pub fn keys(&self) -> impl Iterator<Item = &DependencyKey> {
        self.entries.keys()
    }
}

impl std::fmt::Debug for ContextualOverrideMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
