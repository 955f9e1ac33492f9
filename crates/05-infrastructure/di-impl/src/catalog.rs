//! 类型目录
//!
//! 配置文件只能写名称，类型目录负责把绑定名称映射为具体的注册项。

use di_abstractions::{Constructible, DependencyResolver, RegistrationEntry, ServiceRegister};
use infrastructure_common::{BindingDirective, DependencyError, DependencyResult, Lifetime};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// 类型目录
#[derive(Debug, Default, Clone)]
pub struct TypeCatalog {
    templates: HashMap<String, RegistrationEntry>,
}

impl TypeCatalog {
    /// 创建空的类型目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 以自身类型为键登记可构造类型
    pub fn add_type<T: Constructible>(
        &mut self,
        binding: impl Into<String>,
    ) -> DependencyResult<&mut Self> {
        self.add_type_as::<T, T, _>(binding, |value| value)
    }

    /// 登记以键 `K` 暴露的可构造类型 `T`
    pub fn add_type_as<K, T, U>(
        &mut self,
        binding: impl Into<String>,
        upcast: U,
    ) -> DependencyResult<&mut Self>
    where
        K: ?Sized + Send + Sync + 'static,
        T: Constructible,
        U: Fn(Arc<T>) -> Arc<K> + Send + Sync + 'static,
    {
        let entry = RegistrationEntry::of_type_as::<K, T, U>(Lifetime::Transient, upcast)?;
        Ok(self.insert(binding.into(), entry))
    }

    /// 登记工厂函数
    pub fn add_factory<K, F>(
        &mut self,
        binding: impl Into<String>,
        factory: F,
    ) -> DependencyResult<&mut Self>
    where
        K: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn DependencyResolver) -> DependencyResult<Arc<K>> + Send + Sync + 'static,
    {
        let entry = RegistrationEntry::factory::<K, F>(Lifetime::Transient, factory)?;
        Ok(self.insert(binding.into(), entry))
    }

    fn insert(&mut self, binding: String, entry: RegistrationEntry) -> &mut Self {
        debug!("类型目录登记 {} -> {}", binding, entry.produced_type());
        self.templates.insert(binding, entry);
        self
    }

    /// 是否包含指定绑定名
    pub fn contains(&self, binding: &str) -> bool {
        self.templates.contains_key(binding)
    }

    /// 已登记的绑定数量
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// 把一条注册指令转换为注册项
    pub fn entry_for(&self, directive: &BindingDirective) -> DependencyResult<RegistrationEntry> {
        directive.validate_shape()?;
        let template = self.templates.get(&directive.binding).ok_or_else(|| {
            DependencyError::invalid_argument(format!(
                "类型目录中没有绑定 {}",
                directive.binding
            ))
        })?;
        template.with_lifetime(directive.lifetime)
    }

    /// 按顺序应用注册指令
    ///
    /// 先校验全部指令，任一指令无效时不会注册任何条目。
    pub fn apply<R: ServiceRegister + ?Sized>(
        &self,
        directives: &[BindingDirective],
        register: &mut R,
    ) -> DependencyResult<usize> {
        let entries = directives
            .iter()
            .map(|directive| self.entry_for(directive))
            .collect::<DependencyResult<Vec<_>>>()?;

        let count = entries.len();
        for entry in entries {
            register.register_entry(entry)?;
        }
        info!("应用了 {} 条注册指令", count);
        Ok(count)
    }
}
