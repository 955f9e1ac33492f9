//! 服务提供者
//!
//! 配置阶段是可写的注册表，第一次解析时定稿为只读解析器。

use di_abstractions::{DependencyResolver, RegistrationEntry, ServiceRegister};
use di_impl::{Resolver, ServiceRegistry, TypeCatalog};
use infrastructure_common::{
    BindingDirective, ContainerConfig, DependencyError, DependencyKey, DependencyResult, Instance,
};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::info;

/// 服务提供者
///
/// 解析器只会构建一次，即使多个线程同时发起第一次解析。
/// 定稿之后的注册返回参数错误。
pub struct ServiceProvider {
    config: ContainerConfig,
    pending: Mutex<Option<ServiceRegistry>>,
    resolver: OnceCell<Resolver>,
}

impl ServiceProvider {
    /// 使用默认配置创建服务提供者
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// 使用指定配置创建服务提供者
    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            config,
            pending: Mutex::new(Some(ServiceRegistry::new())),
            resolver: OnceCell::new(),
        }
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 按类型目录应用注册指令，返回应用的条数
    pub fn apply_directives(
        &mut self,
        catalog: &TypeCatalog,
        directives: &[BindingDirective],
    ) -> DependencyResult<usize> {
        catalog.apply(directives, self)
    }

    /// 是否已经定稿
    pub fn is_finalized(&self) -> bool {
        self.resolver.get().is_some()
    }

    /// 获取解析器，必要时定稿注册表
    pub fn resolver(&self) -> &Resolver {
        self.resolver.get_or_init(|| {
            let registry = self.pending.lock().take().unwrap_or_default();
            info!("注册表定稿，共 {} 条注册", registry.len());
            registry.build_with(&self.config)
        })
    }

    /// 立即定稿并校验所有注册项
    pub fn validate(&self) -> Result<(), Vec<DependencyError>> {
        self.resolver().validate()
    }
}

impl Default for ServiceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceRegister for ServiceProvider {
    fn register_entry(&mut self, entry: RegistrationEntry) -> DependencyResult<()> {
        match self.pending.get_mut() {
            Some(registry) => registry.register_entry(entry),
            None => Err(DependencyError::invalid_argument(format!(
                "注册表已定稿，不能再注册 {}",
                entry.key()
            ))),
        }
    }
}

impl DependencyResolver for ServiceProvider {
    fn resolve_key(&self, key: &DependencyKey) -> DependencyResult<Instance> {
        self.resolver().resolve_key(key)
    }

    fn can_resolve(&self, key: &DependencyKey) -> bool {
        match self.resolver.get() {
            Some(resolver) => resolver.can_resolve(key),
            None => self
                .pending
                .lock()
                .as_ref()
                .map_or(false, |registry| registry.is_registered(key)),
        }
    }
}

impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("config", &self.config)
            .field("finalized", &self.is_finalized())
            .finish()
    }
}
