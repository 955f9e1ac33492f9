//! 注册表实现

use crate::resolver::Resolver;
use di_abstractions::{RegistrationEntry, ServiceRegister};
use infrastructure_common::{ContainerConfig, DependencyKey, DependencyResult};
use tracing::debug;

/// 服务注册表
///
/// 配置阶段按顺序记录注册项，构建解析器时才折叠重复的键。
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    entries: Vec<RegistrationEntry>,
}

impl ServiceRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用默认配置构建解析器
    pub fn build(self) -> Resolver {
        Resolver::new(self.entries)
    }

    /// 按配置构建解析器
    pub fn build_with(self, config: &ContainerConfig) -> Resolver {
        Resolver::with_config(self.entries, config)
    }

    /// 已记录的注册数量（含被覆盖的）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否没有任何注册
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 某个键是否已注册
    pub fn is_registered(&self, key: &DependencyKey) -> bool {
        self.entries.iter().any(|entry| &entry.key() == key)
    }
}

impl ServiceRegister for ServiceRegistry {
    fn register_entry(&mut self, entry: RegistrationEntry) -> DependencyResult<()> {
        debug!(
            "注册 {} -> {} ({})",
            entry.key(),
            entry.produced_type(),
            entry.lifetime()
        );
        self.entries.push(entry);
        Ok(())
    }
}
