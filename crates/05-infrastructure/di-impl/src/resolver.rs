//! 解析器实现
//!
//! 由定稿的注册表构建，注册项只读；唯一的可变状态是单例缓存。

use crate::registry::ServiceRegistry;
use di_abstractions::{DependencyResolver, Producer, RegistrationEntry, RegistrationKind};
use infrastructure_common::{
    ContainerConfig, DependencyError, DependencyKey, DependencyResult, Instance,
    DEFAULT_MAX_RESOLUTION_DEPTH,
};
use parking_lot::{ReentrantMutex, RwLock};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// 依赖解析器
///
/// - 固定实例：总是返回注册时的实例
/// - 瞬态：每次解析都通过生产函数构造新实例
/// - 单例：首次解析时构造一次并缓存，并发的首次请求也只构造一次
///
/// 缓存命中只需要读锁；未命中时在构造闸门内复查缓存后再构造。
/// 闸门可重入，单例的构造函数可以继续解析其他单例。
pub struct Resolver {
    entries: HashMap<DependencyKey, RegistrationEntry>,
    singletons: RwLock<HashMap<DependencyKey, Instance>>,
    gate: ReentrantMutex<()>,
    max_depth: usize,
}

impl Resolver {
    /// 从注册项构建解析器，同一个键以最后一次注册为准
    pub fn new(entries: Vec<RegistrationEntry>) -> Self {
        Self::with_max_depth(entries, DEFAULT_MAX_RESOLUTION_DEPTH)
    }

    /// 按配置构建解析器
    pub fn with_config(entries: Vec<RegistrationEntry>, config: &ContainerConfig) -> Self {
        Self::with_max_depth(entries, config.max_resolution_depth)
    }

    fn with_max_depth(entries: Vec<RegistrationEntry>, max_depth: usize) -> Self {
        let total = entries.len();
        let mut table = HashMap::with_capacity(total);
        for entry in entries {
            let key = entry.key();
            if let Some(previous) = table.insert(key, entry) {
                warn!(
                    "覆盖注册: {} ({} -> {})",
                    key,
                    previous.lifetime(),
                    table[&key].lifetime()
                );
            }
        }

        info!("构建解析器完成，{} 条注册，{} 个依赖键", total, table.len());
        Self {
            entries: table,
            singletons: RwLock::new(HashMap::new()),
            gate: ReentrantMutex::new(()),
            max_depth: max_depth.max(1),
        }
    }

    /// 所有已注册的依赖键
    pub fn registered_keys(&self) -> Vec<DependencyKey> {
        self.entries.keys().copied().collect()
    }

    /// 查找注册项
    pub fn registration(&self, key: &DependencyKey) -> Option<&RegistrationEntry> {
        self.entries.get(key)
    }

    /// 已构造的单例数量
    pub fn singleton_count(&self) -> usize {
        self.singletons.read().len()
    }

    /// 逐个解析所有注册项，收集全部失败
    ///
    /// 会预热单例并构造一次每个瞬态类型。
    pub fn validate(&self) -> Result<(), Vec<DependencyError>> {
        let errors: Vec<DependencyError> = self
            .entries
            .keys()
            .filter_map(|key| self.resolve_key(key).err())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn resolve_within(
        &self,
        key: &DependencyKey,
        parent: Option<&ResolutionFrame<'_>>,
    ) -> DependencyResult<Instance> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| DependencyError::not_registered(key))?;

        match entry.kind() {
            RegistrationKind::Instance(instance) => Ok(instance.clone()),
            RegistrationKind::Transient(producer) => self.construct(entry, producer, parent),
            RegistrationKind::Singleton(producer) => self.singleton(entry, producer, parent),
        }
    }

    fn singleton(
        &self,
        entry: &RegistrationEntry,
        producer: &Producer,
        parent: Option<&ResolutionFrame<'_>>,
    ) -> DependencyResult<Instance> {
        let key = entry.key();
        if let Some(instance) = self.singletons.read().get(&key) {
            return Ok(instance.clone());
        }

        let _gate = self.gate.lock();
        if let Some(instance) = self.singletons.read().get(&key) {
            return Ok(instance.clone());
        }

        let instance = self.construct(entry, producer, parent)?;
        self.singletons.write().insert(key, instance.clone());
        debug!("缓存单例: {}", key);
        Ok(instance)
    }

    fn construct(
        &self,
        entry: &RegistrationEntry,
        producer: &Producer,
        parent: Option<&ResolutionFrame<'_>>,
    ) -> DependencyResult<Instance> {
        let key = entry.key();
        if let Some(parent) = parent {
            if parent.contains(&key) {
                return Err(DependencyError::CircularDependency {
                    dependency_chain: parent.chain_to(&key),
                });
            }
        }

        let depth = parent.map_or(0, |p| p.depth + 1);
        if depth >= self.max_depth {
            return Err(DependencyError::ResolutionDepthExceeded {
                type_name: key.name().to_string(),
                max_depth: self.max_depth,
            });
        }

        let frame = ResolutionFrame {
            resolver: self,
            key,
            depth,
            parent,
        };
        debug!("构造 {} (产出类型 {}, 深度 {})", key, entry.produced_type(), depth);
        producer(&frame)
    }
}

impl DependencyResolver for Resolver {
    fn resolve_key(&self, key: &DependencyKey) -> DependencyResult<Instance> {
        self.resolve_within(key, None)
    }

    fn can_resolve(&self, key: &DependencyKey) -> bool {
        self.entries.contains_key(key)
    }
}

impl From<ServiceRegistry> for Resolver {
    fn from(registry: ServiceRegistry) -> Self {
        registry.build()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("entries", &self.entries.len())
            .field("singletons", &self.singleton_count())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// 单次解析调用栈上的一帧
///
/// 生产函数拿到的解析器就是这一帧，嵌套解析沿父链检测循环依赖。
struct ResolutionFrame<'a> {
    resolver: &'a Resolver,
    key: DependencyKey,
    depth: usize,
    parent: Option<&'a ResolutionFrame<'a>>,
}

impl ResolutionFrame<'_> {
    fn contains(&self, key: &DependencyKey) -> bool {
        let mut frame = Some(self);
        while let Some(current) = frame {
            if &current.key == key {
                return true;
            }
            frame = current.parent;
        }
        false
    }

    fn chain_to(&self, key: &DependencyKey) -> String {
        let mut names = Vec::new();
        let mut frame = Some(self);
        while let Some(current) = frame {
            names.push(current.key.name());
            frame = current.parent;
        }
        names.reverse();
        names.push(key.name());
        names.join(" -> ")
    }
}

impl DependencyResolver for ResolutionFrame<'_> {
    fn resolve_key(&self, key: &DependencyKey) -> DependencyResult<Instance> {
        self.resolver.resolve_within(key, Some(self))
    }

    fn can_resolve(&self, key: &DependencyKey) -> bool {
        self.resolver.can_resolve(key)
    }
}
