//! 注入目标目录
//!
//! 进程级的“类型 → 注入描述”缓存。每个类型的注入点只在注册时计算一次，
//! 之后的定位和注入都只做查表。

use crate::component::{InjectionSite, Injectable};
use crate::errors::{DependencyError, DependencyResult};
use crate::metadata::{Candidate, DependencyKey, Instance};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::sync::Arc;
use tracing::debug;

/// 类型擦除的成员赋值函数
pub type AssignFn = fn(&mut Candidate, &InjectionSite, Instance) -> DependencyResult<()>;

/// 注入描述
pub struct InjectionDescriptor {
    /// 目标类型
    pub owner: DependencyKey,
    /// 注入点列表（按声明顺序）
    pub sites: Vec<InjectionSite>,
    /// 注入优先级
    pub priority: i32,
    assign: AssignFn,
}

impl InjectionDescriptor {
    /// 从类型构建注入描述
    pub fn of<T: Injectable>() -> Self {
        Self {
            owner: DependencyKey::of::<T>(),
            sites: T::injection_sites(),
            priority: T::priority(),
            assign: assign_erased::<T>,
        }
    }

    /// 将实例写入目标对象的成员
    pub fn assign(
        &self,
        target: &mut Candidate,
        site: &InjectionSite,
        value: Instance,
    ) -> DependencyResult<()> {
        (self.assign)(target, site, value)
    }
}

impl std::fmt::Debug for InjectionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectionDescriptor")
            .field("owner", &self.owner)
            .field("sites", &self.sites)
            .field("priority", &self.priority)
            .field("assign", &"<function>")
            .finish()
    }
}

fn assign_erased<T: Injectable>(
    target: &mut Candidate,
    site: &InjectionSite,
    value: Instance,
) -> DependencyResult<()> {
    let target = target
        .downcast_mut::<T>()
        .ok_or_else(|| DependencyError::TypeMismatch {
            expected: std::any::type_name::<T>().to_string(),
            actual: "其他类型的候选对象".to_string(),
        })?;
    target.assign(site, value)
}

/// 全局注入目标目录
static INJECTION_TARGETS: Lazy<DashMap<TypeId, Arc<InjectionDescriptor>>> = Lazy::new(DashMap::new);

/// 将类型登记为注入目标，重复登记返回已有描述
pub fn register_injection_target<T: Injectable>() -> Arc<InjectionDescriptor> {
    INJECTION_TARGETS
        .entry(TypeId::of::<T>())
        .or_insert_with(|| {
            let descriptor = InjectionDescriptor::of::<T>();
            debug!(
                "登记注入目标: {} ({} 个注入点)",
                descriptor.owner,
                descriptor.sites.len()
            );
            Arc::new(descriptor)
        })
        .clone()
}

/// 按类型ID查找注入描述
pub fn injection_descriptor(type_id: TypeId) -> Option<Arc<InjectionDescriptor>> {
    INJECTION_TARGETS.get(&type_id).map(|entry| entry.value().clone())
}

/// 查找候选对象运行时类型的注入描述
pub fn descriptor_of(candidate: &Candidate) -> Option<Arc<InjectionDescriptor>> {
    injection_descriptor(candidate.type_id())
}

/// 候选对象的运行时类型是否带有注入目标标记
pub fn is_injection_target(candidate: &Candidate) -> bool {
    INJECTION_TARGETS.contains_key(&candidate.type_id())
}

/// 已登记的注入目标数量
pub fn registered_target_count() -> usize {
    INJECTION_TARGETS.len()
}
