//! 成员注入器

use di_abstractions::{DependencyResolver, Injector};
use infrastructure_common::{
    descriptor_of, register_injection_target, Candidate, Injectable, InjectionError,
    InjectionFailure, InjectionResult,
};
use tracing::{debug, warn};

/// 成员注入器
///
/// 按声明顺序逐个解析注入点并赋值。某个注入点失败时继续处理其余注入点，
/// 结束后把所有失败一起报告；已经成功的赋值保留。
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberInjector;

impl MemberInjector {
    /// 创建成员注入器
    pub fn new() -> Self {
        Self
    }

    /// 为静态已知类型的对象注入依赖
    ///
    /// 类型会先被登记为注入目标。
    pub fn inject_typed<T: Injectable>(
        &self,
        target: &mut T,
        resolver: &dyn DependencyResolver,
    ) -> InjectionResult<usize> {
        register_injection_target::<T>();
        self.inject(target, resolver)
    }
}

impl Injector for MemberInjector {
    fn inject(&self, target: &mut Candidate, resolver: &dyn DependencyResolver) -> InjectionResult<usize> {
        let descriptor = descriptor_of(target).ok_or_else(|| InjectionError::NotATarget {
            type_id: (*target).type_id(),
        })?;

        let mut assigned = 0;
        let mut failures = Vec::new();

        for site in &descriptor.sites {
            let outcome = match resolver.resolve_key(&site.key) {
                Ok(value) => descriptor.assign(&mut *target, site, value),
                Err(error) => Err(error),
            };

            match outcome {
                Ok(()) => assigned += 1,
                Err(error) => {
                    warn!("注入 {}.{} 失败: {}", site.owner, site.member, error);
                    failures.push(InjectionFailure {
                        owner: site.owner,
                        member: site.member,
                        key: site.key,
                        error,
                    });
                }
            }
        }

        if failures.is_empty() {
            debug!("{} 注入完成 ({} 个注入点)", descriptor.owner, assigned);
            Ok(assigned)
        } else {
            Err(InjectionError::Aggregated { failures })
        }
    }
}
