//! 注入抽象接口
//!
//! [`Injector`] 负责把解析结果写入单个对象的注入点；
//! [`InjectionStrategy`] 是批量注入的替换点，不同策略可以互换而不影响定位器和解析器。

use crate::resolver::DependencyResolver;
use infrastructure_common::{Candidate, InjectionError, InjectionFailure, InjectionResult};
use tracing::debug;

/// 注入结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectionSummary {
    /// 完成注入的目标数量
    pub targets: usize,
    /// 完成赋值的注入点数量
    pub sites: usize,
}

/// 成员注入器 trait
pub trait Injector: Send + Sync {
    /// 为单个目标注入依赖，返回成功赋值的注入点数量
    ///
    /// 任一注入点失败时返回聚合错误；已经赋值的成员不会回滚。
    fn inject(&self, target: &mut Candidate, resolver: &dyn DependencyResolver) -> InjectionResult<usize>;

    /// 依次为每个目标注入依赖
    ///
    /// 某个目标失败不影响后续目标，所有失败在最后一起报告。
    /// 运行时类型没有注入标记的对象被跳过。
    fn inject_all<'a>(
        &self,
        targets: &mut dyn Iterator<Item = &'a mut Candidate>,
        resolver: &dyn DependencyResolver,
    ) -> InjectionResult<InjectionSummary> {
        let mut summary = InjectionSummary::default();
        let mut failures: Vec<InjectionFailure> = Vec::new();

        for target in targets {
            match self.inject(target, resolver) {
                Ok(sites) => {
                    summary.targets += 1;
                    summary.sites += sites;
                }
                Err(InjectionError::NotATarget { type_id }) => {
                    debug!("跳过非注入目标: {:?}", type_id);
                }
                Err(InjectionError::Aggregated { failures: found }) => failures.extend(found),
            }
        }

        if failures.is_empty() {
            Ok(summary)
        } else {
            Err(InjectionError::Aggregated { failures })
        }
    }
}

/// 注入策略 trait
pub trait InjectionStrategy: Send + Sync {
    /// 策略名称
    fn name(&self) -> &str;

    /// 为已定位的目标注入依赖
    fn inject_dependencies<'a>(
        &self,
        targets: &mut dyn Iterator<Item = &'a mut Candidate>,
        resolver: &dyn DependencyResolver,
    ) -> InjectionResult<InjectionSummary>;
}
