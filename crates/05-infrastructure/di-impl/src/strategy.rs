//! 注入策略实现

use crate::injector::MemberInjector;
use di_abstractions::{DependencyResolver, InjectionStrategy, InjectionSummary, Injector};
use infrastructure_common::{descriptor_of, Candidate, InjectionResult, StrategyKind};
use std::cmp::Reverse;
use tracing::{debug, info};

/// 默认注入策略：按定位顺序逐个注入
#[derive(Debug, Clone, Default)]
pub struct DefaultInjectionStrategy<J = MemberInjector> {
    injector: J,
}

impl<J: Injector> DefaultInjectionStrategy<J> {
    /// 使用指定注入器创建策略
    pub fn new(injector: J) -> Self {
        Self { injector }
    }
}

impl<J: Injector> InjectionStrategy for DefaultInjectionStrategy<J> {
    fn name(&self) -> &str {
        "default"
    }

    fn inject_dependencies<'a>(
        &self,
        targets: &mut dyn Iterator<Item = &'a mut Candidate>,
        resolver: &dyn DependencyResolver,
    ) -> InjectionResult<InjectionSummary> {
        let summary = self.injector.inject_all(targets, resolver)?;
        info!(
            "注入完成: {} 个目标, {} 个注入点",
            summary.targets, summary.sites
        );
        Ok(summary)
    }
}

/// 优先级注入策略
///
/// 先收集全部目标，按类型声明的优先级从高到低注入；同优先级保持定位顺序。
#[derive(Debug, Clone, Default)]
pub struct PriorityInjectionStrategy<J = MemberInjector> {
    injector: J,
}

impl<J: Injector> PriorityInjectionStrategy<J> {
    /// 使用指定注入器创建策略
    pub fn new(injector: J) -> Self {
        Self { injector }
    }
}

impl<J: Injector> InjectionStrategy for PriorityInjectionStrategy<J> {
    fn name(&self) -> &str {
        "priority"
    }

    fn inject_dependencies<'a>(
        &self,
        targets: &mut dyn Iterator<Item = &'a mut Candidate>,
        resolver: &dyn DependencyResolver,
    ) -> InjectionResult<InjectionSummary> {
        let mut ordered: Vec<&'a mut Candidate> = targets.collect();
        ordered.sort_by_key(|target| Reverse(descriptor_of(&**target).map_or(0, |d| d.priority)));
        debug!("按优先级排序 {} 个注入目标", ordered.len());

        let summary = self.injector.inject_all(&mut ordered.into_iter(), resolver)?;
        info!(
            "注入完成: {} 个目标, {} 个注入点",
            summary.targets, summary.sites
        );
        Ok(summary)
    }
}

/// 按配置选择注入策略
pub fn strategy_for(kind: StrategyKind) -> Box<dyn InjectionStrategy> {
    match kind {
        StrategyKind::Default => Box::new(DefaultInjectionStrategy::<MemberInjector>::default()),
        StrategyKind::Priority => Box::new(PriorityInjectionStrategy::<MemberInjector>::default()),
    }
}
