//! 注入启动器
//!
//! 一次启动：定位候选对象中的注入目标，再按策略注入依赖。

use crate::provider::ServiceProvider;
use chrono::{DateTime, Utc};
use di_abstractions::{
    CandidateSource, ContextualOverrideMap, DependencyResolver, InjectionStrategy,
};
use di_impl::{ContextualResolver, InjectionTargetLocator};
use infrastructure_common::{InfrastructureResult, Scope};
use tracing::{error, info};

/// 启动报告
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// 本次启动的作用域
    pub scope: Scope,
    /// 使用的注入策略
    pub strategy: String,
    /// 构建时应用的注册指令数量
    pub directives_applied: usize,
    /// 完成注入的目标数量
    pub targets: usize,
    /// 完成赋值的注入点数量
    pub sites: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BootstrapReport {
    /// 耗时
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// 注入启动器
///
/// 由 [`crate::BootstrapperBuilder`] 构建。
pub struct InjectionBootstrapper {
    provider: ServiceProvider,
    strategy: Box<dyn InjectionStrategy>,
    directives_applied: usize,
}

impl InjectionBootstrapper {
    pub(crate) fn new(
        provider: ServiceProvider,
        strategy: Box<dyn InjectionStrategy>,
        directives_applied: usize,
    ) -> Self {
        Self {
            provider,
            strategy,
            directives_applied,
        }
    }

    /// 服务提供者
    pub fn provider(&self) -> &ServiceProvider {
        &self.provider
    }

    /// 当前注入策略名称
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// 为候选来源中的所有注入目标注入依赖
    pub fn bootstrap(&self, source: &mut dyn CandidateSource) -> InfrastructureResult<BootstrapReport> {
        self.run(source, &self.provider, Scope::root())
    }

    /// 在上下文覆盖下注入依赖，覆盖只对本次启动有效
    pub fn bootstrap_in_context(
        &self,
        source: &mut dyn CandidateSource,
        overrides: ContextualOverrideMap,
    ) -> InfrastructureResult<BootstrapReport> {
        let scope = Scope::root().child("context");
        let resolver = ContextualResolver::with_scope(&self.provider, overrides, scope.clone());
        self.run(source, &resolver, scope)
    }

    fn run(
        &self,
        source: &mut dyn CandidateSource,
        resolver: &dyn DependencyResolver,
        scope: Scope,
    ) -> InfrastructureResult<BootstrapReport> {
        let started_at = Utc::now();
        info!("{} 开始注入 (策略: {})", scope, self.strategy.name());

        let mut targets = InjectionTargetLocator::from_source(source);
        let summary = self
            .strategy
            .inject_dependencies(&mut targets, resolver)
            .map_err(|e| {
                error!("{} 注入失败: {}", scope, e);
                e
            })?;

        let report = BootstrapReport {
            scope,
            strategy: self.strategy.name().to_string(),
            directives_applied: self.directives_applied,
            targets: summary.targets,
            sites: summary.sites,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            "{} 注入完成: {} 个目标, {} 个注入点, 耗时 {}ms",
            report.scope,
            report.targets,
            report.sites,
            report.elapsed().num_milliseconds()
        );
        Ok(report)
    }
}

impl std::fmt::Debug for InjectionBootstrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectionBootstrapper")
            .field("provider", &self.provider)
            .field("strategy", &self.strategy.name())
            .field("directives_applied", &self.directives_applied)
            .finish()
    }
}
