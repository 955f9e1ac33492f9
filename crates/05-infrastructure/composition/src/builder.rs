//! 启动器构建器

use crate::bootstrapper::InjectionBootstrapper;
use crate::logging::LoggingConfig;
use crate::provider::ServiceProvider;
use di_abstractions::{InjectionStrategy, RegistrationEntry, ServiceRegister};
use di_impl::{strategy_for, TypeCatalog};
use infrastructure_common::{ContainerConfig, InfrastructureResult};
use std::path::Path;
use tracing::{debug, info};

/// 启动器构建器
///
/// 使用建造者模式组装配置、类型目录、注册项和注入策略
pub struct BootstrapperBuilder {
    config: ContainerConfig,
    catalog: TypeCatalog,
    registrations: Vec<RegistrationEntry>,
    strategy: Option<Box<dyn InjectionStrategy>>,
    logging_config: Option<LoggingConfig>,
}

impl BootstrapperBuilder {
    /// 创建新的启动器构建器
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
            catalog: TypeCatalog::new(),
            registrations: Vec::new(),
            strategy: None,
            logging_config: None,
        }
    }

    /// 使用指定的容器配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 从 TOML 文件加载容器配置
    pub fn load_config<P: AsRef<Path>>(mut self, path: P) -> InfrastructureResult<Self> {
        let path = path.as_ref();
        info!("加载容器配置: {}", path.display());
        self.config = ContainerConfig::load(path)?;
        Ok(self)
    }

    /// 使用类型目录解析配置中的注册指令
    pub fn with_catalog(mut self, catalog: TypeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// 添加代码注册项，先于配置中的指令注册
    pub fn register(mut self, entry: RegistrationEntry) -> Self {
        debug!("添加注册项: {}", entry.key());
        self.registrations.push(entry);
        self
    }

    /// 指定注入策略，覆盖配置中的策略
    pub fn with_strategy<S: InjectionStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self
    }

    /// 构建启动器
    pub fn build(self) -> InfrastructureResult<InjectionBootstrapper> {
        // 只有在明确配置了日志时才初始化日志
        if let Some(logging) = &self.logging_config {
            logging.init()?;
        }

        info!("开始构建注入启动器");
        self.config.validate()?;

        let mut provider = ServiceProvider::with_config(self.config.clone());
        for entry in self.registrations {
            provider.register_entry(entry)?;
        }
        let directives_applied = provider.apply_directives(&self.catalog, &self.config.bindings)?;

        let strategy = self
            .strategy
            .unwrap_or_else(|| strategy_for(self.config.strategy));

        info!(
            "注入启动器构建完成 (策略: {}, 指令: {})",
            strategy.name(),
            directives_applied
        );
        Ok(InjectionBootstrapper::new(provider, strategy, directives_applied))
    }
}

impl Default for BootstrapperBuilder {
    fn default() -> Self {
        Self::new()
    }
}
