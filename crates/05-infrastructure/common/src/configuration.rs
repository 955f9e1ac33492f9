//! 容器配置
//!
//! 配置来源：TOML 文件，加上以 `DI__` 为前缀的环境变量覆盖

use crate::errors::{ConfigError, ConfigResult, DependencyError, DependencyResult};
use crate::lifecycle::Lifetime;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// 默认最大解析深度
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 64;

/// 注入策略类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// 按候选顺序注入
    #[default]
    Default,
    /// 按注入优先级从高到低注入
    Priority,
}

/// 注册指令
///
/// 配置文件中的一条注册，`binding` 是类型目录中的绑定名称。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingDirective {
    /// 绑定名称
    pub binding: String,
    /// 生命周期
    #[serde(default)]
    pub lifetime: Lifetime,
}

impl BindingDirective {
    /// 创建新的注册指令
    pub fn new(binding: impl Into<String>, lifetime: Lifetime) -> Self {
        Self {
            binding: binding.into(),
            lifetime,
        }
    }

    /// 校验指令形状（不校验可构造性）
    pub fn validate_shape(&self) -> DependencyResult<()> {
        if self.binding.trim().is_empty() {
            return Err(DependencyError::invalid_argument("注册指令缺少绑定名称"));
        }
        if self.lifetime == Lifetime::Instance {
            return Err(DependencyError::invalid_argument(format!(
                "注册指令 {} 不能使用 instance 生命周期，固定实例只能通过代码注册",
                self.binding
            )));
        }
        Ok(())
    }
}

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 最大解析深度
    pub max_resolution_depth: usize,
    /// 注入策略
    pub strategy: StrategyKind,
    /// 注册指令列表
    pub bindings: Vec<BindingDirective>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
            strategy: StrategyKind::Default,
            bindings: Vec::new(),
        }
    }
}

impl ContainerConfig {
    /// 从 TOML 文件加载配置，环境变量 `DI__*` 可覆盖标量项
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!("加载容器配置: {}", path.display());
        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix("DI").separator("__").try_parsing(true))
            .build()?;
        Self::finish(config)
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;
        Self::finish(config)
    }

    fn finish(config: Config) -> ConfigResult<Self> {
        let parsed: Self = config.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_resolution_depth == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_resolution_depth 必须大于 0".to_string(),
            });
        }
        for directive in &self.bindings {
            directive
                .validate_shape()
                .map_err(|e| ConfigError::ValidationError {
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }
}
