//! 错误类型定义

use crate::metadata::DependencyKey;
use std::any::TypeId;
use std::fmt;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        #[from]
        source: config::ConfigError,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 依赖注入错误类型
///
/// 覆盖参数错误、解析错误（未注册 / 类型不符）以及循环依赖。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error("参数无效: {message}")]
    InvalidArgument { message: String },

    #[error("组件未注册: {type_name}")]
    ComponentNotRegistered { type_name: String },

    #[error("类型不匹配: 期望 {expected}, 实际注册为 {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("循环依赖检测到: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("解析深度超过上限 {max_depth}: {type_name}")]
    ResolutionDepthExceeded { type_name: String, max_depth: usize },
}

impl DependencyError {
    /// 创建参数错误
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// 创建未注册错误
    pub fn not_registered(key: &DependencyKey) -> Self {
        Self::ComponentNotRegistered {
            type_name: key.name().to_string(),
        }
    }

    /// 是否属于解析错误（未注册或类型不符）
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::ComponentNotRegistered { .. } | Self::TypeMismatch { .. }
        )
    }
}

/// 单个注入点的失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionFailure {
    /// 被注入对象的类型
    pub owner: DependencyKey,
    /// 成员名称
    pub member: &'static str,
    /// 成员所需的依赖键
    pub key: DependencyKey,
    /// 失败原因
    pub error: DependencyError,
}

impl fmt::Display for InjectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} <- {}: {}",
            self.owner, self.member, self.key, self.error
        )
    }
}

/// 聚合注入错误
///
/// 单个目标或整批目标的所有失败都收集在一起，调用方一次看到完整的失败集合。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InjectionError {
    /// 类型擦除后的候选对象只能提供类型ID
    #[error("对象不是注入目标: {type_id:?}")]
    NotATarget { type_id: TypeId },

    #[error("注入失败 ({} 处): {}", .failures.len(), render_failures(.failures))]
    Aggregated { failures: Vec<InjectionFailure> },
}

impl InjectionError {
    /// 所有失败记录
    pub fn failures(&self) -> &[InjectionFailure] {
        match self {
            Self::NotATarget { .. } => &[],
            Self::Aggregated { failures } => failures,
        }
    }

    /// 失败的依赖键
    pub fn failed_keys(&self) -> Vec<DependencyKey> {
        self.failures().iter().map(|f| f.key).collect()
    }

    /// 指定类型是否有失败记录
    pub fn involves(&self, owner: &DependencyKey) -> bool {
        self.failures().iter().any(|f| &f.owner == owner)
    }
}

fn render_failures(failures: &[InjectionFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    Dependency {
        #[from]
        source: DependencyError,
    },

    #[error("注入错误: {source}")]
    Injection {
        #[from]
        source: InjectionError,
    },

    #[error("启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type InjectionResult<T> = Result<T, InjectionError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
