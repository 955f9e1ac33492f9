//! # 基础设施组合层
//!
//! 把注册表、解析器、定位器和注入策略组合成一次完整的注入启动。
//!
//! ## 主要功能
//!
//! - **服务提供者**: 配置阶段可写，第一次解析时定稿为只读解析器
//! - **启动器构建器**: 从配置文件和类型目录组装注册项与注入策略
//! - **注入启动器**: 定位注入目标并按策略注入
//! - **日志初始化**: 开发与生产两套预设
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{BootstrapperBuilder, LoggingConfig};
//! use infrastructure_common::Candidate;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bootstrapper = BootstrapperBuilder::new()
//!         .load_config("di.toml")?
//!         .with_logging(LoggingConfig::development())
//!         .build()?;
//!
//!     let mut objects: Vec<Box<Candidate>> = Vec::new();
//!     let report = bootstrapper.bootstrap(&mut objects)?;
//!     println!("注入了 {} 个对象", report.targets);
//!     Ok(())
//! }
//! ```

pub mod bootstrapper;
pub mod builder;
pub mod logging;
pub mod provider;

// 重新导出主要类型
pub use bootstrapper::{BootstrapReport, InjectionBootstrapper};
pub use builder::BootstrapperBuilder;
pub use logging::LoggingConfig;
pub use provider::ServiceProvider;

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
