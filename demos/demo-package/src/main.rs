//! # 注入运行时演示
//!
//! 演示一次完整的注入流程：
//! - 通过类型目录和配置文件注册服务
//! - 在包含层级中定位注入目标并按优先级注入
//! - 使用上下文覆盖替换某个依赖
//! - 查看聚合的注入失败

use anyhow::Context;
use clap::Parser;
use di_abstractions::{ContainmentNode, ContextualOverrideMap, Descendants, ResolverExt};
use di_impl::TypeCatalog;
use infrastructure_common::{
    registered_target_count, Candidate, ContainerConfig, InfrastructureError,
};
use infrastructure_composition::{BootstrapperBuilder, LoggingConfig};
use injection_macros::{Constructible, Injectable};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "injection-demo")]
#[command(about = "Lorn DI 注入运行时演示")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "demos/demo-package/config/demo.toml")]
    config: PathBuf,

    /// 使用 JSON 格式的生产环境日志
    #[arg(long)]
    json: bool,
}

// ========== 服务 ==========

pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// 单调递增的时钟
#[derive(Constructible)]
struct TickingClock {
    ticks: AtomicU64,
}

impl Clock for TickingClock {
    fn now(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::Relaxed)
    }
}

/// 固定时钟，用于上下文覆盖
struct FrozenClock(u64);

impl Clock for FrozenClock {
    fn now(&self) -> u64 {
        self.0
    }
}

pub trait Ledger: Send + Sync {
    fn record(&self, entry: &str);
}

#[derive(Constructible)]
struct ConsoleLedger {
    #[inject]
    clock: Arc<dyn Clock>,
}

impl Ledger for ConsoleLedger {
    fn record(&self, entry: &str) {
        info!("[ledger @{}] {}", self.clock.now(), entry);
    }
}

#[derive(Constructible)]
struct OrderService {
    #[inject]
    ledger: Arc<dyn Ledger>,
}

impl OrderService {
    fn place(&self, item: &str) {
        self.ledger.record(&format!("下单: {}", item));
    }
}

// ========== 注入目标 ==========

#[derive(Default, Injectable)]
#[injectable(priority = 10)]
struct StatusBar {
    #[inject]
    clock: Option<Arc<dyn Clock>>,
}

#[derive(Default, Injectable)]
struct OrderButton {
    #[inject]
    orders: Option<Arc<OrderService>>,
}

/// 需要一个没有注册的依赖
#[derive(Default, Injectable)]
struct PrinterPanel {
    #[inject]
    printer: Option<Arc<dyn Printer>>,
}

pub trait Printer: Send + Sync {}

/// 不是注入目标
#[derive(Default)]
struct Decoration;

/// 场景节点
struct SceneNode {
    name: &'static str,
    components: Vec<Box<Candidate>>,
    children: Vec<SceneNode>,
}

impl ContainmentNode for SceneNode {
    fn split_mut(&mut self) -> (&mut [Box<Candidate>], &mut [Self]) {
        (self.components.as_mut_slice(), self.children.as_mut_slice())
    }
}

fn scene() -> SceneNode {
    SceneNode {
        name: "root",
        components: vec![Box::new(Decoration), Box::new(OrderButton::default())],
        children: vec![SceneNode {
            name: "toolbar",
            components: vec![Box::new(StatusBar::default())],
            children: Vec::new(),
        }],
    }
}

fn catalog() -> anyhow::Result<TypeCatalog> {
    let mut catalog = TypeCatalog::new();
    catalog
        .add_type_as::<dyn Clock, TickingClock, _>("clock", |c| c as Arc<dyn Clock>)?
        .add_type_as::<dyn Ledger, ConsoleLedger, _>("ledger", |l| l as Arc<dyn Ledger>)?
        .add_type::<OrderService>("order_service")?;
    Ok(catalog)
}

fn load_config(path: &Path) -> anyhow::Result<ContainerConfig> {
    if path.exists() {
        ContainerConfig::load(path).with_context(|| format!("读取配置 {}", path.display()))
    } else {
        warn!("配置文件 {} 不存在，使用内置配置", path.display());
        Ok(ContainerConfig::from_toml_str(include_str!("../config/demo.toml"))?)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let logging = if args.json {
        LoggingConfig::production()
    } else {
        LoggingConfig::development()
    };
    logging.init()?;

    info!("🚀 注入运行时演示");
    let config = load_config(&args.config)?;

    let bootstrapper = BootstrapperBuilder::new()
        .with_config(config)
        .with_catalog(catalog()?)
        .build()?;

    // ========== 场景注入 ==========
    let mut root = scene();
    let report = bootstrapper.bootstrap(&mut Descendants(&mut root))?;
    info!(
        "场景 {} 注入完成: {} 个目标, {} 个注入点, 策略 {}",
        root.name, report.targets, report.sites, report.strategy
    );
    info!("已登记注入目标类型: {}", registered_target_count());

    if let Some(button) = root.components[1].downcast_ref::<OrderButton>() {
        if let Some(orders) = &button.orders {
            orders.place("咖啡豆 x2");
        }
    }
    if let Some(status) = root.children[0].components[0].downcast_ref::<StatusBar>() {
        if let Some(clock) = &status.clock {
            info!("{} 状态栏时间: {}", root.children[0].name, clock.now());
        }
    }

    // ========== 上下文覆盖 ==========
    let frozen: Arc<dyn Clock> = Arc::new(FrozenClock(2024));
    let mut preview: Vec<Box<Candidate>> = vec![Box::new(StatusBar::default())];
    bootstrapper.bootstrap_in_context(
        &mut preview,
        ContextualOverrideMap::new().with::<dyn Clock>(frozen),
    )?;
    if let Some(clock) = preview[0]
        .downcast_ref::<StatusBar>()
        .and_then(|s| s.clock.as_ref())
    {
        info!("预览状态栏使用固定时钟: {}", clock.now());
    }
    let shared = bootstrapper.provider().resolve::<dyn Clock>()?;
    info!("容器中的时钟不受影响: {}", shared.now());

    // ========== 注入失败 ==========
    let mut broken: Vec<Box<Candidate>> = vec![
        Box::new(StatusBar::default()),
        Box::new(PrinterPanel::default()),
    ];
    match bootstrapper.bootstrap(&mut broken) {
        Err(InfrastructureError::Injection { source }) => {
            for failure in source.failures() {
                warn!("注入失败: {}", failure);
            }
        }
        Err(other) => return Err(other.into()),
        Ok(report) => info!("意外成功: {} 个目标", report.targets),
    }

    info!("✅ 演示完成");
    Ok(())
}
