//! 派生宏与注入引擎的端到端测试

use di_abstractions::{
    Descendants, ContainmentNode, InjectionStrategy, Injector, ResolverExt, ServiceRegister,
};
use di_impl::{
    DefaultInjectionStrategy, InjectionTargetLocator, MemberInjector, PriorityInjectionStrategy,
    ServiceRegistry,
};
use infrastructure_common::{Candidate, DependencyError, DependencyKey, Lifetime};
use injection_macros::{Constructible, Injectable};
use std::sync::Arc;

pub trait Logger: Send + Sync {
    fn name(&self) -> String;
}

#[derive(Constructible)]
struct StdoutLogger;

impl Logger for StdoutLogger {
    fn name(&self) -> String {
        "stdout".to_string()
    }
}

pub trait Metrics: Send + Sync {}

#[derive(Default, Injectable)]
struct Screen {
    #[inject]
    logger: Option<Arc<dyn Logger>>,
}

#[derive(Default, Injectable)]
#[injectable(priority = 10)]
struct Dashboard {
    #[inject]
    logger: Option<Arc<dyn Logger>>,
    #[inject]
    metrics: Option<Arc<dyn Metrics>>,
}

#[derive(Default)]
struct Decoration;

fn logger_registry() -> ServiceRegistry {
    let mut registry = ServiceRegistry::new();
    registry
        .register_type_as::<dyn Logger, StdoutLogger, _>(Lifetime::Singleton, |l| {
            l as Arc<dyn Logger>
        })
        .unwrap();
    registry
}

fn screen_logger(candidate: &Candidate) -> Option<String> {
    candidate
        .downcast_ref::<Screen>()
        .and_then(|s| s.logger.as_ref())
        .map(|l| l.name())
}

#[test]
fn test_locator_yields_marked_objects_in_order() {
    let mut candidates: Vec<Option<Box<Candidate>>> = vec![
        Some(Box::new(Screen::default())),
        Some(Box::new(Decoration)),
        Some(Box::new(Dashboard::default())),
        None,
    ];

    let found: Vec<bool> = InjectionTargetLocator::from_source(&mut candidates)
        .map(|c| c.is::<Screen>())
        .collect();
    assert_eq!(found, vec![true, false]);
}

#[test]
fn test_partial_injection_reports_missing_key() {
    let resolver = logger_registry().build();
    let mut dashboard = Dashboard::default();

    let err = MemberInjector::new()
        .inject(&mut dashboard, &resolver)
        .unwrap_err();

    assert!(dashboard.logger.is_some());
    assert!(dashboard.metrics.is_none());
    assert_eq!(err.failed_keys(), vec![DependencyKey::of::<dyn Metrics>()]);
    assert!(matches!(
        err.failures()[0].error,
        DependencyError::ComponentNotRegistered { .. }
    ));
}

#[test]
fn test_batch_reports_only_failing_object() {
    let resolver = logger_registry().build();
    let mut batch: Vec<Box<Candidate>> = vec![
        Box::new(Screen::default()),
        Box::new(Dashboard::default()),
        Box::new(Screen::default()),
    ];

    let err = DefaultInjectionStrategy::new(MemberInjector::new())
        .inject_dependencies(&mut InjectionTargetLocator::from_source(&mut batch), &resolver)
        .unwrap_err();

    assert_eq!(err.failures().len(), 1);
    assert!(err.involves(&DependencyKey::of::<Dashboard>()));
    assert_eq!(screen_logger(&*batch[0]).as_deref(), Some("stdout"));
    assert_eq!(screen_logger(&*batch[2]).as_deref(), Some("stdout"));
}

/// 简单的包含层级
struct Node {
    components: Vec<Box<Candidate>>,
    children: Vec<Node>,
}

impl ContainmentNode for Node {
    fn split_mut(&mut self) -> (&mut [Box<Candidate>], &mut [Self]) {
        (self.components.as_mut_slice(), self.children.as_mut_slice())
    }
}

#[test]
fn test_hierarchy_injection() -> anyhow::Result<()> {
    struct NullMetrics;
    impl Metrics for NullMetrics {}

    let mut registry = logger_registry();
    registry.register_instance_as::<dyn Metrics, _>(Arc::new(NullMetrics), |m| {
        m as Arc<dyn Metrics>
    })?;
    let resolver = registry.build();

    let mut root = Node {
        components: vec![Box::new(Decoration), Box::new(Screen::default())],
        children: vec![Node {
            components: vec![Box::new(Screen::default())],
            children: vec![Node {
                components: vec![Box::new(Dashboard::default())],
                children: Vec::new(),
            }],
        }],
    };

    let summary = PriorityInjectionStrategy::new(MemberInjector::new()).inject_dependencies(
        &mut InjectionTargetLocator::from_source(&mut Descendants(&mut root)),
        &resolver,
    )?;
    assert_eq!((summary.targets, summary.sites), (3, 4));

    let nested = &root.children[0].children[0].components[0];
    let dashboard = nested.downcast_ref::<Dashboard>().unwrap();
    assert!(dashboard.metrics.is_some());

    // 单例日志在所有对象之间共享
    let shared = resolver.resolve::<dyn Logger>()?;
    let injected = dashboard.logger.clone().unwrap();
    assert!(Arc::ptr_eq(&shared, &injected));
    Ok(())
}
