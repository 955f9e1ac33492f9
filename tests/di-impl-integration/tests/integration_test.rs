//! Centralized integration tests for di-impl crate

use di_abstractions::{
    Constructible, ContextualOverrideMap, DependencyResolver, ResolverExt, ServiceRegister,
};
use di_impl::{ContextualResolver, ServiceRegistry};
use infrastructure_common::{DependencyError, DependencyResult, Lifetime};
use infrastructure_composition::ServiceProvider;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 测试服务接口
trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

struct Formal;

impl Greeter for Formal {
    fn greet(&self) -> String {
        "Good day".to_string()
    }
}

impl Constructible for Formal {
    fn construct(_resolver: &dyn DependencyResolver) -> DependencyResult<Self> {
        Ok(Self)
    }
}

struct Casual;

impl Greeter for Casual {
    fn greet(&self) -> String {
        "Hey".to_string()
    }
}

/// 依赖 Greeter 的服务
struct Reception {
    greeter: Arc<dyn Greeter>,
}

impl Constructible for Reception {
    fn construct(resolver: &dyn DependencyResolver) -> DependencyResult<Self> {
        Ok(Self {
            greeter: resolver.resolve::<dyn Greeter>()?,
        })
    }
}

struct Chicken;
struct Egg;

impl Constructible for Chicken {
    fn construct(resolver: &dyn DependencyResolver) -> DependencyResult<Self> {
        resolver.resolve::<Egg>().map(|_| Self)
    }
}

impl Constructible for Egg {
    fn construct(resolver: &dyn DependencyResolver) -> DependencyResult<Self> {
        resolver.resolve::<Chicken>().map(|_| Self)
    }
}

fn formal(lifetime: Lifetime) -> ServiceRegistry {
    let mut registry = ServiceRegistry::new();
    registry
        .register_type_as::<dyn Greeter, Formal, _>(lifetime, |g| g as Arc<dyn Greeter>)
        .unwrap();
    registry
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_calls_share_one_singleton() {
    static BUILT: AtomicUsize = AtomicUsize::new(0);

    let mut provider = ServiceProvider::new();
    provider
        .register_factory::<dyn Greeter, _>(Lifetime::Singleton, |_| {
            BUILT.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(10));
            Ok(Arc::new(Formal) as Arc<dyn Greeter>)
        })
        .unwrap();
    let provider = Arc::new(provider);

    let first = {
        let provider = provider.clone();
        tokio::task::spawn_blocking(move || provider.resolve::<dyn Greeter>())
    };
    let second = {
        let provider = provider.clone();
        tokio::task::spawn_blocking(move || provider.resolve::<dyn Greeter>())
    };

    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(BUILT.load(Ordering::SeqCst), 1);
}

#[test]
fn test_transient_instances_are_distinct() {
    let resolver = formal(Lifetime::Transient).build();
    let instances: Vec<_> = (0..4)
        .map(|_| resolver.resolve::<dyn Greeter>().unwrap())
        .collect();

    for (i, a) in instances.iter().enumerate() {
        for b in &instances[i + 1..] {
            assert!(!Arc::ptr_eq(a, b));
        }
    }
}

#[test]
fn test_last_writer_wins() {
    let mut registry = formal(Lifetime::Singleton);
    let casual: Arc<dyn Greeter> = Arc::new(Casual);
    registry.register_instance(casual.clone()).unwrap();
    let resolver = registry.build();

    let resolved = resolver.resolve::<dyn Greeter>().unwrap();
    assert!(Arc::ptr_eq(&resolved, &casual));
    assert_eq!(resolver.registered_keys().len(), 1);
}

#[test]
fn test_contextual_override() -> anyhow::Result<()> {
    let mut registry = formal(Lifetime::Singleton);
    registry.register_type::<Reception>(Lifetime::Transient)?;
    registry.register_instance(Arc::new(7_i32))?;
    let base = registry.build();

    let casual: Arc<dyn Greeter> = Arc::new(Casual);
    let contextual = ContextualResolver::new(
        &base,
        ContextualOverrideMap::new().with::<dyn Greeter>(casual.clone()),
    );

    assert!(Arc::ptr_eq(&contextual.resolve::<dyn Greeter>()?, &casual));
    assert_eq!(*contextual.resolve::<i32>()?, 7);
    assert_eq!(base.resolve::<dyn Greeter>()?.greet(), "Good day");

    // 委托给内部解析器构造的对象使用内部解析器的注册
    assert_eq!(contextual.resolve::<Reception>()?.greeter.greet(), "Good day");
    Ok(())
}

#[test]
fn test_missing_dependency_names_missing_key() {
    let mut registry = ServiceRegistry::new();
    registry.register_type::<Reception>(Lifetime::Singleton).unwrap();
    let resolver = registry.build();

    match resolver.resolve::<Reception>() {
        Err(DependencyError::ComponentNotRegistered { type_name }) => {
            assert!(type_name.contains("Greeter"));
        }
        other => panic!("unexpected: {:?}", other.err()),
    }
    assert!(resolver.resolve::<String>().unwrap_err().is_resolution_error());
}

#[test]
fn test_cycle_is_reported() {
    let mut registry = ServiceRegistry::new();
    registry.register_type::<Chicken>(Lifetime::Singleton).unwrap();
    registry.register_type::<Egg>(Lifetime::Transient).unwrap();
    let resolver = registry.build();

    assert!(matches!(
        resolver.resolve::<Egg>(),
        Err(DependencyError::CircularDependency { .. })
    ));
    assert!(matches!(
        resolver.validate(),
        Err(errors) if errors.len() == 2
    ));
}
