//! 解析器并发行为的集成测试

use di_abstractions::{Constructible, DependencyResolver, ResolverExt, ServiceRegister};
use di_impl::{Resolver, ServiceRegistry};
use infrastructure_common::{DependencyResult, Lifetime};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

/// 构造较慢且会计数的服务
struct SlowService {
    id: usize,
}

impl Constructible for SlowService {
    fn construct(_resolver: &dyn DependencyResolver) -> DependencyResult<Self> {
        let id = CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        Ok(Self { id })
    }
}

/// 依赖单例的单例
struct Consumer {
    service: Arc<SlowService>,
}

impl Constructible for Consumer {
    fn construct(resolver: &dyn DependencyResolver) -> DependencyResult<Self> {
        Ok(Self {
            service: resolver.resolve::<SlowService>()?,
        })
    }
}

fn shared_resolver() -> Arc<Resolver> {
    let mut registry = ServiceRegistry::new();
    registry.register_type::<SlowService>(Lifetime::Singleton).unwrap();
    registry.register_type::<Consumer>(Lifetime::Singleton).unwrap();
    Arc::new(registry.build())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_singleton_is_constructed_once() {
    let resolver = shared_resolver();

    let handles: Vec<_> = (0..16)
        .map(|index| {
            let resolver = resolver.clone();
            tokio::task::spawn_blocking(move || {
                if index % 2 == 0 {
                    resolver.resolve::<SlowService>().map(|s| s.id)
                } else {
                    resolver.resolve::<Consumer>().map(|c| c.service.id)
                }
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 1);
    assert!(ids.iter().all(|id| *id == ids[0]));
    assert_eq!(resolver.singleton_count(), 2);

    let consumer = resolver.resolve::<Consumer>().unwrap();
    let service = resolver.resolve::<SlowService>().unwrap();
    assert!(Arc::ptr_eq(&consumer.service, &service));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fixed_instance_from_many_threads() {
    let fixed = Arc::new(String::from("shared"));
    let mut registry = ServiceRegistry::new();
    registry.register_instance(fixed.clone()).unwrap();
    let resolver = Arc::new(registry.build());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resolver = resolver.clone();
            tokio::task::spawn_blocking(move || resolver.resolve::<String>())
        })
        .collect();

    for handle in handles {
        let resolved = handle.await.unwrap().unwrap();
        assert!(Arc::ptr_eq(&resolved, &fixed));
    }
}

#[test]
fn test_resolver_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resolver>();
    assert_send_sync::<ServiceRegistry>();
}
