//! 实例工厂
//!
//! [`PrototypeFactory`] 按依赖键构造新对象，[`InjectingFactory`] 在构造之后立即注入依赖。

use crate::injector::MemberInjector;
use di_abstractions::{DependencyResolver, Injector, RawInstanceFactory};
use infrastructure_common::{
    is_injection_target, Candidate, DependencyError, DependencyKey, DependencyResult,
    InfrastructureResult,
};
use std::collections::HashMap;
use tracing::debug;

type Constructor = Box<dyn Fn() -> Box<Candidate> + Send + Sync>;

/// 原型工厂
///
/// 每个依赖键对应一个构造函数，每次调用都返回新对象。
#[derive(Default)]
pub struct PrototypeFactory {
    constructors: HashMap<DependencyKey, Constructor>,
}

impl PrototypeFactory {
    /// 创建空的原型工厂
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记使用 `Default` 构造的类型
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: Default + Send + Sync + 'static,
    {
        self.register_with(T::default)
    }

    /// 登记使用自定义构造函数的类型
    pub fn register_with<T, F>(&mut self, constructor: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.constructors.insert(
            DependencyKey::of::<T>(),
            Box::new(move || Box::new(constructor()) as Box<Candidate>),
        );
        self
    }
}

impl RawInstanceFactory for PrototypeFactory {
    fn instantiate(&self, key: &DependencyKey) -> DependencyResult<Box<Candidate>> {
        let constructor = self
            .constructors
            .get(key)
            .ok_or_else(|| DependencyError::not_registered(key))?;
        Ok(constructor())
    }

    fn can_instantiate(&self, key: &DependencyKey) -> bool {
        self.constructors.contains_key(key)
    }
}

impl std::fmt::Debug for PrototypeFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrototypeFactory")
            .field("types", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// 注入工厂
///
/// 通过原始工厂构造对象，如果对象的类型是注入目标则立即注入依赖。
pub struct InjectingFactory<F, R, J = MemberInjector> {
    factory: F,
    resolver: R,
    injector: J,
}

impl<F, R> InjectingFactory<F, R, MemberInjector>
where
    F: RawInstanceFactory,
    R: DependencyResolver,
{
    /// 使用默认成员注入器创建工厂
    pub fn new(factory: F, resolver: R) -> Self {
        Self::with_injector(factory, resolver, MemberInjector::new())
    }
}

impl<F, R, J> InjectingFactory<F, R, J>
where
    F: RawInstanceFactory,
    R: DependencyResolver,
    J: Injector,
{
    /// 使用指定注入器创建工厂
    pub fn with_injector(factory: F, resolver: R, injector: J) -> Self {
        Self {
            factory,
            resolver,
            injector,
        }
    }

    /// 构造并注入指定类型的对象
    pub fn create(&self, key: &DependencyKey) -> InfrastructureResult<Box<Candidate>> {
        let mut object = self.factory.instantiate(key)?;
        if is_injection_target(&*object) {
            let sites = self.injector.inject(&mut *object, &self.resolver)?;
            debug!("{} 构造后注入了 {} 个注入点", key, sites);
        }
        Ok(object)
    }

    /// 构造并注入类型 `T` 的对象
    pub fn create_typed<T: Send + Sync + 'static>(&self) -> InfrastructureResult<Box<T>> {
        let key = DependencyKey::of::<T>();
        let object = self.create(&key)?;
        object.downcast::<T>().map_err(|_| {
            DependencyError::TypeMismatch {
                expected: key.name().to_string(),
                actual: "工厂产出的其他类型".to_string(),
            }
            .into()
        })
    }

    /// 工厂使用的解析器
    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injector::tests::{greeter_registry, Widget};
    use di_abstractions::ServiceRegister;
    use infrastructure_common::{register_injection_target, InfrastructureError};
    use std::sync::Arc;

    #[test]
    fn test_prototype_factory_returns_fresh_objects() {
        let mut factory = PrototypeFactory::new();
        factory.register_with(|| String::from("fresh"));

        let key = DependencyKey::of::<String>();
        let first = factory.instantiate(&key).unwrap();
        let second = factory.instantiate(&key).unwrap();

        assert!(factory.can_instantiate(&key));
        assert_eq!(first.downcast_ref::<String>().unwrap(), "fresh");
        let address = |object: &Box<Candidate>| &**object as *const Candidate as *const u8;
        assert_ne!(address(&first), address(&second));
        assert!(factory.instantiate(&DependencyKey::of::<u8>()).is_err());
    }

    #[test]
    fn test_created_target_is_injected() {
        register_injection_target::<Widget>();
        let mut registry = greeter_registry();
        registry.register_instance(Arc::new(9_u32)).unwrap();

        let mut prototypes = PrototypeFactory::new();
        prototypes.register::<Widget>().register::<Vec<u8>>();
        let factory = InjectingFactory::new(prototypes, registry.build());

        let widget = factory.create_typed::<Widget>().unwrap();
        assert_eq!(widget.greeter.as_ref().unwrap().greet(), "hello");
        assert_eq!(**widget.counter.as_ref().unwrap(), 9);

        // 非注入目标原样返回
        assert!(factory.create_typed::<Vec<u8>>().unwrap().is_empty());
    }

    #[test]
    fn test_injection_failure_surfaces() {
        register_injection_target::<Widget>();
        let mut prototypes = PrototypeFactory::new();
        prototypes.register::<Widget>();
        let factory = InjectingFactory::new(prototypes, greeter_registry().build());

        let err = factory.create_typed::<Widget>().err().unwrap();
        assert!(matches!(err, InfrastructureError::Injection { .. }));

        let err = factory.create_typed::<String>().unwrap_err();
        assert!(matches!(err, InfrastructureError::Dependency { .. }));
    }
}
