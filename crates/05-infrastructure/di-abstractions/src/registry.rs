//! 注册表抽象接口

use crate::factory::Constructible;
use crate::resolver::DependencyResolver;
use infrastructure_common::{erase, DependencyError, DependencyKey, DependencyResult, Instance, Lifetime};
use std::sync::Arc;

/// 生产函数类型
///
/// 接收用于解析自身依赖的解析器，返回载荷为 `Arc<K>` 的实例。
pub type Producer =
    Arc<dyn Fn(&dyn DependencyResolver) -> DependencyResult<Instance> + Send + Sync>;

/// 注册方式
#[derive(Clone)]
pub enum RegistrationKind {
    /// 固定实例
    Instance(Instance),
    /// 每次解析都重新构造
    Transient(Producer),
    /// 首次解析时构造一次并缓存
    Singleton(Producer),
}

/// 注册项
///
/// 一条绑定：依赖键、实际产出的类型以及注册方式。
#[derive(Clone)]
pub struct RegistrationEntry {
    key: DependencyKey,
    produced: DependencyKey,
    kind: RegistrationKind,
}

impl RegistrationEntry {
    /// 以自身类型为键注册固定实例
    pub fn instance<K>(instance: Arc<K>) -> Self
    where
        K: ?Sized + Send + Sync + 'static,
    {
        Self {
            key: DependencyKey::of::<K>(),
            produced: DependencyKey::of::<K>(),
            kind: RegistrationKind::Instance(erase(instance)),
        }
    }

    /// 以另一个（通常是 trait object）类型为键注册固定实例
    pub fn instance_as<K, T>(instance: Arc<T>, upcast: impl FnOnce(Arc<T>) -> Arc<K>) -> Self
    where
        K: ?Sized + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        Self {
            key: DependencyKey::of::<K>(),
            produced: DependencyKey::of::<T>(),
            kind: RegistrationKind::Instance(erase(upcast(instance))),
        }
    }

    /// 使用类型擦除的生产函数创建注册项
    pub fn produced(
        key: DependencyKey,
        produced: DependencyKey,
        lifetime: Lifetime,
        producer: Producer,
    ) -> DependencyResult<Self> {
        let kind = match lifetime {
            Lifetime::Transient => RegistrationKind::Transient(producer),
            Lifetime::Singleton => RegistrationKind::Singleton(producer),
            Lifetime::Instance => {
                return Err(DependencyError::invalid_argument(format!(
                    "{} 以 instance 生命周期注册时必须提供实例",
                    key
                )))
            }
        };
        Ok(Self {
            key,
            produced,
            kind,
        })
    }

    /// 使用工厂函数创建注册项
    pub fn factory<K, F>(lifetime: Lifetime, factory: F) -> DependencyResult<Self>
    where
        K: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn DependencyResolver) -> DependencyResult<Arc<K>> + Send + Sync + 'static,
    {
        let producer: Producer = Arc::new(move |resolver: &dyn DependencyResolver| {
            factory(resolver).map(erase)
        });
        Self::produced(
            DependencyKey::of::<K>(),
            DependencyKey::of::<K>(),
            lifetime,
            producer,
        )
    }

    /// 以自身类型为键注册可构造类型
    pub fn of_type<T: Constructible>(lifetime: Lifetime) -> DependencyResult<Self> {
        Self::of_type_as::<T, T, _>(lifetime, |value| value)
    }

    /// 以键 `K` 注册可构造类型 `T`
    pub fn of_type_as<K, T, U>(lifetime: Lifetime, upcast: U) -> DependencyResult<Self>
    where
        K: ?Sized + Send + Sync + 'static,
        T: Constructible,
        U: Fn(Arc<T>) -> Arc<K> + Send + Sync + 'static,
    {
        let producer: Producer = Arc::new(move |resolver: &dyn DependencyResolver| {
            let value = T::construct(resolver)?;
            Ok(erase(upcast(Arc::new(value))))
        });
        Self::produced(
            DependencyKey::of::<K>(),
            DependencyKey::of::<T>(),
            lifetime,
            producer,
        )
    }

    /// 以另一种生命周期复制该注册项
    ///
    /// 固定实例只能保持 instance 生命周期。
    pub fn with_lifetime(&self, lifetime: Lifetime) -> DependencyResult<Self> {
        match &self.kind {
            RegistrationKind::Instance(_) if lifetime == Lifetime::Instance => Ok(self.clone()),
            RegistrationKind::Instance(_) => Err(DependencyError::invalid_argument(format!(
                "{} 是固定实例，不能改为 {} 生命周期",
                self.key, lifetime
            ))),
            RegistrationKind::Transient(producer) | RegistrationKind::Singleton(producer) => {
                Self::produced(self.key, self.produced, lifetime, producer.clone())
            }
        }
    }

    /// 依赖键
    pub fn key(&self) -> DependencyKey {
        self.key
    }

    /// 实际产出的类型
    pub fn produced_type(&self) -> DependencyKey {
        self.produced
    }

    /// 注册方式
    pub fn kind(&self) -> &RegistrationKind {
        &self.kind
    }

    /// 生命周期
    pub fn lifetime(&self) -> Lifetime {
        match self.kind {
            RegistrationKind::Instance(_) => Lifetime::Instance,
            RegistrationKind::Transient(_) => Lifetime::Transient,
            RegistrationKind::Singleton(_) => Lifetime::Singleton,
        }
    }
}

impl std::fmt::Debug for RegistrationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationEntry")
            .field("key", &self.key)
            .field("produced", &self.produced)
            .field("lifetime", &self.lifetime())
            .finish()
    }
}

/// 注册表 trait
///
/// 配置阶段暴露给外部的只写接口。注册只记录条目，不会构造实例；
/// 同一个键重复注册时以最后一次为准。
pub trait ServiceRegister {
    /// 记录一条注册
    fn register_entry(&mut self, entry: RegistrationEntry) -> DependencyResult<()>;

    /// 注册固定实例
    fn register_instance<K>(&mut self, instance: Arc<K>) -> DependencyResult<()>
    where
        K: ?Sized + Send + Sync + 'static,
        Self: Sized,
    {
        self.register_entry(RegistrationEntry::instance(instance))
    }

    /// 以键 `K` 注册固定实例
    fn register_instance_as<K, T>(
        &mut self,
        instance: Arc<T>,
        upcast: impl FnOnce(Arc<T>) -> Arc<K>,
    ) -> DependencyResult<()>
    where
        K: ?Sized + Send + Sync + 'static,
        T: Send + Sync + 'static,
        Self: Sized,
    {
        self.register_entry(RegistrationEntry::instance_as(instance, upcast))
    }

    /// 以自身类型为键注册可构造类型
    fn register_type<T: Constructible>(&mut self, lifetime: Lifetime) -> DependencyResult<()>
    where
        Self: Sized,
    {
        self.register_entry(RegistrationEntry::of_type::<T>(lifetime)?)
    }

    /// 以键 `K` 注册可构造类型 `T`
    fn register_type_as<K, T, U>(&mut self, lifetime: Lifetime, upcast: U) -> DependencyResult<()>
    where
        K: ?Sized + Send + Sync + 'static,
        T: Constructible,
        U: Fn(Arc<T>) -> Arc<K> + Send + Sync + 'static,
        Self: Sized,
    {
        self.register_entry(RegistrationEntry::of_type_as::<K, T, U>(lifetime, upcast)?)
    }

    /// 注册工厂函数
    fn register_factory<K, F>(&mut self, lifetime: Lifetime, factory: F) -> DependencyResult<()>
    where
        K: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn DependencyResolver) -> DependencyResult<Arc<K>> + Send + Sync + 'static,
        Self: Sized,
    {
        self.register_entry(RegistrationEntry::factory::<K, F>(lifetime, factory)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_common::downcast;

    trait Named: Send + Sync {
        fn name(&self) -> &str;
    }

    struct Widget;

    impl Named for Widget {
        fn name(&self) -> &str {
            "widget"
        }
    }

    impl Constructible for Widget {
        fn construct(_resolver: &dyn DependencyResolver) -> DependencyResult<Self> {
            Ok(Widget)
        }
    }

    #[test]
    fn test_instance_entry_shape() {
        let entry = RegistrationEntry::instance_as::<dyn Named, _>(Arc::new(Widget), |w| {
            w as Arc<dyn Named>
        });
        assert_eq!(entry.key(), DependencyKey::of::<dyn Named>());
        assert_eq!(entry.produced_type(), DependencyKey::of::<Widget>());
        assert_eq!(entry.lifetime(), Lifetime::Instance);

        match entry.kind() {
            RegistrationKind::Instance(instance) => {
                let named = downcast::<dyn Named>(instance).unwrap();
                assert_eq!(named.name(), "widget");
            }
            _ => panic!("固定实例注册应为 Instance"),
        }
    }

    #[test]
    fn test_type_entry_rejects_instance_lifetime() {
        let err = RegistrationEntry::of_type::<Widget>(Lifetime::Instance).unwrap_err();
        assert!(matches!(err, DependencyError::InvalidArgument { .. }));
    }

    #[test]
    fn test_type_entry_keeps_lifetime() {
        let entry =
            RegistrationEntry::of_type_as::<dyn Named, Widget, _>(Lifetime::Singleton, |w| w as Arc<dyn Named>)
                .unwrap();
        assert_eq!(entry.lifetime(), Lifetime::Singleton);
        assert_eq!(entry.key(), DependencyKey::of::<dyn Named>());
        assert!(format!("{:?}", entry).contains("Singleton"));

        let transient = entry.with_lifetime(Lifetime::Transient).unwrap();
        assert_eq!(transient.lifetime(), Lifetime::Transient);
        assert_eq!(transient.produced_type(), DependencyKey::of::<Widget>());
    }

    #[test]
    fn test_instance_entry_keeps_instance_lifetime() {
        let entry = RegistrationEntry::instance(Arc::new(Widget));
        assert!(entry.with_lifetime(Lifetime::Instance).is_ok());
        assert!(entry.with_lifetime(Lifetime::Singleton).is_err());
    }
}
