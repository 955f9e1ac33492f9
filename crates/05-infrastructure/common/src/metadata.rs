//! 元数据定义
//!
//! 提供依赖键和类型擦除的实例表示

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 依赖键
///
/// 消费方请求的抽象类型身份，可以是具体类型也可以是 `dyn Trait`。
/// 相等性和哈希只取决于 `TypeId`，名称仅用于诊断。
#[derive(Clone, Copy)]
pub struct DependencyKey {
    id: TypeId,
    name: &'static str,
}

impl DependencyKey {
    /// 从类型获取依赖键
    pub fn of<K: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<K>(),
            name: std::any::type_name::<K>(),
        }
    }

    /// 类型ID
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// 完整类型名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        match base.rfind("::") {
            Some(index) => &self.name[index + 2..],
            None => self.name,
        }
    }
}

impl PartialEq for DependencyKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DependencyKey {}

impl Hash for DependencyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DependencyKey({})", self.name)
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 类型擦除的共享实例
///
/// 载荷总是 `Arc<K>`，其中 `K` 是注册时的依赖键类型。
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 类型擦除的可变对象，注入候选对象以此形式传递
pub type Candidate = dyn Any + Send + Sync + 'static;

/// 将 `Arc<K>` 擦除为 [`Instance`]
pub fn erase<K: ?Sized + Send + Sync + 'static>(value: Arc<K>) -> Instance {
    Arc::new(value)
}

/// 从 [`Instance`] 还原 `Arc<K>`，类型不符时返回 `None`
pub fn downcast<K: ?Sized + Send + Sync + 'static>(instance: &Instance) -> Option<Arc<K>> {
    instance.downcast_ref::<Arc<K>>().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".into()
        }
    }

    #[test]
    fn test_key_identity_ignores_name() {
        assert_eq!(DependencyKey::of::<English>(), DependencyKey::of::<English>());
        assert_ne!(DependencyKey::of::<English>(), DependencyKey::of::<dyn Greeter>());
        assert_eq!(DependencyKey::of::<English>().short_name(), "English");
        assert_eq!(DependencyKey::of::<Vec<u8>>().short_name(), "Vec<u8>");
    }

    #[test]
    fn test_erase_and_downcast_trait_object() {
        let greeter: Arc<dyn Greeter> = Arc::new(English);
        let instance = erase(greeter.clone());

        let back = downcast::<dyn Greeter>(&instance).unwrap();
        assert!(Arc::ptr_eq(&back, &greeter));
        assert_eq!(back.greet(), "hello");
        assert!(downcast::<English>(&instance).is_none());
    }
}
