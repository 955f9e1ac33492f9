//! 组件生命周期定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 组件生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    /// 瞬时模式 - 每次请求都创建新实例
    #[default]
    Transient,
    /// 单例模式 - 解析器生命周期内只创建一个实例
    Singleton,
    /// 固定实例 - 始终返回注册时提供的实例
    Instance,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Transient => "transient",
            Self::Singleton => "singleton",
            Self::Instance => "instance",
        };
        f.write_str(text)
    }
}

/// 上下文作用域
///
/// 标识一次上下文解析（例如一次请求或一次对象注入），只用于诊断。
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: uuid::Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Scope {
    /// 创建新作用域
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.into(),
            created_at: chrono::Utc::now(),
        }
    }

    /// 创建根作用域
    pub fn root() -> Self {
        Self::new("root")
    }

    /// 创建子作用域
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self::new(format!("{}.{}", self.name, name.into()))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_scope_name() {
        let root = Scope::root();
        let child = root.child("request");
        assert_eq!(child.name, "root.request");
        assert_ne!(root.id, child.id);
    }

    #[test]
    fn test_lifetime_display() {
        assert_eq!(Lifetime::default(), Lifetime::Transient);
        assert_eq!(Lifetime::Singleton.to_string(), "singleton");
    }
}
