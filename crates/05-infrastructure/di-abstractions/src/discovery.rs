//! 候选对象来源
//!
//! 宿主环境以三种方式提供候选对象：显式集合、“宿主已知的全部实例”，
//! 或一棵包含层级的根节点。核心把它们统一看作候选对象序列。

use infrastructure_common::Candidate;

/// 候选对象来源 trait
///
/// `None` 表示集合中的空洞，定位器会把它当作“不是注入目标”跳过。
pub trait CandidateSource {
    /// 候选对象序列
    fn candidates<'a>(&'a mut self) -> Box<dyn Iterator<Item = Option<&'a mut Candidate>> + 'a>;
}

impl CandidateSource for Vec<Box<Candidate>> {
    fn candidates<'a>(&'a mut self) -> Box<dyn Iterator<Item = Option<&'a mut Candidate>> + 'a> {
        Box::new(self.iter_mut().map(|candidate| Some(&mut **candidate)))
    }
}

impl CandidateSource for Vec<Option<Box<Candidate>>> {
    fn candidates<'a>(&'a mut self) -> Box<dyn Iterator<Item = Option<&'a mut Candidate>> + 'a> {
        Box::new(self.iter_mut().map(Option::as_deref_mut))
    }
}

impl<S: CandidateSource + ?Sized> CandidateSource for &mut S {
    fn candidates<'a>(&'a mut self) -> Box<dyn Iterator<Item = Option<&'a mut Candidate>> + 'a> {
        (**self).candidates()
    }
}

/// 包含层级中的节点
///
/// 每个节点持有若干组件以及子节点。
pub trait ContainmentNode: Sized {
    /// 同时借出本节点的组件和子节点
    fn split_mut(&mut self) -> (&mut [Box<Candidate>], &mut [Self]);
}

/// 根节点及其全部后代（深度优先，包含未激活节点）
pub struct Descendants<'r, N>(pub &'r mut N);

impl<N: ContainmentNode> CandidateSource for Descendants<'_, N> {
    fn candidates<'a>(&'a mut self) -> Box<dyn Iterator<Item = Option<&'a mut Candidate>> + 'a> {
        let mut found = Vec::new();
        collect_descendants(&mut *self.0, &mut found);
        Box::new(found.into_iter().map(Some))
    }
}

fn collect_descendants<'a, N: ContainmentNode>(node: &'a mut N, found: &mut Vec<&'a mut Candidate>) {
    let (components, children) = node.split_mut();
    found.extend(components.iter_mut().map(|component| &mut **component));
    for child in children.iter_mut() {
        collect_descendants(child, found);
    }
}
