//! 注入目标定位器

use di_abstractions::CandidateSource;
use infrastructure_common::{is_injection_target, Candidate};
use tracing::trace;

/// 注入目标定位器
///
/// 从候选序列中按原顺序筛出运行时类型带注入标记的对象，
/// 跳过空位和未标记的对象。惰性求值，不修改候选对象。
pub struct InjectionTargetLocator<I> {
    candidates: I,
}

impl<'a, I> InjectionTargetLocator<I>
where
    I: Iterator<Item = Option<&'a mut Candidate>>,
{
    /// 从可能含空位的候选序列创建定位器
    pub fn with_holes(candidates: I) -> Self {
        Self { candidates }
    }
}

impl<'a, I> InjectionTargetLocator<std::iter::Map<I, fn(&'a mut Candidate) -> Option<&'a mut Candidate>>>
where
    I: Iterator<Item = &'a mut Candidate>,
{
    /// 从不含空位的候选序列创建定位器
    pub fn new(candidates: I) -> Self {
        let present: fn(&'a mut Candidate) -> Option<&'a mut Candidate> = Some;
        Self {
            candidates: candidates.map(present),
        }
    }
}

impl<'a> InjectionTargetLocator<Box<dyn Iterator<Item = Option<&'a mut Candidate>> + 'a>> {
    /// 从候选来源创建定位器
    pub fn from_source(source: &'a mut dyn CandidateSource) -> Self {
        Self {
            candidates: source.candidates(),
        }
    }
}

impl<'a, I> Iterator for InjectionTargetLocator<I>
where
    I: Iterator<Item = Option<&'a mut Candidate>>,
{
    type Item = &'a mut Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        for candidate in self.candidates.by_ref().flatten() {
            if is_injection_target(candidate) {
                return Some(candidate);
            }
            trace!("跳过未标记的候选对象");
        }
        None
    }
}
