use infrastructure_common::{DependencyKey, Injectable};
use injection_macros::Injectable;
use std::sync::Arc;

trait Clock: Send + Sync {}

#[derive(Default, Injectable)]
#[injectable(priority = 5)]
struct Panel {
    #[inject]
    clock: Option<Arc<dyn Clock>>,
    #[inject]
    name: Arc<String>,
    visible: bool,
}

#[derive(Injectable)]
struct Holder<T: Send + Sync + 'static> {
    #[inject]
    value: Option<Arc<T>>,
}

fn main() {
    let sites = Panel::injection_sites();
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0].key, DependencyKey::of::<dyn Clock>());
    assert_eq!(Panel::priority(), 5);
    assert_eq!(Holder::<u8>::injection_sites()[0].key, DependencyKey::of::<u8>());
}
