use di_abstractions::Constructible;
use injection_macros::Constructible;
use std::sync::Arc;

#[derive(Constructible)]
struct Unit;

#[derive(Constructible)]
struct Repository {
    #[inject]
    connection: Arc<String>,
    #[inject]
    cache: Option<Arc<u64>>,
    retries: u32,
}

#[derive(Constructible)]
struct Wrapper(#[inject] Arc<Repository>);

fn assert_constructible<T: Constructible>() {}

fn main() {
    assert_constructible::<Unit>();
    assert_constructible::<Repository>();
    assert_constructible::<Wrapper>();
}
