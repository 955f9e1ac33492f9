//! trybuild compile-time tests for injection_macros

#[test]
fn trybuild_injection_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/injectable_ok.rs");
    t.pass("tests/trybuild/constructible_ok.rs");
}
