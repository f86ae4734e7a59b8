#[test]
fn evreg_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/evreg_error_pass.rs");
}
