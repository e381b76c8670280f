#[test]
fn lobby_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/lobby_error_pass.rs");
}
