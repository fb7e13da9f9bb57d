//! Compile-fail tests to ensure proper error messages for marker misuse.
//!
//! These tests verify that the derives reject:
//! - `Sanitize` on types without a fixed list of stored fields
//! - unknown `#[mrclean(...)]` field options
//! - `PackageId` without its `debug` flag

#[test]
fn compile_fail_tests() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/compile_fail/*.rs");
}
