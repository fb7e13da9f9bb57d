//! Helpers for pulling generated files into a module.
//!
//! `mrclean-build` writes into `$OUT_DIR/mrclean/<namespace>/`, where the
//! namespace `user::accounts` becomes the directory `user/accounts`. Pass that
//! directory form to the macros; omit it for the crate root.

/// Includes the generated `sanitizations.rs` for a namespace.
///
/// ```ignore
/// mod user {
///     mrclean::include_sanitizations!("user");
/// }
/// ```
#[macro_export]
macro_rules! include_sanitizations {
    () => {
        include!(concat!(env!("OUT_DIR"), "/mrclean/sanitizations.rs"));
    };
    ($namespace:literal) => {
        include!(concat!(
            env!("OUT_DIR"),
            "/mrclean/",
            $namespace,
            "/sanitizations.rs"
        ));
    };
}

/// Includes the generated root placeholder (`root_sanitize_function.rs`) for a
/// namespace.
///
/// The placeholder declares the `SanitizedToString` trait; bring it into scope
/// wherever untagged values are sanitized.
#[macro_export]
macro_rules! include_root_function {
    () => {
        include!(concat!(env!("OUT_DIR"), "/mrclean/root_sanitize_function.rs"));
    };
    ($namespace:literal) => {
        include!(concat!(
            env!("OUT_DIR"),
            "/mrclean/",
            $namespace,
            "/root_sanitize_function.rs"
        ));
    };
}
