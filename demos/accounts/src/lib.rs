//! A crate that sanitizes its account types with generated functions.
//!
//! `build.rs` runs `mrclean-build`; the marker below puts the generated files
//! in the crate root.

pub mod user;

#[allow(dead_code)]
#[derive(mrclean::PackageId)]
#[package_id(debug = true)]
struct SanitizePackage;

mrclean::include_root_function!();
mrclean::include_sanitizations!();

/// A table populated with every generated function of this crate.
pub fn sanitizer_table() -> mrclean::SanitizerTable {
    let mut table = mrclean::SanitizerTable::new(mrclean::GenerationMode::Debug);
    register_sanitizations(&mut table);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{Account, Session, Untagged};

    #[derive(Debug, mrclean::Sanitize)]
    struct TestOnly {
        id: u64,
    }

    fn account() -> Account {
        Account::new(7, "a@b.com")
    }

    #[test]
    fn tagged_struct_renders_fields_in_order() {
        assert_eq!(account().sanitized_to_string(), "Account(id = 7, email = a@b.com)");
    }

    #[test]
    fn rendering_is_repeatable() {
        let account = account();
        assert_eq!(account.sanitized_to_string(), account.sanitized_to_string());
    }

    #[test]
    fn tuple_struct_uses_requested_formats() {
        let session = Session::new("tok", Some(3));
        assert_eq!(session.sanitized_to_string(), "Session(0 = tok, 1 = Some(3))");
    }

    #[test]
    fn untagged_struct_falls_back_to_debug() {
        let untagged = Untagged::new("plain");
        assert_eq!(
            untagged.sanitized_to_string(),
            "Untagged { note: \"plain\" }"
        );
    }

    #[test]
    fn test_module_structs_get_no_generated_function() {
        let local = TestOnly { id: 1 };
        assert_eq!(local.sanitized_to_string(), "TestOnly { id: 1 }");
        assert_eq!(local.id, 1);
    }

    #[test]
    fn table_dispatches_to_generated_functions() {
        let table = sanitizer_table();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.sanitized_to_string(&account()).unwrap(),
            "Account(id = 7, email = a@b.com)"
        );
        assert_eq!(
            table.sanitized_to_string(&Untagged::new("plain")).unwrap(),
            "Untagged { note: \"plain\" }"
        );
    }
}
