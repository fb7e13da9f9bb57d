//! End-to-end tests for the runtime API generated code relies on.
//!
//! The types below carry hand-written copies of what `mrclean-build` emits, so
//! these tests pin the runtime half of the contract:
//! - release bodies render `Name@<lowercase hex identity>`
//! - debug bodies render fields in declaration order
//! - the table falls back per mode when a type has no generated function

use mrclean::{
    identity_hash, GenerationMode, NotGenerated, SanitizerTable, NOT_GENERATED_MESSAGE,
};

#[derive(Debug)]
struct Account {
    id: u64,
    email: String,
}

impl Account {
    fn release_sanitized(&self) -> String {
        format!("Account@{:x}", identity_hash(self))
    }

    fn debug_sanitized(&self) -> String {
        format!("Account(id = {}, email = {})", self.id, self.email)
    }
}

#[derive(Debug)]
struct Contact {
    id: u64,
    email: String,
}

impl Contact {
    fn release_sanitized(&self) -> String {
        format!("Contact@{:x}", identity_hash(self))
    }
}

fn account() -> Account {
    Account {
        id: 7,
        email: "a@b.com".to_string(),
    }
}

#[test]
fn test_release_body_is_name_and_hex_identity() {
    let account = account();
    let rendered = account.release_sanitized();

    let (name, hash) = rendered.split_once('@').unwrap();
    assert_eq!(name, "Account");
    assert!(!hash.is_empty());
    assert!(hash
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    assert_eq!(usize::from_str_radix(hash, 16).unwrap(), identity_hash(&account));
}

#[test]
fn test_release_body_ignores_field_values() {
    let mut account = account();
    let before = account.release_sanitized();
    account.id = 99;
    account.email = "x@y.z".to_string();
    assert_eq!(before, account.release_sanitized());
    assert!(!before.contains("a@b.com"));
}

#[test]
fn test_release_bodies_differ_only_in_name() {
    let account = account();
    let contact = Contact {
        id: account.id,
        email: account.email.clone(),
    };

    let account_hash = account.release_sanitized().replace("Account@", "");
    let contact_hash = contact.release_sanitized().replace("Contact@", "");
    assert_eq!(
        usize::from_str_radix(&account_hash, 16).unwrap(),
        identity_hash(&account)
    );
    assert_eq!(
        usize::from_str_radix(&contact_hash, 16).unwrap(),
        identity_hash(&contact)
    );
    assert_eq!(contact.id, 7);
    assert_eq!(contact.email, "a@b.com");
}

#[test]
fn test_debug_body_example() {
    assert_eq!(account().debug_sanitized(), "Account(id = 7, email = a@b.com)");
}

#[test]
fn test_table_prefers_registered_function() {
    let mut table = SanitizerTable::new(GenerationMode::Release);
    table.register::<Account>(Account::release_sanitized);

    let account = account();
    assert_eq!(
        table.sanitized_to_string(&account).unwrap(),
        account.release_sanitized()
    );
}

#[test]
fn test_release_table_without_function_reports_message() {
    let table = SanitizerTable::new(GenerationMode::Release);
    let err: NotGenerated = table.sanitized_to_string(&account()).unwrap_err();
    assert_eq!(err.to_string(), NOT_GENERATED_MESSAGE);
    assert_eq!(
        NOT_GENERATED_MESSAGE,
        "No function generated! Make sure to annotate with @Sanitize"
    );
}

#[test]
fn test_debug_table_without_function_uses_debug() {
    let table = SanitizerTable::new(GenerationMode::Debug);
    assert_eq!(
        table.sanitized_to_string(&account()).unwrap(),
        "Account { id: 7, email: \"a@b.com\" }"
    );
}
