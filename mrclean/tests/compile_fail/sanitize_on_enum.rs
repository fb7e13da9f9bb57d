//! Test: `Sanitize` on an enum should fail.
//!
//! Enums have no fixed list of stored fields.

use mrclean::Sanitize;

#[derive(Sanitize)]
enum Status {
    Active,
    Suspended,
}

fn main() {}
