//! Test: unknown `#[mrclean(...)]` field options should fail.

use mrclean::Sanitize;

#[derive(Sanitize)]
struct Account {
    #[mrclean(hidden)]
    id: u64,
}

fn main() {}
