use mrclean::Sanitize;

#[derive(Debug, Sanitize)]
pub struct Account {
    pub(crate) id: u64,
    pub(crate) email: String,
}

impl Account {
    pub fn new(id: u64, email: &str) -> Self {
        Self {
            id,
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Sanitize)]
pub struct Session(pub(crate) String, #[mrclean(debug)] pub(crate) Option<u32>);

impl Session {
    pub fn new(token: &str, ttl: Option<u32>) -> Self {
        Self(token.to_string(), ttl)
    }
}

/// Not tagged: sanitizes through the root placeholder.
#[derive(Debug)]
pub struct Untagged {
    pub note: String,
}

impl Untagged {
    pub fn new(note: &str) -> Self {
        Self {
            note: note.to_string(),
        }
    }
}
